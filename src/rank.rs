//! Order-statistic descents over the augmented subtree counts.

use std::ops::{Bound, Range, RangeBounds};

use crate::{
    node::{Path, Side},
    store::NodeStore,
};

/// Count the nodes whose key satisfies `below`, where `below` holds for a
/// prefix of the in-order key sequence.
///
/// Whole left subtrees are accounted for from their stored counts, making
/// this a single O(log n) descent.
fn count_prefix<K, V, S, F>(s: &S, below: F) -> usize
where
    S: NodeStore<K, V>,
    F: Fn(&K) -> bool,
{
    let mut n_below = 0;
    let mut ptr = s.root();

    while let Some(n) = ptr {
        if below(s.key(n)) {
            // This node and its entire left subtree precede the boundary.
            n_below += s.count(s.left(n)) + 1;
            ptr = s.right(n);
        } else {
            ptr = s.left(n);
        }
    }

    n_below
}

/// The number of nodes with a key strictly less than `key`.
pub(crate) fn count_lt<K, V, S>(s: &S, key: &K) -> usize
where
    K: Ord,
    S: NodeStore<K, V>,
{
    count_prefix(s, |v| v < key)
}

/// The number of nodes with a key less than or equal to `key`.
pub(crate) fn count_le<K, V, S>(s: &S, key: &K) -> usize
where
    K: Ord,
    S: NodeStore<K, V>,
{
    count_prefix(s, |v| v <= key)
}

/// Resolve `range` to the in-order index span of the nodes it contains.
///
/// An inverted range resolves to an empty span.
pub(crate) fn span<K, V, S, R>(s: &S, range: &R) -> Range<usize>
where
    K: Ord,
    S: NodeStore<K, V>,
    R: RangeBounds<K> + ?Sized,
{
    let start = match range.start_bound() {
        Bound::Included(v) => count_lt(s, v),
        Bound::Excluded(v) => count_le(s, v),
        Bound::Unbounded => 0,
    };

    let end = match range.end_bound() {
        Bound::Included(v) => count_le(s, v),
        Bound::Excluded(v) => count_lt(s, v),
        Bound::Unbounded => s.count(s.root()),
    };

    start..end.max(start)
}

/// Locate the node at in-order `index`, returning it with the path from the
/// root.
pub(crate) fn select<K, V, S>(s: &S, mut index: usize) -> Option<(Path<S::Handle>, S::Handle)>
where
    S: NodeStore<K, V>,
{
    let mut path = Vec::new();
    let mut ptr = s.root();

    while let Some(n) = ptr {
        let n_left = s.count(s.left(n));
        let side = match index.cmp(&n_left) {
            std::cmp::Ordering::Less => Side::Left,
            std::cmp::Ordering::Equal => return Some((path, n)),
            std::cmp::Ordering::Greater => {
                index -= n_left + 1;
                Side::Right
            }
        };

        path.push((n, side));
        ptr = crate::node::child(s, n, side);
    }

    None
}
