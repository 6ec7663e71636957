use std::cmp::Ordering;

use tracing::trace;

use crate::{config::KeyPolicy, iter::Direction, store::NodeStore};

/// The child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A descent from the root: each step records a visited node and the child
/// slot taken out of it.
pub(crate) type Path<H> = Vec<(H, Side)>;

/// The outcome of [`insert()`], carrying the handle of a newly created node.
#[derive(Debug)]
pub(crate) enum Insertion<H, V> {
    New(H),
    Replaced(V),
    Rejected(V),
}

pub(crate) fn child<K, V, S>(s: &S, n: S::Handle, side: Side) -> Option<S::Handle>
where
    S: NodeStore<K, V>,
{
    match side {
        Side::Left => s.left(n),
        Side::Right => s.right(n),
    }
}

pub(crate) fn height<K, V, S>(s: &S, n: Option<S::Handle>) -> u8
where
    S: NodeStore<K, V>,
{
    n.map(|v| s.height(v)).unwrap_or_default()
}

/// Link `left` and `right` under `n`, recomputing its height (and, through the
/// store, its subtree count).
fn update<K, V, S>(s: &mut S, n: S::Handle, left: Option<S::Handle>, right: Option<S::Handle>)
where
    S: NodeStore<K, V>,
{
    let h = 1 + height(s, left).max(height(s, right));
    s.set_children(n, left, right, h);
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
pub(crate) fn balance<K, V, S>(s: &S, n: S::Handle) -> i16
where
    S: NodeStore<K, V>,
{
    height(s, s.left(n)) as i16 - height(s, s.right(n)) as i16
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`,
/// returning the new subtree root `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// The caller is responsible for linking `P` into the parent of `x`.
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<K, V, S>(s: &mut S, x: S::Handle) -> S::Handle
where
    S: NodeStore<K, V>,
{
    let p = s.right(x).expect("rotate left without right child");
    trace!(node = ?x, pivot = ?p, "rotate left");

    let (x_left, p_left, p_right) = (s.left(x), s.left(p), s.right(p));
    update(s, x, x_left, p_left);
    update(s, p, Some(x), p_right);

    p
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`,
/// returning the new subtree root `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<K, V, S>(s: &mut S, y: S::Handle) -> S::Handle
where
    S: NodeStore<K, V>,
{
    let p = s.left(y).expect("rotate right without left child");
    trace!(node = ?y, pivot = ?p, "rotate right");

    let (p_left, p_right, y_right) = (s.left(p), s.right(p), s.right(y));
    update(s, y, p_right, y_right);
    update(s, p, p_left, Some(y));

    p
}

/// Restore the AVL balance of the subtree rooted at `n`, returning the
/// (possibly new) subtree root.
///
/// The height of `n` must be current, and both child subtrees must already be
/// balanced.
fn rebalance<K, V, S>(s: &mut S, n: S::Handle) -> S::Handle
where
    S: NodeStore<K, V>,
{
    let (left, right) = (s.left(n), s.right(n));

    let root = match balance(s, n) {
        // Left-heavy
        (2..) if left.map(|v| balance(s, v)).unwrap_or_default() >= 0 => rotate_right(s, n),
        (2..) => {
            let left = left.map(|v| rotate_left(s, v));
            update(s, n, left, right);
            rotate_right(s, n)
        }
        // Right-heavy
        (..=-2) if right.map(|v| balance(s, v)).unwrap_or_default() <= 0 => rotate_left(s, n),
        (..=-2) => {
            let right = right.map(|v| rotate_right(s, v));
            update(s, n, left, right);
            rotate_left(s, n)
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => n,
    };

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(s, root).abs() <= 1);
    root
}

/// Walk `path` bottom-up, linking `subtree` into the last recorded slot and
/// updating / rebalancing every node on the way back to the root.
fn rebuild<K, V, S>(s: &mut S, path: Path<S::Handle>, mut subtree: Option<S::Handle>)
where
    S: NodeStore<K, V>,
{
    for (n, side) in path.into_iter().rev() {
        let (left, right) = match side {
            Side::Left => (subtree, s.right(n)),
            Side::Right => (s.left(n), subtree),
        };
        update(s, n, left, right);
        subtree = Some(rebalance(s, n));
    }

    s.set_root(subtree);
}

/// Insert `key` into the tree held by `s`.
///
/// A key equal to an existing node's key descends right when duplicates are
/// allowed, placing it after every existing node with that key. Otherwise the
/// existing node's value is replaced (when `overwrite` is set) or the value is
/// handed back untouched.
pub(crate) fn insert<K, V, S>(
    s: &mut S,
    policy: KeyPolicy,
    overwrite: bool,
    key: K,
    value: V,
) -> Insertion<S::Handle, V>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    let mut path = Vec::new();
    let mut ptr = s.root();

    while let Some(n) = ptr {
        let side = match key.cmp(s.key(n)) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => match policy {
                KeyPolicy::AllowDuplicates => Side::Right,
                KeyPolicy::Unique if overwrite => {
                    // The tree structure is not modified, so it does not
                    // require rebalancing.
                    return Insertion::Replaced(s.replace_value(n, value));
                }
                KeyPolicy::Unique => return Insertion::Rejected(value),
            },
        };

        path.push((n, side));
        ptr = child(s, n, side);
    }

    let n = s.create(None, None, 1, key, value);
    rebuild(s, path, Some(n));

    Insertion::New(n)
}

/// Locate the topmost node holding `key`.
pub(crate) fn find<K, V, S>(s: &S, key: &K) -> Option<S::Handle>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    let mut ptr = s.root();
    while let Some(n) = ptr {
        ptr = match key.cmp(s.key(n)) {
            Ordering::Less => s.left(n),
            Ordering::Equal => return Some(n),
            Ordering::Greater => s.right(n),
        };
    }
    None
}

/// Like [`find()`], also returning the path from the root to the node.
pub(crate) fn descend<K, V, S>(s: &S, key: &K) -> Option<(Path<S::Handle>, S::Handle)>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    let mut path = Vec::new();
    let mut ptr = s.root();

    while let Some(n) = ptr {
        let side = match key.cmp(s.key(n)) {
            Ordering::Less => Side::Left,
            Ordering::Equal => return Some((path, n)),
            Ordering::Greater => Side::Right,
        };
        path.push((n, side));
        ptr = child(s, n, side);
    }

    None
}

/// Follow `side` from `n` until the edge of the subtree.
pub(crate) fn extreme<K, V, S>(s: &S, mut n: S::Handle, side: Side) -> S::Handle
where
    S: NodeStore<K, V>,
{
    while let Some(v) = child(s, n, side) {
        n = v;
    }
    n
}

/// Rebuild the path from the root to `n` by following parent pointers.
///
/// Must only be called when the store tracks parents.
pub(crate) fn path_from_parents<K, V, S>(s: &S, n: S::Handle) -> Path<S::Handle>
where
    S: NodeStore<K, V>,
{
    debug_assert!(s.tracks_parents());

    let mut path = Vec::new();
    let mut child = n;
    while let Some(p) = s.parent(child) {
        let side = if s.left(p) == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(s.right(p), Some(child));
            Side::Right
        };
        path.push((p, side));
        child = p;
    }

    path.reverse();
    path
}

/// The node following `n` when walking in `direction`, located through parent
/// pointers.
///
/// Must only be called when the store tracks parents.
pub(crate) fn step<K, V, S>(s: &S, n: S::Handle, direction: Direction) -> Option<S::Handle>
where
    S: NodeStore<K, V>,
{
    debug_assert!(s.tracks_parents());

    let forward = direction.forward();

    // The next node is the nearest node of the forward subtree, if any.
    if let Some(v) = child(s, n, forward) {
        return Some(extreme(s, v, forward.opposite()));
    }

    // Otherwise it is the first ancestor reached from its "backward" side.
    let mut child_ptr = n;
    while let Some(p) = s.parent(child_ptr) {
        if child(s, p, forward.opposite()) == Some(child_ptr) {
            return Some(p);
        }
        child_ptr = p;
    }

    None
}

/// Unlink the node `target` reached via `path` and free it, rebalancing every
/// ancestor and returning the node's payload.
///
/// This node may have 0, 1 or 2 child node(s):
///
/// ```text
///                          +----------+
///                          |  parent  |
///                          +----------+
///                                |
///                                v
///                          +----------+
///                     +----|  target  |----+
///                     |    +----------+    |
///                     |                    |
///                     v                    v
///               +-----------+       +------------+
///               |   left    |       |   right    |
///               +-----------+       +------------+
/// ```
///
/// With two children, the in-order successor (the left-most node of "right")
/// is unlinked from its position and relinked in place of "target", adopting
/// both of its subtrees. Otherwise the only child (if any) replaces "target".
///
/// Nodes other than `target` keep their identity: no key or value moves
/// between handles.
pub(crate) fn remove_at<K, V, S>(s: &mut S, mut path: Path<S::Handle>, target: S::Handle) -> (K, V)
where
    S: NodeStore<K, V>,
{
    let subtree = match (s.left(target), s.right(target)) {
        (Some(left), Some(right)) => {
            // Descend the left edge of "right" to the successor, recording the
            // nodes that must be rebalanced once it is unlinked.
            let mut tail = Vec::new();
            let mut succ = right;
            while let Some(v) = s.left(succ) {
                tail.push((succ, Side::Left));
                succ = v;
            }

            // The successor has no left child; its right subtree (if any) is
            // linked into the slot it vacates.
            let succ_right = s.right(succ);

            // When the successor is "right" itself, it keeps its own right
            // subtree. Otherwise it adopts "right", which is then rebuilt
            // bottom-up through "tail".
            let adopted_right = if tail.is_empty() {
                succ_right
            } else {
                Some(right)
            };
            update(s, succ, Some(left), adopted_right);

            path.push((succ, Side::Right));
            path.extend(tail);
            succ_right
        }
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    };

    trace!(node = ?target, "unlink node");
    rebuild(s, path, subtree);
    s.release(target)
}
