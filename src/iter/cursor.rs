use std::ops::{Bound, RangeBounds};

use crate::{node::child, rank, store::NodeStore};

use super::Direction;

/// A depth-first, in-order walk over node handles, restricted to a contiguous
/// span of the key space.
///
/// A [`Cursor`] holds no borrow of the store it walks; the store is passed to
/// each call to [`Cursor::next()`] instead, allowing values to be mutated
/// between steps. The tree structure must not change while a cursor is in
/// use.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<H> {
    stack: Vec<H>,
    direction: Direction,

    /// The number of nodes yet to be yielded.
    ///
    /// Computed up-front from the subtree counts, so the far bound of the
    /// range never has to be compared against visited keys.
    remaining: usize,
}

impl<H> Cursor<H>
where
    H: Copy,
{
    pub(crate) fn empty(direction: Direction) -> Self {
        Self {
            stack: vec![],
            direction,
            remaining: 0,
        }
    }

    pub(crate) fn new<K, V, S, R>(s: &S, direction: Direction, range: &R) -> Self
    where
        K: Ord,
        S: NodeStore<K, V, Handle = H>,
        R: RangeBounds<K> + ?Sized,
    {
        let mut this = Self {
            remaining: rank::span(s, range).len(),
            ..Self::empty(direction)
        };

        if this.remaining == 0 {
            return this;
        }

        // Descend from the root towards the near bound of the range, pushing
        // every node within the bound so that the first node in range ends up
        // on the top of the stack.
        //
        // Nodes outside the bound (and the subtree on their far side from the
        // range) are stepped over, never pushed.
        let mut ptr = s.root();
        while let Some(n) = ptr {
            let outside = match direction {
                Direction::Ascending => before_start(range.start_bound(), s.key(n)),
                Direction::Descending => after_end(range.end_bound(), s.key(n)),
            };

            if outside {
                ptr = child(s, n, direction.forward());
            } else {
                this.stack.push(n);
                ptr = child(s, n, direction.forward().opposite());
            }
        }

        this
    }

    /// The number of nodes left to yield.
    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    fn push_subtree<K, V, S>(&mut self, s: &S, subtree_root: Option<H>)
    where
        S: NodeStore<K, V, Handle = H>,
    {
        let back = self.direction.forward().opposite();

        let mut ptr = subtree_root;
        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = child(s, v, back);
        }
    }

    /// Advance the cursor, returning the handle of the next node in range.
    ///
    /// The yielded node is no longer referenced by the cursor once returned.
    pub(crate) fn next<K, V, S>(&mut self, s: &S) -> Option<H>
    where
        S: NodeStore<K, V, Handle = H>,
    {
        if self.remaining == 0 {
            return None;
        }

        let v = self.stack.pop()?;
        self.remaining -= 1;

        // Descend down the near side of the forward child of this node, if
        // any.
        if self.remaining > 0 {
            self.push_subtree(s, child(s, v, self.direction.forward()));
        }

        Some(v)
    }
}

/// Returns true if `key` sorts before the start of the range.
pub(crate) fn before_start<K: Ord>(bound: Bound<&K>, key: &K) -> bool {
    match bound {
        Bound::Included(v) => key < v,
        Bound::Excluded(v) => key <= v,
        Bound::Unbounded => false,
    }
}

/// Returns true if `key` sorts after the end of the range.
pub(crate) fn after_end<K: Ord>(bound: Bound<&K>, key: &K) -> bool {
    match bound {
        Bound::Included(v) => key > v,
        Bound::Excluded(v) => key >= v,
        Bound::Unbounded => false,
    }
}
