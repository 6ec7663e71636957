//! Value mutation and deletion protocols layered over traversal and the
//! balancing engine.
//!
//! None of these operations change the key of an existing entry.

use std::ops::{ControlFlow, RangeBounds};

use tracing::debug;

use crate::{
    iter::{Cursor, Direction},
    node, rank,
    store::NodeStore,
    AvlTree,
};

/// The decision returned by an [`AvlTree::alter()`] callback for the entry it
/// was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alter<V> {
    /// Leave the entry unchanged.
    Keep,
    /// Replace the entry's value.
    Replace(V),
    /// Remove the entry from the tree.
    Delete,
}

/// The outcome of [`AvlTree::alter()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Altered<V> {
    /// No entry exists for the key; the callback was not invoked.
    Absent,
    /// The entry was left unchanged.
    Kept,
    /// The entry's value was replaced, returning the previous value.
    Replaced(V),
    /// The entry was removed, returning its value.
    Deleted(V),
}

impl<V> Altered<V> {
    /// Returns true if an entry for the key existed.
    pub fn found(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Returns true if the tree was modified.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Replaced(_) | Self::Deleted(_))
    }
}

impl<K, V, S> AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Show the value of one entry for `key` to `f`, replacing it with the
    /// returned value, if any.
    ///
    /// Returns false if no entry exists for `key`.
    pub fn update<F>(&mut self, key: &K, f: F) -> bool
    where
        F: FnOnce(&K, &V) -> Option<V>,
    {
        let Some(n) = node::find(&self.store, key) else {
            return false;
        };

        if let Some(v) = f(self.store.key(n), self.store.value(n)) {
            self.store.replace_value(n, v);
        }
        true
    }

    /// Replace the value of one entry for `key`, returning the previous value.
    ///
    /// Returns [`None`] (dropping `value`) if no entry exists for `key`.
    pub fn replace(&mut self, key: &K, value: V) -> Option<V> {
        let n = node::find(&self.store, key)?;
        Some(self.store.replace_value(n, value))
    }

    /// Visit every entry in `direction`, replacing values as `f` returns them,
    /// until `f` breaks.
    pub fn update_iter<F>(&mut self, direction: Direction, f: F)
    where
        F: FnMut(&K, &V) -> (Option<V>, ControlFlow<()>),
    {
        self.update_range_iter(direction, .., f)
    }

    /// Show every entry with a key in `range` to `f` in ascending order,
    /// replacing values as `f` returns them.
    ///
    /// Returns the number of entries visited.
    pub fn update_range<R, F>(&mut self, range: R, mut f: F) -> usize
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> Option<V>,
    {
        let mut n_visited = 0;
        self.update_range_iter(Direction::Ascending, range, |k, v| {
            n_visited += 1;
            (f(k, v), ControlFlow::Continue(()))
        });
        n_visited
    }

    /// Visit every entry with a key in `range` in `direction`, replacing values
    /// as `f` returns them, until `f` breaks.
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use ordavl::{AvlTree, Direction};
    ///
    /// let mut t = (0..10).map(|v| (v, 0)).collect::<AvlTree<_, _>>();
    ///
    /// t.update_range_iter(Direction::Descending, 2..8, |k, _| {
    ///     let flow = if *k == 5 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) };
    ///     (Some(1), flow)
    /// });
    ///
    /// let got = t.iter(Direction::Ascending).map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(got, [0, 0, 0, 0, 0, 1, 1, 1, 0, 0]);
    /// ```
    pub fn update_range_iter<R, F>(&mut self, direction: Direction, range: R, mut f: F)
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> (Option<V>, ControlFlow<()>),
    {
        // Values are swapped in place, leaving the tree structure (and
        // therefore the cursor) untouched.
        let mut cursor = Cursor::new(&self.store, direction, &range);
        while let Some(n) = cursor.next(&self.store) {
            let (value, flow) = f(self.store.key(n), self.store.value(n));
            if let Some(v) = value {
                self.store.replace_value(n, v);
            }
            if flow.is_break() {
                return;
            }
        }
    }

    /// Set the value of every entry with a key in `range` to `value`.
    ///
    /// Returns the number of entries replaced.
    pub fn replace_range<R>(&mut self, range: R, value: V) -> usize
    where
        R: RangeBounds<K>,
        V: Clone,
    {
        self.update_range(range, |_, _| Some(value.clone()))
    }

    /// Visit every entry in `direction`, removing those for which `f` returns
    /// true, until `f` breaks.
    ///
    /// Returns the removed entries in visitation order.
    pub fn delete_iter<F>(&mut self, direction: Direction, f: F) -> Vec<(K, V)>
    where
        F: FnMut(&K, &V) -> (bool, ControlFlow<()>),
    {
        self.delete_range_iter(direction, .., f)
    }

    /// Remove every entry with a key in `range`, returning them in ascending
    /// order.
    pub fn delete_range<R>(&mut self, range: R) -> Vec<(K, V)>
    where
        R: RangeBounds<K>,
    {
        self.delete_range_iter(Direction::Ascending, range, |_, _| {
            (true, ControlFlow::Continue(()))
        })
    }

    /// Visit every entry with a key in `range` in `direction`, removing those
    /// for which `f` returns true, until `f` breaks.
    ///
    /// Each entry is unlinked (and the tree rebalanced) as soon as `f` asks
    /// for it; the walk continues from the entry that followed it. Entries
    /// not yet visited when `f` breaks are left untouched.
    ///
    /// Returns the removed entries in visitation order.
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use ordavl::{AvlTree, Direction};
    ///
    /// let mut t = (0..10).map(|v| (v, ())).collect::<AvlTree<_, _>>();
    ///
    /// let removed = t.delete_range_iter(Direction::Ascending, 2.., |k, _| {
    ///     (k % 2 == 0, ControlFlow::Continue(()))
    /// });
    ///
    /// assert_eq!(removed, [(2, ()), (4, ()), (6, ()), (8, ())]);
    /// assert_eq!(t.len(), 6);
    /// ```
    pub fn delete_range_iter<R, F>(&mut self, direction: Direction, range: R, f: F) -> Vec<(K, V)>
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> (bool, ControlFlow<()>),
    {
        let deleted = if self.store.tracks_parents() {
            self.delete_walk_linked(direction, &range, f)
        } else {
            self.delete_walk_ranked(direction, &range, f)
        };

        debug!(
            n_deleted = deleted.len(),
            n_remaining = self.len(),
            ?direction,
            "delete walk complete"
        );

        deleted
    }

    /// Show one entry for `key` to `f`, and apply the returned [`Alter`]
    /// decision to it.
    ///
    /// ```
    /// use ordavl::{Alter, Altered, AvlTree};
    ///
    /// let mut t = AvlTree::new();
    /// t.insert("bananas", 1);
    ///
    /// let got = t.alter(&"bananas", |_, v| Alter::Replace(v + 1));
    /// assert_eq!(got, Altered::Replaced(1));
    ///
    /// let got = t.alter(&"bananas", |_, _| Alter::Delete);
    /// assert_eq!(got, Altered::Deleted(2));
    ///
    /// assert_eq!(t.alter(&"bananas", |_, _| Alter::Keep), Altered::Absent);
    /// ```
    pub fn alter<F>(&mut self, key: &K, f: F) -> Altered<V>
    where
        F: FnOnce(&K, &V) -> Alter<V>,
    {
        let Some((path, n)) = node::descend(&self.store, key) else {
            return Altered::Absent;
        };

        match f(self.store.key(n), self.store.value(n)) {
            Alter::Keep => Altered::Kept,
            Alter::Replace(v) => Altered::Replaced(self.store.replace_value(n, v)),
            Alter::Delete => Altered::Deleted(node::remove_at(&mut self.store, path, n).1),
        }
    }

    /// A deleting walk stepping between nodes through parent links.
    ///
    /// The next node is located before the current node is unlinked. Removal
    /// never moves a payload between nodes, so the captured handle remains
    /// valid (and remains the next node) after the unlink.
    fn delete_walk_linked<R, F>(&mut self, direction: Direction, range: &R, mut f: F) -> Vec<(K, V)>
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> (bool, ControlFlow<()>),
    {
        let mut deleted = Vec::new();

        let mut ptr = Cursor::new(&self.store, direction, range).next(&self.store);
        while let Some(n) = ptr {
            if !range.contains(self.store.key(n)) {
                break;
            }

            let (delete, flow) = f(self.store.key(n), self.store.value(n));
            ptr = node::step(&self.store, n, direction);

            if delete {
                let path = node::path_from_parents(&self.store, n);
                deleted.push(node::remove_at(&mut self.store, path, n));
            }

            if flow.is_break() {
                break;
            }
        }

        deleted
    }

    /// A deleting walk addressing nodes by in-order index.
    ///
    /// The set of nodes to visit is fixed up-front as an index span. Removing
    /// a node shifts the index of every node after it down by one, so an
    /// ascending walk stays on the same index after a removal, while a
    /// descending walk is unaffected.
    fn delete_walk_ranked<R, F>(&mut self, direction: Direction, range: &R, mut f: F) -> Vec<(K, V)>
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> (bool, ControlFlow<()>),
    {
        let span = rank::span(&self.store, range);
        let mut deleted = Vec::new();
        let mut n_kept = 0;

        for n_visited in 0..span.len() {
            let index = match direction {
                Direction::Ascending => span.start + n_kept,
                Direction::Descending => span.end - 1 - n_visited,
            };

            let Some((path, n)) = rank::select(&self.store, index) else {
                break;
            };

            let (delete, flow) = f(self.store.key(n), self.store.value(n));
            if delete {
                deleted.push(node::remove_at(&mut self.store, path, n));
            } else {
                n_kept += 1;
            }

            if flow.is_break() {
                break;
            }
        }

        deleted
    }
}
