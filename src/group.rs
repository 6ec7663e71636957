//! Operations over every entry sharing a key.
//!
//! Entries with equal keys are always adjacent in key order, so the group for
//! a key is simply the range `key..=key`, yielded in insertion order.

use tracing::debug;

use crate::{
    iter::{Cursor, Direction, Iter},
    node::{self, Side},
    store::NodeStore,
    AvlTree,
};

impl<K, V, S> AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Iterate over every entry for `key`, in insertion order.
    ///
    /// The returned iterator is empty if `key` is not present.
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut t = AvlTree::multimap();
    /// t.insert(2, "x");
    /// t.insert(1, "w");
    /// t.insert(2, "y");
    ///
    /// let got = t.find_all(&2).map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(got, ["x", "y"]);
    /// ```
    pub fn find_all(&self, key: &K) -> Iter<'_, K, V, S> {
        Iter::new(&self.store, self.group_cursor(key))
    }

    /// Iterate over every entry sharing the smallest key.
    pub fn min_all(&self) -> Iter<'_, K, V, S> {
        self.edge_group(Side::Left)
    }

    /// Iterate over every entry sharing the largest key.
    pub fn max_all(&self) -> Iter<'_, K, V, S> {
        self.edge_group(Side::Right)
    }

    /// Show every entry for `key` to `f` in insertion order, replacing values
    /// as `f` returns them.
    ///
    /// Returns the number of entries visited.
    pub fn update_all<F>(&mut self, key: &K, mut f: F) -> usize
    where
        F: FnMut(&K, &V) -> Option<V>,
    {
        let mut cursor = self.group_cursor(key);
        let mut n_visited = 0;

        while let Some(n) = cursor.next(&self.store) {
            n_visited += 1;
            if let Some(v) = f(self.store.key(n), self.store.value(n)) {
                self.store.replace_value(n, v);
            }
        }

        n_visited
    }

    /// Set the value of every entry for `key` to `value`.
    ///
    /// Returns the number of entries replaced.
    pub fn replace_all(&mut self, key: &K, value: V) -> usize
    where
        V: Clone,
    {
        self.update_all(key, |_, _| Some(value.clone()))
    }

    /// Remove every entry for `key`, returning the removed values.
    ///
    /// Entries are removed one at a time, each removal rebalancing the tree,
    /// so the values are not returned in any particular order.
    pub fn delete_all(&mut self, key: &K) -> Vec<V> {
        let mut removed = Vec::new();
        while let Some(v) = self.remove(key) {
            removed.push(v);
        }

        debug!(n_removed = removed.len(), "deleted key group");
        removed
    }

    fn group_cursor(&self, key: &K) -> Cursor<S::Handle> {
        Cursor::new(&self.store, Direction::Ascending, &(key..=key))
    }

    fn edge_group(&self, side: Side) -> Iter<'_, K, V, S> {
        let cursor = match self.store.root() {
            Some(root) => {
                let key = self.store.key(node::extreme(&self.store, root, side));
                self.group_cursor(key)
            }
            None => Cursor::empty(Direction::Ascending),
        };

        Iter::new(&self.store, cursor)
    }
}
