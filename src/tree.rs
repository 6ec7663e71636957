use std::{
    marker::PhantomData,
    ops::{ControlFlow, RangeBounds},
};

use crate::{
    arena::ArenaStore,
    config::{KeyPolicy, TreeConfig},
    iter::{Cursor, Direction, IntoIter, Iter},
    node::{self, Insertion, Side},
    rank,
    store::NodeStore,
};

/// The outcome of [`AvlTree::insert_with()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted<V> {
    /// A new entry was added to the tree.
    New,

    /// The key existed and its value was overwritten, returning the old
    /// value.
    Replaced(V),

    /// The key existed and overwriting was not requested; the tree is
    /// unchanged and the rejected value is handed back.
    Rejected(V),
}

/// An AVL-balanced ordered map or multimap.
///
/// Every node carries the size of its subtree, so counting the entries within
/// a key range, or locating the entry at a given rank, costs O(log n).
///
/// Whether multiple entries may share a key is fixed at construction by the
/// tree's [`KeyPolicy`]. Entries sharing a key are adjacent in iteration
/// order, in the order they were inserted.
///
/// Nodes live in a [`NodeStore`], an [`ArenaStore`] by default.
///
/// ```
/// use ordavl::{AvlTree, Direction};
///
/// let mut t = AvlTree::new();
/// t.insert(5, "a");
/// t.insert(3, "b");
/// t.insert(8, "c");
/// t.insert(1, "d");
///
/// let got = t.iter(Direction::Ascending).collect::<Vec<_>>();
/// assert_eq!(got, [(&1, &"d"), (&3, &"b"), (&5, &"a"), (&8, &"c")]);
///
/// assert_eq!(t.count_range(2..=5), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AvlTree<K, V, S = ArenaStore<K, V>> {
    pub(crate) store: S,
    pub(crate) policy: KeyPolicy,
    _entries: PhantomData<(K, V)>,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::with_config(TreeConfig::default())
    }
}

impl<K, V> AvlTree<K, V> {
    /// An empty map allowing at most one entry per key.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty multimap, allowing any number of entries per key.
    pub fn multimap() -> Self {
        Self::with_config(TreeConfig::default().with_key_policy(KeyPolicy::AllowDuplicates))
    }

    pub fn with_config(config: TreeConfig) -> Self {
        let store = if config.parent_links() {
            ArenaStore::new()
        } else {
            ArenaStore::without_parents()
        };

        Self::with_store(store, config.key_policy())
    }
}

impl<K, V, S> AvlTree<K, V, S> {
    /// Construct a tree over an empty `store`.
    pub fn with_store(store: S, policy: KeyPolicy) -> Self {
        Self {
            store,
            policy,
            _entries: PhantomData,
        }
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// Borrow the underlying node store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<K, V, S> AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Insert `key` and `value`, overwriting (and returning) the value of an
    /// existing entry when duplicate keys are not allowed.
    ///
    /// In a multimap the entry is always added, after any existing entries
    /// with an equal key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.insert_with(true, key, value) {
            Inserted::New => None,
            Inserted::Replaced(v) => Some(v),
            Inserted::Rejected(_) => unreachable!("overwriting insert rejected"),
        }
    }

    /// Insert `key` and `value`, choosing whether an existing entry for `key`
    /// is overwritten.
    ///
    /// `overwrite` has no effect in a multimap, where the entry is always
    /// added.
    ///
    /// ```
    /// use ordavl::{AvlTree, Inserted};
    ///
    /// let mut t = AvlTree::new();
    /// assert_eq!(t.insert_with(false, 1, "a"), Inserted::New);
    /// assert_eq!(t.insert_with(false, 1, "b"), Inserted::Rejected("b"));
    /// assert_eq!(t.insert_with(true, 1, "c"), Inserted::Replaced("a"));
    /// ```
    pub fn insert_with(&mut self, overwrite: bool, key: K, value: V) -> Inserted<V> {
        match node::insert(&mut self.store, self.policy, overwrite, key, value) {
            Insertion::New(_) => Inserted::New,
            Insertion::Replaced(v) => Inserted::Replaced(v),
            Insertion::Rejected(v) => Inserted::Rejected(v),
        }
    }

    /// Remove one entry for `key`, returning its value.
    ///
    /// In a multimap the removed entry is the first one met when descending
    /// from the root, which is not necessarily the oldest or newest entry for
    /// `key`. See [`AvlTree::delete_all()`] to remove every entry.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (path, n) = node::descend(&self.store, key)?;
        Some(node::remove_at(&mut self.store, path, n).1)
    }

    /// Returns the key-value pair of an entry for `key`.
    pub fn find(&self, key: &K) -> Option<(&K, &V)> {
        node::find(&self.store, key).map(|n| self.entry_at(n))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        node::find(&self.store, key).map(|n| self.store.value(n))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        node::find(&self.store, key).map(|n| self.store.value_mut(n))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        node::find(&self.store, key).is_some()
    }

    /// The entry with the smallest key (the oldest such entry in a multimap).
    pub fn min(&self) -> Option<(&K, &V)> {
        self.edge(Side::Left).map(|n| self.entry_at(n))
    }

    /// The entry with the largest key (the newest such entry in a multimap).
    pub fn max(&self) -> Option<(&K, &V)> {
        self.edge(Side::Right).map(|n| self.entry_at(n))
    }

    /// The number of entries, in O(1).
    pub fn len(&self) -> usize {
        self.store.count(self.store.root())
    }

    pub fn is_empty(&self) -> bool {
        self.store.root().is_none()
    }

    /// The height of the tree, 0 when empty.
    pub fn height(&self) -> u8 {
        node::height(&self.store, self.store.root())
    }

    /// The entry held by the root node.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.store.root().map(|n| self.entry_at(n))
    }

    /// The number of entries with a key in `range`, in O(log n).
    ///
    /// An inverted range contains no entries.
    pub fn count_range<R>(&self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        rank::span(&self.store, &range).len()
    }

    /// The number of entries with a key strictly less than `key`.
    pub fn rank(&self, key: &K) -> usize {
        rank::count_lt(&self.store, key)
    }

    /// The entry at position `index` when iterating in `direction`.
    pub fn nth(&self, direction: Direction, index: usize) -> Option<(&K, &V)> {
        let index = match direction {
            Direction::Ascending => index,
            Direction::Descending => self.len().checked_sub(index + 1)?,
        };
        rank::select(&self.store, index).map(|(_, n)| self.entry_at(n))
    }

    /// Iterate over all entries in `direction`.
    pub fn iter(&self, direction: Direction) -> Iter<'_, K, V, S> {
        self.range(direction, ..)
    }

    /// Iterate over the entries with a key in `range`, in `direction`.
    ///
    /// Only the subtrees that may hold keys within `range` are descended into.
    ///
    /// ```
    /// use ordavl::{AvlTree, Direction};
    ///
    /// let t = (0..10).map(|v| (v, v * 10)).collect::<AvlTree<_, _>>();
    ///
    /// let got = t.range(Direction::Descending, 3..=5).map(|(k, _)| *k).collect::<Vec<_>>();
    /// assert_eq!(got, [5, 4, 3]);
    /// ```
    pub fn range<R>(&self, direction: Direction, range: R) -> Iter<'_, K, V, S>
    where
        R: RangeBounds<K>,
    {
        Iter::new(&self.store, Cursor::new(&self.store, direction, &range))
    }

    /// Visit every entry in `direction` until `visit` breaks.
    pub fn walk<F>(&self, direction: Direction, visit: F)
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        self.walk_range(direction, .., visit)
    }

    /// Visit every entry with a key in `range`, in `direction`, until `visit`
    /// breaks.
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use ordavl::{AvlTree, Direction};
    ///
    /// let t = (0..10).map(|v| (v, ())).collect::<AvlTree<_, _>>();
    ///
    /// let mut seen = vec![];
    /// t.walk_range(Direction::Ascending, 4.., |k, _| {
    ///     seen.push(*k);
    ///     if *k == 6 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(seen, [4, 5, 6]);
    /// ```
    pub fn walk_range<R, F>(&self, direction: Direction, range: R, mut visit: F)
    where
        R: RangeBounds<K>,
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        for (k, v) in self.range(direction, range) {
            if visit(k, v).is_break() {
                return;
            }
        }
    }

    /// Collect the entries with a key in `range`, in `direction`.
    pub fn collect_range<R>(&self, direction: Direction, range: R) -> Vec<(&K, &V)>
    where
        R: RangeBounds<K>,
    {
        self.range(direction, range).collect()
    }

    pub(crate) fn entry_at(&self, n: S::Handle) -> (&K, &V) {
        (self.store.key(n), self.store.value(n))
    }

    fn edge(&self, side: Side) -> Option<S::Handle> {
        self.store
            .root()
            .map(|root| node::extreme(&self.store, root, side))
    }
}

impl<K, V, S> IntoIterator for AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.store)
    }
}

impl<'a, K, V, S> IntoIterator for &'a AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter(Direction::Ascending)
    }
}

impl<K, V, S> Extend<(K, V)> for AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}
