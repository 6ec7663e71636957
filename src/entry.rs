use crate::{
    arena::ArenaStore,
    node::{self, Insertion},
    store::NodeStore,
    AvlTree,
};

/// A view into a single entry in an [`AvlTree`], which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`AvlTree`].
///
/// [`entry`]: AvlTree::entry
#[derive(Debug)]
pub enum Entry<'a, K, V, S = ArenaStore<K, V>>
where
    S: NodeStore<K, V>,
{
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),
}

/// A view into a vacant entry in an [`AvlTree`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V, S = ArenaStore<K, V>>
where
    S: NodeStore<K, V>,
{
    key: K,
    tree: &'a mut AvlTree<K, V, S>,
}

/// A view into an occupied entry in an [`AvlTree`].
/// It is part of the [`Entry`] enum.
///
/// In a multimap this is the first entry for the key met when descending from
/// the root, as for [`AvlTree::find()`].
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V, S = ArenaStore<K, V>>
where
    S: NodeStore<K, V>,
{
    key: K,
    node: S::Handle,
    tree: &'a mut AvlTree<K, V, S>,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Gets a reference to the key that would be used when inserting a value
    /// through the VacantEntry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the VacantEntry's key,
    /// and returns a mutable reference to it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        let tree = self.tree;
        let n = insert_vacant(tree, self.key, value);
        tree.store.value_mut(n)
    }
}

/// Insert `key` into `tree`, which must not hold it, returning the new node.
fn insert_vacant<K, V, S>(tree: &mut AvlTree<K, V, S>, key: K, value: V) -> S::Handle
where
    K: Ord,
    S: NodeStore<K, V>,
{
    match node::insert(&mut tree.store, tree.policy, false, key, value) {
        Insertion::New(n) => n,
        // The key was absent when the entry was created, and the tree has
        // been exclusively borrowed since.
        Insertion::Replaced(_) | Insertion::Rejected(_) => unreachable!(),
    }
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Gets a reference to the key in the entry.
    #[inline]
    pub fn key(&self) -> &K {
        self.tree.store.key(self.node)
    }

    /// Gets a reference to the value in the entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree.store.value(self.node)
    }

    /// Gets a mutable reference to the value in the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.store.value_mut(self.node)
    }

    /// Converts the entry into a mutable reference to its value.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.store.value_mut(self.node)
    }

    /// Sets the value of the entry with the OccupiedEntry's key,
    /// and returns the entry's old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        self.tree.store.replace_value(self.node, value)
    }

    /// Takes the value of the entry out of the tree, and returns it.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Take ownership of the key and value from the tree.
    pub fn remove_entry(self) -> (K, V) {
        let store = &mut self.tree.store;
        let path = if store.tracks_parents() {
            node::path_from_parents(store, self.node)
        } else {
            // The first node met for the key is the node this entry was
            // created for.
            let (path, n) = node::descend(store, &self.key).expect("occupied entry key missing");
            debug_assert_eq!(n, self.node);
            path
        };

        node::remove_at(store, path, self.node)
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Create a new Entry for the given key and tree.
    pub(crate) fn new(key: K, tree: &'a mut AvlTree<K, V, S>) -> Self {
        match node::find(&tree.store, &key) {
            Some(node) => Entry::Occupied(OccupiedEntry { key, node, tree }),
            None => Entry::Vacant(VacantEntry { key, tree }),
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, &str> = AvlTree::default();
    /// assert_eq!(tree.entry(10).key(), &10);
    /// ```
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, u32> = AvlTree::default();
    ///
    /// tree.entry(10).or_insert(42);
    /// assert_eq!(tree.get(&10), Some(&42));
    ///
    /// *tree.entry(10).or_insert(100) += 1;
    /// assert_eq!(tree.get(&10), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty, and returns a mutable reference to the value in the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, String> = AvlTree::default();
    /// let s = "hello".to_string();
    ///
    /// tree.entry(10).or_insert_with(|| s);
    ///
    /// assert_eq!(tree.get(&10), Some(&"hello".to_string()));
    /// ```
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of
    /// the default function. This method allows for generating key-derived
    /// values for insertion by providing the default function a reference to
    /// the key that was moved during the `.entry(key)` method call.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, i32> = AvlTree::default();
    ///
    /// tree.entry(10).or_insert_with_key(|key| key * 2);
    ///
    /// assert_eq!(tree.get(&10), Some(&20));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, u32> = AvlTree::default();
    ///
    /// tree.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(tree.get(&10), Some(&42));
    ///
    /// tree.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(tree.get(&10), Some(&43));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(entry) = &mut self {
            f(entry.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an OccupiedEntry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, &str> = AvlTree::default();
    /// let entry = tree.entry(10).insert_entry("hello");
    ///
    /// assert_eq!(entry.key(), &10);
    /// assert_eq!(entry.get(), &"hello");
    /// ```
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, S>
    where
        K: Clone,
    {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(VacantEntry { key, tree }) => {
                let node = insert_vacant(tree, key.clone(), value);
                OccupiedEntry { key, node, tree }
            }
        }
    }
}

impl<'a, K, V, S> Entry<'a, K, V, S>
where
    K: Ord,
    V: Default,
    S: NodeStore<K, V>,
{
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let mut tree: AvlTree<i32, Option<u32>> = AvlTree::default();
    /// tree.entry(10).or_default();
    ///
    /// assert_eq!(tree.get(&10), Some(&None));
    /// ```
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }
}

impl<K, V, S> AvlTree<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    /// Gets the given key's corresponding entry in the tree for in-place
    /// manipulation.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        Entry::new(key, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_or_insert() {
        let mut tree: AvlTree<i32, i32> = AvlTree::default();

        // Insert via vacant entry
        tree.entry(10).or_insert(42);
        assert_eq!(tree.get(&10), Some(&42));

        // Entry is now occupied, should not change
        tree.entry(10).or_insert(100);
        assert_eq!(tree.get(&10), Some(&42));
    }

    #[test]
    fn test_entry_or_insert_with() {
        let mut tree: AvlTree<i32, String> = AvlTree::default();

        tree.entry(10).or_insert_with(|| "hello".to_string());
        assert_eq!(tree.get(&10), Some(&"hello".to_string()));

        // Should not call the closure again
        tree.entry(10).or_insert_with(|| "world".to_string());
        assert_eq!(tree.get(&10), Some(&"hello".to_string()));
    }

    #[test]
    fn test_entry_and_modify() {
        let mut tree: AvlTree<i32, u32> = AvlTree::default();

        // On vacant, and_modify should not do anything
        tree.entry(10).and_modify(|v| *v += 1).or_insert(42);
        assert_eq!(tree.get(&10), Some(&42));

        // On occupied, and_modify should modify the value
        tree.entry(10).and_modify(|v| *v += 1).or_insert(100);
        assert_eq!(tree.get(&10), Some(&43));
    }

    #[test]
    fn test_entry_insert_entry() {
        let mut tree: AvlTree<i32, &str> = AvlTree::default();

        // Insert on vacant
        let entry = tree.entry(10).insert_entry("hello");
        assert_eq!(entry.key(), &10);
        assert_eq!(entry.get(), &"hello");

        // Insert on occupied - should replace
        let entry = tree.entry(10).insert_entry("world");
        assert_eq!(entry.key(), &10);
        assert_eq!(entry.get(), &"world");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_vacant_entry_insert_returns_value() {
        for parent_links in [true, false] {
            let config = crate::TreeConfig::default().with_parent_links(parent_links);
            let mut tree: AvlTree<u8, u32> = AvlTree::with_config(config);

            for v in [5, 2, 8, 2, 5, 5] {
                match tree.entry(v) {
                    Entry::Vacant(vacant) => *vacant.insert(10) += 1,
                    Entry::Occupied(mut occupied) => *occupied.get_mut() += 1,
                }
                *tree.entry(v).or_default() += 100;
            }

            assert_eq!(tree.get(&2), Some(&212));
            assert_eq!(tree.get(&5), Some(&313));
            assert_eq!(tree.get(&8), Some(&111));
            assert_eq!(tree.len(), 3);
            tree.validate().unwrap();
        }
    }

    #[test]
    fn test_vacant_entry_into_key() {
        let mut tree: AvlTree<i32, i32> = AvlTree::default();

        match tree.entry(10) {
            Entry::Vacant(vacant) => assert_eq!(vacant.into_key(), 10),
            Entry::Occupied(_) => panic!("Expected vacant entry"),
        }
    }

    #[test]
    fn test_occupied_entry_remove() {
        for parent_links in [true, false] {
            let config = crate::TreeConfig::default().with_parent_links(parent_links);
            let mut tree = AvlTree::with_config(config);
            for v in 0..16 {
                tree.insert(v, v * 2);
            }

            match tree.entry(9) {
                Entry::Occupied(occupied) => assert_eq!(occupied.remove_entry(), (9, 18)),
                Entry::Vacant(_) => panic!("Expected occupied entry"),
            }

            assert!(!tree.contains_key(&9));
            tree.validate().unwrap();
        }
    }

    #[test]
    fn test_occupied_entry_insert() {
        let mut tree: AvlTree<i32, i32> = AvlTree::default();
        tree.insert(10, 42);

        match tree.entry(10) {
            Entry::Occupied(mut occupied) => {
                let old = occupied.insert(100);
                assert_eq!(old, 42);
                assert_eq!(occupied.get(), &100);
            }
            Entry::Vacant(_) => panic!("Expected occupied entry"),
        }
    }

    #[test]
    fn test_multimap_vacant_insert() {
        let mut tree = AvlTree::multimap();
        tree.insert(1, "a");

        // Occupied entries address the existing entry rather than appending.
        *tree.entry(1).or_insert("b") = "c";
        tree.entry(2).or_insert("d");

        let got = tree.find_all(&1).map(|(_, v)| *v).collect::<Vec<_>>();
        assert_eq!(got, ["c"]);
        assert_eq!(tree.len(), 2);
    }
}
