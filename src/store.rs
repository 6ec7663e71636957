use std::fmt::Debug;

/// The node storage capabilities the balancing and traversal engines are
/// written against.
///
/// A [`NodeStore`] owns every node of a single tree (and the root pointer), and
/// hands out copyable [`NodeStore::Handle`] values to address them. A handle
/// stays valid for the lifetime of the node it addresses: the engine relinks
/// nodes during rotations and removals, it never moves a key or value between
/// nodes.
///
/// Handles passed to any method other than [`NodeStore::create()`] must
/// address a live node of this store; implementations may panic otherwise.
pub trait NodeStore<K, V> {
    /// A stable, copyable address of a node in this store.
    type Handle: Copy + Eq + Debug;

    /// Allocate a new node with the given children, height and payload.
    ///
    /// The node's subtree count is computed from the children.
    fn create(
        &mut self,
        left: Option<Self::Handle>,
        right: Option<Self::Handle>,
        height: u8,
        key: K,
        value: V,
    ) -> Self::Handle;

    fn left(&self, node: Self::Handle) -> Option<Self::Handle>;
    fn right(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// The AVL height of `node`. A leaf has a height of 1.
    fn height(&self, node: Self::Handle) -> u8;

    /// Replace both children and the height of `node` in one step.
    ///
    /// Implementations must recompute the subtree count of `node` from the new
    /// children and, when tracking parents, point both children back at
    /// `node`.
    fn set_children(
        &mut self,
        node: Self::Handle,
        left: Option<Self::Handle>,
        right: Option<Self::Handle>,
        height: u8,
    );

    /// The key of `node`, immutable once created.
    fn key(&self, node: Self::Handle) -> &K;

    fn value(&self, node: Self::Handle) -> &V;
    fn value_mut(&mut self, node: Self::Handle) -> &mut V;

    /// Swap the value of `node` for `value`, returning the old value.
    fn replace_value(&mut self, node: Self::Handle, value: V) -> V {
        std::mem::replace(self.value_mut(node), value)
    }

    fn root(&self) -> Option<Self::Handle>;

    /// Install `root` as the tree root, clearing its parent pointer (if
    /// tracked).
    fn set_root(&mut self, root: Option<Self::Handle>);

    /// The number of nodes in the subtree rooted at `node`, or 0 for an absent
    /// subtree.
    fn count(&self, node: Option<Self::Handle>) -> usize;

    /// Returns true when this store maintains parent back-references.
    fn tracks_parents(&self) -> bool {
        false
    }

    /// The parent of `node`, if tracked and `node` is not the root.
    fn parent(&self, _node: Self::Handle) -> Option<Self::Handle> {
        None
    }

    /// Free a node that has been unlinked from the tree, returning its
    /// payload.
    fn release(&mut self, node: Self::Handle) -> (K, V);
}
