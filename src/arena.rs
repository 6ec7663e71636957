use std::num::NonZeroU32;

use crate::store::NodeStore;

/// The address of a node within an [`ArenaStore`].
///
/// Stored as the slot index + 1 so that `Option<NodeId>` is the same size as a
/// `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    const MAX: usize = (u32::MAX - 1) as usize;

    fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "arena exceeds {} nodes", Self::MAX);
        // Correctness: index + 1 is non-zero and fits a u32 per the above.
        Self(NonZeroU32::new((index + 1) as u32).unwrap())
    }

    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Debug, Clone)]
struct Slot<K, V> {
    left: Option<NodeId>,
    right: Option<NodeId>,

    /// Only maintained when the owning store tracks parents.
    parent: Option<NodeId>,

    /// The node's AVL height, 1 for a leaf.
    ///
    /// A u8 holds a maximum value of 255, which can represent the height of a
    /// balanced tree far larger than the u32 slot index allows.
    height: u8,

    /// Number of nodes in the subtree rooted at this slot.
    count: usize,

    key: K,
    value: V,
}

/// A [`NodeStore`] holding nodes in a contiguous, index-addressed arena.
///
/// Freed slots are recycled for subsequent insertions. Parent back-references
/// are maintained unless the store is built with
/// [`ArenaStore::without_parents()`], in which case the engine falls back to
/// rank-indexed positioning where it would otherwise walk parent links.
#[derive(Debug, Clone)]
pub struct ArenaStore<K, V> {
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    track_parents: bool,
}

impl<K, V> Default for ArenaStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ArenaStore<K, V> {
    /// An empty store maintaining parent back-references.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            track_parents: true,
        }
    }

    /// An empty store that does not maintain parent back-references.
    pub fn without_parents() -> Self {
        Self {
            track_parents: false,
            ..Self::new()
        }
    }

    /// The number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, id: NodeId) -> &Slot<K, V> {
        self.slots[id.index()]
            .as_ref()
            .expect("stale arena node handle")
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot<K, V> {
        self.slots[id.index()]
            .as_mut()
            .expect("stale arena node handle")
    }

    fn adopt(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(child) = child {
            self.slot_mut(child).parent = Some(parent);
        }
    }
}

impl<K, V> NodeStore<K, V> for ArenaStore<K, V> {
    type Handle = NodeId;

    fn create(
        &mut self,
        left: Option<NodeId>,
        right: Option<NodeId>,
        height: u8,
        key: K,
        value: V,
    ) -> NodeId {
        let slot = Slot {
            count: 1 + self.count(left) + self.count(right),
            left,
            right,
            parent: None,
            height,
            key,
            value,
        };

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(slot);
                id
            }
            None => {
                self.slots.push(Some(slot));
                NodeId::from_index(self.slots.len() - 1)
            }
        };

        if self.track_parents {
            self.adopt(id, left);
            self.adopt(id, right);
        }

        id
    }

    fn left(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).left
    }

    fn right(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).right
    }

    fn height(&self, node: NodeId) -> u8 {
        self.slot(node).height
    }

    fn set_children(
        &mut self,
        node: NodeId,
        left: Option<NodeId>,
        right: Option<NodeId>,
        height: u8,
    ) {
        let count = 1 + self.count(left) + self.count(right);

        let slot = self.slot_mut(node);
        slot.left = left;
        slot.right = right;
        slot.height = height;
        slot.count = count;

        if self.track_parents {
            self.adopt(node, left);
            self.adopt(node, right);
        }
    }

    fn key(&self, node: NodeId) -> &K {
        &self.slot(node).key
    }

    fn value(&self, node: NodeId) -> &V {
        &self.slot(node).value
    }

    fn value_mut(&mut self, node: NodeId) -> &mut V {
        &mut self.slot_mut(node).value
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn set_root(&mut self, root: Option<NodeId>) {
        if let Some(root) = root {
            self.slot_mut(root).parent = None;
        }
        self.root = root;
    }

    fn count(&self, node: Option<NodeId>) -> usize {
        node.map(|v| self.slot(v).count).unwrap_or_default()
    }

    fn tracks_parents(&self) -> bool {
        self.track_parents
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).parent
    }

    fn release(&mut self, node: NodeId) -> (K, V) {
        let slot = self.slots[node.index()]
            .take()
            .expect("stale arena node handle");
        self.free.push(node);

        (slot.key, slot.value)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // An Option<NodeId> uses the NonZero niche.
    const _: () = assert!(std::mem::size_of::<Option<NodeId>>() == 4);

    #[test]
    fn test_slot_reuse() {
        let mut a = ArenaStore::new();

        let x = a.create(None, None, 1, 1, "one");
        let y = a.create(None, None, 1, 2, "two");
        assert_eq!(a.len(), 2);

        assert_eq!(a.release(x), (1, "one"));
        assert_eq!(a.len(), 1);

        // The freed slot is handed out again.
        let z = a.create(None, None, 1, 3, "three");
        assert_eq!(z, x);
        assert_ne!(z, y);
        assert_eq!(*a.key(z), 3);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_set_children_counts_and_parents() {
        let mut a = ArenaStore::new();

        let l = a.create(None, None, 1, 1, ());
        let r = a.create(None, None, 1, 3, ());
        let p = a.create(None, None, 1, 2, ());

        a.set_children(p, Some(l), Some(r), 2);
        a.set_root(Some(p));

        assert_eq!(a.count(Some(p)), 3);
        assert_eq!(a.count(None), 0);
        assert_eq!(a.height(p), 2);
        assert_eq!(a.parent(l), Some(p));
        assert_eq!(a.parent(r), Some(p));
        assert_eq!(a.parent(p), None);
    }

    #[test]
    fn test_without_parents() {
        let mut a = ArenaStore::without_parents();

        let l = a.create(None, None, 1, 1, ());
        let p = a.create(Some(l), None, 2, 2, ());

        assert!(!a.tracks_parents());
        assert_eq!(a.parent(l), None);
        assert_eq!(a.count(Some(p)), 2);
    }

    #[test]
    #[should_panic(expected = "stale arena node handle")]
    fn test_stale_handle() {
        let mut a = ArenaStore::new();
        let x = a.create(None, None, 1, 1, ());
        a.release(x);
        a.key(x);
    }

    proptest! {
        /// Interleaved allocations and releases always hand back the payload
        /// that was stored under a handle.
        #[test]
        fn prop_arena_model(ops in prop::collection::vec(any::<Option<u16>>(), 0..128)) {
            let mut a = ArenaStore::new();
            let mut model: Vec<(NodeId, u16)> = Vec::new();

            for op in ops {
                match op {
                    Some(v) => {
                        let id = a.create(None, None, 1, v, v);
                        model.push((id, v));
                    }
                    None if !model.is_empty() => {
                        let (id, v) = model.swap_remove(0);
                        prop_assert_eq!(a.release(id), (v, v));
                    }
                    None => {}
                }

                prop_assert_eq!(a.len(), model.len());
                for &(id, v) in &model {
                    prop_assert_eq!(*a.key(id), v);
                    prop_assert_eq!(*a.value(id), v);
                }
            }
        }
    }
}
