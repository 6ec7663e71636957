/// Whether a tree admits more than one entry per key.
///
/// Fixed when the tree is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPolicy {
    /// At most one entry per key; inserting an existing key either replaces
    /// the value or is rejected.
    #[default]
    Unique,

    /// Any number of entries per key. Entries sharing a key are kept adjacent
    /// in key order, in the order they were inserted.
    AllowDuplicates,
}

impl KeyPolicy {
    pub fn allows_duplicates(self) -> bool {
        matches!(self, Self::AllowDuplicates)
    }
}

/// Construction parameters for an [`AvlTree`](crate::AvlTree) backed by an
/// [`ArenaStore`](crate::ArenaStore).
///
/// ```
/// use ordavl::{AvlTree, KeyPolicy, TreeConfig};
///
/// let config = TreeConfig::default()
///     .with_key_policy(KeyPolicy::AllowDuplicates)
///     .with_parent_links(false);
///
/// let mut t = AvlTree::with_config(config);
/// t.insert(1, "a");
/// t.insert(1, "b");
/// assert_eq!(t.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeConfig {
    key_policy: KeyPolicy,

    /// Maintain node parent back-references, allowing mutating walks to step
    /// between nodes without re-descending from the root.
    parent_links: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            key_policy: KeyPolicy::Unique,
            parent_links: true,
        }
    }
}

impl TreeConfig {
    pub fn with_key_policy(self, key_policy: KeyPolicy) -> Self {
        Self { key_policy, ..self }
    }

    pub fn with_parent_links(self, parent_links: bool) -> Self {
        Self {
            parent_links,
            ..self
        }
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    pub fn parent_links(&self) -> bool {
        self.parent_links
    }
}
