use thiserror::Error;

/// A structural invariant violation reported by
/// [`AvlTree::validate()`](crate::AvlTree::validate).
///
/// Keys are rendered with their [`Debug`] representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// The in-order key sequence decreases (or repeats, when the tree does not
    /// allow duplicate keys) at this key.
    #[error("key {key} is out of order")]
    Order { key: String },

    /// The stored height is not 1 + the maximum child height.
    #[error("node {key} has height {got}, want {want}")]
    Height { key: String, got: u8, want: u8 },

    /// The child subtree heights differ by more than 1.
    #[error("node {key} has balance factor {balance}")]
    Balance { key: String, balance: i16 },

    /// The stored subtree count is not 1 + the child subtree counts.
    #[error("node {key} has subtree count {got}, want {want}")]
    Count { key: String, got: usize, want: usize },

    /// A child does not point back at its parent, or the root has a parent.
    #[error("node {key} has an inconsistent parent link")]
    Parent { key: String },
}
