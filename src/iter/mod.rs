mod cursor;
mod owned_iter;
mod ref_iter;

pub(crate) use cursor::*;
pub use owned_iter::*;
pub use ref_iter::*;

use crate::node::Side;

/// The order in which nodes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// In-order, from the smallest key to the largest.
    #[default]
    Ascending,
    /// Reverse in-order, from the largest key to the smallest.
    Descending,
}

impl Direction {
    /// The child slot holding the nodes visited after a given node.
    pub(crate) fn forward(self) -> Side {
        match self {
            Self::Ascending => Side::Right,
            Self::Descending => Side::Left,
        }
    }
}
