use std::fmt::Debug;

use crate::{
    error::InvariantError,
    iter::{Cursor, Direction},
    node,
    store::NodeStore,
    AvlTree,
};

impl<K, V, S> AvlTree<K, V, S>
where
    K: Ord + Debug,
    S: NodeStore<K, V>,
{
    /// Check every structural invariant of the tree, returning the first
    /// violation found.
    ///
    /// This visits every node and is intended for tests and debugging.
    ///
    /// ```
    /// use ordavl::AvlTree;
    ///
    /// let t = (0..100).map(|v| (v, v)).collect::<AvlTree<_, _>>();
    /// assert_eq!(t.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError> {
        let s = &self.store;
        let name = |n: S::Handle| format!("{:?}", s.key(n));

        if let Some(root) = s.root() {
            if s.parent(root).is_some() {
                return Err(InvariantError::Parent { key: name(root) });
            }
        }

        let mut stack = s.root().into_iter().collect::<Vec<_>>();
        while let Some(n) = stack.pop() {
            let (left, right) = (s.left(n), s.right(n));

            let want = 1 + node::height(s, left).max(node::height(s, right));
            if s.height(n) != want {
                return Err(InvariantError::Height {
                    key: name(n),
                    got: s.height(n),
                    want,
                });
            }

            let balance = node::balance(s, n);
            if !(-1..=1).contains(&balance) {
                return Err(InvariantError::Balance {
                    key: name(n),
                    balance,
                });
            }

            let want = 1 + s.count(left) + s.count(right);
            if s.count(Some(n)) != want {
                return Err(InvariantError::Count {
                    key: name(n),
                    got: s.count(Some(n)),
                    want,
                });
            }

            for c in [left, right].into_iter().flatten() {
                if s.tracks_parents() && s.parent(c) != Some(n) {
                    return Err(InvariantError::Parent { key: name(c) });
                }
                stack.push(c);
            }
        }

        let mut cursor = Cursor::new(s, Direction::Ascending, &(..));
        let mut last: Option<S::Handle> = None;
        while let Some(n) = cursor.next(s) {
            if let Some(prev) = last {
                let in_order = if self.policy.allows_duplicates() {
                    s.key(prev) <= s.key(n)
                } else {
                    s.key(prev) < s.key(n)
                };
                if !in_order {
                    return Err(InvariantError::Order { key: name(n) });
                }
            }
            last = Some(n);
        }

        Ok(())
    }
}
