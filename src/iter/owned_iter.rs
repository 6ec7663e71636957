use std::{iter::FusedIterator, marker::PhantomData};

use crate::{arena::ArenaStore, store::NodeStore};

use super::{Cursor, Direction};

/// An iterator of owned `(key, value)` pairs as the underlying tree
/// `into_iter()` impl, yielded in ascending key order.
///
/// Each node is released from the store as it is yielded.
#[derive(Debug)]
pub struct IntoIter<K, V, S = ArenaStore<K, V>>
where
    S: NodeStore<K, V>,
{
    store: S,
    cursor: Cursor<S::Handle>,
    _entries: PhantomData<(K, V)>,
}

impl<K, V, S> IntoIter<K, V, S>
where
    K: Ord,
    S: NodeStore<K, V>,
{
    pub(crate) fn new(store: S) -> Self {
        let cursor = Cursor::new(&store, Direction::Ascending, &(..));
        Self {
            store,
            cursor,
            _entries: PhantomData,
        }
    }
}

impl<K, V, S> Iterator for IntoIter<K, V, S>
where
    S: NodeStore<K, V>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.cursor.next(&self.store)?;

        // The cursor has already pushed the right subtree of "n", so nothing
        // references it any longer.
        Some(self.store.release(n))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining(), Some(self.cursor.remaining()))
    }
}

impl<K, V, S> ExactSizeIterator for IntoIter<K, V, S> where S: NodeStore<K, V> {}

impl<K, V, S> FusedIterator for IntoIter<K, V, S> where S: NodeStore<K, V> {}
