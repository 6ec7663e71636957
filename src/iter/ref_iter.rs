use std::{iter::FusedIterator, marker::PhantomData};

use crate::{arena::ArenaStore, store::NodeStore};

use super::Cursor;

/// An iterator over borrowed `(key, value)` pairs of an
/// [`AvlTree`](crate::AvlTree), in a fixed [`Direction`](super::Direction)
/// and restricted to a key range.
///
/// The number of remaining entries is known up-front.
#[derive(Debug)]
pub struct Iter<'a, K, V, S = ArenaStore<K, V>>
where
    S: NodeStore<K, V>,
{
    store: &'a S,
    cursor: Cursor<S::Handle>,
    _entries: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V, S> Iter<'a, K, V, S>
where
    S: NodeStore<K, V>,
{
    pub(crate) fn new(store: &'a S, cursor: Cursor<S::Handle>) -> Self {
        Self {
            store,
            cursor,
            _entries: PhantomData,
        }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    S: NodeStore<K, V>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let n = self.cursor.next(store)?;
        Some((store.key(n), store.value(n)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining(), Some(self.cursor.remaining()))
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S> where S: NodeStore<K, V> {}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S> where S: NodeStore<K, V> {}
