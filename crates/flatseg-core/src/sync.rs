use core::{fmt, ops::RangeBounds};
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock};
use std::{sync::Arc, vec::Vec};

use crate::{Error, SegmentTree, ops::Operation};

/// The lock you get from [`RwLock::read`].
pub type TreeRef<'a, T, O> = MappedRwLockReadGuard<'a, SegmentTree<T, O>>;
/// The lock you get from [`RwLock::write`].
pub type TreeRefMut<'a, T, O> = MappedRwLockWriteGuard<'a, SegmentTree<T, O>>;

/// A [SegmentTree] that can be shared across threads
///
/// A point update rewrites a whole leaf-to-root path, so the entire tree is guarded by a
/// single lock. Updates take the write lock while queries share the read lock.
/// Cloning the handle shares the underlying tree.
///
/// ```
/// use flatseg_core::{ops::Sum, SharedSegmentTree};
///
/// let tree = SharedSegmentTree::build(vec![0u64; 8], Sum).unwrap();
/// std::thread::scope(|s| {
///     for i in 0..4 {
///         let tree = tree.clone();
///         s.spawn(move || tree.compose(i, &10).unwrap());
///     }
/// });
/// assert_eq!(tree.total(), 40);
/// ```
pub struct SharedSegmentTree<T, O: Operation<T>>(Arc<RwLock<SegmentTree<T, O>>>);

impl<T, O: Operation<T>> Clone for SharedSegmentTree<T, O> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug, O: Operation<T>> fmt::Debug for SharedSegmentTree<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSegmentTree")
            .field(&*self.read())
            .finish()
    }
}

impl<T, O: Operation<T>> From<SegmentTree<T, O>> for SharedSegmentTree<T, O> {
    fn from(tree: SegmentTree<T, O>) -> Self {
        Self::new(tree)
    }
}

impl<T, O: Operation<T>> SharedSegmentTree<T, O> {
    /// Wraps an existing tree
    #[inline]
    pub fn new(tree: SegmentTree<T, O>) -> Self {
        Self(Arc::new(RwLock::new(tree)))
    }

    /// Builds a new shared tree over the given values
    pub fn build(values: Vec<T>, op: O) -> Result<Self, Error> {
        SegmentTree::build(values, op).map(Self::new)
    }

    /// Acquires the read lock
    #[inline(always)]
    pub fn read(&self) -> TreeRef<'_, T, O> {
        parking_lot::RwLockReadGuard::map(self.0.read(), |v| v)
    }

    /// Acquires the write lock
    #[inline(always)]
    pub fn write(&self) -> TreeRefMut<'_, T, O> {
        parking_lot::RwLockWriteGuard::map(self.0.write(), |v| v)
    }

    /// See [SegmentTree::update]
    #[inline]
    pub fn update(&self, index: usize, value: T) -> Result<T, Error> {
        self.write().update(index, value)
    }

    /// See [SegmentTree::compose]
    #[inline]
    pub fn compose(&self, index: usize, delta: &T) -> Result<(), Error> {
        self.write().compose(index, delta)
    }

    /// See [SegmentTree::rebuild]
    #[inline]
    pub fn rebuild(&self, values: Vec<T>) -> Result<(), Error> {
        self.write().rebuild(values)
    }

    /// See [SegmentTree::query]
    #[inline]
    pub fn query(&self, start: usize, end: usize) -> Result<T, Error> {
        self.read().query(start, end)
    }

    /// See [SegmentTree::query_range]
    #[inline]
    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<T, Error> {
        self.read().query_range(range)
    }

    /// See [SegmentTree::total]
    #[inline]
    pub fn total(&self) -> T {
        self.read().total()
    }

    /// Returns a copy of the value at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.read().get(index).cloned()
    }

    /// The number of elements stored in the shared tree
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always returns `false` as a tree cannot be built over an empty sequence
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the inner tree if this is the last handle, otherwise gives the handle back
    pub fn into_inner(self) -> Result<SegmentTree<T, O>, Self> {
        Arc::try_unwrap(self.0)
            .map(RwLock::into_inner)
            .map_err(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ops::{Max, Sum};

    #[test]
    fn concurrent_composes_are_serialized() {
        let tree = SharedSegmentTree::build(vec![0u64; 16], Sum).unwrap();
        std::thread::scope(|s| {
            for t in 0..4 {
                let tree = tree.clone();
                s.spawn(move || {
                    for i in 0..1000 {
                        tree.compose((t * 4 + i) % 16, &1).unwrap();
                    }
                });
            }
            let reader = tree.clone();
            s.spawn(move || {
                for _ in 0..100 {
                    let total = reader.total();
                    assert!(total <= 4000);
                }
            });
        });
        assert_eq!(tree.total(), 4000);
        assert!(tree.read().validate());
    }

    #[test]
    fn handle_delegates_to_tree() {
        let tree = SharedSegmentTree::build(vec![3i32, 8, 1], Max).unwrap();
        assert_eq!(tree.update(1, 0), Ok(8));
        assert_eq!(tree.query(0, 3), Ok(3));
        assert_eq!(tree.get(1), Some(0));
        assert_eq!(tree.len(), 3);
        assert!(tree.update(3, 1).unwrap_err().is_index_out_of_range());
        assert_eq!(tree.query_range(1..), Ok(1));
        assert_eq!(tree.query_range(..=1), Ok(3));
        assert!(tree.query_range(2..5).unwrap_err().is_invalid_range());

        let other = tree.clone();
        let tree = tree.into_inner().unwrap_err();
        drop(other);
        let inner = tree.into_inner().unwrap();
        assert_eq!(inner.leaves(), &[3, 0, 1]);
    }
}
