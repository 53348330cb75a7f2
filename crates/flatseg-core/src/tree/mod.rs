use core::{fmt, mem, ops::{Bound, RangeBounds}};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{Error, ops::Operation};

crate::cfg_profiler! {
    mod stats;
    pub use stats::Stats;
    use flatseg_stats::profile_scope;
}

/// This data structure allows range queries and single element modification.
///
/// This tree allocates `2n * size_of::<T>()` bytes of memory.
///
/// The tree is stored bottom-up in a flat array: slot `n + i` holds element `i`
/// and every internal slot `k` in `[1, n)` holds `combine(tree[2k], tree[2k + 1])`.
/// Slot `0` is unused. This layout only works with the iterative walks below and
/// is not compatible with recursive `4n` segment tree variants.
///
/// The length is fixed at construction. Use [SegmentTree::rebuild] to swap in a new
/// sequence.
pub struct SegmentTree<T, O: Operation<T>> {
    tree: Vec<T>,
    len: usize,
    op: O,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T, O: Operation<T>> SegmentTree<T, O> {
    /// Builds a tree over the given values using `O(len)` time.
    ///
    /// Returns [Error::EmptyInput] if `values` is empty.
    pub fn build(values: Vec<T>, op: O) -> Result<Self, Error> {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let tree = Self::layout(values, &op)?;
        let len = tree.len() / 2;
        log::debug!("built segment tree over {len} elements");

        Ok(Self {
            tree,
            len,
            op,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    /// Replaces the whole sequence with `values` and rebuilds the tree in `O(len)` time.
    ///
    /// This is the only way to change the length of a tree. On error the tree is left untouched.
    pub fn rebuild(&mut self, values: Vec<T>) -> Result<(), Error> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.build);

        self.tree = Self::layout(values, &self.op)?;
        self.len = self.tree.len() / 2;
        log::debug!("rebuilt segment tree over {} elements", self.len);
        Ok(())
    }

    fn layout(values: Vec<T>, op: &O) -> Result<Vec<T>, Error> {
        let n = values.len();
        if n == 0 {
            log::debug!("rejected segment tree build over an empty sequence");
            return Err(Error::EmptyInput);
        }
        let mut tree = Vec::with_capacity(n << 1);
        tree.extend((0..n).map(|_| op.identity()));
        tree.extend(values);

        // children always sit at larger indices so a single backward pass suffices
        for k in (1..n).rev() {
            tree[k] = op.combine(&tree[k << 1], &tree[k << 1 | 1]);
        }
        Ok(tree)
    }

    /// Sets the value at `index` and returns the old value.
    /// Uses `O(log(len))` time.
    ///
    /// Returns [Error::IndexOutOfRange] without modifying the tree if `index >= len`.
    pub fn update(&mut self, index: usize, value: T) -> Result<T, Error> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        let slot = self.leaf_slot(index)?;
        let old = mem::replace(&mut self.tree[slot], value);
        self.fix_ancestors(slot);
        Ok(old)
    }

    /// Combines the value at `index` with `delta`, such that `delta` is the right argument.
    /// Uses `O(log(len))` time.
    ///
    /// Returns [Error::IndexOutOfRange] without modifying the tree if `index >= len`.
    pub fn compose(&mut self, index: usize, delta: &T) -> Result<(), Error> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        let slot = self.leaf_slot(index)?;
        self.op.combine_mut(&mut self.tree[slot], delta);
        self.fix_ancestors(slot);
        Ok(())
    }

    #[inline]
    fn leaf_slot(&self, index: usize) -> Result<usize, Error> {
        if index >= self.len {
            log::debug!("rejected access to index {index} of {}", self.len);
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(index + self.len)
    }

    #[inline]
    fn fix_ancestors(&mut self, mut slot: usize) {
        while slot > 1 {
            slot >>= 1;
            self.tree[slot] = self.op.combine(&self.tree[slot << 1], &self.tree[slot << 1 | 1]);
        }
    }

    /// Computes `a[start] * a[start + 1] * ... * a[end - 1]` in `O(log(len))` time.
    ///
    /// The range is half-open. If `start == end` this method returns the identity.
    /// Returns [Error::InvalidRange] unless `start <= end <= len`.
    ///
    /// Values are combined in sequence order so the operation does not have to be commutative.
    pub fn query(&self, start: usize, end: usize) -> Result<T, Error> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if start > end || end > self.len {
            log::debug!(
                "rejected query [{start}, {end}) on tree of length {}",
                self.len
            );
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(self.fold(start, end))
    }

    /// Combines the leaves in `[start, end)`, callers must check the bounds
    #[inline]
    fn fold(&self, start: usize, end: usize) -> T {
        let mut left_acc = self.op.identity();
        let mut right_acc = self.op.identity();
        let mut l = start + self.len;
        let mut r = end + self.len;
        while l < r {
            if l & 1 == 1 {
                left_acc = self.op.combine(&left_acc, &self.tree[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                right_acc = self.op.combine(&self.tree[r], &right_acc);
            }
            l >>= 1;
            r >>= 1;
        }
        self.op.combine(&left_acc, &right_acc)
    }

    /// Like [SegmentTree::query] but accepts any range expression (e.g., `1..4`, `..=2`, `..`)
    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<T, Error> {
        let (start, end) = self.to_bounds(range)?;
        self.query(start, end)
    }

    fn to_bounds<R: RangeBounds<usize>>(&self, range: R) -> Result<(usize, usize), Error> {
        let start = match range.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => s.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => Some(self.len),
        };
        match (start, end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (start, end) => Err(Error::InvalidRange {
                start: start.unwrap_or(usize::MAX),
                end: end.unwrap_or(usize::MAX),
                len: self.len,
            }),
        }
    }

    /// Combines every element of the sequence
    #[inline]
    pub fn total(&self) -> T {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        self.fold(0, self.len)
    }

    /// Returns a reference to the value at `index` or `None` if it is out of bounds
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.tree.get(index + self.len)
        } else {
            None
        }
    }

    /// View the values of the sequence as a slice. Uses `O(1)` time.
    #[inline(always)]
    pub fn leaves(&self) -> &[T] {
        &self.tree[self.len..]
    }

    /// The number of elements stored in this segment tree.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always returns `false` as a tree cannot be built over an empty sequence
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the operation of this tree
    #[inline]
    pub fn operation(&self) -> &O {
        &self.op
    }

    /// Returns the latency stats of this tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<T: PartialEq, O: Operation<T>> SegmentTree<T, O> {
    /// Checks that every internal slot equals the combination of its two children
    #[doc(hidden)]
    pub fn validate(&self) -> bool {
        (1..self.len).all(|k| {
            self.tree[k] == self.op.combine(&self.tree[k << 1], &self.tree[k << 1 | 1])
        })
    }
}

impl<T, F> SegmentTree<T, crate::FnOperation<T, F>>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Builds a tree from an identity value and a combine closure
    ///
    /// ```
    /// use flatseg_core::SegmentTree;
    ///
    /// let tree = SegmentTree::from_fn(vec![5, 2, 8, 1, 9], i32::MAX, |a, b| *a.min(b)).unwrap();
    /// assert_eq!(tree.query(0, 3), Ok(2));
    /// ```
    pub fn from_fn(values: Vec<T>, identity: T, combine: F) -> Result<Self, Error> {
        Self::build(values, crate::FnOperation::new(identity, combine))
    }
}

impl<T: Clone, O: Operation<T> + Clone> Clone for SegmentTree<T, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            len: self.len,
            op: self.op.clone(),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }
}

impl<T: fmt::Debug, O: Operation<T>> fmt::Debug for SegmentTree<T, O> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SegmentTree({:?})", self.leaves())
    }
}

impl<T: PartialEq, O: Operation<T> + PartialEq> PartialEq for SegmentTree<T, O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.leaves() == other.leaves()
    }
}

impl<T: Eq, O: Operation<T> + Eq> Eq for SegmentTree<T, O> {}
