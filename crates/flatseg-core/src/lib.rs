//! flatseg-core contains the generic range-query structure of flatseg
//!
//! A [SegmentTree] answers range queries and point updates over a fixed-size
//! sequence in `O(log n)` time for any associative [Operation] with an identity.
//!
//! ```
//! use flatseg_core::{ops::Sum, SegmentTree};
//!
//! let mut tree = SegmentTree::build(vec![1u64, 3, 5, 7, 9, 11], Sum).unwrap();
//! assert_eq!(tree.query(1, 5), Ok(24));
//!
//! tree.update(3, 2).unwrap();
//! assert_eq!(tree.query(1, 5), Ok(19));
//! assert_eq!(tree.total(), 31);
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use core::fmt::{self, Display};

mod macros;

/// Associative operations that drive a [SegmentTree]
///
/// Contains the [Operation] trait along with a number of pre-defined operations (e.g., SUM, MIN, GCD)
pub mod ops;
/// Flat-array segment tree
pub mod tree;

crate::cfg_sync! {
    /// Shared segment tree guarded by a single lock
    pub mod sync;
    pub use sync::SharedSegmentTree;
}

pub use ops::{FnOperation, Operation};
pub use tree::SegmentTree;

/// A type containing error variants that may arise when using a [SegmentTree]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A tree cannot be built over an empty sequence
    EmptyInput,
    /// A point access referenced an index outside of `[0, len)`
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of elements in the tree
        len: usize,
    },
    /// A range query did not satisfy `start <= end <= len`
    InvalidRange {
        /// Inclusive start of the requested range
        start: usize,
        /// Exclusive end of the requested range
        end: usize,
        /// Number of elements in the tree
        len: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "cannot build a segment tree over an empty sequence"),
            Error::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "index {index} is out of range for a tree of length {len}"
                )
            }
            Error::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "range [{start}, {end}) is invalid for a tree of length {len}"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Returns `true` if the error represents [Error::EmptyInput]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Error::EmptyInput)
    }
    /// Returns `true` if the error represents [Error::IndexOutOfRange]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }
    /// Returns `true` if the error represents [Error::InvalidRange]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::IndexOutOfRange { index: 7, len: 4 }.to_string(),
            "index 7 is out of range for a tree of length 4"
        );
        assert_eq!(
            Error::InvalidRange {
                start: 3,
                end: 1,
                len: 4
            }
            .to_string(),
            "range [3, 1) is invalid for a tree of length 4"
        );
        assert!(Error::EmptyInput.is_empty_input());
        assert!(!Error::EmptyInput.is_invalid_range());
    }
}
