//! flatseg is a generic range-query structure over associative operations
//!
//! The [SegmentTree] keeps a fixed-size sequence in a flat `2n` array and supports
//! point updates and half-open range queries in `O(log n)` time.
//!
//! ```
//! use flatseg::{ops::Min, SegmentTree};
//!
//! let mut tree = SegmentTree::build(vec![5, 2, 8, 1, 9], Min).unwrap();
//! assert_eq!(tree.query(0, 3), Ok(2));
//! tree.update(1, 10).unwrap();
//! assert_eq!(tree.query(0, 3), Ok(5));
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use flatseg_core::*;

#[cfg(feature = "classic")]
pub use flatseg_classic as classic;

#[cfg(feature = "stats")]
pub use flatseg_stats as stats;
