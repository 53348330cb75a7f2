//! flatseg-classic contains classic algorithms that are independent of the segment tree
//!
//! - [DisjointSet]: union-find with path compression and union by rank or size
//! - [dijkstra]: single-source shortest paths over non-negative edge weights
//! - [BinaryLifting]: k-th ancestor and lowest common ancestor queries on rooted trees
//! - [monotonic]: next/previous greater or smaller elements and sliding window extremes
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

use std::fmt::{self, Display};

mod dsu;
mod lifting;
/// Monotonic stack and queue scans
pub mod monotonic;
mod path;

pub use dsu::DisjointSet;
pub use lifting::BinaryLifting;
pub use monotonic::MonotonicQueue;
pub use path::{Graph, dijkstra, shortest_path};

/// A type containing error variants that may arise when using the classic algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input did not contain any nodes
    EmptyInput,
    /// A node referenced an index outside of `[0, len)`
    NodeOutOfRange {
        /// The rejected node
        node: usize,
        /// Number of nodes
        len: usize,
    },
    /// The parent array contains a cycle that does not pass through the root
    NotATree {
        /// A node on the cycle
        node: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "input contains no nodes"),
            Error::NodeOutOfRange { node, len } => {
                write!(f, "node {node} is out of range for {len} nodes")
            }
            Error::NotATree { node } => write!(f, "node {node} lies on a cycle"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    #[inline]
    pub(crate) fn check_node(node: usize, len: usize) -> Result<(), Error> {
        if node < len {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange { node, len })
        }
    }
    /// Returns `true` if the error represents [Error::EmptyInput]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Error::EmptyInput)
    }
    /// Returns `true` if the error represents [Error::NodeOutOfRange]
    pub fn is_node_out_of_range(&self) -> bool {
        matches!(self, Error::NodeOutOfRange { .. })
    }
    /// Returns `true` if the error represents [Error::NotATree]
    pub fn is_not_a_tree(&self) -> bool {
        matches!(self, Error::NotATree { .. })
    }
}
