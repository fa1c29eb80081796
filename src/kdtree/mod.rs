//! A static k-d tree over feature vectors, with one point per leaf.
//!
//! Points are first copied into a [`KDArray`], which keeps one sorted order per dimension. The
//! [`KDTreeBuilder`] then recursively splits that array at the median of a dimension chosen by a
//! [`SplitMethod`] until every part holds a single point.

#![warn(missing_docs)]

mod array;
mod builder;
mod index;
mod queue;
pub mod split;
mod r#trait;
pub mod traversal;

pub use array::{KDArray, SplitResult};
pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use queue::{BoundedQueue, Candidate};
pub use r#trait::KDTreeIndex;
pub use split::{select_dimension, SplitMethod};
pub use traversal::{Leaves, Node};
