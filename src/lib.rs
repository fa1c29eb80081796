#![doc = include_str!("../README.md")]

mod error;
pub mod features;
pub mod kdtree;
mod point;
pub mod similar;
mod r#type;

pub use error::{FeatureIndexError, Result};
pub use point::Point;
pub use r#type::IndexableNum;
