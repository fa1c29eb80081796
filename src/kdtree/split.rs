//! Policies choosing the dimension a k-d tree level is split on.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::FeatureIndexError;
use crate::kdtree::KDArray;
use crate::r#type::IndexableNum;

/// How [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder] picks the split dimension of each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitMethod {
    /// The dimension with the largest spread of values.
    #[default]
    MaxSpread,
    /// A uniformly random dimension.
    Random,
    /// The dimension after the parent's split dimension, starting from 0 at the root.
    Incremental,
}

impl SplitMethod {
    /// The configuration token of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMethod::MaxSpread => "MAX_SPREAD",
            SplitMethod::Random => "RANDOM",
            SplitMethod::Incremental => "INCREMENTAL",
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethod {
    type Err = FeatureIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MAX_SPREAD" => Ok(SplitMethod::MaxSpread),
            "RANDOM" => Ok(SplitMethod::Random),
            "INCREMENTAL" => Ok(SplitMethod::Incremental),
            other => Err(FeatureIndexError::UnknownSplitMethod(other.to_string())),
        }
    }
}

/// Choose the dimension to split `array` on.
///
/// `previous_dimension` is the split dimension of the parent node, `None` at the root. `rng` is
/// only drawn from by [`SplitMethod::Random`].
pub fn select_dimension<N: IndexableNum, R: Rng + ?Sized>(
    method: SplitMethod,
    array: &KDArray<N>,
    previous_dimension: Option<usize>,
    rng: &mut R,
) -> usize {
    let dimension = array.dimension();
    match method {
        SplitMethod::MaxSpread => array.max_spread_dimension(),
        SplitMethod::Random => rng.gen_range(0..dimension),
        SplitMethod::Incremental => previous_dimension.map_or(0, |d| (d + 1) % dimension),
    }
}
