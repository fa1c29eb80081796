use std::collections::TryReserveError;
use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum FeatureIndexError {
    /// An argument was empty, out of range or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A buffer could not be reserved while building an array or tree.
    #[error("Allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// A split method token that is not one of `RANDOM`, `MAX_SPREAD` or `INCREMENTAL`.
    #[error("Unknown split method: {0}")]
    UnknownSplitMethod(String),

    /// The content of a features file could not be parsed.
    #[error("Malformed features file: {0}")]
    MalformedFeatures(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeatureIndexError>;

pub(crate) fn invalid_argument<T>(msg: impl Into<String>) -> Result<T> {
    Err(FeatureIndexError::InvalidArgument(msg.into()))
}
