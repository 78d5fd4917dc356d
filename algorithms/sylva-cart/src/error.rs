//! Error types of the regression tree crate
//!
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Error)]
pub enum CartError {
    /// A tree cannot be grown from zero samples
    #[error("cannot grow a tree without samples")]
    EmptySampleSet,
    /// None of the attributes separates the samples of a node
    #[error("no attribute yields a valid split of {samples} samples")]
    NoValidSplitFound { samples: usize },
    /// None of the alphas scored in cross-validation appears in the full-data pruning path
    ///
    /// Every pruning path starts with the unpruned tree at alpha zero, so this only guards
    /// against an empty path.
    #[error("no cross-validated alpha is part of the full-data pruning path")]
    NoEligibleAlpha,
    /// A split attribute of the tree is missing from the schema of the predicted dataset
    #[error("attribute `{0}` is not part of the dataset")]
    AttributeNotFound(String),
    /// The weakest-link alphas of a pruning path decreased
    #[error("alpha decreased from {previous} to {current} at pruning step {step}")]
    NonMonotonicAlpha {
        step: usize,
        previous: f64,
        current: f64,
    },
    #[error(transparent)]
    BaseCrate(#[from] sylva::Error),
}
