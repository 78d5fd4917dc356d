//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use std::convert::From;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a regression tree learns the partition of the attribute space and the mean target of every
/// cell.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation is absent and models map an input of
/// type `R` directly to an output of type `T`, which may be a `Result` when the input has to be
/// matched against the schema the model was trained on.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
