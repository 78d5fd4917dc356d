use std::marker::PhantomData;

use sylva::{
    error::{Error, Result},
    Float, ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::RegressionTree;

/// The set of hyperparameters that can be specified for growing a
/// [regression tree](struct.RegressionTree.html).
///
/// ### Example
///
/// ```rust
/// use sylva::prelude::*;
/// use sylva_cart::RegressionTree;
///
/// let dataset = sylva_datasets::generate::step_dataset(40, 10., 0.5, 42);
/// let (train, valid) = dataset.split_with_ratio(0.8);
///
/// let tree = RegressionTree::params()
///     .max_leaf_samples(3)
///     .fit(&train)
///     .unwrap();
///
/// let prediction = tree.predict(&valid).unwrap();
/// let rmse = valid.root_mean_squared_error(&prediction).unwrap();
/// assert!(rmse < 2.);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionTreeValidParams<F> {
    max_leaf_samples: usize,

    marker: PhantomData<F>,
}

impl<F: Float> RegressionTreeValidParams<F> {
    pub fn max_leaf_samples(&self) -> usize {
        self.max_leaf_samples
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionTreeParams<F>(RegressionTreeValidParams<F>);

impl<F: Float> RegressionTreeParams<F> {
    pub fn new() -> Self {
        Self(RegressionTreeValidParams {
            max_leaf_samples: 5,
            marker: PhantomData,
        })
    }

    /// Sets the number of samples up to which a node becomes a leaf
    ///
    /// Nodes holding more samples are split unless all of their targets are equal.
    pub fn max_leaf_samples(mut self, max_leaf_samples: usize) -> Self {
        self.0.max_leaf_samples = max_leaf_samples;
        self
    }
}

impl<F: Float> Default for RegressionTreeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RegressionTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `max_leaf_samples = 5`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> RegressionTreeParams<F> {
        RegressionTreeParams::new()
    }
}

impl<F: Float> ParamGuard for RegressionTreeParams<F> {
    type Checked = RegressionTreeValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.max_leaf_samples == 0 {
            Err(Error::Parameters(
                "the maximal number of leaf samples should be at least one, but was 0".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = RegressionTree::<f64>::params().check().unwrap();
        assert_eq!(params.max_leaf_samples(), 5);
    }

    #[test]
    fn zero_leaf_samples_are_rejected() {
        let params = RegressionTree::<f64>::params().max_leaf_samples(0);
        assert!(matches!(params.check_ref(), Err(Error::Parameters(_))));
    }
}
