use sylva::{
    error::{Error, Result},
    Float, ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{CrossValidatedTree, RegressionTree, RegressionTreeParams};

/// The set of valid hyperparameters for the selection of a pruned tree by
/// [cross-validation](struct.CrossValidatedTree.html).
///
/// ## Parameters
///
/// * `n_folds`: number of contiguous folds the training set is divided into. Must be at least
///   two and not larger than the number of training samples. Default: 10.
/// * `train_ratio`: share of the dataset used for training when the selection is fitted on a
///   single dataset, the remainder is the test set. Default: 0.8.
/// * `tree`: the parameters of every grown tree.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossValidationValidParams<F> {
    n_folds: usize,
    train_ratio: f32,
    tree: RegressionTreeParams<F>,
}

impl<F: Float> CrossValidationValidParams<F> {
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    pub fn train_ratio(&self) -> f32 {
        self.train_ratio
    }

    pub fn tree(&self) -> &RegressionTreeParams<F> {
        &self.tree
    }
}

/// A helper struct for building the hyperparameters of a cross-validated selection
///
/// ## Example
///
/// ```rust
/// use sylva_cart::{CrossValidatedTree, RegressionTree};
///
/// let params = CrossValidatedTree::<f64>::params()
///     .n_folds(5)
///     .train_ratio(0.75)
///     .tree(RegressionTree::params().max_leaf_samples(3));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossValidationParams<F>(CrossValidationValidParams<F>);

impl<F: Float> CrossValidationParams<F> {
    pub fn new() -> Self {
        Self(CrossValidationValidParams {
            n_folds: 10,
            train_ratio: 0.8,
            tree: RegressionTree::params(),
        })
    }

    /// Sets the number of folds of the training set
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.0.n_folds = n_folds;
        self
    }

    /// Sets the share of the samples used for training by `fit`
    pub fn train_ratio(mut self, train_ratio: f32) -> Self {
        self.0.train_ratio = train_ratio;
        self
    }

    /// Sets the parameters of the grown trees
    pub fn tree(mut self, tree: RegressionTreeParams<F>) -> Self {
        self.0.tree = tree;
        self
    }
}

impl<F: Float> Default for CrossValidationParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> CrossValidatedTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `n_folds = 10`
    /// * `train_ratio = 0.8`
    /// * `tree = RegressionTree::params()`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> CrossValidationParams<F> {
        CrossValidationParams::new()
    }
}

impl<F: Float> ParamGuard for CrossValidationParams<F> {
    type Checked = CrossValidationValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_folds < 2 {
            Err(Error::Parameters(format!(
                "n_folds must be at least 2, but was {}",
                self.0.n_folds
            )))
        } else if !(self.0.train_ratio > 0.0 && self.0.train_ratio < 1.0) {
            Err(Error::Parameters(format!(
                "train_ratio must be between 0 and 1, but was {}",
                self.0.train_ratio
            )))
        } else {
            self.0.tree.check_ref()?;
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
        let params = CrossValidatedTree::<f64>::params().check().unwrap();
        assert_eq!(params.n_folds(), 10);
        assert_eq!(params.train_ratio(), 0.8);
        assert_eq!(params.tree(), &RegressionTree::params());
    }

    #[test]
    fn invalid_params() {
        let params = CrossValidatedTree::<f64>::params();

        assert!(params.n_folds(1).check_ref().is_err());
        assert!(params.train_ratio(0.).check_ref().is_err());
        assert!(params.train_ratio(1.).check_ref().is_err());
        assert!(params.train_ratio(f32::NAN).check_ref().is_err());
        assert!(params
            .tree(RegressionTree::params().max_leaf_samples(0))
            .check_ref()
            .is_err());
        assert!(params.n_folds(2).train_ratio(0.5).check_ref().is_ok());
    }
}
