//! Selection of a pruned tree by k-fold cross-validation
//!
use log::{debug, info};
use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use rayon::prelude::*;

use super::CrossValidationValidParams;
use crate::error::{CartError, Result};
use crate::{PruningPath, RegressionTree};
use sylva::{
    dataset::{fold_ranges, Records},
    error::Error,
    traits::*,
    Dataset, DatasetBase, Float, Value,
};

/// Mean cross-validation score of a single alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaScore<F> {
    /// The alpha shared by the scored trees
    pub alpha: F,
    /// Mean of the scores of all trees pruned at this alpha
    pub mean_rmse: F,
    /// Number of trees, over all folds, pruned at this alpha
    pub count: usize,
    /// Whether the alpha is part of the pruning path of the full training set
    pub eligible: bool,
}

/// A pruned tree selected by k-fold cross-validation
///
/// ## Algorithm
///
/// Given a training set divided into `k` contiguous folds and a test set:
/// 1. Grow a tree on the whole training set and derive its pruning path
/// 2. For every fold `i`, in parallel:
///    a. Grow and prune a tree on all folds except `i`
///    b. Score every tree of this path with the mean of its root mean squared errors on all
///       `k` folds
/// 3. Average the scores of every distinct alpha over all folds
/// 4. Among the alphas present in the path of step 1, select the one with the lowest mean
///    score, the first one on ties
///
/// The selected tree is the first tree of the full path pruned at the selected alpha. It is
/// evaluated on the test set, together with every other tree of the full path.
///
/// ## Example
///
/// ```rust
/// use sylva::prelude::*;
/// use sylva_cart::CrossValidatedTree;
///
/// let dataset = sylva_datasets::generate::step_dataset(60, 10., 1., 3);
/// let selection = CrossValidatedTree::params()
///     .n_folds(5)
///     .fit(&dataset)
///     .unwrap();
///
/// println!("alpha {} with test rmse {}", selection.alpha(), selection.test_rmse());
/// assert_eq!(selection.path().len(), selection.test_rmses().len());
/// ```
#[derive(Clone, Debug)]
pub struct CrossValidatedTree<F> {
    tree: RegressionTree<F>,
    alpha: F,
    test_rmse: F,
    path: PruningPath<F>,
    test_rmses: Vec<F>,
    scores: Vec<AlphaScore<F>>,
}

impl<F: Float> CrossValidatedTree<F> {
    /// The selected tree
    pub fn tree(&self) -> &RegressionTree<F> {
        &self.tree
    }

    /// The selected alpha
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Root mean squared error of the selected tree on the test set
    pub fn test_rmse(&self) -> F {
        self.test_rmse
    }

    /// Pruning path of the tree grown on the full training set
    pub fn path(&self) -> &PruningPath<F> {
        &self.path
    }

    /// Root mean squared error on the test set of every tree of the path
    pub fn test_rmses(&self) -> &[F] {
        &self.test_rmses
    }

    /// Cross-validation scores in order of the first appearance of every alpha
    pub fn scores(&self) -> &[AlphaScore<F>] {
        &self.scores
    }

    pub fn into_tree(self) -> RegressionTree<F> {
        self.tree
    }
}

/// Mean root mean squared error of every tree of a path over all folds
fn score_path<F: Float>(path: &PruningPath<F>, folds: &[Dataset<F>]) -> Result<Vec<(F, F)>> {
    path.iter()
        .map(|(tree, alpha)| -> Result<(F, F)> {
            let mut total = F::zero();
            for fold in folds {
                let prediction = tree.predict(fold.records());
                total = total + fold.root_mean_squared_error(&prediction)?;
            }

            Ok((alpha, total / F::cast(folds.len())))
        })
        .collect()
}

/// Averages the scores of every alpha in order of first appearance
fn aggregate<F: Float>(per_fold: Vec<Vec<(F, F)>>, path: &PruningPath<F>) -> Vec<AlphaScore<F>> {
    let mut sums: Vec<(F, F, usize)> = Vec::new();
    for (alpha, score) in per_fold.into_iter().flatten() {
        match sums.iter_mut().find(|(a, _, _)| *a == alpha) {
            Some((_, sum, count)) => {
                *sum = *sum + score;
                *count += 1;
            }
            None => sums.push((alpha, score, 1)),
        }
    }

    sums.into_iter()
        .map(|(alpha, sum, count)| AlphaScore {
            alpha,
            mean_rmse: sum / F::cast(count),
            count,
            eligible: path.position(alpha).is_some(),
        })
        .collect()
}

impl<F: Float> CrossValidationValidParams<F> {
    /// Select a pruned tree by cross-validation on `train` and evaluate it on `test`
    pub fn select<D, T, E, S>(
        &self,
        train: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>,
        test: &DatasetBase<ArrayBase<E, Ix2>, ArrayBase<S, Ix1>>,
    ) -> Result<CrossValidatedTree<F>>
    where
        D: Data<Elem = Value<F>>,
        T: Data<Elem = F>,
        E: Data<Elem = Value<F>>,
        S: Data<Elem = F>,
    {
        let nsamples = train.nsamples();
        let k = self.n_folds();
        if k > nsamples {
            return Err(Error::Parameters(format!(
                "n_folds must not exceed the {} training samples, but was {}",
                nsamples, k
            ))
            .into());
        }

        let full = self.tree().fit(train)?;
        let path = full.prune()?;

        let ranges = fold_ranges(nsamples, k);
        let folds: Vec<Dataset<F>> = ranges
            .iter()
            .map(|range| train.select(&range.clone().collect::<Vec<_>>()))
            .collect();
        let complements: Vec<Dataset<F>> = ranges
            .iter()
            .map(|held_out| {
                let indices: Vec<usize> = (0..nsamples)
                    .filter(|idx| !held_out.contains(idx))
                    .collect();
                train.select(&indices)
            })
            .collect();

        let per_fold = complements
            .par_iter()
            .enumerate()
            .map(|(fold, complement)| -> Result<Vec<(F, F)>> {
                let path = self.tree().fit(complement)?.prune()?;
                debug!("fold {} pruned into {} trees", fold, path.len());

                score_path(&path, &folds)
            })
            .collect::<Result<Vec<_>>>()?;

        let scores = aggregate(per_fold, &path);

        let mut best: Option<&AlphaScore<F>> = None;
        for score in scores.iter().filter(|score| score.eligible) {
            if best.map_or(true, |best| score.mean_rmse < best.mean_rmse) {
                best = Some(score);
            }
        }
        let alpha = best.ok_or(CartError::NoEligibleAlpha)?.alpha;
        let position = path.position(alpha).ok_or(CartError::NoEligibleAlpha)?;

        let test_rmses = path
            .trees()
            .iter()
            .map(|tree| -> Result<F> {
                let prediction = tree.predict(test)?;
                Ok(test.root_mean_squared_error(&prediction)?)
            })
            .collect::<Result<Vec<F>>>()?;
        let test_rmse = test_rmses[position];

        info!(
            "selected alpha {} of {} candidates, tree with {} leaves has test rmse {}",
            alpha,
            path.len(),
            path.trees()[position].num_leaves(),
            test_rmse
        );

        Ok(CrossValidatedTree {
            tree: path.trees()[position].clone(),
            alpha,
            test_rmse,
            path,
            test_rmses,
            scores,
        })
    }
}

impl<F: Float, D, T> Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, CartError>
    for CrossValidationValidParams<F>
where
    D: Data<Elem = Value<F>>,
    T: Data<Elem = F>,
{
    type Object = CrossValidatedTree<F>;

    /// Split the dataset into a training and a test set with `train_ratio`, keeping the order
    /// of the samples, and select a pruned tree on them
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>) -> Result<Self::Object> {
        let (train, test) = dataset.split_with_ratio(self.train_ratio());

        self.select(&train, &test)
    }
}

/// Predict the targets of a dataset with the selected tree
impl<'a, F: Float, D: Data<Elem = Value<F>>, T> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, T>, Result<Array1<F>>>
    for CrossValidatedTree<F>
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Array1<F>> {
        self.tree.predict(dataset)
    }
}
