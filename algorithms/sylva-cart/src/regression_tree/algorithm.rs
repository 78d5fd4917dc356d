//! Regression trees over mixed continuous and discrete attributes
//!
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};
use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};
use rayon::prelude::*;

use super::node::{mean_and_rss, Leaf, NodeArena, NodeId, Split, TreeNode};
use super::{NodeIter, RegressionTreeValidParams};
use crate::error::{CartError, Result};
use sylva::{dataset::Records, traits::*, AttributeKind, DatasetBase, Float, Schema, Value};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The best partition of a node's samples along a single attribute
struct Candidate<F> {
    feature: usize,
    kind: AttributeKind,
    cuts: Vec<F>,
    sections: Vec<Vec<usize>>,
    rss: F,
}

/// Sum of the residual sums of squares of every section around its own mean
fn partition_rss<F: Float>(sections: &[Vec<usize>], targets: &ArrayView1<F>) -> F {
    sections
        .iter()
        .map(|section| mean_and_rss(section, targets).1)
        .sum()
}

/// Distinct non-missing values of an attribute among the given samples, in ascending order
fn distinct_values<F: Float>(column: &ArrayView1<Value<F>>, samples: &[usize]) -> Vec<F> {
    let mut values: Vec<F> = samples
        .iter()
        .filter_map(|&idx| column[idx].as_float())
        .collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values.dedup();

    values
}

/// Searches the cut of a single attribute with the smallest residual sum of squares
///
/// Returns `None` for degenerate attributes, those with less than two distinct values among
/// the samples, and when no cut yields a finite residual sum of squares. Partitions leaving a
/// section empty are never candidates, so every split shrinks the sample sets of its children.
fn best_candidate<F: Float>(
    records: &ArrayView2<Value<F>>,
    targets: &ArrayView1<F>,
    samples: &[usize],
    feature: usize,
    kind: AttributeKind,
) -> Option<Candidate<F>> {
    let column = records.index_axis(Axis(1), feature);
    let values = distinct_values(&column, samples);
    if values.len() < 2 {
        return None;
    }

    let candidates = match kind {
        AttributeKind::Continuous => values
            .windows(2)
            .map(|pair| {
                let cut = (pair[0] + pair[1]) / F::cast(2.);
                // missing values are evaluated on the lower side of the cut
                let (lower, upper): (Vec<usize>, Vec<usize>) = samples
                    .iter()
                    .partition(|&&idx| match column[idx].as_float() {
                        Some(x) => x <= cut,
                        None => true,
                    });
                (vec![cut], vec![lower, upper])
            })
            .collect::<Vec<_>>(),
        AttributeKind::Discrete => {
            // missing values take part in none of the sections
            let sections = values
                .iter()
                .map(|value| {
                    samples
                        .iter()
                        .copied()
                        .filter(|&idx| column[idx].as_float() == Some(*value))
                        .collect::<Vec<usize>>()
                })
                .collect::<Vec<_>>();
            vec![(values, sections)]
        }
    };

    let mut best: Option<Candidate<F>> = None;
    for (cuts, sections) in candidates {
        if sections.iter().any(|section| section.is_empty()) {
            continue;
        }
        let rss = partition_rss(&sections, targets);
        if !rss.is_finite() {
            continue;
        }
        if best.as_ref().map_or(true, |best| rss < best.rss) {
            best = Some(Candidate {
                feature,
                kind,
                cuts,
                sections,
                rss,
            });
        }
    }

    best
}

/// Grows a tree into an arena with an explicit work stack
///
/// Every node is reserved as a placeholder leaf when it is pushed on the stack and overwritten
/// once its samples have been examined, so parents can refer to their children before the
/// children are grown.
struct TreeBuilder<'a, F> {
    records: ArrayView2<'a, Value<F>>,
    targets: ArrayView1<'a, F>,
    schema: &'a Schema,
    max_leaf_samples: usize,
    arena: NodeArena<F>,
}

impl<'a, F: Float> TreeBuilder<'a, F> {
    fn new(
        records: ArrayView2<'a, Value<F>>,
        targets: ArrayView1<'a, F>,
        schema: &'a Schema,
        max_leaf_samples: usize,
    ) -> Self {
        TreeBuilder {
            records,
            targets,
            schema,
            max_leaf_samples,
            arena: NodeArena::new(),
        }
    }

    fn reserve(&mut self) -> NodeId {
        self.arena.push(TreeNode::Leaf(Leaf::from_samples(
            Vec::new(),
            &self.targets,
        )))
    }

    /// Finds the split of a node, ties are resolved in favour of the first attribute
    fn best_split(&self, samples: &[usize]) -> Option<Candidate<F>> {
        let candidates: Vec<Option<Candidate<F>>> = self
            .schema
            .attributes()
            .par_iter()
            .enumerate()
            .map(|(feature, attribute)| {
                best_candidate(
                    &self.records,
                    &self.targets,
                    samples,
                    feature,
                    attribute.kind(),
                )
            })
            .collect();

        let mut best: Option<Candidate<F>> = None;
        for candidate in candidates.into_iter().flatten() {
            if best.as_ref().map_or(true, |best| candidate.rss < best.rss) {
                best = Some(candidate);
            }
        }

        best
    }

    fn grow(mut self, samples: Vec<usize>) -> Result<(NodeArena<F>, NodeId)> {
        if samples.is_empty() {
            return Err(CartError::EmptySampleSet);
        }

        let root = self.reserve();
        let mut stack = vec![(root, samples)];

        while let Some((id, samples)) = stack.pop() {
            let leaf = Leaf::from_samples(samples, &self.targets);
            if leaf.nsamples() <= self.max_leaf_samples || leaf.rss() == F::zero() {
                self.arena.replace(id, TreeNode::Leaf(leaf));
                continue;
            }

            let candidate = self
                .best_split(leaf.samples())
                .ok_or(CartError::NoValidSplitFound {
                    samples: leaf.nsamples(),
                })?;

            trace!(
                "split {} samples on `{}` with {} cuts, rss {} -> {}",
                leaf.nsamples(),
                self.schema.attribute(candidate.feature).name(),
                candidate.cuts.len(),
                leaf.rss(),
                candidate.rss
            );

            let children: Vec<NodeId> = candidate
                .sections
                .iter()
                .map(|_| self.reserve())
                .collect();
            // reversed so that the first child is grown first
            for (child, section) in children.iter().zip(candidate.sections).rev() {
                stack.push((*child, section));
            }

            self.arena.replace(
                id,
                TreeNode::Split(Split::new(
                    candidate.feature,
                    candidate.kind,
                    candidate.cuts,
                    children,
                )),
            );
        }

        Ok((self.arena, root))
    }
}

/// A fitted regression tree
///
/// The nodes of the tree live in an arena shared with every tree of the same
/// [pruning path](struct.PruningPath.html), so cloning a tree is cheap. Leaves keep the indices
/// of the training samples they retain, the training targets are kept alongside the arena.
///
/// ### Structure
///
/// A split on a continuous attribute has a single cut and two children, the first taking all
/// values less or equal to the cut. A split on a discrete attribute has one child for every
/// token observed while growing the tree.
///
/// ### Algorithm
///
/// Starting with all training samples, a node becomes a leaf when it holds at most
/// `max_leaf_samples` samples or when all of its targets are equal. Otherwise every attribute
/// is searched for the partition minimising the residual sum of squares around the mean of
/// each section:
///
/// * continuous attributes try a cut at the midpoint of every pair of consecutive distinct
///   values, missing values are evaluated on the lower side
/// * discrete attributes split into one section per distinct token, samples with a missing
///   token are dropped
///
/// The attributes are searched in parallel. If no attribute separates the samples, growing the
/// tree fails with [`CartError::NoValidSplitFound`].
///
/// ### Predictions
///
/// A sample descends to the child selected by [`Split::route`] until it reaches a leaf and is
/// predicted with the mean target of the leaf.
///
/// ### Example
///
/// ```rust
/// use sylva::prelude::*;
/// use sylva_cart::RegressionTree;
///
/// let dataset = sylva_datasets::generate::step_dataset(24, 10., 0.1, 7);
/// let tree = RegressionTree::params().fit(&dataset).unwrap();
///
/// // the step is found with the first split
/// assert!(tree.num_leaves() >= 2);
/// println!("{}", tree);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct RegressionTree<F> {
    arena: Arc<NodeArena<F>>,
    root: NodeId,
    schema: Arc<Schema>,
    targets: Arc<Array1<F>>,
}

impl<F: Float, D, T> Fit<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>, CartError>
    for RegressionTreeValidParams<F>
where
    D: Data<Elem = Value<F>>,
    T: Data<Elem = F>,
{
    type Object = RegressionTree<F>;

    /// Grow a regression tree using the hyperparameters on all samples of the dataset
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>,
    ) -> Result<Self::Object> {
        let records = dataset.records().view();
        let targets = dataset.targets().view();

        let builder = TreeBuilder::new(records, targets, dataset.schema(), self.max_leaf_samples());
        let (arena, root) = builder.grow((0..dataset.nsamples()).collect())?;

        let tree = RegressionTree {
            arena: Arc::new(arena),
            root,
            schema: Arc::new(dataset.schema().clone()),
            targets: Arc::new(targets.to_owned()),
        };

        debug!(
            "grew tree on {} samples with {} leaves, {} internal nodes and depth {}",
            dataset.nsamples(),
            tree.num_leaves(),
            tree.num_internal(),
            tree.max_depth()
        );

        Ok(tree)
    }
}

impl<F: Float> RegressionTree<F> {
    pub(crate) fn from_parts(
        arena: Arc<NodeArena<F>>,
        root: NodeId,
        schema: Arc<Schema>,
        targets: Arc<Array1<F>>,
    ) -> Self {
        RegressionTree {
            arena,
            root,
            schema,
            targets,
        }
    }

    pub(crate) fn arena(&self) -> &Arc<NodeArena<F>> {
        &self.arena
    }

    pub(crate) fn shared_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub(crate) fn shared_targets(&self) -> &Arc<Array1<F>> {
        &self.targets
    }

    /// Targets of the samples the tree was grown on
    pub fn training_targets(&self) -> &Array1<F> {
        &self.targets
    }

    /// Schema of the dataset the tree was grown on
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Return the root node of the tree
    pub fn root_node(&self) -> &TreeNode<F> {
        self.arena.get(self.root)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode<F> {
        self.arena.get(id)
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<'_, F> {
        NodeIter::new(&self.arena, self.root)
    }

    /// Return the positions of the attributes used by a split, in ascending order
    pub fn features(&self) -> Vec<usize> {
        let fitted_features: HashSet<usize> = self
            .iter_nodes()
            .filter_map(|(_, node)| node.as_split())
            .map(|split| split.feature())
            .collect();

        let mut features: Vec<usize> = fitted_features.into_iter().collect();
        features.sort_unstable();
        features
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Return the number of internal nodes in this tree
    pub fn num_internal(&self) -> usize {
        self.iter_nodes().filter(|(_, node)| !node.is_leaf()).count()
    }

    /// Return max depth of the tree, a single leaf has depth zero
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .map(|(depth, _)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Return the leaves of the tree from left to right
    pub fn leaves(&self) -> Vec<&Leaf<F>> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.arena.get(id) {
                TreeNode::Leaf(leaf) => leaves.push(leaf),
                TreeNode::Split(split) => stack.extend(split.children().iter().rev()),
            }
        }

        leaves
    }

    /// Walk down from the root, reading the value of a split attribute with `value_of`
    fn descend(&self, value_of: impl Fn(usize) -> Value<F>) -> &Leaf<F> {
        let mut id = self.root;
        loop {
            match self.arena.get(id) {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Split(split) => {
                    let pos = split.route(&value_of(split.feature()));
                    id = split.children()[pos];
                }
            }
        }
    }

    /// Return the leaf reached by a row laid out like the training records
    pub fn leaf_for(&self, row: &ArrayBase<impl Data<Elem = Value<F>>, Ix1>) -> &Leaf<F> {
        self.descend(|feature| row[feature])
    }

    /// Predict a single row laid out like the training records
    pub fn predict_row(&self, row: &ArrayBase<impl Data<Elem = Value<F>>, Ix1>) -> F {
        self.leaf_for(row).prediction()
    }

    /// Map every attribute used by a split to its column in another schema
    fn resolve(&self, schema: &Schema) -> Result<Vec<Option<usize>>> {
        let mut columns = vec![None; self.schema.len()];
        for feature in self.features() {
            let name = self.schema.attribute(feature).name();
            let column = schema
                .attribute_index(name)
                .ok_or_else(|| CartError::AttributeNotFound(name.to_string()))?;
            columns[feature] = Some(column);
        }

        Ok(columns)
    }
}

/// Structural equality: both trees route every sample to leaves with equal statistics
impl<F: Float> PartialEq for RegressionTree<F> {
    fn eq(&self, other: &Self) -> bool {
        if self.schema != other.schema {
            return false;
        }

        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.arena.get(a), other.arena.get(b)) {
                (TreeNode::Leaf(a), TreeNode::Leaf(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (TreeNode::Split(a), TreeNode::Split(b)) => {
                    if a.feature() != b.feature()
                        || a.kind() != b.kind()
                        || a.cuts() != b.cuts()
                        || a.children().len() != b.children().len()
                    {
                        return false;
                    }
                    stack.extend(a.children().iter().copied().zip(b.children().iter().copied()));
                }
                _ => return false,
            }
        }

        true
    }
}

/// Predict the targets of a dataset
///
/// The split attributes are looked up by name in the schema of the dataset, which fails with
/// [`CartError::AttributeNotFound`] if one of them is absent.
impl<'a, F: Float, D: Data<Elem = Value<F>>, T> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, T>, Result<Array1<F>>>
    for RegressionTree<F>
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Array1<F>> {
        let columns = self.resolve(dataset.schema())?;

        Ok(dataset
            .records
            .rows()
            .into_iter()
            .map(|row| {
                self.descend(|feature| match columns[feature] {
                    Some(column) => row[column],
                    None => Value::Missing,
                })
                .prediction()
            })
            .collect())
    }
}

/// Predict rows laid out like the training records
impl<'a, F: Float, D: Data<Elem = Value<F>>> Predict<&'a ArrayBase<D, Ix2>, Array1<F>>
    for RegressionTree<F>
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> Array1<F> {
        records
            .rows()
            .into_iter()
            .map(|row| self.predict_row(&row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rand::{rngs::SmallRng, SeedableRng};
    use sylva::{Attribute, Dataset, ParamGuard};

    fn continuous(xs: &[f64], ys: &[f64]) -> Dataset<f64> {
        let schema = Schema::new(vec![Attribute::continuous("x")], "y");
        let rows = xs.iter().map(|x| vec![Some(*x)]).collect();
        Dataset::from_raw(schema, rows, ys.to_vec()).unwrap()
    }

    #[test]
    fn candidate_cuts_are_midpoints() {
        let dataset = continuous(&[1., 2., 2., 4.], &[0., 0., 0., 6.]);
        let candidate = best_candidate(
            &dataset.records().view(),
            &dataset.targets().view(),
            &[0, 1, 2, 3],
            0,
            AttributeKind::Continuous,
        )
        .unwrap();

        assert_eq!(candidate.cuts, vec![3.]);
        assert_eq!(candidate.sections, vec![vec![0, 1, 2], vec![3]]);
        assert_abs_diff_eq!(candidate.rss, 0.);
    }

    #[test]
    fn missing_values_are_evaluated_below_the_cut() {
        let schema = Schema::new(vec![Attribute::continuous("x")], "y");
        let rows = vec![Some(1.), None, Some(3.), Some(4.)];
        let rows = rows.into_iter().map(|x| vec![x]).collect();
        let dataset = Dataset::from_raw(schema, rows, vec![0., 0., 5., 5.]).unwrap();

        let candidate = best_candidate(
            &dataset.records().view(),
            &dataset.targets().view(),
            &[0, 1, 2, 3],
            0,
            AttributeKind::Continuous,
        )
        .unwrap();

        assert_eq!(candidate.cuts, vec![2.]);
        assert_eq!(candidate.sections, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn discrete_sections_drop_missing_values() {
        let schema = Schema::new(vec![Attribute::discrete("origin")], "y");
        let rows = vec![Some(3.), None, Some(1.), Some(3.), Some(2.)];
        let rows = rows.into_iter().map(|x| vec![x]).collect();
        let dataset = Dataset::from_raw(schema, rows, vec![1., 2., 3., 4., 5.]).unwrap();

        let candidate = best_candidate(
            &dataset.records().view(),
            &dataset.targets().view(),
            &[0, 1, 2, 3, 4],
            0,
            AttributeKind::Discrete,
        )
        .unwrap();

        assert_eq!(candidate.cuts, vec![1., 2., 3.]);
        assert_eq!(candidate.sections, vec![vec![2], vec![4], vec![0, 3]]);
        // only the section of token 3 has a spread, (1 - 2.5)^2 + (4 - 2.5)^2
        assert_abs_diff_eq!(candidate.rss, 4.5);
    }

    #[test]
    fn degenerate_attributes_have_no_candidate() {
        let dataset = continuous(&[2., 2., 2.], &[1., 2., 3.]);
        let candidate = best_candidate(
            &dataset.records().view(),
            &dataset.targets().view(),
            &[0, 1, 2],
            0,
            AttributeKind::Continuous,
        );

        assert!(candidate.is_none());
    }

    #[test]
    fn non_finite_values_never_leave_a_section_empty() {
        let records = Array2::from_shape_fn((8, 1), |(i, _)| {
            Value::Continuous(if i % 2 == 0 { f64::NAN } else { 5. })
        });
        let targets = Array1::from_shape_fn(8, |i| i as f64);
        let schema = Schema::new(vec![Attribute::continuous("x")], "y");

        let candidate = best_candidate(
            &records.view(),
            &targets.view(),
            &(0..8).collect::<Vec<_>>(),
            0,
            AttributeKind::Continuous,
        );
        assert!(candidate.is_none());

        let builder = TreeBuilder::new(records.view(), targets.view(), &schema, 5);
        let err = builder.grow((0..8).collect()).unwrap_err();
        assert!(matches!(err, CartError::NoValidSplitFound { samples: 8 }));

        let records = Array2::from_shape_fn((8, 1), |(i, _)| {
            Value::Continuous(if i < 4 { 1. } else { f64::INFINITY })
        });
        let candidate = best_candidate(
            &records.view(),
            &targets.view(),
            &(0..8).collect::<Vec<_>>(),
            0,
            AttributeKind::Continuous,
        );
        assert!(candidate.is_none());
    }

    #[test]
    fn identical_targets_make_a_single_leaf() -> Result<()> {
        let dataset = continuous(&[1., 2., 3., 4., 5., 6.], &[1.; 6]);
        let tree = RegressionTree::params().fit(&dataset)?;

        let leaf = tree.root_node().as_leaf().unwrap();
        assert_abs_diff_eq!(leaf.prediction(), 1.);
        assert_abs_diff_eq!(leaf.rss(), 0.);
        assert_eq!(leaf.samples(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(tree.num_leaves(), 1);
        assert_eq!(tree.max_depth(), 0);

        Ok(())
    }

    #[test]
    fn small_sets_become_leaves() -> Result<()> {
        let dataset = continuous(&[1., 2., 3., 4., 5.], &[1., 9., 2., 8., 3.]);
        let tree = RegressionTree::params().fit(&dataset)?;
        assert!(tree.root_node().is_leaf());

        let tree = RegressionTree::params().max_leaf_samples(1).fit(&dataset)?;
        assert_eq!(tree.num_leaves(), 5);

        Ok(())
    }

    #[test]
    fn empty_dataset_fails() {
        let dataset = continuous(&[], &[]);
        let err = RegressionTree::params().fit(&dataset).unwrap_err();
        assert!(matches!(err, CartError::EmptySampleSet));
    }

    #[test]
    fn inseparable_samples_fail() {
        let dataset = continuous(&[1.; 8], &[1., 2., 3., 4., 5., 6., 7., 8.]);
        let err = RegressionTree::params().fit(&dataset).unwrap_err();
        assert!(matches!(err, CartError::NoValidSplitFound { samples: 8 }));
    }

    #[test]
    fn invalid_params_fail_before_growing() {
        let dataset = continuous(&[1., 2.], &[1., 2.]);
        let err = RegressionTree::params()
            .max_leaf_samples(0)
            .fit(&dataset)
            .unwrap_err();
        assert!(matches!(err, CartError::BaseCrate(sylva::Error::Parameters(_))));
    }

    #[test]
    fn first_attribute_wins_ties() -> Result<()> {
        let schema = Schema::new(
            vec![Attribute::continuous("a"), Attribute::continuous("b")],
            "y",
        );
        let rows = (0..8)
            .map(|i| vec![Some(i as f64), Some(i as f64 * 2.)])
            .collect();
        let targets = (0..8).map(|i| if i < 4 { 0. } else { 1. }).collect();
        let dataset = Dataset::from_raw(schema, rows, targets)?;

        let tree = RegressionTree::params().fit(&dataset)?;
        let split = tree.root_node().as_split().unwrap();
        assert_eq!(split.feature(), 0);
        assert_eq!(split.cuts(), &[3.5]);
        assert_eq!(tree.features(), vec![0]);

        Ok(())
    }

    #[test]
    fn leaves_partition_the_training_samples() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = sylva_datasets::generate::noisy_dataset(120, 3, &mut rng);
        let tree = RegressionTree::params().max_leaf_samples(4).fit(&dataset)?;

        let mut samples: Vec<usize> = tree
            .leaves()
            .iter()
            .flat_map(|leaf| leaf.samples().iter().copied())
            .collect();
        samples.sort_unstable();
        assert_eq!(samples, (0..120).collect::<Vec<_>>());

        for (idx, (row, _)) in dataset.iter().enumerate() {
            let leaf = tree.leaf_for(&row);
            assert!(leaf.samples().contains(&idx));

            let mean = leaf.samples().iter().map(|&i| dataset.targets()[i]).sum::<f64>()
                / leaf.nsamples() as f64;
            assert_abs_diff_eq!(leaf.prediction(), mean, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn dataset_prediction_resolves_attributes_by_name() -> Result<()> {
        let schema = Schema::new(
            vec![Attribute::discrete("origin"), Attribute::continuous("x")],
            "y",
        );
        let rows = (0..12)
            .map(|i| vec![Some((i % 2) as f64), Some(i as f64)])
            .collect();
        let targets = (0..12).map(|i| if i < 6 { 0. } else { 10. }).collect();
        let dataset = Dataset::from_raw(schema, rows, targets)?;
        let tree = RegressionTree::params().fit(&dataset)?;

        // the incoming dataset lists its attributes in another order
        let reordered = Dataset::new(
            array![
                [Value::Continuous(2.), Value::Discrete(1.)],
                [Value::Continuous(9.), Value::Discrete(0.)]
            ],
            array![0., 10.],
            Schema::new(
                vec![Attribute::continuous("x"), Attribute::discrete("origin")],
                "y",
            ),
        )?;
        let prediction = tree.predict(&reordered)?;
        assert_abs_diff_eq!(prediction, array![0., 10.]);

        let unknown = Dataset::new(
            Array2::from_elem((1, 1), Value::Continuous(1.)),
            array![0.],
            Schema::new(vec![Attribute::continuous("z")], "y"),
        )?;
        let err = tree.predict(&unknown).unwrap_err();
        assert!(matches!(err, CartError::AttributeNotFound(name) if name == "x"));

        Ok(())
    }

    #[test]
    fn positional_prediction() -> Result<()> {
        let dataset = continuous(
            &[1., 2., 3., 4., 5., 6., 7., 8.],
            &[0., 0., 0., 0., 4., 4., 4., 4.],
        );
        let tree = RegressionTree::params().max_leaf_samples(2).fit(&dataset)?;

        let prediction = tree.predict(dataset.records());
        assert_abs_diff_eq!(prediction, dataset.targets().clone());

        let missing = array![[Value::Missing]];
        assert_abs_diff_eq!(tree.predict(&missing), array![0.]);

        Ok(())
    }

    #[test]
    fn params_check_is_idempotent() {
        let params = RegressionTree::<f64>::params().max_leaf_samples(3);
        assert_eq!(params.check_ref().unwrap().max_leaf_samples(), 3);
        assert_eq!(params.check().unwrap().max_leaf_samples(), 3);
    }
}
