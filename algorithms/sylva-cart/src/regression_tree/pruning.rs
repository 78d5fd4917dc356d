//! Cost-complexity (weakest-link) pruning
//!
//! Every step collapses the internal node whose removal increases the residual sum of squares
//! the least per removed leaf. Nodes are never modified in place: a collapse appends a new leaf
//! and copies the ancestors of the collapsed node, so consecutive trees of the path share all
//! untouched subtrees.
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use log::{debug, trace};

use super::node::{mean_and_rss, Leaf, NodeArena, NodeId, TreeNode};
use super::RegressionTree;
use crate::error::{CartError, Result};
use sylva::Float;

/// Nested sequence of pruned trees
///
/// The first tree is the unpruned tree with alpha zero, every following tree collapses one more
/// internal node and the last tree is a single leaf. The alphas are non-decreasing.
#[derive(Clone, Debug)]
pub struct PruningPath<F> {
    trees: Vec<RegressionTree<F>>,
    alphas: Vec<F>,
}

impl<F: Float> PruningPath<F> {
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn alphas(&self) -> &[F] {
        &self.alphas
    }

    pub fn trees(&self) -> &[RegressionTree<F>] {
        &self.trees
    }

    pub fn get(&self, idx: usize) -> Option<(&RegressionTree<F>, F)> {
        self.trees.get(idx).map(|tree| (tree, self.alphas[idx]))
    }

    /// Iterate over `(tree, alpha)` pairs, most complex tree first
    pub fn iter(&self) -> impl Iterator<Item = (&RegressionTree<F>, F)> + '_ {
        self.trees.iter().zip(self.alphas.iter().copied())
    }

    /// Position of the first tree pruned at exactly this alpha
    pub fn position(&self, alpha: F) -> Option<usize> {
        self.alphas.iter().position(|a| *a == alpha)
    }
}

/// Leaves below a node: the union of their samples, the sum of their residual sums of squares
/// and their count
fn subtree_leaves<F: Float>(arena: &NodeArena<F>, id: NodeId) -> (Vec<usize>, F, usize) {
    let mut samples = Vec::new();
    let mut rss = F::zero();
    let mut count = 0;

    let mut stack = vec![id];
    while let Some(id) = stack.pop() {
        match arena.get(id) {
            TreeNode::Leaf(leaf) => {
                samples.extend_from_slice(leaf.samples());
                rss = rss + leaf.rss();
                count += 1;
            }
            TreeNode::Split(split) => stack.extend(split.children()),
        }
    }

    (samples, rss, count)
}

/// The weakest link below `root`
struct WeakestLink<F> {
    node: NodeId,
    alpha: F,
    samples: Vec<usize>,
    /// Parent and child position of every internal node reachable from the root
    parents: HashMap<NodeId, (NodeId, usize)>,
}

/// Finds the internal node with the smallest alpha, the first in level order on ties
fn weakest_link<F: Float>(
    arena: &NodeArena<F>,
    root: NodeId,
    targets: &ndarray::Array1<F>,
) -> Option<WeakestLink<F>> {
    let mut parents = HashMap::new();
    let mut best: Option<(NodeId, F, Vec<usize>)> = None;

    let mut queue = VecDeque::new();
    queue.push_back(root);
    while let Some(id) = queue.pop_front() {
        let split = match arena.get(id) {
            TreeNode::Split(split) => split,
            TreeNode::Leaf(_) => continue,
        };
        for (pos, child) in split.children().iter().enumerate() {
            parents.insert(*child, (id, pos));
            queue.push_back(*child);
        }

        let (samples, leaves_rss, nleaves) = subtree_leaves(arena, id);
        if nleaves < 2 {
            trace!("skip node {} with a single leaf", id.index());
            continue;
        }

        let (_, rss) = mean_and_rss(&samples, targets);
        let alpha = (rss - leaves_rss) / F::cast(nleaves - 1);
        if best.as_ref().map_or(true, |(_, best, _)| alpha < *best) {
            best = Some((id, alpha, samples));
        }
    }

    best.map(|(node, alpha, samples)| WeakestLink {
        node,
        alpha,
        samples,
        parents,
    })
}

/// Replaces `link.node` by a leaf over its samples and copies its ancestors
///
/// Returns the root of the new tree.
fn collapse<F: Float>(
    arena: &mut NodeArena<F>,
    link: WeakestLink<F>,
    targets: &ndarray::Array1<F>,
) -> NodeId {
    let mut samples = link.samples;
    samples.sort_unstable();

    let mut child = arena.push(TreeNode::Leaf(Leaf::from_samples(samples, targets)));
    let mut node = link.node;
    while let Some(&(parent, pos)) = link.parents.get(&node) {
        let copy = match arena.get(parent) {
            TreeNode::Split(split) => split.with_child(pos, child),
            TreeNode::Leaf(_) => unreachable!("parents are always internal nodes"),
        };
        child = arena.push(TreeNode::Split(copy));
        node = parent;
    }

    child
}

impl<F: Float> RegressionTree<F> {
    /// Derive the cost-complexity pruning path of this tree
    ///
    /// For an internal node `t` the alpha is the increase of the residual sum of squares when
    /// all leaves below `t` are merged, divided by the number of leaves removed. The path
    /// holds one tree per internal node plus the unpruned tree. The tree itself is not
    /// modified, it remains the first entry of the path.
    ///
    /// Fails with [`CartError::NonMonotonicAlpha`] if an alpha falls below its predecessor by
    /// more than the floating point tolerance.
    pub fn prune(&self) -> Result<PruningPath<F>> {
        let targets = self.training_targets();
        let mut arena: NodeArena<F> = NodeArena::clone(self.arena());

        let mut roots = vec![self.root()];
        let mut alphas = vec![F::zero()];
        let tolerance = F::epsilon().sqrt();

        let mut root = self.root();
        while !arena.get(root).is_leaf() {
            let link = match weakest_link(&arena, root, targets) {
                Some(link) => link,
                None => break,
            };
            let alpha = link.alpha;

            let previous = alphas[alphas.len() - 1];
            if alpha < previous - tolerance * F::one().max(previous.abs()) {
                return Err(CartError::NonMonotonicAlpha {
                    step: alphas.len(),
                    previous: previous.to_f64().unwrap_or(f64::NAN),
                    current: alpha.to_f64().unwrap_or(f64::NAN),
                });
            }

            trace!(
                "collapse node {} into {} samples at alpha {}",
                link.node.index(),
                link.samples.len(),
                alpha
            );
            root = collapse(&mut arena, link, targets);
            roots.push(root);
            alphas.push(alpha);
        }

        debug!(
            "pruning path of {} trees, alphas from {} to {}",
            roots.len(),
            alphas[0],
            alphas[alphas.len() - 1]
        );

        let arena = Arc::new(arena);
        let trees = roots
            .into_iter()
            .map(|root| {
                RegressionTree::from_parts(
                    arena.clone(),
                    root,
                    self.shared_schema().clone(),
                    self.shared_targets().clone(),
                )
            })
            .collect();

        Ok(PruningPath { trees, alphas })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sylva::{traits::Fit, Attribute, Dataset, Schema};

    /// Three plateaus, grown into a tree with three leaves
    fn plateaus() -> Dataset<f64> {
        let schema = Schema::new(vec![Attribute::continuous("x")], "y");
        let rows = (1..=12).map(|i| vec![Some(i as f64)]).collect();
        let targets = (1..=12)
            .map(|i| match i {
                1..=4 => 0.,
                5..=8 => 10.,
                _ => 20.,
            })
            .collect();

        Dataset::from_raw(schema, rows, targets).unwrap()
    }

    #[test]
    fn weakest_link_is_collapsed_first() -> Result<()> {
        let tree = RegressionTree::params().fit(&plateaus())?;
        assert_eq!(tree.num_leaves(), 3);
        assert_eq!(tree.num_internal(), 2);

        let path = tree.prune()?;
        assert_eq!(path.len(), 3);
        assert_abs_diff_eq!(path.alphas()[0], 0.);
        // merging the plateaus at 10 and 20 costs 200
        assert_abs_diff_eq!(path.alphas()[1], 200.);
        // merging the remaining two leaves costs 800 - 200
        assert_abs_diff_eq!(path.alphas()[2], 600.);

        assert_eq!(path.trees()[1].num_leaves(), 2);
        let root = path.trees()[2].root_node().as_leaf().unwrap();
        assert_eq!(root.samples(), (0..12).collect::<Vec<_>>().as_slice());
        assert_abs_diff_eq!(root.prediction(), 10.);
        assert_abs_diff_eq!(root.rss(), 800.);

        Ok(())
    }

    #[test]
    fn pruning_leaves_the_tree_untouched() -> Result<()> {
        let tree = RegressionTree::params().fit(&plateaus())?;
        let copy = tree.clone();
        let path = tree.prune()?;

        assert_eq!(tree, copy);
        assert_eq!(path.trees()[0], tree);
        assert_eq!(path.position(0.), Some(0));
        assert_eq!(path.position(600.), Some(2));
        assert_eq!(path.position(1.), None);

        Ok(())
    }

    #[test]
    fn collapses_copy_only_the_ancestors() -> Result<()> {
        let tree = RegressionTree::params().fit(&plateaus())?;
        let nodes = tree.arena().len();
        let path = tree.prune()?;

        // first collapse: a new leaf and a copy of the root, second: a new leaf
        assert_eq!(path.trees()[2].arena().len(), nodes + 3);
        // the untouched left leaf is shared by both trees
        let left = |tree: &RegressionTree<f64>| tree.root_node().children()[0];
        assert_eq!(left(&path.trees()[0]), left(&path.trees()[1]));

        Ok(())
    }

    #[test]
    fn single_leaf_has_a_trivial_path() -> Result<()> {
        let schema = Schema::new(vec![Attribute::continuous("x")], "y");
        let rows = (0..6).map(|i| vec![Some(i as f64)]).collect();
        let dataset = Dataset::from_raw(schema, rows, vec![3.; 6])?;
        let path = RegressionTree::params().fit(&dataset)?.prune()?;

        assert_eq!(path.len(), 1);
        assert_eq!(path.alphas(), &[0.]);

        Ok(())
    }
}
