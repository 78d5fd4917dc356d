//! Nodes of a regression tree and the arena holding them
//!
//! Nodes are never shared through references. A tree is an index (`NodeId`) into an
//! append-only [`NodeArena`], so several trees may live in one arena and share the subtrees they
//! have in common.
use ndarray::{ArrayBase, Data, Ix1};
use sylva::{AttributeKind, Float, Value};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Index of a node in its arena
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A terminal node predicting the mean target of its samples
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf<F> {
    prediction: F,
    rss: F,
    samples: Vec<usize>,
}

impl<F: Float> Leaf<F> {
    /// Creates a leaf over the given training rows
    pub(crate) fn from_samples(
        samples: Vec<usize>,
        targets: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Self {
        let (prediction, rss) = mean_and_rss(&samples, targets);

        Leaf {
            prediction,
            rss,
            samples,
        }
    }

    /// The mean target of the retained samples
    pub fn prediction(&self) -> F {
        self.prediction
    }

    /// Residual sum of squares of the retained samples around their mean
    pub fn rss(&self) -> F {
        self.rss
    }

    /// Training rows retained by this leaf
    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    pub fn nsamples(&self) -> usize {
        self.samples.len()
    }
}

/// An internal node routing samples to one of its children
///
/// A continuous split has a single cut and two children, `[<= cut, > cut]`. A discrete split
/// has one child per cut, in ascending order of the cut values.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Split<F> {
    feature: usize,
    kind: AttributeKind,
    cuts: Vec<F>,
    children: Vec<NodeId>,
}

impl<F: Float> Split<F> {
    pub(crate) fn new(
        feature: usize,
        kind: AttributeKind,
        cuts: Vec<F>,
        children: Vec<NodeId>,
    ) -> Self {
        debug_assert!(match kind {
            AttributeKind::Continuous => cuts.len() == 1 && children.len() == 2,
            AttributeKind::Discrete => cuts.len() == children.len(),
        });

        Split {
            feature,
            kind,
            cuts,
            children,
        }
    }

    /// Position of the split attribute in the schema
    pub fn feature(&self) -> usize {
        self.feature
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn cuts(&self) -> &[F] {
        &self.cuts
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position of the child a value is routed to
    ///
    /// Missing values always take the first child. Continuous values go left when they are
    /// less or equal to the cut. Discrete values take the child of the equal cut, or of the
    /// nearest cut if the token was never seen while growing the tree.
    pub fn route(&self, value: &Value<F>) -> usize {
        let x = match value.as_float() {
            Some(x) => x,
            None => return 0,
        };

        match self.kind {
            AttributeKind::Continuous => {
                if x <= self.cuts[0] {
                    0
                } else {
                    1
                }
            }
            AttributeKind::Discrete => self
                .cuts
                .iter()
                .position(|cut| *cut == x)
                .unwrap_or_else(|| nearest_cut(&self.cuts, x)),
        }
    }

    /// Returns a copy of this split with the child at `pos` replaced
    pub(crate) fn with_child(&self, pos: usize, child: NodeId) -> Self {
        let mut split = self.clone();
        split.children[pos] = child;
        split
    }
}

fn nearest_cut<F: Float>(cuts: &[F], x: F) -> usize {
    let mut best = 0;
    let mut smallest_diff = F::infinity();
    for (idx, cut) in cuts.iter().enumerate() {
        let diff = (*cut - x).abs();
        if diff < smallest_diff {
            smallest_diff = diff;
            best = idx;
        }
    }

    best
}

/// A node in the regression tree
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<F> {
    Leaf(Leaf<F>),
    Split(Split<F>),
}

impl<F> TreeNode<F> {
    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf<F>> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split<F>> {
        match self {
            TreeNode::Split(split) => Some(split),
            TreeNode::Leaf(_) => None,
        }
    }

    /// Children of the node, empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match self {
            TreeNode::Split(split) => &split.children,
            TreeNode::Leaf(_) => &[],
        }
    }
}

/// Append-only storage of tree nodes
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Default)]
pub struct NodeArena<F> {
    nodes: Vec<TreeNode<F>>,
}

impl<F> NodeArena<F> {
    pub(crate) fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: TreeNode<F>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Overwrites a node that is not yet referenced by any published tree
    pub(crate) fn replace(&mut self, id: NodeId, node: TreeNode<F>) {
        self.nodes[id.0] = node;
    }

    pub fn get(&self, id: NodeId) -> &TreeNode<F> {
        &self.nodes[id.0]
    }

    /// Number of nodes of all trees stored in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Mean and residual sum of squares of the targets of the given rows
///
/// Both are zero for an empty set of rows.
pub(crate) fn mean_and_rss<F: Float>(
    samples: &[usize],
    targets: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (F, F) {
    if samples.is_empty() {
        return (F::zero(), F::zero());
    }

    let mean = samples.iter().map(|&idx| targets[idx]).sum::<F>() / F::cast(samples.len());
    let rss = samples
        .iter()
        .map(|&idx| {
            let diff = targets[idx] - mean;
            diff * diff
        })
        .sum();

    (mean, rss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn leaf_statistics() {
        let targets = array![1., 2., 3., 10.];
        let leaf = Leaf::from_samples(vec![0, 1, 2], &targets);

        assert_abs_diff_eq!(leaf.prediction(), 2.);
        assert_abs_diff_eq!(leaf.rss(), 2.);
        assert_eq!(leaf.samples(), &[0, 1, 2]);
    }

    #[test]
    fn continuous_routing() {
        let split = Split::new(
            0,
            AttributeKind::Continuous,
            vec![2.5],
            vec![NodeId(1), NodeId(2)],
        );

        assert_eq!(split.route(&Value::Continuous(2.5)), 0);
        assert_eq!(split.route(&Value::Continuous(-1.)), 0);
        assert_eq!(split.route(&Value::Continuous(2.6)), 1);
        assert_eq!(split.route(&Value::Missing), 0);
    }

    #[test]
    fn discrete_routing_falls_back_to_nearest_cut() {
        let split = Split::new(
            0,
            AttributeKind::Discrete,
            vec![70., 75., 80.],
            vec![NodeId(1), NodeId(2), NodeId(3)],
        );

        assert_eq!(split.route(&Value::Discrete(75.)), 1);
        assert_eq!(split.route(&Value::Discrete(79.)), 2);
        assert_eq!(split.route(&Value::Discrete(10.)), 0);
        // equidistant tokens take the first of the nearest cuts
        assert_eq!(split.route(&Value::Discrete(72.5)), 0);
        assert_eq!(split.route(&Value::Missing), 0);
    }

    #[test]
    fn replacing_a_child_copies_the_split() {
        let split = Split::new(
            3,
            AttributeKind::Continuous,
            vec![1.],
            vec![NodeId(1), NodeId(2)],
        );
        let copy = split.with_child(1, NodeId(7));

        assert_eq!(split.children(), &[NodeId(1), NodeId(2)]);
        assert_eq!(copy.children(), &[NodeId(1), NodeId(7)]);
        assert_eq!(copy.feature(), 3);
    }
}
