use std::fmt;

use super::node::{NodeId, TreeNode};
use super::RegressionTree;
use sylva::{AttributeKind, Float};

fn format_cuts<F: Float>(cuts: &[F]) -> String {
    cuts.iter()
        .map(|cut| cut.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the tree as indented text
///
/// A split prints `attribute = [cuts]` followed by its children, one per line, indented by one
/// more tab than the split. A leaf prints its prediction.
impl<F: Float> fmt::Display for RegressionTree<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // (depth, node), children pushed in reverse to keep them ordered
        let mut stack = vec![(0, self.root())];
        let mut first = true;

        while let Some((depth, id)) = stack.pop() {
            if !first {
                writeln!(f)?;
                write!(f, "{}", "\t".repeat(depth))?;
            }
            first = false;

            match self.node(id) {
                TreeNode::Leaf(leaf) => write!(f, "{}", leaf.prediction())?,
                TreeNode::Split(split) => {
                    write!(
                        f,
                        "{} = [{}]",
                        self.schema().attribute(split.feature()).name(),
                        format_cuts(split.cuts())
                    )?;
                    stack.extend(split.children().iter().rev().map(|child| (depth + 1, *child)));
                }
            }
        }

        Ok(())
    }
}

/// Graphviz export of a tree
///
/// Every node is written with its position in the arena as identifier. Edges of a split are
/// labelled with the branch condition, the first branch of every split also receives the
/// missing values.
#[derive(Clone, Copy)]
pub struct Dot<'a, F: Float> {
    tree: &'a RegressionTree<F>,
    samples: bool,
    rss: bool,
}

impl<'a, F: Float> Dot<'a, F> {
    /// Creates a new Dot structure for the regression tree
    /// The following default values will be used:
    ///
    /// * `samples=true`
    /// * `rss=false`
    ///
    pub fn new(tree: &'a RegressionTree<F>) -> Self {
        Dot {
            tree,
            samples: true,
            rss: false,
        }
    }

    /// Whether leaves show the number of samples they retain
    pub fn with_samples(mut self, samples: bool) -> Self {
        self.samples = samples;
        self
    }

    /// Whether leaves show their residual sum of squares
    pub fn with_rss(mut self, rss: bool) -> Self {
        self.rss = rss;
        self
    }

    fn leaf_label(&self, id: NodeId) -> String {
        let leaf = match self.tree.node(id).as_leaf() {
            Some(leaf) => leaf,
            None => return String::new(),
        };

        let mut label = format!("{:.4}", leaf.prediction());
        if self.samples {
            label.push_str(&format!("\\nsamples = {}", leaf.nsamples()));
        }
        if self.rss {
            label.push_str(&format!("\\nrss = {:.4}", leaf.rss()));
        }

        label
    }
}

impl<'a, F: Float> fmt::Display for Dot<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph RegressionTree {{")?;
        writeln!(f, "  node [shape=box, style=rounded, fontname=helvetica];")?;
        writeln!(f, "  edge [fontname=helvetica];")?;

        let mut stack = vec![self.tree.root()];
        while let Some(id) = stack.pop() {
            match self.tree.node(id) {
                TreeNode::Leaf(_) => {
                    writeln!(f, "  {} [label=\"{}\"];", id.index(), self.leaf_label(id))?;
                }
                TreeNode::Split(split) => {
                    let name = self.tree.schema().attribute(split.feature()).name();
                    writeln!(f, "  {} [label=\"{}\"];", id.index(), name)?;

                    for (pos, child) in split.children().iter().enumerate() {
                        let condition = match split.kind() {
                            AttributeKind::Continuous if pos == 0 => {
                                format!("<= {}", split.cuts()[0])
                            }
                            AttributeKind::Continuous => format!("> {}", split.cuts()[0]),
                            AttributeKind::Discrete => format!("= {}", split.cuts()[pos]),
                        };
                        writeln!(
                            f,
                            "  {} -> {} [label=\"{}\"];",
                            id.index(),
                            child.index(),
                            condition
                        )?;
                    }
                    stack.extend(split.children().iter().rev());
                }
            }
        }

        write!(f, "}}")
    }
}

impl<F: Float> RegressionTree<F> {
    /// Generates a [`Dot`](struct.Dot.html) structure to render the fitted tree with Graphviz
    pub fn export_to_dot(&self) -> Dot<'_, F> {
        Dot::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylva::{traits::Fit, Attribute, Dataset, Schema};

    fn tree() -> RegressionTree<f64> {
        let schema = Schema::new(
            vec![Attribute::continuous("x"), Attribute::discrete("origin")],
            "y",
        );
        let rows = (0..12)
            .map(|i| vec![Some(i as f64), Some((i / 6) as f64 + 1.)])
            .collect();
        let targets = (0..12)
            .map(|i| match i {
                0..=5 => 1.,
                6..=8 => 5.,
                _ => 7.,
            })
            .collect();
        let dataset = Dataset::from_raw(schema, rows, targets).unwrap();

        RegressionTree::params().max_leaf_samples(2).fit(&dataset).unwrap()
    }

    #[test]
    fn indented_text() {
        assert_eq!(tree().to_string(), "x = [5.5]\n\t1\n\tx = [8.5]\n\t\t5\n\t\t7");
    }

    #[test]
    fn graphviz() {
        let dot = tree().export_to_dot().with_rss(true).to_string();

        assert!(dot.starts_with("digraph RegressionTree {"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("[label=\"x\"]"));
        assert!(dot.contains("[label=\"<= 5.5\"]"));
        assert!(dot.contains("[label=\"> 8.5\"]"));
        assert!(dot.contains("1.0000\\nsamples = 6\\nrss = 0.0000"));
    }
}
