//!
//! # Regression trees with cost-complexity pruning
//! `sylva-cart` grows regression trees over datasets mixing continuous and discrete attributes,
//! derives their cost-complexity pruning path and selects the best pruned tree by k-fold
//! cross-validation.
//!
//! # The big picture
//!
//! `sylva-cart` builds on the sample store of [sylva](sylva): a [`Dataset`](sylva::Dataset)
//! whose schema fixes the name and kind of every attribute slot. The three stages are
//!
//! * [`RegressionTree`], grown greedily by minimising the residual sum of squares of every split,
//! * [`PruningPath`], the nested sequence of trees obtained by repeatedly collapsing the weakest
//!   link of the tree,
//! * [`CrossValidatedTree`], the tree of the pruning path whose alpha scores best over the folds
//!   of the training set.
//!
//! # Example
//!
//! ```rust
//! use sylva::prelude::*;
//! use sylva_cart::{CrossValidatedTree, RegressionTree};
//!
//! let dataset = sylva_datasets::generate::step_dataset(50, 5., 0.5, 42);
//!
//! let tree = RegressionTree::params().fit(&dataset).unwrap();
//! let path = tree.prune().unwrap();
//! assert_eq!(path.len(), tree.num_internal() + 1);
//!
//! let selection = CrossValidatedTree::params().n_folds(4).fit(&dataset).unwrap();
//! println!("{}", selection.tree());
//! ```
//!

mod cross_validation;
mod error;
mod regression_tree;

pub use cross_validation::*;
pub use error::{CartError, Result};
pub use regression_tree::*;
