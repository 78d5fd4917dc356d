//! `sylva` provides the shared building blocks of the sylva regression tree crates.
//!
//! ## The big picture
//!
//! Algorithms in the sylva workspace consume samples through a single abstraction: a
//! [`Dataset`] whose records hold one tagged [`Value`] per attribute slot and whose targets are
//! continuous. The [`Schema`] fixing the name and [`AttributeKind`] of every slot is resolved
//! once, when the dataset is created from parsed input.
//!
//! Next to the sample store this crate defines
//!
//! * the error type shared by all crates of the workspace,
//! * the [`Fit`](traits::Fit) and [`Predict`](traits::Predict) traits,
//! * the [`ParamGuard`] pattern for validated hyperparameters,
//! * regression [`metrics`], most importantly the root mean squared error used to compare
//!   pruned trees.
//!

pub mod dataset;
pub mod error;
mod metrics_regression;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Attribute, AttributeKind, Dataset, DatasetBase, DatasetView, Float, Schema, Value};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
