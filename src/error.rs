//! Error types in sylva
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("invalid dataset shape: {0}")]
    Shape(String),
    #[error("value in row {row} does not match the kind of attribute `{attribute}`")]
    KindMismatch { attribute: String, row: usize },
    #[error("non-finite value of `{column}` in row {row}")]
    NonFinite { column: String, row: usize },
    #[error("Not enough samples to compute the mean")]
    NotEnoughSamples,
}
