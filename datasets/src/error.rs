use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A field is neither a number nor the missing value marker
    #[error("cannot parse `{field}` in line {line}")]
    Parse { line: usize, field: String },
    /// A line does not hold one field per attribute and the target
    #[error("expected {expected} fields in line {line}, but found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    BaseCrate(#[from] sylva::Error),
}
