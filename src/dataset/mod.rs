//! Datasets
//!
//! This module implements the sample store: a fixed schema of named, typed attributes, a
//! records matrix with one tagged [`Value`] per slot and one continuous target per sample.
//! The schema is resolved once when the dataset is created, so algorithms index attribute
//! slots by position and never look values up by name.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_traits::{FromPrimitive, NumCast};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::fmt;
use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod iter;

pub use impl_dataset::fold_ranges;
pub use iter::Iter;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implements them for 32bit and 64bit floating points. They are used for continuous
/// attribute values, discrete tokens and the regression targets.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + approx::AbsDiffEq<Epsilon = Self>
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// The type of an attribute, fixed for the lifetime of a dataset
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Ordered real values, split with a single threshold
    Continuous,
    /// Numerically coded tokens, split with one branch per observed token
    Discrete,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Continuous => write!(f, "continuous"),
            AttributeKind::Discrete => write!(f, "discrete"),
        }
    }
}

/// A single attribute value of a sample
///
/// Discrete tokens are stored numerically. They are compared for exact equality when a tree is
/// grown and by absolute difference when a prediction meets a token never seen in training.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<F> {
    Continuous(F),
    Discrete(F),
    Missing,
}

impl<F: Float> Value<F> {
    /// Tags a raw value with the kind of its attribute, `None` becomes `Missing`
    pub fn tagged(kind: AttributeKind, raw: Option<F>) -> Self {
        match (kind, raw) {
            (_, None) => Value::Missing,
            (AttributeKind::Continuous, Some(x)) => Value::Continuous(x),
            (AttributeKind::Discrete, Some(x)) => Value::Discrete(x),
        }
    }

    /// Returns the numeric payload, or `None` for a missing value
    pub fn as_float(&self) -> Option<F> {
        match *self {
            Value::Continuous(x) | Value::Discrete(x) => Some(x),
            Value::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The kind of the value, `None` for a missing value
    pub fn kind(&self) -> Option<AttributeKind> {
        match self {
            Value::Continuous(_) => Some(AttributeKind::Continuous),
            Value::Discrete(_) => Some(AttributeKind::Discrete),
            Value::Missing => None,
        }
    }
}

impl<F> Default for Value<F> {
    fn default() -> Self {
        Value::Missing
    }
}

impl<F: fmt::Display> fmt::Display for Value<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Continuous(x) | Value::Discrete(x) => write!(f, "{}", x),
            Value::Missing => write!(f, "?"),
        }
    }
}

/// A named attribute with a fixed kind
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    pub fn new<S: Into<String>>(name: S, kind: AttributeKind) -> Self {
        Attribute {
            name: name.into(),
            kind,
        }
    }

    pub fn continuous<S: Into<String>>(name: S) -> Self {
        Self::new(name, AttributeKind::Continuous)
    }

    pub fn discrete<S: Into<String>>(name: S) -> Self {
        Self::new(name, AttributeKind::Discrete)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }
}

/// Ordered attribute slots and the name of the target
///
/// The target is not an attribute slot, so every attribute of the schema is a split
/// candidate.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    attributes: Vec<Attribute>,
    target: String,
}

impl Schema {
    pub fn new<S: Into<String>>(attributes: Vec<Attribute>, target: S) -> Self {
        Schema {
            attributes,
            target: target.into(),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, idx: usize) -> &Attribute {
        &self.attributes[idx]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Position of the attribute with the given name
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }
}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains the records of the samples, one
/// target per sample and the schema describing the attribute slots of the records.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nattributes)
/// * `targets`: a one-dimensional array with dimensionality (nsamples)
/// * `schema`: the names and kinds of the attributes and the name of the target
#[derive(Debug)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    schema: Schema,
}

/// Dataset
///
/// The most commonly used type of dataset. It owns its records as an `Array2` of tagged values
/// and its targets as an `Array1`.
pub type Dataset<F> = DatasetBase<Array2<Value<F>>, Array1<F>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F> = DatasetBase<ArrayView2<'a, Value<F>>, ArrayView1<'a, F>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
