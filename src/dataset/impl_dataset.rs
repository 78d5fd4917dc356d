use std::ops::Range;

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};
use rand::{seq::SliceRandom, Rng};

use super::{Dataset, DatasetBase, DatasetView, Float, Iter, Records, Schema, Value};
use crate::error::{Error, Result};

impl<R: Records, T> DatasetBase<R, T> {
    /// Return the schema of the attribute slots
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the names of the attributes
    pub fn feature_names(&self) -> Vec<&str> {
        self.schema.names().collect()
    }
}

impl<F: Float, D: Data<Elem = Value<F>>, T: Data<Elem = F>>
    DatasetBase<ArrayBase<D, Ix2>, ArrayBase<T, Ix1>>
{
    pub fn records(&self) -> &ArrayBase<D, Ix2> {
        &self.records
    }

    pub fn targets(&self) -> &ArrayBase<T, Ix1> {
        &self.targets
    }

    /// Iterate over `(record, target)` pairs
    pub fn iter(&self) -> Iter<'_, F> {
        Iter::new(self.records.view(), self.targets.view())
    }

    /// Return a single sample
    pub fn sample(&self, idx: usize) -> (ArrayView1<'_, Value<F>>, F) {
        (self.records.row(idx), self.targets[idx])
    }

    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase {
            records: self.records.view(),
            targets: self.targets.view(),
            schema: self.schema.clone(),
        }
    }

    /// Copy the given rows, in the given order, into a new dataset
    pub fn select(&self, indices: &[usize]) -> Dataset<F> {
        DatasetBase {
            records: self.records.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            schema: self.schema.clone(),
        }
    }

    /// Split the dataset into two contiguous parts
    ///
    /// The first part holds `ceil(ratio * nsamples)` samples, the order of the samples is kept.
    pub fn split_with_ratio(&self, ratio: f32) -> (Dataset<F>, Dataset<F>) {
        let n = (self.nsamples() as f32 * ratio).ceil() as usize;
        let n = n.min(self.nsamples());

        let first: Vec<usize> = (0..n).collect();
        let second: Vec<usize> = (n..self.nsamples()).collect();

        (self.select(&first), self.select(&second))
    }

    /// Split the dataset into `k` contiguous folds
    ///
    /// The first `nsamples % k` folds receive one extra sample each, see [`fold_ranges`].
    pub fn folds(&self, k: usize) -> Vec<Dataset<F>> {
        fold_ranges(self.nsamples(), k)
            .into_iter()
            .map(|range| self.select(&range.collect::<Vec<_>>()))
            .collect()
    }
}

impl<F: Float> Dataset<F> {
    /// Create a new dataset, validating the records against the schema
    ///
    /// The records must have one column per attribute and one row per target, and every value
    /// must either be `Missing` or carry the kind of its attribute. Attribute values and targets
    /// must be finite.
    pub fn new(records: Array2<Value<F>>, targets: Array1<F>, schema: Schema) -> Result<Self> {
        if records.ncols() != schema.len() {
            return Err(Error::Shape(format!(
                "records have {} columns but the schema has {} attributes",
                records.ncols(),
                schema.len()
            )));
        }
        if records.nrows() != targets.len() {
            return Err(Error::Shape(format!(
                "{} records but {} targets",
                records.nrows(),
                targets.len()
            )));
        }

        for (row, record) in records.rows().into_iter().enumerate() {
            for (value, attribute) in record.iter().zip(schema.attributes()) {
                if let Some(kind) = value.kind() {
                    if kind != attribute.kind() {
                        return Err(Error::KindMismatch {
                            attribute: attribute.name().to_string(),
                            row,
                        });
                    }
                }
                if value.as_float().map_or(false, |x| !x.is_finite()) {
                    return Err(Error::NonFinite {
                        column: attribute.name().to_string(),
                        row,
                    });
                }
            }
        }
        if let Some(row) = targets.iter().position(|y| !y.is_finite()) {
            return Err(Error::NonFinite {
                column: schema.target().to_string(),
                row,
            });
        }

        Ok(DatasetBase {
            records,
            targets,
            schema,
        })
    }

    /// Create a dataset from untagged rows, tagging every value with the kind of its attribute
    ///
    /// `None` marks a missing value.
    pub fn from_raw(schema: Schema, rows: Vec<Vec<Option<F>>>, targets: Vec<F>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = schema.len();

        let mut values = Vec::with_capacity(nrows * ncols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::Shape(format!(
                    "row {} has {} values but the schema has {} attributes",
                    idx,
                    row.len(),
                    ncols
                )));
            }
            values.extend(
                row.into_iter()
                    .zip(schema.attributes())
                    .map(|(raw, attribute)| Value::tagged(attribute.kind(), raw)),
            );
        }

        let records = Array2::from_shape_vec((nrows, ncols), values)?;
        Self::new(records, Array1::from(targets), schema)
    }

    /// Shuffle the samples, keeping records and targets aligned
    pub fn shuffle<RNG: Rng>(&self, rng: &mut RNG) -> Self {
        let mut indices: Vec<usize> = (0..self.nsamples()).collect();
        indices.shuffle(rng);

        self.select(&indices)
    }
}

/// Contiguous ranges of `k` folds over `n` samples
///
/// Every fold holds `n / k` samples, the first `n % k` folds hold one more.
///
/// ### Panics
///
/// If `k` is zero
pub fn fold_ranges(n: usize, k: usize) -> Vec<Range<usize>> {
    assert!(k > 0, "the number of folds must be positive");

    let fold_len = n / k;
    let mut remaining = n % k;
    let mut start = 0;

    (0..k)
        .map(|_| {
            let len = if remaining > 0 {
                remaining -= 1;
                fold_len + 1
            } else {
                fold_len
            };
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}
