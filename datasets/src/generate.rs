//! Utility functions for randomly generating datasets

use ndarray::{Array1, Array2};
use ndarray_rand::{
    rand::{rngs::SmallRng, Rng, SeedableRng},
    rand_distr::Uniform,
    RandomExt,
};
use sylva::{Attribute, Dataset, Schema, Value};

/// Uniform noise in `[-amplitude, amplitude)`, zero if the amplitude is not positive
fn noise(nsamples: usize, amplitude: f64, rng: &mut impl Rng) -> Array1<f64> {
    if amplitude > 0. {
        Array1::random_using(nsamples, Uniform::new(-amplitude, amplitude), rng)
    } else {
        Array1::zeros(nsamples)
    }
}

/// A step function of a continuous attribute with noisy targets
///
/// Sample `i` has the continuous attribute `x = i` and the discrete attribute `group = i % 3`,
/// which carries no information. The target is zero for the first half of the samples and
/// `step` for the second half, plus uniform noise of the given amplitude. The samples are
/// ordered by `x`.
pub fn step_dataset(nsamples: usize, step: f64, amplitude: f64, seed: u64) -> Dataset<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let schema = Schema::new(
        vec![Attribute::continuous("x"), Attribute::discrete("group")],
        "y",
    );

    let records = Array2::from_shape_fn((nsamples, 2), |(i, j)| match j {
        0 => Value::Continuous(i as f64),
        _ => Value::Discrete((i % 3) as f64),
    });
    let targets = Array1::from_shape_fn(nsamples, |i| if 2 * i < nsamples { 0. } else { step })
        + noise(nsamples, amplitude, &mut rng);

    // the generated records always match their schema
    Dataset::new(records, targets, schema).unwrap()
}

/// Samples with a single continuous attribute `x = i` and the same target
pub fn constant_dataset(nsamples: usize, target: f64) -> Dataset<f64> {
    let schema = Schema::new(vec![Attribute::continuous("x")], "y");
    let records = Array2::from_shape_fn((nsamples, 1), |(i, _)| Value::Continuous(i as f64));

    Dataset::new(records, Array1::from_elem(nsamples, target), schema).unwrap()
}

/// Random continuous attributes `x0, x1, ...` drawn from `[0, 1)`
///
/// The target is `10 * x0 + 5 * x1` (if present) plus uniform noise in `[-1, 1)`, the
/// remaining attributes carry no information.
pub fn noisy_dataset(nsamples: usize, nfeatures: usize, rng: &mut impl Rng) -> Dataset<f64> {
    let attributes = (0..nfeatures)
        .map(|idx| Attribute::continuous(format!("x{}", idx)))
        .collect();
    let schema = Schema::new(attributes, "y");

    let values = Array2::random_using((nsamples, nfeatures), Uniform::new(0., 1.), rng);
    let weights = Array1::from_shape_fn(nfeatures, |idx| match idx {
        0 => 10.,
        1 => 5.,
        _ => 0.,
    });
    let targets = values.dot(&weights) + noise(nsamples, 1., rng);

    Dataset::new(values.mapv(Value::Continuous), targets, schema).unwrap()
}
