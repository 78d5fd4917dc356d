//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables. The root mean
//! squared error is the metric used to score pruned trees during cross-validation.

use ndarray::prelude::*;
use ndarray::{Data, IntoNdProducer};
use std::ops::Sub;

use crate::{
    dataset::{DatasetBase, Records},
    error::{Error, Result},
    Float,
};

/// Regression metrices trait
///
/// All metrics fail with `Error::Shape` when both sides differ in length and with
/// `Error::NotEnoughSamples` when they are empty.
pub trait Regression<'a, A: 'a, T: IntoNdProducer<Item = &'a A, Dim = Ix1, Output = ArrayView1<'a, A>>>
{
    /// Maximal error between two continuous variables
    fn max_error(&self, compare_to: T) -> Result<A>;
    /// Mean error between two continuous variables
    fn mean_absolute_error(&self, compare_to: T) -> Result<A>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error(&self, compare_to: T) -> Result<A>;
    /// Square root of the mean squared error
    ///
    /// ```
    /// use ndarray::array;
    /// use sylva::metrics::Regression;
    ///
    /// let prediction = array![1., 2., 3.];
    /// let rmse = prediction.root_mean_squared_error(&array![1., 2., 3.]).unwrap();
    /// assert_eq!(rmse, 0.);
    /// ```
    fn root_mean_squared_error(&self, compare_to: T) -> Result<A>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    fn r2(&self, compare_to: T) -> Result<A>;
}

fn differences<'a, A: Float, D: Data<Elem = A>>(
    this: &ArrayBase<D, Ix1>,
    compare_to: &ArrayView1<'a, A>,
) -> Result<Array1<A>> {
    if this.len() != compare_to.len() {
        return Err(Error::Shape(format!(
            "cannot compare {} predictions with {} targets",
            this.len(),
            compare_to.len()
        )));
    }
    if this.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok(this.sub(compare_to))
}

impl<'a, A: 'a + Float, D: Data<Elem = A>, T: IntoNdProducer<Item = &'a A, Dim = Ix1, Output = ArrayView1<'a, A>>>
    Regression<'a, A, T> for ArrayBase<D, Ix1>
{
    fn max_error(&self, compare_to: T) -> Result<A> {
        let compare_to: ArrayView1<'a, A> = compare_to.into_producer();

        Ok(differences(self, &compare_to)?
            .iter()
            .map(|x| x.abs())
            .fold(A::neg_infinity(), A::max))
    }

    fn mean_absolute_error(&self, compare_to: T) -> Result<A> {
        let compare_to = compare_to.into_producer();
        let diff = differences(self, &compare_to)?;

        Ok(diff.iter().map(|x| x.abs()).sum::<A>() / A::cast(diff.len()))
    }

    fn mean_squared_error(&self, compare_to: T) -> Result<A> {
        let compare_to = compare_to.into_producer();
        let diff = differences(self, &compare_to)?;

        Ok(diff.iter().map(|x| *x * *x).sum::<A>() / A::cast(diff.len()))
    }

    fn root_mean_squared_error(&self, compare_to: T) -> Result<A> {
        self.mean_squared_error(compare_to).map(|mse| mse.sqrt())
    }

    // r2 = 1 - sum((pred_i - y_i)^2)/sum((mean_y - y_i)^2)
    // if the mean is of `compare_to`, then the denominator
    // should compare `compare_to` and the mean, and not self and the mean
    fn r2(&self, compare_to: T) -> Result<A> {
        let compare_to = compare_to.into_producer();
        let diff = differences(self, &compare_to)?;

        let mean = compare_to.iter().copied().sum::<A>() / A::cast(compare_to.len());

        Ok(A::one()
            - diff.iter().map(|x| *x * *x).sum::<A>()
                / (compare_to.iter().map(|x| (*x - mean) * (*x - mean)).sum::<A>()
                    + A::cast(1e-10)))
    }
}

impl<F: Float, R: Records, D: Data<Elem = F>> DatasetBase<R, ArrayBase<D, Ix1>> {
    /// Root mean squared error between the targets of the dataset and a prediction
    pub fn root_mean_squared_error(&self, prediction: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<F> {
        prediction.root_mean_squared_error(&self.targets.view())
    }

    /// Mean absolute error between the targets of the dataset and a prediction
    pub fn mean_absolute_error(&self, prediction: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<F> {
        prediction.mean_absolute_error(&self.targets.view())
    }
}

#[cfg(test)]
mod tests {
    use super::Regression;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::prelude::*;

    #[test]
    fn test_same() {
        let a: Array1<f32> = Array1::ones(100);

        assert_abs_diff_eq!(a.max_error(&a).unwrap(), 0.0f32);
        assert_abs_diff_eq!(a.mean_absolute_error(&a).unwrap(), 0.0f32);
        assert_abs_diff_eq!(a.mean_squared_error(&a).unwrap(), 0.0f32);
        assert_abs_diff_eq!(a.root_mean_squared_error(&a).unwrap(), 0.0f32);
    }

    #[test]
    fn test_max_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.3, 0.2, 0.5, 0.7];

        assert_abs_diff_eq!(a.max_error(&b).unwrap(), 0.3f32, epsilon = 1e-5);
    }

    #[test]
    fn test_root_mean_squared_error() {
        let a = array![0.0, 0.0, 0.0, 0.0];
        let b = array![1.0, -1.0, 3.0, -3.0];

        // squares are 1, 1, 9, 9, mean 5
        assert_abs_diff_eq!(a.mean_squared_error(&b).unwrap(), 5.0f64);
        assert_abs_diff_eq!(a.root_mean_squared_error(&b).unwrap(), 5.0f64.sqrt());
        assert!(a.root_mean_squared_error(&b).unwrap() > 0.0);
    }

    #[test]
    fn test_mean_absolute_error() {
        let a = array![0.0, 0.1, 0.2, 0.3, 0.4];
        let b = array![0.1, 0.3, 0.2, 0.5, 0.7];

        // 0.1, 0.2, 0.0, 0.2, 0.3 -> mean 0.16
        assert_abs_diff_eq!(a.mean_absolute_error(&b).unwrap(), 0.16f64, epsilon = 1e-5);
    }

    #[test]
    fn test_r2() {
        let prediction = array![1.0, 2.0, 3.0];
        assert_abs_diff_eq!(prediction.r2(&prediction).unwrap(), 1.0f64, epsilon = 1e-5);
    }

    #[test]
    fn test_mismatched_and_empty() {
        let a = array![1.0, 2.0];
        let b = array![1.0];
        assert!(matches!(a.root_mean_squared_error(&b), Err(Error::Shape(_))));

        let empty: Array1<f64> = Array1::zeros(0);
        assert!(matches!(
            empty.root_mean_squared_error(&empty),
            Err(Error::NotEnoughSamples)
        ));
    }
}
