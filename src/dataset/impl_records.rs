use super::{DatasetBase, Records, Value};
use ndarray::{ArrayBase, Axis, Data, Ix2};

/// Implement records for matrices of tagged values
impl<F, S: Data<Elem = Value<F>>> Records for ArrayBase<S, Ix2> {
    type Elem = Value<F>;

    fn nsamples(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn nfeatures(&self) -> usize {
        self.len_of(Axis(1))
    }
}

/// Implement records for a DatasetBase
impl<R: Records, T> Records for DatasetBase<R, T> {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

/// Implement records for references
impl<R: Records> Records for &R {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        (*self).nsamples()
    }

    fn nfeatures(&self) -> usize {
        (*self).nfeatures()
    }
}
