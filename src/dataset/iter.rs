use super::Value;
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Iterator over `(record, target)` pairs of a dataset
pub struct Iter<'a, F> {
    records: ArrayView2<'a, Value<F>>,
    targets: ArrayView1<'a, F>,
    idx: usize,
}

impl<'a, F> Iter<'a, F> {
    pub fn new(records: ArrayView2<'a, Value<F>>, targets: ArrayView1<'a, F>) -> Iter<'a, F> {
        Iter {
            records,
            targets,
            idx: 0,
        }
    }
}

impl<'a, F: Copy> Iterator for Iter<'a, F> {
    type Item = (ArrayView1<'a, Value<F>>, F);

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.records.nrows() {
            return None;
        }

        let idx = self.idx;
        self.idx += 1;

        let records = self.records;
        Some((records.index_axis_move(Axis(0), idx), self.targets[idx]))
    }
}
