//! This module takes care of scheduling the element-wise evaluation of
//! selection kernels, encapsulating use of multiple threads

#[cfg(not(feature = "multi-threading"))] mod sequential;
#[cfg(feature = "multi-threading")] mod multi_threading;

use crate::array::{Column, Mask, Shape};


/// Size of the candidate batches handed out to worker threads
///
/// Selection kernels are a handful of comparisons, so batches must be large
/// enough for the per-task scheduling overhead to remain negligible. Has no
/// effect on the results, which are identical to sequential evaluation.
///
#[cfg_attr(not(feature = "multi-threading"), allow(dead_code))]
const EVAL_BATCH_SIZE: usize = 16_384;


/// Evaluate a selection kernel on every candidate of a given shape, in the
/// manner that was configured at build time.
///
/// The kernel receives a candidate index and must only look at the attribute
/// values of that candidate. The resulting mask has the requested shape.
///
pub fn evaluate(shape: Shape<'_>, kernel: impl Fn(usize) -> bool + Send + Sync) -> Mask {
    let values = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        { sequential::evaluate_impl(shape.len, kernel) }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        { multi_threading::evaluate_impl(shape.len, kernel) }
    };
    Column::with_shape(shape, values)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_shape() {
        let col = Column::jagged(vec![vec![1, 2, 3], vec![], vec![4, 5]]);
        let values = col.values();
        let mask = evaluate(col.shape(), |i| values[i] % 2 == 1);
        assert_eq!(mask.offsets(), col.offsets());
        assert_eq!(mask.values(), &[true, false, true, false, true]);
    }

    #[test]
    fn large_inputs_stay_ordered() {
        let len = 3 * EVAL_BATCH_SIZE + 17;
        let col = Column::flat((0..len).collect::<Vec<_>>());
        let values = col.values();
        let mask = evaluate(col.shape(), |i| values[i] % 3 == 0);
        assert_eq!(mask.len(), len);
        assert!(mask.values().iter().enumerate().all(|(i, &pass)| pass == (i % 3 == 0)));
    }

    #[test]
    fn empty_input() {
        let col = Column::<f64>::flat(Vec::new());
        let mask = evaluate(col.shape(), |_| true);
        assert!(mask.is_empty());
    }
}
