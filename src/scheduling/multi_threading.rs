//! Multi-threaded back-end of the mask evaluation

use crate::scheduling::EVAL_BATCH_SIZE;

use rayon::prelude::*;

/// Evaluate a selection kernel on `len` candidates in multi-threaded mode
///
/// Each task fills a disjoint batch of the output, so the mask is the same as
/// what sequential evaluation would produce.
///
pub fn evaluate_impl(len: usize, kernel: impl Fn(usize) -> bool + Send + Sync) -> Vec<bool> {
    let mut values = vec![false; len];
    values
        .par_chunks_mut(EVAL_BATCH_SIZE)
        .enumerate()
        .for_each(|(batch_id, batch)| {
            let first = batch_id * EVAL_BATCH_SIZE;
            for (offset, pass) in batch.iter_mut().enumerate() {
                *pass = kernel(first + offset);
            }
        });
    values
}
