//! Sequential back-end of the mask evaluation

/// Evaluate a selection kernel on `len` candidates, one after the other
pub fn evaluate_impl(len: usize, kernel: impl Fn(usize) -> bool) -> Vec<bool> {
    (0..len).map(kernel).collect()
}
