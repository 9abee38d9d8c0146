//! Stable argmax.

/// Index of the largest value; the first occurrence wins ties.
///
/// Returns `None` for an empty slice. A value only replaces the current best
/// when it is strictly greater, so NaN never wins unless it is at index 0.
#[inline]
pub fn stable_argmax<T: PartialOrd>(values: &[T]) -> Option<usize> {
    let first = values.first()?;
    let mut best = 0;
    let mut best_value = first;
    for (i, v) in values.iter().enumerate().skip(1) {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    Some(best)
}
