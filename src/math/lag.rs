//! Positional lags over ordered series.

/// Shift `values` forward by `k` positions.
///
/// The first `k` entries of the output are undefined; entry `i >= k` equals
/// `values[i - k]`. Gaps in the input stay gaps in the output.
pub fn lag(values: &[Option<f64>], k: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        if i < k {
            out.push(None);
        } else {
            out.push(values[i - k]);
        }
    }
    out
}
