/// Causal simple moving average.
///
/// `out[i]` is the mean of `values[i + 1 - window ..= i]`. While fewer than
/// `window` values have been seen the mean covers everything so far, so the
/// output always has the input's length and never contains gaps.
///
/// `window` must be at least one.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window >= 1, "smoothing window must be positive");

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }

    out
}
