//! Numerically stable primitives for log-domain scoring.

/// Stable log(sum(exp(values))).
///
/// Returns NEG_INFINITY for empty input or all -inf inputs.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NEG_INFINITY;
    }
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Stable log(exp(a) + exp(b)).
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    if a == f64::INFINITY || b == f64::INFINITY {
        return f64::INFINITY;
    }
    a.max(b) + (-(a - b).abs()).exp().ln_1p()
}

/// Softmax over a slice of log-scores.
///
/// Shifts by the maximum before exponentiating, so scores that are very
/// large in magnitude normalize without overflow or underflow. The output
/// has the same length as the input, every entry lies in [0, 1], and the
/// entries sum to 1 for any finite input.
///
/// Degenerate inputs: an empty slice maps to an empty vector; if every
/// score is NEG_INFINITY there is no mass to distribute and the result is
/// the uniform distribution. NaN scores propagate to the caller.
pub fn softmax_from_log(log_scores: &[f64]) -> Vec<f64> {
    if log_scores.is_empty() {
        return Vec::new();
    }
    if log_scores.iter().any(|v| v.is_nan()) {
        return vec![f64::NAN; log_scores.len()];
    }
    let max = log_scores
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        let uniform = 1.0 / log_scores.len() as f64;
        return vec![uniform; log_scores.len()];
    }
    let shifted: Vec<f64> = log_scores.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = shifted.iter().sum();
    shifted.into_iter().map(|e| e / total).collect()
}
