//! Min–max normalisation helpers.

/// Value given to every vertex when a sub-score has no spread.
pub const FLAT_SUB_SCORE: f64 = 0.5;

/// Spread below this fraction of the largest magnitude counts as flat.
const FLAT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Min–max normalise a sub-score into `[0, 1]`.
///
/// A flat input (max == min, including a single element) maps to
/// [`FLAT_SUB_SCORE`] everywhere. Non-finite inputs are treated as `0.0`.
#[must_use]
pub fn normalize_sub_score(values: &[f64]) -> Vec<f64> {
    min_max(values).unwrap_or_else(|| vec![FLAT_SUB_SCORE; values.len()])
}

/// Final normalisation of the blended score.
///
/// - All-zero (or empty) input stays all zero.
/// - A flat, non-zero input keeps its blended values, clamped to `[0, 1]`.
/// - Otherwise min–max into `[0, 1]`.
#[must_use]
pub fn normalize_final(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().map(finite_or_zero).fold(0.0, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    min_max(values).unwrap_or_else(|| values.iter().map(|&v| unit(v)).collect())
}

/// `None` when the range is not finite or negligible next to the values.
fn min_max(values: &[f64]) -> Option<Vec<f64>> {
    let min = values
        .iter()
        .copied()
        .map(finite_or_zero)
        .fold(f64::INFINITY, f64::min);
    let max = values
        .iter()
        .copied()
        .map(finite_or_zero)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let magnitude = max.abs().max(min.abs()).max(1.0);
    if !range.is_finite() || range <= FLAT_RELATIVE_TOLERANCE * magnitude {
        return None;
    }

    Some(
        values
            .iter()
            .map(|&v| unit((finite_or_zero(v) - min) / range))
            .collect(),
    )
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn unit(value: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, 1.0)
}
