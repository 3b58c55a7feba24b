//! Degree sub-score.
//!
//! For vertex `i`: `2·in(i) + (N − out(i))`, where `in` counts non-zero
//! entries in column `i` and `out` counts non-zero entries in row `i`.
//! Modules many others depend on, and modules with few unresolved
//! dependencies of their own, score high.

use nalgebra::DMatrix;

/// Raw (unnormalised) degree sub-scores.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_scores(matrix: &DMatrix<f64>) -> Vec<f64> {
    let n = matrix.nrows();
    (0..n)
        .map(|i| {
            let in_degree = matrix.column(i).iter().filter(|w| **w > 0.0).count();
            let out_degree = matrix.row(i).iter().filter(|w| **w > 0.0).count();
            (2 * in_degree + (n - out_degree)) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_edges_not_weights() {
        // 0 -> 1 (weight 5), 2 -> 1, 1 -> 2
        let mut m = DMatrix::zeros(3, 3);
        m[(0, 1)] = 5.0;
        m[(2, 1)] = 1.0;
        m[(1, 2)] = 1.0;

        let scores = degree_scores(&m);
        assert_eq!(scores, vec![2.0, 6.0, 4.0]);
    }

    #[test]
    fn isolated_vertices_score_n() {
        assert_eq!(degree_scores(&DMatrix::zeros(4, 4)), vec![4.0; 4]);
    }

    #[test]
    fn self_loop_counts_both_ways() {
        let mut m = DMatrix::zeros(1, 1);
        m[(0, 0)] = 1.0;
        assert_eq!(degree_scores(&m), vec![2.0]);
    }
}
