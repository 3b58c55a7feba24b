//! Power-iteration centrality sub-score.
//!
//! # Algorithm
//!
//! Starting from the uniform distribution `1/N`, apply a fixed number of
//! iterations of
//!
//! ```text
//! score'(i) = (1 - d) / N + d * Σ_j score(j) * m[j][i] / w_out(j)
//! ```
//!
//! where `w_out(j)` is the summed outgoing weight of `j`. Vertices with no
//! outgoing weight contribute nothing; their rank is not redistributed.
//! There is no convergence check: the iteration count is the contract.

use nalgebra::DMatrix;
use tracing::trace;

/// Raw (unnormalised) centrality sub-scores.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centrality_scores(matrix: &DMatrix<f64>, damping: f64, iterations: usize) -> Vec<f64> {
    let n = matrix.nrows();
    if n == 0 {
        return Vec::new();
    }

    let n_f64 = n as f64;
    let base = (1.0 - damping) / n_f64;
    let out_weight: Vec<f64> = (0..n).map(|j| matrix.row(j).sum()).collect();

    let mut scores = vec![1.0 / n_f64; n];
    let mut next = vec![0.0_f64; n];

    for iteration in 0..iterations {
        next.fill(base);

        for (j, &weight) in out_weight.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let share = damping * scores[j] / weight;
            for (i, slot) in next.iter_mut().enumerate() {
                let edge = matrix[(j, i)];
                if edge > 0.0 {
                    *slot += share * edge;
                }
            }
        }

        std::mem::swap(&mut scores, &mut next);
        trace!(iteration, "centrality iteration");
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matrix() {
        assert!(centrality_scores(&DMatrix::zeros(0, 0), 0.85, 20).is_empty());
    }

    #[test]
    fn pair_has_closed_form() {
        // 0 -> 1. Vertex 0 only ever receives teleport mass; vertex 1 also
        // receives 0's damped score.
        let mut m = DMatrix::zeros(2, 2);
        m[(0, 1)] = 1.0;
        let scores = centrality_scores(&m, 0.85, 20);
        assert!((scores[0] - 0.075).abs() < 1e-12, "got {}", scores[0]);
        assert!((scores[1] - (0.075 + 0.85 * 0.075)).abs() < 1e-12, "got {}", scores[1]);
    }

    #[test]
    fn zero_iterations_is_uniform() {
        let mut m = DMatrix::zeros(4, 4);
        m[(0, 1)] = 1.0;
        assert_eq!(centrality_scores(&m, 0.85, 0), vec![0.25; 4]);
    }

    #[test]
    fn weights_split_outgoing_rank() {
        // 0 -> 1 (weight 3), 0 -> 2 (weight 1): 1 receives three times the
        // share 2 does.
        let mut m = DMatrix::zeros(3, 3);
        m[(0, 1)] = 3.0;
        m[(0, 2)] = 1.0;
        let scores = centrality_scores(&m, 0.85, 20);
        let base = 0.15 / 3.0;
        assert!(((scores[1] - base) - 3.0 * (scores[2] - base)).abs() < 1e-12);
    }

    #[test]
    fn cycle_stays_uniform() {
        let mut m = DMatrix::zeros(3, 3);
        m[(0, 1)] = 1.0;
        m[(1, 2)] = 1.0;
        m[(2, 0)] = 1.0;
        let scores = centrality_scores(&m, 0.85, 20);
        for s in &scores {
            assert!((s - 1.0 / 3.0).abs() < 1e-12);
        }
    }
}
