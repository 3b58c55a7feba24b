//! Spectral sub-score.
//!
//! # Overview
//!
//! The adjacency matrix is non-negative, so its largest real eigenvalue is
//! the spectral radius `ρ`, and `ρ` has a non-negative eigenvector. The
//! sub-score of vertex `i` is `|v_i|` for that eigenvector at unit L2 norm.
//!
//! # Algorithm
//!
//! - **Acyclic** graphs have a nilpotent matrix and `ρ = 0`. Applying `A`
//!   repeatedly to the all-ones vector reaches zero within `N` steps; the
//!   last non-zero iterate `v` satisfies `A v = 0`.
//! - **Cyclic** graphs use power iteration on `A / max(A) + I`. The identity
//!   shift stops periodic graphs (rings) from oscillating without changing
//!   the eigenvectors.
//!
//! Both run over a sparse row list, `O(E)` per step. Power iteration that
//! has not settled after [`MAX_ITERATIONS`] steps returns `None`; the caller
//! substitutes a uniform sub-score.

use nalgebra::DMatrix;
use tracing::{debug, instrument};

pub const MAX_ITERATIONS: usize = 50_000;
const TOLERANCE: f64 = 1e-9;

/// Outgoing `(column, weight)` pairs per row, non-zero entries only.
type Rows = Vec<Vec<(usize, f64)>>;

/// Absolute components of the dominant eigenvector, or `None` if power
/// iteration does not converge.
#[must_use]
#[instrument(skip(matrix), fields(n = matrix.nrows()))]
pub fn spectral_scores(matrix: &DMatrix<f64>) -> Option<Vec<f64>> {
    let n = matrix.nrows();
    if n == 0 {
        return Some(Vec::new());
    }
    if !matrix.is_square() {
        return None;
    }

    let rows = sparse_rows(matrix);
    let vector = if is_nilpotent(&rows) {
        kernel_vector(&rows)
    } else {
        perron_vector(&rows)?
    };

    if vector.iter().any(|x| !x.is_finite()) {
        return None;
    }
    Some(vector.into_iter().map(f64::abs).collect())
}

fn sparse_rows(matrix: &DMatrix<f64>) -> Rows {
    (0..matrix.nrows())
        .map(|i| {
            matrix
                .row(i)
                .iter()
                .enumerate()
                .filter(|(_, w)| **w > 0.0)
                .map(|(j, &w)| (j, w))
                .collect()
        })
        .collect()
}

/// Kahn's algorithm over the sparse rows; `true` when no cycle exists.
fn is_nilpotent(rows: &Rows) -> bool {
    let mut incoming = vec![0usize; rows.len()];
    for &(j, _) in rows.iter().flatten() {
        incoming[j] += 1;
    }

    let mut ready: Vec<usize> = (0..rows.len()).filter(|&i| incoming[i] == 0).collect();
    let mut placed = 0usize;
    while let Some(i) = ready.pop() {
        placed += 1;
        for &(j, _) in &rows[i] {
            incoming[j] -= 1;
            if incoming[j] == 0 {
                ready.push(j);
            }
        }
    }
    placed == rows.len()
}

/// Last non-zero vector of `1, A·1, A²·1, …`, which `A` maps to zero.
fn kernel_vector(rows: &Rows) -> Vec<f64> {
    let mut current = vec![1.0; rows.len()];
    normalize_l2(&mut current);

    for step in 0..rows.len() {
        let mut next = multiply(rows, &current);
        if normalize_l2(&mut next) <= 0.0 {
            debug!(step, "reached kernel of nilpotent matrix");
            return current;
        }
        current = next;
    }
    current
}

/// Shifted power iteration from the uniform vector.
fn perron_vector(rows: &Rows) -> Option<Vec<f64>> {
    let scale = rows.iter().flatten().map(|&(_, w)| w).fold(0.0, f64::max);
    if scale <= 0.0 {
        return None;
    }

    let mut current = vec![1.0; rows.len()];
    normalize_l2(&mut current);

    for iteration in 0..MAX_ITERATIONS {
        let product = multiply(rows, &current);
        let mut next: Vec<f64> = current
            .iter()
            .zip(&product)
            .map(|(v, av)| v + av / scale)
            .collect();
        if normalize_l2(&mut next) <= 0.0 {
            return None;
        }

        let change = current
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        current = next;

        if change < TOLERANCE {
            debug!(iteration, "power iteration converged");
            return Some(current);
        }
    }

    debug!(iterations = MAX_ITERATIONS, "power iteration did not converge");
    None
}

/// `A · v` over the sparse rows.
fn multiply(rows: &Rows, v: &[f64]) -> Vec<f64> {
    rows.iter()
        .map(|row| row.iter().map(|&(j, w)| w * v[j]).sum())
        .collect()
}

/// Scale `v` to unit L2 norm in place; returns the original norm.
fn normalize_l2(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}
