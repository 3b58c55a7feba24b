//! Structural complexity scoring.
//!
//! # Overview
//!
//! Each module gets a score in `[0, 1]` from its row and column of the
//! adjacency matrix, blending three sub-scores:
//!
//! - **Spectral** ([`spectral`]): magnitude of the module's component in the
//!   eigenvector of the spectral radius, found by power iteration.
//!   Long-range structure.
//! - **Degree** ([`degree`]): `2·in + (N − out)`. Local fan-in, and few
//!   unresolved dependencies of its own.
//! - **Centrality** ([`centrality`]): damped power iteration over weighted
//!   edges. Importance propagated along paths.
//!
//! Every sub-score is min–max normalised on its own (a flat sub-score becomes
//! `0.5` everywhere), blended with [`ScoreWeights`] (default
//! `0.4 / 0.3 / 0.3`), and the blend is min–max normalised once more.
//!
//! # Failure Semantics
//!
//! Spectral power iteration that fails to converge never aborts scoring: the spectral
//! sub-score falls back to a uniform `0.5`. Only malformed input (non-square,
//! negative or non-finite entries) is rejected, before any computation.

pub mod centrality;
pub mod degree;
pub mod normalize;
pub mod spectral;

use nalgebra::DMatrix;
use refplan_core::config::{AnalysisConfig, CentralityConfig, ScoreWeights};
use refplan_core::{DependencyGraph, ErrorCode};
use tracing::{debug, error, instrument, warn};

use normalize::{normalize_final, normalize_sub_score};

/// Contract violations in a matrix handed to the scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("adjacency matrix entry ({row}, {col}) is negative: {value}")]
    NegativeWeight { row: usize, col: usize, value: f64 },

    #[error("adjacency matrix entry ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
}

impl ScoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotSquare { .. } => ErrorCode::MatrixNotSquare,
            Self::NegativeWeight { .. } => ErrorCode::MatrixNegativeWeight,
            Self::NonFinite { .. } => ErrorCode::MatrixNonFinite,
        }
    }
}

/// Reject matrices the scorer cannot give meaning to.
///
/// # Errors
///
/// Returns the first violation found, scanning row by row.
pub fn validate_matrix(matrix: &DMatrix<f64>) -> Result<(), ScoreError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(ScoreError::NotSquare { rows, cols });
    }
    for row in 0..rows {
        for col in 0..cols {
            let value = matrix[(row, col)];
            if !value.is_finite() {
                return Err(ScoreError::NonFinite { row, col });
            }
            if value < 0.0 {
                return Err(ScoreError::NegativeWeight { row, col, value });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// StructuralScorer
// ---------------------------------------------------------------------------

/// Blends spectral, degree, and centrality sub-scores into one score per
/// module.
#[derive(Debug, Clone, Default)]
pub struct StructuralScorer {
    weights: ScoreWeights,
    centrality: CentralityConfig,
}

impl StructuralScorer {
    #[must_use]
    pub const fn new(config: &AnalysisConfig) -> Self {
        Self {
            weights: config.weights,
            centrality: config.centrality,
        }
    }

    /// Score every vertex of `matrix`; output is index-aligned with it.
    ///
    /// # Errors
    ///
    /// Returns a [`ScoreError`] if `matrix` is not square or holds a
    /// negative or non-finite entry.
    #[instrument(skip(self, matrix), fields(n = matrix.nrows()))]
    pub fn score(&self, matrix: &DMatrix<f64>) -> Result<Vec<f64>, ScoreError> {
        validate_matrix(matrix)?;
        let n = matrix.nrows();
        if n == 0 {
            return Ok(Vec::new());
        }

        let spectral = spectral::spectral_scores(matrix).unwrap_or_else(|| {
            warn!(n, "spectral power iteration did not converge, using uniform sub-score");
            vec![normalize::FLAT_SUB_SCORE; n]
        });
        let spectral = normalize_sub_score(&spectral);
        let degree = normalize_sub_score(&degree::degree_scores(matrix));
        let centrality = normalize_sub_score(&centrality::centrality_scores(
            matrix,
            self.centrality.damping,
            self.centrality.iterations,
        ));

        let w = self.weights;
        let total = w.spectral + w.degree + w.centrality;
        let combined: Vec<f64> = (0..n)
            .map(|i| {
                let blended =
                    w.spectral * spectral[i] + w.degree * degree[i] + w.centrality * centrality[i];
                if total > 0.0 { blended / total } else { 0.0 }
            })
            .collect();

        let scores = normalize_final(&combined);
        debug!(n, "structural scores computed");
        Ok(scores)
    }

    /// Score the modules of `graph` in its enumeration order.
    ///
    /// The graph's own matrix is always well formed; should scoring still
    /// fail, every module scores `0.0`.
    #[must_use]
    pub fn score_graph(&self, graph: &DependencyGraph) -> Vec<f64> {
        let matrix = graph.to_adjacency_matrix();
        self.score(&matrix).unwrap_or_else(|err| {
            error!(%err, code = %err.code(), "graph matrix rejected by scorer");
            vec![0.0; graph.module_count()]
        })
    }
}

/// Score `matrix` with the default weights and centrality parameters.
///
/// # Errors
///
/// See [`StructuralScorer::score`].
pub fn score_matrix(matrix: &DMatrix<f64>) -> Result<Vec<f64>, ScoreError> {
    StructuralScorer::default().score(matrix)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
