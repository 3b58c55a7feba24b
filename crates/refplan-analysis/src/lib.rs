#![forbid(unsafe_code)]
//! refplan-analysis library.
//!
//! Turns a [`refplan_core::DependencyGraph`] into a refactoring plan:
//!
//! ```text
//! DependencyGraph
//!        ↓  to_adjacency_matrix()
//! DMatrix<f64>
//!        ↓  score::StructuralScorer::score()
//! complexity scores in [0, 1]
//!        ↓  order::priority_order() / order::get_layers()
//! dependencies-first order + parallel layers
//!        ↓  plan::RefactoringPlanner::analyze()
//! RefactoringPlan
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Malformed matrices are `thiserror` errors; cyclic graphs are
//!   not errors and surface as `None` from the orderers.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod order;
pub mod plan;
pub mod score;

pub use order::{get_layers, priority_order};
pub use plan::{RefactoringPlan, RefactoringPlanner, RefactoringStep, run_analysis};
pub use score::{ScoreError, StructuralScorer};
