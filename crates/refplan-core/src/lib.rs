#![forbid(unsafe_code)]
//! refplan-core library.
//!
//! Data model and graph model for refactoring-order analysis: [`Module`]s
//! connected by weighted [`Dependency`] edges inside a [`DependencyGraph`].
//! Scoring, ordering, and plan assembly live in `refplan-analysis`.
//!
//! # Conventions
//!
//! - **Errors**: Use `thiserror` enums for contract violations and
//!   `anyhow::Result` for file-level operations.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod model;

pub use config::AnalysisConfig;
pub use error::{ConfigError, ErrorCode, GraphError};
pub use graph::{DependencyGraph, GraphStats};
pub use model::{Dependency, DependencyKind, Module, ModuleKind};
