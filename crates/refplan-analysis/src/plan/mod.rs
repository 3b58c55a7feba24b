//! Refactoring plan assembly.
//!
//! # Pipeline
//!
//! 1. Detect cycles.
//! 2. Score every module on the graph's adjacency matrix.
//! 3. Order modules dependencies-first, riskiest-ready-first.
//! 4. Emit one [`RefactoringStep`] per module with a 1-based priority.
//!
//! # Cyclic Graphs
//!
//! No order exists when the graph has a cycle. The plan then lists steps by
//! descending complexity (enumeration order among equal scores), carries
//! every detected cycle in [`RefactoringPlan::circular_dependencies`], and
//! has no layers. A plan is always returned.

pub mod effort;

use std::collections::BTreeSet;

use refplan_core::{AnalysisConfig, ConfigError, DependencyGraph, Module};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::order::layer_indices;
use crate::order::priority::kahn_by_score;
use crate::score::StructuralScorer;

// ---------------------------------------------------------------------------
// RefactoringStep
// ---------------------------------------------------------------------------

/// One module's place in the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefactoringStep {
    pub module: Module,
    /// 1-based rank.
    pub priority: usize,
    pub complexity: f64,
    pub dependencies: Vec<Module>,
    pub dependents: Vec<Module>,
    /// Filled in by an external collaborator; never set by the planner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestion: Option<String>,
}

impl RefactoringStep {
    #[must_use]
    pub fn with_ai_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.ai_suggestion = Some(suggestion.into());
        self
    }
}

// ---------------------------------------------------------------------------
// RefactoringPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefactoringPlan {
    pub steps: Vec<RefactoringStep>,
    pub circular_dependencies: Vec<Vec<Module>>,
    pub total_complexity: f64,
    pub estimated_effort: String,
    pub estimated_minutes: u64,
    /// Parallel layers, dependencies first. Empty when the graph is cyclic.
    pub layers: Vec<BTreeSet<Module>>,
    /// [`DependencyGraph::content_hash`] of the analysed graph.
    pub graph_hash: String,
}

impl RefactoringPlan {
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.circular_dependencies.is_empty()
    }

    /// `true` when the steps follow a dependencies-first order.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        !self.has_cycles()
    }

    #[must_use]
    pub fn step_for(&self, name: &str) -> Option<&RefactoringStep> {
        self.steps.iter().find(|step| step.module.name() == name)
    }
}

// ---------------------------------------------------------------------------
// RefactoringPlanner
// ---------------------------------------------------------------------------

/// Runs the analysis pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct RefactoringPlanner {
    config: AnalysisConfig,
    scorer: StructuralScorer,
}

impl RefactoringPlanner {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scorer = StructuralScorer::new(&config);
        Ok(Self { config, scorer })
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build a plan for `graph`.
    #[must_use]
    #[instrument(skip(self, graph), fields(modules = graph.module_count(), deps = graph.dependency_count()))]
    pub fn analyze(&self, graph: &DependencyGraph) -> RefactoringPlan {
        let circular_dependencies = graph.detect_cycles();
        let scores = self.scorer.score_graph(graph);
        debug!(cycles = circular_dependencies.len(), "scored graph");

        let order = if circular_dependencies.is_empty() {
            kahn_by_score(graph, &scores)
        } else {
            None
        };

        let order = order.unwrap_or_else(|| {
            if circular_dependencies.is_empty() {
                error!("no topological order for a graph without detected cycles");
            } else {
                warn!(
                    cycles = circular_dependencies.len(),
                    "graph is cyclic, ordering steps by complexity"
                );
            }
            by_descending_complexity(&scores)
        });

        let steps: Vec<RefactoringStep> = order
            .iter()
            .enumerate()
            .filter_map(|(rank, &index)| {
                let module = graph.module_at(index)?;
                Some(RefactoringStep {
                    module: module.clone(),
                    priority: rank + 1,
                    complexity: scores.get(index).copied().unwrap_or(0.0),
                    dependencies: graph.dependencies_of(module).into_iter().cloned().collect(),
                    dependents: graph.dependents_of(module).into_iter().cloned().collect(),
                    ai_suggestion: None,
                })
            })
            .collect();

        let layers = if circular_dependencies.is_empty() {
            layer_indices(graph)
                .unwrap_or_default()
                .into_iter()
                .map(|layer| {
                    layer
                        .into_iter()
                        .filter_map(|i| graph.module_at(i).cloned())
                        .collect()
                })
                .collect()
        } else {
            Vec::new()
        };

        let total_complexity: f64 = steps.iter().map(|step| step.complexity).sum();
        let estimated_minutes =
            effort::estimate_minutes(graph.module_count(), total_complexity, &self.config.effort);

        debug!(
            steps = steps.len(),
            layers = layers.len(),
            estimated_minutes,
            "plan assembled"
        );

        RefactoringPlan {
            steps,
            circular_dependencies,
            total_complexity,
            estimated_effort: effort::format_duration(estimated_minutes),
            estimated_minutes,
            layers,
            graph_hash: graph.content_hash(),
        }
    }
}

/// Analyse `graph` with the default configuration.
#[must_use]
pub fn run_analysis(graph: &DependencyGraph) -> RefactoringPlan {
    RefactoringPlanner::default().analyze(graph)
}

/// Indices sorted by descending score; stable, so ties keep enumeration order.
fn by_descending_complexity(scores: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    indices
}
