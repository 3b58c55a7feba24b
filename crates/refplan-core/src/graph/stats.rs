//! Summary statistics for a dependency graph.
//!
//! # Statistics Provided
//!
//! - **module_count** / **dependency_count**: vertex and edge totals.
//! - **density**: non-self-loop dependencies over `module_count * (module_count - 1)`.
//!   Zero for graphs with fewer than two modules.
//! - **scc_count**: number of strongly connected components.
//! - **cycle_count**: number of deduplicated cycles reported by
//!   [`DependencyGraph::detect_cycles`].
//! - **self_loop_count**: modules that depend on themselves.
//! - **weakly_connected_component_count**: disjoint subgraphs.
//! - **source_count**: modules with no dependencies (refactorable first).
//! - **sink_count**: modules nothing depends on.
//! - **max_in_degree** / **max_out_degree**: the widest fan-in and fan-out.

use petgraph::Direction;
use petgraph::algo::{connected_components, tarjan_scc};
use petgraph::visit::{EdgeRef, IntoNodeIdentifiers};
use serde::Serialize;

use super::{DependencyGraph, cycles};

/// Summary statistics computed by [`GraphStats::from_graph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub module_count: usize,
    pub dependency_count: usize,
    pub density: f64,
    pub scc_count: usize,
    pub cycle_count: usize,
    pub self_loop_count: usize,
    pub weakly_connected_component_count: usize,
    pub source_count: usize,
    pub sink_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    #[must_use]
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let g = &graph.graph;
        let module_count = g.node_count();
        let dependency_count = g.edge_count();

        let degree = |idx, direction| g.edges_directed(idx, direction).count();

        let in_degrees: Vec<usize> = g
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Incoming))
            .collect();
        let out_degrees: Vec<usize> = g
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Outgoing))
            .collect();

        let self_loop_count = g
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        Self {
            module_count,
            dependency_count,
            density: compute_density(module_count, dependency_count - self_loop_count),
            scc_count: tarjan_scc(g).len(),
            cycle_count: cycles::detect_cycles(g).len(),
            self_loop_count,
            weakly_connected_component_count: connected_components(g),
            source_count: out_degrees.iter().filter(|&&d| d == 0).count(),
            sink_count: in_degrees.iter().filter(|&&d| d == 0).count(),
            max_in_degree: in_degrees.iter().copied().max().unwrap_or(0),
            max_out_degree: out_degrees.iter().copied().max().unwrap_or(0),
        }
    }

    /// `true` if the graph has no dependencies at all.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.dependency_count == 0
    }

    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }
}

/// Self-loops are excluded by the caller, keeping the result in `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn compute_density(module_count: usize, dependency_count: usize) -> f64 {
    if module_count < 2 {
        return 0.0;
    }
    dependency_count as f64 / (module_count * (module_count - 1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Module;

    #[test]
    fn empty_graph_stats() {
        let stats = GraphStats::from_graph(&DependencyGraph::new());
        assert_eq!(stats.module_count, 0);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert!(stats.is_flat());
        assert!(!stats.has_cycles());
    }

    #[test]
    fn chain_stats() {
        let graph = DependencyGraph::from_edges(&[("a", "b"), ("b", "c")]);
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.module_count, 3);
        assert_eq!(stats.dependency_count, 2);
        assert!((stats.density - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(stats.scc_count, 3);
        assert_eq!(stats.source_count, 1, "only c has no dependencies");
        assert_eq!(stats.sink_count, 1, "only a has no dependents");
        assert_eq!(stats.weakly_connected_component_count, 1);
    }

    #[test]
    fn cycles_and_self_loops_counted() {
        let mut graph =
            DependencyGraph::from_edges(&[("a", "b"), ("b", "a"), ("c", "c"), ("a", "d")]);
        graph.add_module(Module::new("island"));
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.cycle_count, 2);
        assert_eq!(stats.self_loop_count, 1);
        assert_eq!(stats.scc_count, 4);
        assert_eq!(stats.weakly_connected_component_count, 3);
        assert_eq!(stats.max_out_degree, 2);
        assert!(stats.has_cycles());
    }
}
