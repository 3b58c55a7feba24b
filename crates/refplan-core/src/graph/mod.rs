//! Module dependency graph.
//!
//! # Overview
//!
//! [`DependencyGraph`] wraps a petgraph [`DiGraph`] whose nodes are
//! [`Module`]s and whose edges carry the dependency weight. An edge
//! `A → B` means "A depends on B".
//!
//! ## Enumeration
//!
//! Modules are never removed, so the petgraph node index doubles as a
//! stable enumeration of the vertex set: module `i` is the `i`-th distinct
//! module inserted. [`DependencyGraph::to_adjacency_matrix`], the scorer,
//! and the orderers all index by this enumeration.
//!
//! ## Duplicate Edges
//!
//! At most one edge exists per ordered pair. The first weight seen for a
//! pair is kept; later duplicates are ignored.
//!
//! ## Absent Modules
//!
//! Queries for a module not in the graph return empty results or zero,
//! never an error.

#![allow(clippy::module_name_repetitions)]

pub mod cycles;
pub mod stats;

use std::collections::HashMap;

use nalgebra::DMatrix;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{instrument, trace};

use crate::model::{Dependency, DependencyKind, Module};

pub use stats::GraphStats;

/// Edge payload stored in the petgraph graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub weight: f64,
    pub kind: DependencyKind,
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// Directed graph of modules and their dependencies.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Module, EdgeData>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` name pairs with unit weights.
    #[must_use]
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_dependency(Dependency::new(*from, *to));
        }
        graph
    }

    /// Insert `module` if no module with the same name exists.
    ///
    /// Returns `true` when the module was newly inserted. An existing
    /// module keeps its original path and kind.
    pub fn add_module(&mut self, module: Module) -> bool {
        if self.node_map.contains_key(module.name()) {
            return false;
        }
        self.insert_node(module);
        true
    }

    /// Insert a dependency, adding either endpoint if absent.
    ///
    /// Returns `true` when a new edge was created, `false` when the ordered
    /// pair already had one (the first weight is kept).
    pub fn add_dependency(&mut self, dependency: Dependency) -> bool {
        let (from, to, weight, kind) = dependency.into_parts();
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if self.graph.contains_edge(from_idx, to_idx) {
            trace!(
                from = %self.graph[from_idx],
                to = %self.graph[to_idx],
                "duplicate dependency ignored"
            );
            return false;
        }

        self.graph.add_edge(from_idx, to_idx, EdgeData { weight, kind });
        true
    }

    fn ensure_node(&mut self, module: Module) -> NodeIndex {
        match self.node_map.get(module.name()) {
            Some(&idx) => idx,
            None => self.insert_node(module),
        }
    }

    fn insert_node(&mut self, module: Module) -> NodeIndex {
        let name = module.name().to_string();
        let idx = self.graph.add_node(module);
        self.node_map.insert(name, idx);
        idx
    }

    // -- size ---------------------------------------------------------------

    /// Number of modules (vertices).
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // -- lookup -------------------------------------------------------------

    #[must_use]
    pub fn contains<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> bool {
        self.node_map.contains_key(module.as_ref())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.node(name).map(|idx| &self.graph[idx])
    }

    /// Position of `module` in the stable enumeration.
    #[must_use]
    pub fn index_of<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> Option<usize> {
        self.node(module.as_ref()).map(NodeIndex::index)
    }

    /// Module at position `index` of the enumeration.
    #[must_use]
    pub fn module_at(&self, index: usize) -> Option<&Module> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    /// All modules in enumeration order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.graph.node_weights()
    }

    /// All dependency edges, in insertion order.
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.graph.edge_references().map(|edge| {
            Dependency::from_parts(
                self.graph[edge.source()].clone(),
                self.graph[edge.target()].clone(),
                edge.weight().weight,
                edge.weight().kind,
            )
        })
    }

    /// Weight of the edge `from → to`, if present.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let (a, b) = (self.node(from)?, self.node(to)?);
        self.graph.find_edge(a, b).map(|e| self.graph[e].weight)
    }

    fn node(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    // -- neighbourhood ------------------------------------------------------

    /// Modules that `module` depends on (outgoing neighbours), in
    /// enumeration order. Empty for isolated or absent modules.
    #[must_use]
    pub fn dependencies_of<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> Vec<&Module> {
        self.neighbours_by_name(module.as_ref(), Direction::Outgoing)
    }

    /// Modules that depend on `module` (incoming neighbours), in
    /// enumeration order. Empty for isolated or absent modules.
    #[must_use]
    pub fn dependents_of<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> Vec<&Module> {
        self.neighbours_by_name(module.as_ref(), Direction::Incoming)
    }

    /// Number of modules depending on `module`. A self-loop counts once.
    #[must_use]
    pub fn in_degree<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> usize {
        self.node(module.as_ref())
            .map_or(0, |idx| self.degree_at(idx, Direction::Incoming))
    }

    /// Number of modules `module` depends on. A self-loop counts once.
    #[must_use]
    pub fn out_degree<Q: AsRef<str> + ?Sized>(&self, module: &Q) -> usize {
        self.node(module.as_ref())
            .map_or(0, |idx| self.degree_at(idx, Direction::Outgoing))
    }

    /// Enumeration indices of the modules that module `index` depends on.
    #[must_use]
    pub fn dependency_indices(&self, index: usize) -> Vec<usize> {
        self.neighbour_indices(index, Direction::Outgoing)
    }

    /// Enumeration indices of the modules that depend on module `index`.
    #[must_use]
    pub fn dependent_indices(&self, index: usize) -> Vec<usize> {
        self.neighbour_indices(index, Direction::Incoming)
    }

    fn neighbours_by_name(&self, name: &str, direction: Direction) -> Vec<&Module> {
        let Some(idx) = self.node(name) else {
            return Vec::new();
        };
        self.neighbour_indices(idx.index(), direction)
            .into_iter()
            .map(|i| &self.graph[NodeIndex::new(i)])
            .collect()
    }

    fn neighbour_indices(&self, index: usize, direction: Direction) -> Vec<usize> {
        if index >= self.graph.node_count() {
            return Vec::new();
        }
        // petgraph yields neighbours newest-edge-first; sort for determinism.
        let mut out: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(index), direction)
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn degree_at(&self, idx: NodeIndex, direction: Direction) -> usize {
        self.graph.edges_directed(idx, direction).count()
    }

    // -- whole-graph views --------------------------------------------------

    /// Dense `N × N` adjacency matrix over the stable enumeration.
    ///
    /// `m[(i, j)]` is the weight of `i → j`, or `0.0` when there is no edge.
    /// The empty graph yields a `0 × 0` matrix.
    #[must_use]
    #[instrument(skip(self), fields(n = self.graph.node_count()))]
    pub fn to_adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.graph.node_count();
        let mut matrix = DMatrix::zeros(n, n);
        for edge in self.graph.edge_references() {
            matrix[(edge.source().index(), edge.target().index())] = edge.weight().weight;
        }
        matrix
    }

    /// Deduplicated dependency cycles. See [`cycles::detect_cycles`].
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Vec<Module>> {
        cycles::detect_cycles(&self.graph)
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    /// `true` iff the graph has no cycle, self-loops included.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !cycles::has_cycle(&self.graph)
    }

    /// BLAKE3 hash of the sorted `(from, to)` name pairs.
    ///
    /// Changes only when the edge set changes; compare against a stored
    /// value to decide whether a cached plan is stale.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].name(),
                    self.graph[e.target()].name(),
                )
            })
            .collect();
        edges.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for (from, to) in edges {
            hasher.update(from.as_bytes());
            hasher.update(b"\x00");
            hasher.update(to.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
