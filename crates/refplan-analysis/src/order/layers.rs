//! Parallel refactoring layers.
//!
//! Layer 0 holds every module with no dependencies. Each later layer holds
//! the modules whose dependencies all sit in earlier layers. Modules in one
//! layer can be refactored in parallel.

use std::collections::BTreeSet;

use refplan_core::{DependencyGraph, Module};
use tracing::{debug, instrument};

use super::unresolved_counts;

/// Modules grouped into dependencies-first layers.
///
/// Returns `None` if the graph has a cycle; an empty graph yields no layers.
#[must_use]
pub fn get_layers(graph: &DependencyGraph) -> Option<Vec<BTreeSet<Module>>> {
    let layers = layer_indices(graph)?;
    Some(
        layers
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .filter_map(|i| graph.module_at(i).cloned())
                    .collect()
            })
            .collect(),
    )
}

/// Like [`get_layers`], returning enumeration indices, ascending within each
/// layer.
#[must_use]
#[instrument(skip(graph), fields(n = graph.module_count()))]
pub fn layer_indices(graph: &DependencyGraph) -> Option<Vec<Vec<usize>>> {
    let n = graph.module_count();
    let mut remaining = unresolved_counts(graph);
    let mut current: Vec<usize> = (0..n).filter(|&i| remaining[i] == 0).collect();
    let mut placed = 0usize;
    let mut layers = Vec::new();

    while !current.is_empty() {
        placed += current.len();
        let mut next = Vec::new();
        for &index in &current {
            for dependent in graph.dependent_indices(index) {
                let Some(count) = remaining.get_mut(dependent) else {
                    continue;
                };
                if *count == 0 {
                    continue;
                }
                *count -= 1;
                if *count == 0 {
                    next.push(dependent);
                }
            }
        }
        next.sort_unstable();
        layers.push(std::mem::replace(&mut current, next));
    }

    if placed < n {
        debug!(placed, total = n, "cycle blocks layering");
        return None;
    }
    debug!(layers = layers.len(), "layered graph");
    Some(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_names(layers: &[BTreeSet<Module>]) -> Vec<Vec<&str>> {
        layers
            .iter()
            .map(|layer| layer.iter().map(Module::name).collect())
            .collect()
    }

    #[test]
    fn empty_graph_has_no_layers() {
        assert_eq!(get_layers(&DependencyGraph::new()), Some(Vec::new()));
    }

    #[test]
    fn independent_modules_share_one_layer() {
        let mut graph = DependencyGraph::new();
        for name in ["c", "a", "b"] {
            graph.add_module(Module::new(name));
        }
        let layers = get_layers(&graph).expect("acyclic");
        assert_eq!(layer_names(&layers), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn chain_gives_one_module_per_layer() {
        let graph = DependencyGraph::from_edges(&[("a", "b"), ("b", "c")]);
        let layers = get_layers(&graph).expect("acyclic");
        assert_eq!(layer_names(&layers), vec![vec!["c"], vec!["b"], vec!["a"]]);
    }

    #[test]
    fn diamond_groups_middle_pair() {
        // top depends on left and right, both depend on base.
        let graph = DependencyGraph::from_edges(&[
            ("top", "left"),
            ("top", "right"),
            ("left", "base"),
            ("right", "base"),
        ]);
        let layers = get_layers(&graph).expect("acyclic");
        assert_eq!(
            layer_names(&layers),
            vec![vec!["base"], vec!["left", "right"], vec!["top"]]
        );
    }

    #[test]
    fn module_waits_for_its_deepest_dependency() {
        // a -> b -> c and a -> c: a lands after b, not alongside it.
        let graph = DependencyGraph::from_edges(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let layers = layer_indices(&graph).expect("acyclic");
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn cycle_yields_none() {
        let graph = DependencyGraph::from_edges(&[("a", "b"), ("b", "a"), ("c", "d")]);
        assert_eq!(get_layers(&graph), None);
    }
}
