//! Priority-aware topological order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use refplan_core::{DependencyGraph, Module};
use tracing::{debug, instrument, warn};

use super::unresolved_counts;

/// A ready module waiting in the heap.
///
/// Ordered by score (highest first), then by the sequence number it was
/// discovered with (earliest first).
#[derive(Debug, Clone, Copy)]
struct Ready {
    score: f64,
    seq: usize,
    index: usize,
}

impl PartialEq for Ready {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ready {}

impl PartialOrd for Ready {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ready {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Modules in dependencies-first order, riskiest-ready-first.
///
/// `scores` is indexed by the graph's enumeration; missing or non-finite
/// entries count as `0.0`. Returns `None` if the graph has a cycle.
#[must_use]
pub fn priority_order(graph: &DependencyGraph, scores: &[f64]) -> Option<Vec<Module>> {
    let order = priority_order_indices(graph, scores)?;
    Some(
        order
            .into_iter()
            .filter_map(|i| graph.module_at(i).cloned())
            .collect(),
    )
}

/// Like [`priority_order`], returning enumeration indices.
#[must_use]
#[instrument(skip(graph, scores), fields(n = graph.module_count()))]
pub fn priority_order_indices(graph: &DependencyGraph, scores: &[f64]) -> Option<Vec<usize>> {
    if !graph.is_acyclic() {
        debug!("graph has cycles, no priority order");
        return None;
    }
    kahn_by_score(graph, scores)
}

/// Kahn's algorithm with a score-ordered ready set.
///
/// Returns `None` if fewer than all modules could be placed.
pub(crate) fn kahn_by_score(graph: &DependencyGraph, scores: &[f64]) -> Option<Vec<usize>> {
    let n = graph.module_count();
    let score_at = |i: usize| {
        scores
            .get(i)
            .copied()
            .filter(|s| s.is_finite())
            .unwrap_or(0.0)
    };

    let mut remaining = unresolved_counts(graph);
    let mut ready = BinaryHeap::with_capacity(n);
    let mut seq = 0usize;

    for (index, _) in remaining.iter().enumerate().filter(|(_, c)| **c == 0) {
        ready.push(Ready {
            score: score_at(index),
            seq,
            index,
        });
        seq += 1;
    }

    let mut order = Vec::with_capacity(n);
    while let Some(Ready { index, .. }) = ready.pop() {
        order.push(index);
        for dependent in graph.dependent_indices(index) {
            let Some(count) = remaining.get_mut(dependent) else {
                continue;
            };
            if *count == 0 {
                continue;
            }
            *count -= 1;
            if *count == 0 {
                ready.push(Ready {
                    score: score_at(dependent),
                    seq,
                    index: dependent,
                });
                seq += 1;
            }
        }
    }

    if order.len() < n {
        warn!(
            placed = order.len(),
            total = n,
            "topological order incomplete, graph has a cycle"
        );
        return None;
    }
    Some(order)
}
