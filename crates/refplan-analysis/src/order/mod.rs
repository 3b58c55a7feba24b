//! Dependencies-first ordering.
//!
//! # Edge Direction
//!
//! `A → B` means "A depends on B", so B must be refactored no later than A.
//! Each module starts with an unresolved-dependency counter equal to its
//! out-degree; a module is ready once the counter reaches zero.
//!
//! Both orderers require an acyclic graph. When any cycle exists they return
//! `None` rather than a partial result. The empty graph yields an empty
//! order and an empty layer list.
//!
//! - [`priority_order`]: Kahn's algorithm picking the highest-scoring ready
//!   module first; equal scores go to the module that became ready first.
//! - [`get_layers`]: whole ready sets placed at once, for parallel work.

pub mod layers;
pub mod priority;

pub use layers::{get_layers, layer_indices};
pub use priority::{priority_order, priority_order_indices};

use refplan_core::DependencyGraph;

/// Unresolved-dependency counter per module, in enumeration order.
fn unresolved_counts(graph: &DependencyGraph) -> Vec<usize> {
    (0..graph.module_count())
        .map(|i| graph.dependency_indices(i).len())
        .collect()
}
