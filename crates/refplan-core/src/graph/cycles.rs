//! Dependency cycle detection.
//!
//! # Algorithm
//!
//! 1. Tarjan's SCC flags every module that can sit on a cycle: members of
//!    components with two or more modules, plus self-looping singletons.
//! 2. From each flagged module, in enumeration order, a depth-first walk
//!    restricted to that module's component tracks the current path. When
//!    an edge reaches a module already on the path, the path slice from that
//!    module to the current position (inclusive) is a cycle.
//! 3. Cycles are deduplicated by vertex set, so rotations of the same loop
//!    are reported once while loops sharing only some modules are kept
//!    apart.
//!
//! A self-loop yields a one-element cycle. Each walk visits every module of
//! its component at most once, so the whole pass is `O(V · (V + E))` in the
//! worst case.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

/// Find deduplicated cycles as node-index paths, in discovery order.
#[must_use]
#[instrument(skip(graph), fields(n = graph.node_count(), e = graph.edge_count()))]
pub fn detect_cycles<N, E>(graph: &DiGraph<N, E>) -> Vec<Vec<NodeIndex>> {
    let (component_of, mut flagged) = flag_cyclic_nodes(graph);
    flagged.sort_unstable();

    let mut seen: HashSet<Vec<NodeIndex>> = HashSet::new();
    let mut cycles: Vec<Vec<NodeIndex>> = Vec::new();

    for start in flagged {
        walk_from(graph, start, &component_of, &mut |cycle: &[NodeIndex]| {
            let mut key = cycle.to_vec();
            key.sort_unstable();
            if seen.insert(key) {
                cycles.push(cycle.to_vec());
            }
        });
    }

    debug!(cycles = cycles.len(), "cycle detection finished");
    cycles
}

/// `true` if any cycle (including a self-loop) exists.
#[must_use]
pub fn has_cycle<N, E>(graph: &DiGraph<N, E>) -> bool {
    !flag_cyclic_nodes(graph).1.is_empty()
}

/// Map each node to its SCC id and collect the nodes that lie on a cycle.
fn flag_cyclic_nodes<N, E>(graph: &DiGraph<N, E>) -> (Vec<usize>, Vec<NodeIndex>) {
    let mut component_of = vec![usize::MAX; graph.node_count()];
    let mut flagged = Vec::new();

    for (id, component) in tarjan_scc(graph).into_iter().enumerate() {
        let cyclic = component.len() > 1
            || component
                .first()
                .is_some_and(|&node| graph.find_edge(node, node).is_some());
        for node in component {
            component_of[node.index()] = id;
            if cyclic {
                flagged.push(node);
            }
        }
    }

    (component_of, flagged)
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

/// Iterative DFS from `start` with an explicit path stack, reporting every
/// back-edge as the path slice it closes.
fn walk_from<N, E>(
    graph: &DiGraph<N, E>,
    start: NodeIndex,
    component_of: &[usize],
    on_cycle: &mut impl FnMut(&[NodeIndex]),
) {
    let component = component_of[start.index()];
    let successors = |node: NodeIndex| -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter(|next| component_of[next.index()] == component)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    };

    let mut path: Vec<NodeIndex> = vec![start];
    let mut position: HashMap<NodeIndex, usize> = HashMap::from([(start, 0)]);
    let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
    let mut frames = vec![Frame {
        node: start,
        successors: successors(start),
        next: 0,
    }];

    while let Some(frame) = frames.last_mut() {
        let Some(&next) = frame.successors.get(frame.next) else {
            let done = frame.node;
            frames.pop();
            path.pop();
            position.remove(&done);
            continue;
        };
        frame.next += 1;

        if let Some(&at) = position.get(&next) {
            on_cycle(&path[at..]);
        } else if visited.insert(next) {
            position.insert(next, path.len());
            path.push(next);
            frames.push(Frame {
                node: next,
                successors: successors(next),
                next: 0,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
