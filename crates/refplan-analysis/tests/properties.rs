//! Property tests over random dependency graphs.

use std::collections::HashSet;

use proptest::prelude::*;
use refplan_analysis::order::{get_layers, layer_indices, priority_order};
use refplan_analysis::run_analysis;
use refplan_analysis::score::StructuralScorer;
use refplan_core::Module;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn order_exists_iff_no_cycles(graph in arb_graph()) {
        let scores = StructuralScorer::default().score_graph(&graph);
        let order = priority_order(&graph, &scores);
        let acyclic = graph.detect_cycles().is_empty();

        prop_assert_eq!(acyclic, order.is_some());
        prop_assert_eq!(acyclic, graph.is_acyclic());
        if let Some(order) = order {
            prop_assert_eq!(order.len(), graph.module_count());
            let unique: HashSet<&str> = order.iter().map(Module::name).collect();
            prop_assert_eq!(unique.len(), graph.module_count());
        }
    }

    #[test]
    fn dependencies_come_first(graph in arb_dag()) {
        let plan = run_analysis(&graph);
        prop_assert!(plan.is_ordered());

        for (position, step) in plan.steps.iter().enumerate() {
            for dep in graph.dependencies_of(&step.module) {
                let dep_position = plan
                    .steps
                    .iter()
                    .position(|s| &s.module == dep)
                    .expect("every module has a step");
                prop_assert!(dep_position < position, "{} before {}", dep, step.module);
            }
        }
    }

    #[test]
    fn scores_stay_in_unit_range(graph in arb_graph()) {
        let scores = StructuralScorer::default().score_graph(&graph);
        prop_assert_eq!(scores.len(), graph.module_count());
        for score in scores {
            prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn adjacency_matrix_mirrors_edges(graph in arb_graph()) {
        let matrix = graph.to_adjacency_matrix();
        let n = graph.module_count();
        prop_assert_eq!(matrix.shape(), (n, n));

        for i in 0..n {
            let deps: HashSet<usize> = graph.dependency_indices(i).into_iter().collect();
            for j in 0..n {
                prop_assert_eq!(matrix[(i, j)] > 0.0, deps.contains(&j));
            }
        }
    }

    #[test]
    fn layers_partition_modules(graph in arb_dag()) {
        let layers = layer_indices(&graph).expect("acyclic");
        let mut level = vec![usize::MAX; graph.module_count()];
        for (k, layer) in layers.iter().enumerate() {
            for &i in layer {
                prop_assert_eq!(level[i], usize::MAX, "module {} placed twice", i);
                level[i] = k;
            }
        }
        prop_assert!(level.iter().all(|&k| k != usize::MAX));

        // Direct dependencies sit in strictly earlier layers, so transitive
        // ones do too.
        for i in 0..graph.module_count() {
            for dep in graph.dependency_indices(i) {
                prop_assert!(level[dep] < level[i]);
            }
        }
    }

    #[test]
    fn layers_agree_with_cycles(graph in arb_graph()) {
        prop_assert_eq!(get_layers(&graph).is_some(), graph.is_acyclic());
    }

    #[test]
    fn self_loops_are_single_cycles(graph in arb_graph()) {
        for module in graph.modules() {
            if graph.weight(module.name(), module.name()).is_some() {
                let found = graph
                    .detect_cycles()
                    .iter()
                    .any(|cycle| cycle.len() == 1 && &cycle[0] == module);
                prop_assert!(found, "self-loop on {} not reported", module);
            }
        }
    }

    #[test]
    fn cyclic_plans_report_their_cycles(graph in arb_graph()) {
        let plan = run_analysis(&graph);
        prop_assert_eq!(plan.steps.len(), graph.module_count());
        prop_assert_eq!(plan.has_cycles(), !graph.is_acyclic());
        if plan.has_cycles() {
            prop_assert!(plan.layers.is_empty());
            for pair in plan.steps.windows(2) {
                prop_assert!(pair[0].complexity >= pair[1].complexity);
            }
        }
    }
}
