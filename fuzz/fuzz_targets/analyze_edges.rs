#![no_main]

use libfuzzer_sys::fuzz_target;
use refplan_analysis::{get_layers, run_analysis};
use refplan_core::{Dependency, DependencyGraph};

// Each byte pair is one edge between up to 16 modules; a third byte, when
// present, sets the weight.
fuzz_target!(|data: &[u8]| {
    let mut graph = DependencyGraph::new();
    for chunk in data.chunks(3) {
        let [from, to, rest @ ..] = chunk else {
            continue;
        };
        let mut dep = Dependency::new(format!("m{}", from % 16), format!("m{}", to % 16));
        if let Some(&w) = rest.first() {
            if let Ok(weighted) = dep.clone().with_weight(f64::from(w)) {
                dep = weighted;
            }
        }
        graph.add_dependency(dep);
    }

    let plan = run_analysis(&graph);
    assert_eq!(plan.steps.len(), graph.module_count());
    assert_eq!(plan.has_cycles(), !graph.is_acyclic());
    assert_eq!(get_layers(&graph).is_some(), graph.is_acyclic());
    for step in &plan.steps {
        assert!((0.0..=1.0).contains(&step.complexity));
    }
});
