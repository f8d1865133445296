//! Golden traces for small hand-checked graphs.

use relaxviz_engine::{
    generate, predecessor_label, Distance, Forward, Graph, Outcome, PlaybackCursor, StepKind,
    VertexId,
};

fn messages(graph: &Graph) -> Vec<String> {
    generate(graph)
        .unwrap()
        .steps()
        .iter()
        .map(|s| s.message.clone())
        .collect()
}

#[test]
fn textbook_graph_converges_with_early_stop() {
    let graph = Graph::from_triples(3, &[(0, 1, 4), (0, 2, 5), (1, 2, -2)], 0).unwrap();

    assert_eq!(
        messages(&graph),
        vec![
            "Initialize: Source node 0 = 0, all others = ∞",
            "Iteration 1 of 2: Relaxing all edges...",
            "Checking edge 0 → 1 (weight 4)",
            "Relaxing edge 0 → 1. Distance to 1 updated to 4.",
            "Setting prev[1] = 0. Node 0 is now predecessor of 1.",
            "Checking edge 0 → 2 (weight 5)",
            "Relaxing edge 0 → 2. Distance to 2 updated to 5.",
            "Setting prev[2] = 0. Node 0 is now predecessor of 2.",
            "Checking edge 1 → 2 (weight -2)",
            "Relaxing edge 1 → 2. Distance to 2 updated to 2.",
            "Setting prev[2] = 1. Node 1 is now predecessor of 2.",
            "Iteration 2 of 2: Relaxing all edges...",
            "Checking edge 0 → 1 (weight 4)",
            "No relaxation: dist[0] + 4 ≥ dist[1]",
            "Checking edge 0 → 2 (weight 5)",
            "No relaxation: dist[0] + 5 ≥ dist[2]",
            "Checking edge 1 → 2 (weight -2)",
            "No relaxation: dist[1] + -2 ≥ dist[2]",
            "No changes in iteration 2. Algorithm can stop early.",
            "✓ Algorithm complete! Shortest paths found.",
        ]
    );

    let trace = generate(&graph).unwrap();
    let init = &trace.steps()[0];
    assert_eq!(
        init.distances,
        vec![Distance::Finite(0), Distance::Unreachable, Distance::Unreachable]
    );
    assert_eq!(init.active_vertices, vec![VertexId(0)]);

    let done = trace.final_step().unwrap();
    assert_eq!(done.kind, StepKind::Complete);
    assert_eq!(
        done.distances,
        vec![Distance::Finite(0), Distance::Finite(4), Distance::Finite(2)]
    );
    let table: Vec<String> = done
        .predecessors
        .as_ref()
        .unwrap()
        .iter()
        .map(|p| predecessor_label(*p))
        .collect();
    assert_eq!(table, vec!["-", "0", "1"]);
    assert_eq!(done.relaxation_count, 3);
}

#[test]
fn two_vertex_negative_cycle() {
    let graph = Graph::from_triples(2, &[(0, 1, 1), (1, 0, -3)], 0).unwrap();
    let trace = generate(&graph).unwrap();

    assert_eq!(trace.iterations(), 1);
    assert_eq!(trace.outcome(), Outcome::NegativeCycle);
    assert_eq!(
        messages(&graph),
        vec![
            "Initialize: Source node 0 = 0, all others = ∞",
            "Iteration 1 of 1: Relaxing all edges...",
            "Checking edge 0 → 1 (weight 1)",
            "Relaxing edge 0 → 1. Distance to 1 updated to 1.",
            "Setting prev[1] = 0. Node 0 is now predecessor of 1.",
            "Checking edge 1 → 0 (weight -3)",
            "Relaxing edge 1 → 0. Distance to 0 updated to -2.",
            "Setting prev[0] = 1. Node 1 is now predecessor of 0.",
            "⚠️ Negative cycle detected! Shortest paths are undefined.",
        ]
    );

    let last = trace.final_step().unwrap();
    assert_eq!(last.distances, vec![Distance::Finite(-2), Distance::Finite(1)]);
    assert!(last.predecessors.is_none());
    assert!(trace.steps().iter().all(|s| s.kind != StepKind::Complete));
}

#[test]
fn unreachable_vertex_stays_infinite() {
    let graph = Graph::from_triples(3, &[(0, 1, 1)], 0).unwrap();
    let trace = generate(&graph).unwrap();

    assert!(trace
        .steps()
        .iter()
        .all(|s| s.distance(VertexId(2)) == Distance::Unreachable));

    let done = trace.final_step().unwrap();
    assert_eq!(done.kind, StepKind::Complete);
    assert_eq!(done.distance(VertexId(2)).to_string(), "∞");
    assert_eq!(done.predecessor(VertexId(2)), Some(None));
    assert_eq!(
        messages(&graph)[6..],
        [
            "Checking edge 0 → 1 (weight 1)",
            "No relaxation: dist[0] + 1 ≥ dist[1]",
            "No changes in iteration 2. Algorithm can stop early.",
            "✓ Algorithm complete! Shortest paths found.",
        ]
    );
}

#[test]
fn non_zero_source_is_highlighted_as_source() {
    let graph = Graph::from_triples(3, &[(2, 0, 3), (0, 1, -1)], 2).unwrap();
    let mut cursor = PlaybackCursor::new(generate(&graph).unwrap());

    let Forward::Step(init) = cursor.step_forward() else {
        panic!("trace is never empty");
    };
    assert_eq!(init.message, "Initialize: Source node 2 = 0, all others = ∞");

    while let Forward::Step(_) = cursor.step_forward() {}
    let state = cursor.current_observable_state().unwrap();
    assert_eq!(
        state.distances,
        vec![Distance::Finite(3), Distance::Finite(2), Distance::Finite(0)]
    );
    assert_eq!(state.predecessors, vec![Some(VertexId(2)), Some(VertexId(0)), None]);
}
