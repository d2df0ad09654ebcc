use taskgraph_viz::dag::{build, TaskDag};
use taskgraph_viz::errors::TaskgraphError;
use taskgraph_viz::layout::{
    layer_and_position, multipartite_positions, topological_generations, LayeredLayout,
    LayoutOptions, Position,
};
use taskgraph_viz::types::Alignment;
use taskgraph_viz_test_utils::builders::{chain, diamond, SnapshotBuilder};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn layer(dag: &TaskDag, layout: &taskgraph_viz::layout::Layout, key: &str) -> usize {
    layout.layer_of(dag.node_index(key).unwrap()).unwrap()
}

fn position(dag: &TaskDag, layout: &taskgraph_viz::layout::Layout, key: &str) -> Position {
    layout.position_of(dag.node_index(key).unwrap()).unwrap()
}

#[test]
fn chain_is_one_node_per_generation() {
    let dag = build(&chain(), None).unwrap();
    let layout = layer_and_position(&dag, Alignment::Vertical).unwrap();

    for (key, expected) in [("A", 0), ("B", 1), ("C", 2), ("D", 3)] {
        assert_eq!(layer(&dag, &layout, key), expected, "layer of {key}");
    }

    let ys: Vec<f64> = ["A", "B", "C", "D"]
        .iter()
        .map(|k| position(&dag, &layout, k).y)
        .collect();
    assert!(close(ys[0], -1.0));
    assert!(close(ys[1], -1.0 / 3.0));
    assert!(close(ys[2], 1.0 / 3.0));
    assert!(close(ys[3], 1.0));
    for key in ["A", "B", "C", "D"] {
        assert!(close(position(&dag, &layout, key).x, 0.0));
    }
}

#[test]
fn diamond_layers_follow_generations() {
    let dag = build(&diamond(), None).unwrap();
    let layout = layer_and_position(&dag, Alignment::Vertical).unwrap();

    assert_eq!(layer(&dag, &layout, "A"), 0);
    assert_eq!(layer(&dag, &layout, "B"), 1);
    assert_eq!(layer(&dag, &layout, "C"), 1);
    assert_eq!(layer(&dag, &layout, "D"), 2);

    let b = position(&dag, &layout, "B");
    let c = position(&dag, &layout, "C");
    assert!(close(b.y, c.y));
    assert!(close(b.x, -0.5));
    assert!(close(c.x, 0.5));
    assert!(close(position(&dag, &layout, "A").y, -1.0));
    assert!(close(position(&dag, &layout, "D").y, 1.0));
}

#[test]
fn horizontal_alignment_swaps_axes() {
    let dag = build(&diamond(), None).unwrap();
    let vertical = layer_and_position(&dag, Alignment::Vertical).unwrap();
    let horizontal = layer_and_position(&dag, Alignment::Horizontal).unwrap();

    for key in ["A", "B", "C", "D"] {
        let v = position(&dag, &vertical, key);
        let h = position(&dag, &horizontal, key);
        assert!(close(v.x, h.y), "{key}");
        assert!(close(v.y, h.x), "{key}");
        assert!(close(v.rank(Alignment::Vertical), h.rank(Alignment::Horizontal)));
    }
    assert_eq!(horizontal.alignment(), Alignment::Horizontal);
}

#[test]
fn generations_keep_insertion_order() {
    let snapshot = SnapshotBuilder::new("g")
        .task("root", &[])
        .task("z", &["root"])
        .task("a", &["root"])
        .task("m", &["root"])
        .build();
    let dag = build(&snapshot, None).unwrap();
    let generations = topological_generations(&dag).unwrap();

    let keys: Vec<Vec<&str>> = generations
        .iter()
        .map(|g| g.iter().map(|i| dag.node(*i).unwrap().key.as_str()).collect())
        .collect();
    assert_eq!(keys, vec![vec!["root"], vec!["z", "a", "m"]]);
}

#[test]
fn same_generation_nodes_get_distinct_cross_coordinates() {
    let snapshot = SnapshotBuilder::new("g")
        .task("root", &[])
        .task("a", &["root"])
        .task("b", &["root"])
        .task("c", &["root"])
        .build();
    let dag = build(&snapshot, None).unwrap();
    let layout = layer_and_position(&dag, Alignment::Vertical).unwrap();

    let xs: Vec<f64> = ["a", "b", "c"]
        .iter()
        .map(|k| position(&dag, &layout, k).x)
        .collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    assert!(close(xs[1] - xs[0], xs[2] - xs[1]));
}

#[test]
fn cycle_fails_layering() {
    let snapshot = SnapshotBuilder::new("g")
        .task("A", &["B"])
        .task("B", &["A"])
        .build();
    let dag = build(&snapshot, None).unwrap();

    let err = layer_and_position(&dag, Alignment::Vertical).unwrap_err();
    match err {
        TaskgraphError::CyclicGraph(msg) => {
            assert!(msg.contains("2 of 2"), "{msg}");
            assert!(msg.contains('A') && msg.contains('B'), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn cycle_behind_a_valid_prefix_is_detected() {
    let snapshot = SnapshotBuilder::new("g")
        .task("root", &[])
        .task("x", &["root", "y"])
        .task("y", &["x"])
        .build();
    let dag = build(&snapshot, None).unwrap();

    assert!(matches!(
        topological_generations(&dag),
        Err(TaskgraphError::CyclicGraph(_))
    ));
}

#[test]
fn scale_and_center_are_applied() {
    let dag = build(&chain(), None).unwrap();
    let layout = LayeredLayout::new(LayoutOptions {
        alignment: Alignment::Vertical,
        scale: 2.0,
        center: (10.0, 5.0),
    })
    .compute(&dag)
    .unwrap();

    assert!(close(position(&dag, &layout, "A").y, 3.0));
    assert!(close(position(&dag, &layout, "D").y, 7.0));
    assert!(close(position(&dag, &layout, "B").x, 10.0));
}

#[test]
fn single_node_sits_on_the_center() {
    let positions = multipartite_positions(&[1], Alignment::Horizontal, 1.0, (2.0, -3.0));
    assert_eq!(positions, vec![Position::new(2.0, -3.0)]);
}

#[test]
fn empty_graph_has_empty_layout() {
    let dag = TaskDag::new("empty");
    let layout = layer_and_position(&dag, Alignment::Vertical).unwrap();
    assert!(layout.is_empty());
    assert!(layout.generations().is_empty());
}
