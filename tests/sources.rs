use std::path::Path;

use serde_json::json;
use taskgraph_viz::dag::build;
use taskgraph_viz::errors::TaskgraphError;
use taskgraph_viz::fs::mock::MockFileSystem;
use taskgraph_viz::source::remote::parse_root_url;
use taskgraph_viz::source::{
    fetch_task_group, graph_name_for, load_taskgraph, parse_taskgraph, task_group_record,
    GraphSource, TaskclusterQueue,
};
use taskgraph_viz_test_utils::builders::{listing_element, TaskGraphJsonBuilder};
use taskgraph_viz_test_utils::fake_lister::{FakeLister, LoopingLister};
use taskgraph_viz_test_utils::init_tracing;

// ---------- file source ----------

#[test]
fn task_graph_file_keeps_task_order_and_fields() {
    let json = TaskGraphJsonBuilder::new()
        .task("t-docker", "docker-image-base", "docker-image", &[])
        .task("t-build", "build-linux64/opt", "build", &["t-docker"])
        .build();
    let snapshot = parse_taskgraph("ship", &json).unwrap();

    let ids: Vec<&str> = snapshot.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["t-docker", "t-build"]);

    let build_task = snapshot.get("t-build").unwrap();
    assert_eq!(build_task.label, "build-linux64/opt");
    assert_eq!(build_task.kind.as_deref(), Some("build"));
    assert_eq!(build_task.dependencies.len(), 1);
    assert_eq!(build_task.dependencies[0].name, "dep-t-docker");
    assert_eq!(build_task.dependencies[0].task_id, "t-docker");
    assert_eq!(build_task.data["task"]["metadata"]["name"], "build-linux64/opt");
}

#[test]
fn absent_or_null_dependencies_mean_none() {
    let json = json!({
        "a": {"label": "a", "attributes": {"kind": "k"}},
        "b": {"label": "b", "attributes": {"kind": "k"}, "dependencies": null},
    })
    .to_string();
    let snapshot = parse_taskgraph("g", &json).unwrap();
    assert!(snapshot.records().iter().all(|r| r.dependencies.is_empty()));
}

#[test]
fn malformed_task_graphs_are_rejected() {
    let cases = [
        "[]".to_string(),
        "not json".to_string(),
        json!({"a": {"attributes": {"kind": "k"}}}).to_string(),
        json!({"a": {"label": 3, "attributes": {"kind": "k"}}}).to_string(),
        json!({"a": {"label": "a"}}).to_string(),
        json!({"a": {"label": "a", "attributes": {}}}).to_string(),
        json!({"a": {"label": "a", "attributes": {"kind": "k"}, "dependencies": ["b"]}})
            .to_string(),
        json!({"a": {"label": "a", "attributes": {"kind": "k"}, "dependencies": {"x": 1}}})
            .to_string(),
    ];
    for case in cases {
        let err = parse_taskgraph("g", &case).unwrap_err();
        assert!(
            matches!(err, TaskgraphError::MalformedInput(_)),
            "{case}: {err:?}"
        );
    }
}

#[test]
fn graph_name_comes_from_the_file_stem() {
    assert_eq!(graph_name_for(Path::new("data/ship-115.json")), "ship-115");
    assert_eq!(graph_name_for(Path::new("/")), "taskgraph");
}

#[test]
fn loading_a_missing_file_names_the_path() {
    let fs = MockFileSystem::new();
    let err = load_taskgraph(&fs, Path::new("graphs/nope.json")).unwrap_err();
    assert!(matches!(err, TaskgraphError::Other(_)));
    assert!(err.to_string().contains("graphs/nope.json"), "{err}");
}

// ---------- remote source ----------

#[test]
fn listing_element_becomes_a_task_record() {
    let record = task_group_record(listing_element(
        "tid-2",
        "test-linux64/opt",
        Some("test"),
        &["tid-1", "tid-0"],
    ))
    .unwrap();

    assert_eq!(record.id, "tid-2");
    assert_eq!(record.label, "test-linux64/opt");
    assert_eq!(record.kind.as_deref(), Some("test"));
    let deps: Vec<(&str, &str)> = record
        .dependencies
        .iter()
        .map(|d| (d.name.as_str(), d.task_id.as_str()))
        .collect();
    assert_eq!(deps, vec![("0", "tid-1"), ("1", "tid-0")]);
}

#[test]
fn listing_element_without_name_or_kind() {
    let record = task_group_record(json!({"status": {"taskId": "tid"}, "task": {}})).unwrap();
    assert_eq!(record.label, "tid");
    assert_eq!(record.kind, None);
    assert!(record.dependencies.is_empty());
}

#[test]
fn malformed_listing_elements_are_rejected() {
    for element in [
        json!({"task": {}}),
        json!({"status": {"taskId": 7}}),
        json!({"status": {"taskId": "t"}, "task": {"dependencies": "a"}}),
        json!({"status": {"taskId": "t"}, "task": {"dependencies": [1]}}),
    ] {
        assert!(matches!(
            task_group_record(element),
            Err(TaskgraphError::MalformedInput(_))
        ));
    }
}

#[tokio::test]
async fn pages_are_fetched_in_sequence() {
    init_tracing();
    let lister = FakeLister::new(vec![
        vec![listing_element("a", "docker-image", Some("docker-image"), &[])],
        vec![listing_element("b", "build", Some("build"), &["a"])],
        vec![listing_element("c", "test", Some("test"), &["b"])],
    ]);

    let snapshot = fetch_task_group(&lister, "group-1").await.unwrap();

    assert_eq!(snapshot.name(), "group-1");
    assert_eq!(snapshot.len(), 3);
    assert_eq!(
        lister.calls(),
        vec![None, Some("page-1".to_string()), Some("page-2".to_string())]
    );
}

#[tokio::test]
async fn remote_edges_point_from_dependency_to_dependent() {
    let lister = FakeLister::new(vec![vec![
        listing_element("b", "build", Some("build"), &["a"]),
        listing_element("a", "docker-image", Some("docker-image"), &[]),
    ]]);
    let snapshot = fetch_task_group(&lister, "g").await.unwrap();
    let dag = build(&snapshot, None).unwrap();

    assert_eq!(dag.dependencies_of("b"), vec!["a"]);
    assert_eq!(dag.dependents_of("a"), vec!["b"]);
}

#[tokio::test]
async fn repeated_continuation_token_is_an_error() {
    let err = fetch_task_group(&LoopingLister, "g").await.unwrap_err();
    assert!(matches!(err, TaskgraphError::RemoteFetch(_)));
}

#[tokio::test]
async fn graph_source_dispatches_on_variant() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "in/tg.json",
        TaskGraphJsonBuilder::new().task("x", "x", "k", &[]).build(),
    );
    let lister = FakeLister::new(vec![vec![listing_element("r", "r", None, &[])]]);

    let file = GraphSource::File("in/tg.json".into());
    let snapshot = file.load(&fs, &lister).await.unwrap();
    assert_eq!(snapshot.name(), "tg");
    assert!(lister.calls().is_empty());

    let group = GraphSource::TaskGroup("grp".to_string());
    let snapshot = group.load(&fs, &lister).await.unwrap();
    assert_eq!(snapshot.name(), "grp");
    assert_eq!(group.to_string(), "task-group-grp");
    assert_eq!(file.to_string(), "in/tg.json");
}

#[test]
fn queue_listing_url() {
    let queue = TaskclusterQueue::new("https://tc.example.com", Some(100)).unwrap();
    assert_eq!(
        queue.list_url("abc").unwrap().as_str(),
        "https://tc.example.com/api/queue/v1/task-group/abc/list"
    );
    assert!(matches!(
        parse_root_url("not a url"),
        Err(TaskgraphError::ConfigError(_))
    ));
}
