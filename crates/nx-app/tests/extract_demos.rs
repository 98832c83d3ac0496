//! Service-level tests against the bundled demo documents.

use std::path::PathBuf;

use nx_app::{AppError, ExtractOptions, extract, extract_file, load_project, summarize_project};
use nx_graph::DeviceAnnotation;

fn demo(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("demos");
    path.push(name);
    path
}

#[test]
fn wire_is_a_single_branch() {
    let response = extract_file(&demo("wire.yaml"), &ExtractOptions::default()).unwrap();

    assert_eq!(response.annotated, 2);
    assert_eq!(response.report.accepted.len(), 1);
    assert!(response.report.dummies.is_empty());
    assert!(response.report.removed.is_empty());
    assert_eq!(response.graph.node_count(), 10);

    let summary = response.summary();
    assert!(summary.converged);
    assert_eq!(summary.branches, vec!["branch 0: P1 -> P2".to_string()]);
}

#[test]
fn tee_gets_a_junction() {
    let response = extract_file(&demo("tee.yaml"), &ExtractOptions::default()).unwrap();

    assert_eq!(response.annotated, 3);
    assert_eq!(response.report.dummies.len(), 1);
    assert_eq!(response.report.accepted.len(), 3);
    assert_eq!(response.graph.node_count(), 14);

    let hub = response.report.dummies[0];
    assert_eq!(hub.index(), 5);
    assert!(matches!(
        response.graph.node(hub).unwrap().device,
        Some(DeviceAnnotation::Dummy { .. })
    ));
    for path in &response.report.accepted {
        assert!(path.source() == hub || path.target() == hub);
    }
    let summary = response.summary();
    assert_eq!(summary.final_pass, 2);
    assert_eq!(summary.terminals, 1);
    assert_eq!(
        summary.branches,
        vec![
            "branch 0: P1 -> D0".to_string(),
            "branch 1: D0 -> P2".to_string(),
            "branch 2: D0 -> P3".to_string(),
        ]
    );
}

#[test]
fn digests_are_reproducible() {
    let options = ExtractOptions::default();
    let a = extract_file(&demo("tee.yaml"), &options).unwrap();
    let b = extract_file(&demo("tee.yaml"), &options).unwrap();
    let wire = extract_file(&demo("wire.yaml"), &options).unwrap();

    assert_eq!(a.digest, b.digest);
    assert_eq!(a.view, b.view);
    assert_ne!(a.digest, wire.digest);
}

#[test]
fn pass_cap_stops_before_synthesis() {
    let options = ExtractOptions {
        max_passes: Some(1),
        ..ExtractOptions::default()
    };
    let response = extract_file(&demo("tee.yaml"), &options).unwrap();
    assert!(!response.report.converged);
    assert!(response.report.dummies.is_empty());
    assert_eq!(response.report.accepted.len(), 3);
}

#[test]
fn overrides_are_checked() {
    let project = load_project(&demo("wire.yaml")).unwrap();

    let zero = ExtractOptions {
        max_passes: Some(0),
        ..ExtractOptions::default()
    };
    assert!(matches!(extract(&project, &zero), Err(AppError::InvalidInput(_))));

    let unknown = ExtractOptions {
        cell_kind: Some("quad".into()),
        ..ExtractOptions::default()
    };
    assert!(matches!(extract(&project, &unknown), Err(AppError::InvalidInput(_))));

    // The demo has no line cells.
    let lines = ExtractOptions {
        cell_kind: Some("line".into()),
        ..ExtractOptions::default()
    };
    assert!(matches!(extract(&project, &lines), Err(AppError::Compile(_))));
}

#[test]
fn unpruned_run_removes_nothing() {
    let options = ExtractOptions {
        no_prune: true,
        ..ExtractOptions::default()
    };
    let response = extract_file(&demo("tee.yaml"), &options).unwrap();
    assert!(response.report.removed.is_empty());
    assert_eq!(response.graph.node_count(), 14);
}

#[test]
fn summary_lists_document_contents() {
    let project = load_project(&demo("tee.yaml")).unwrap();
    let summary = summarize_project(&project);
    assert_eq!(summary.name, "tee");
    assert_eq!(summary.points, 16);
    assert_eq!(summary.cells, vec![("triangle".to_string(), 14)]);
    assert_eq!(summary.groups, vec!["M6_0".to_string()]);
    assert_eq!(summary.elements, 3);
}

#[test]
fn missing_file_reports_path() {
    let err = extract_file(&demo("nope.yaml"), &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::ProjectFileRead { .. }));
}
