//! # Diagram Generation Tests
//!
//! Library-level tests for the full parse -> graph -> DOT -> render flow,
//! using the mock backend to observe what reaches the renderer and to
//! verify that failures never touch the filesystem.

use std::fs;

use pipeviz::{
    generate, generate_from_file, DiagramOptions, ImageFormat, MockBackend, ModuleGraph,
    PipelineSpec, PipevizError,
};
use tempfile::TempDir;

// ============================================================================
// TEST HELPERS
// ============================================================================

fn options_in(dir: &TempDir, base: &str) -> DiagramOptions {
    DiagramOptions::new().with_output_base(dir.path().join(base).display().to_string())
}

fn file_count(dir: &TempDir) -> usize {
    fs::read_dir(dir.path()).unwrap().count()
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn two_module_chain_round_trips_into_labeled_dot() {
    let yaml = r#"
pipeline_modules:
  P:
    type: VisionEncoderModule
    device: GPU
    outputs:
      - name: o1
        type: ov::Tensor
  Q:
    type: ResultModule
    inputs:
      - name: i1
        type: ov::Tensor
        source: P.o1
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.node_count, 2);
    assert_eq!(report.edge_count, 1);

    let (dot, format) = backend.last_request().unwrap();
    assert_eq!(format, ImageFormat::Png);
    assert!(dot.contains("P [label=\"P\\n(VisionEncoderModule)\\nDevice: GPU\"];"));
    assert!(dot.contains("Q [label=\"Q\\n(ResultModule)\\nDevice: N/A\"];"));
    assert!(dot.contains("P -> Q [label=\"o1\"];"));
}

#[test]
fn missing_type_and_device_fall_back_to_placeholders() {
    let yaml = r#"
pipeline_modules:
  bare: {}
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();

    let (dot, _) = backend.last_request().unwrap();
    assert!(dot.contains("bare [label=\"bare\\n(Unknown)\\nDevice: N/A\"];"));
}

#[test]
fn edge_label_is_the_text_after_the_first_dot() {
    let yaml = r#"
pipeline_modules:
  producer:
    outputs:
      - name: features.raw
  consumer:
    inputs:
      - name: x
        source: producer.features.raw
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();

    let (dot, _) = backend.last_request().unwrap();
    assert!(dot.contains("producer -> consumer [label=\"features.raw\"];"));
}

#[test]
fn forward_references_resolve_against_the_full_module_set() {
    // The consumer is declared before its producer
    let yaml = r#"
pipeline_modules:
  consumer:
    inputs:
      - name: x
        source: producer.out
  producer:
    outputs:
      - name: out
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.edge_count, 1);

    let (dot, _) = backend.last_request().unwrap();
    assert!(dot.contains("producer -> consumer [label=\"out\"];"));
}

// ============================================================================
// Lenient Reference Handling
// ============================================================================

#[test]
fn unknown_source_module_drops_the_edge_without_failing() {
    let yaml = r#"
pipeline_modules:
  consumer:
    inputs:
      - name: x
        source: ghost.out
    outputs:
      - name: y
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.node_count, 1);
    assert_eq!(report.edge_count, 0);

    let (dot, _) = backend.last_request().unwrap();
    assert!(!dot.contains("->"));
}

#[test]
fn malformed_sources_are_skipped() {
    let yaml = r#"
pipeline_modules:
  producer:
    outputs:
      - name: out
  consumer:
    inputs:
      - name: a
        source: producer
      - name: b
        source: "producer."
      - name: c
        source: ".out"
      - name: d
        source: producer.out
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.edge_count, 1);
}

#[test]
fn self_loops_are_rendered() {
    let yaml = r#"
pipeline_modules:
  feedback:
    inputs:
      - name: prev
        source: feedback.state
    outputs:
      - name: state
"#;
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.edge_count, 1);

    let (dot, _) = backend.last_request().unwrap();
    assert!(dot.contains("feedback -> feedback [label=\"state\"];"));
}

#[test]
fn empty_pipeline_still_renders() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate("pipeline_modules: {}\n", &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.node_count, 0);
    assert_eq!(report.edge_count, 0);
    assert!(report.image_path.exists());
}

#[test]
fn absent_pipeline_modules_key_renders_an_empty_diagram() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report = generate("global_context: {}\n", &options_in(&dir, "dag"), &backend).unwrap();
    assert_eq!(report.node_count, 0);
    assert_eq!(report.edge_count, 0);
    assert!(report.image_path.exists());
    assert_eq!(file_count(&dir), 1);
}

#[test]
fn duplicate_module_names_keep_the_last_definition() {
    let yaml = r#"
pipeline_modules:
  worker:
    type: TextEncoderModule
  worker:
    type: VisionEncoderModule
"#;
    let spec = PipelineSpec::from_yaml(yaml).unwrap();
    let graph = ModuleGraph::from_spec(&spec);

    assert_eq!(graph.node_count(), 1);
    assert!(graph.nodes()[0].label.contains("VisionEncoderModule"));
}

// ============================================================================
// Failure Paths Leave No Files
// ============================================================================

#[test]
fn parse_failure_never_reaches_the_backend() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let err = generate("pipeline_modules: [oops", &options_in(&dir, "dag"), &backend).unwrap_err();
    assert!(matches!(err, PipevizError::YamlParse(_)));
    assert_eq!(file_count(&dir), 0);
    assert!(backend.get_requests().is_empty());
}

#[test]
fn unavailable_backend_leaves_no_files() {
    let yaml = "pipeline_modules:\n  solo:\n    outputs:\n      - name: out\n";
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new().unavailable();

    let err = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap_err();
    assert!(matches!(err, PipevizError::BackendUnavailable { .. }));
    assert_eq!(file_count(&dir), 0);
}

#[test]
fn render_failure_leaves_no_files() {
    let yaml = "pipeline_modules:\n  solo:\n    outputs:\n      - name: out\n";
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new().failing("bad dot");

    let err = generate(yaml, &options_in(&dir, "dag"), &backend).unwrap_err();
    assert!(matches!(err, PipevizError::RenderFailed { .. }));
    assert_eq!(file_count(&dir), 0);
}

#[test]
fn missing_config_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let missing = dir.path().join("nope.yaml");
    let err = generate_from_file(&missing, &options_in(&dir, "dag"), &backend).unwrap_err();
    match err {
        PipevizError::ConfigNotFound { path } => assert!(path.contains("nope.yaml")),
        other => panic!("expected ConfigNotFound, got {other}"),
    }
    assert!(backend.get_requests().is_empty());
}

// ============================================================================
// Output Naming
// ============================================================================

#[test]
fn generate_from_file_writes_requested_format() {
    let yaml = "pipeline_modules:\n  solo:\n    outputs:\n      - name: out\n";
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("pipeline.yaml");
    fs::write(&config, yaml).unwrap();
    let backend = MockBackend::new().with_default_bytes(b"svg bytes".to_vec());

    let options = options_in(&dir, "diagram").with_format(ImageFormat::Svg);
    let report = generate_from_file(&config, &options, &backend).unwrap();

    assert_eq!(report.image_path, dir.path().join("diagram.svg"));
    assert_eq!(fs::read(&report.image_path).unwrap(), b"svg bytes");

    let (_, format) = backend.last_request().unwrap();
    assert_eq!(format, ImageFormat::Svg);
}

#[test]
fn jpg_and_jpeg_keep_their_own_extensions() {
    let yaml = "pipeline_modules:\n  solo:\n    outputs:\n      - name: out\n";
    let dir = TempDir::new().unwrap();
    let backend = MockBackend::new();

    let report =
        generate(yaml, &options_in(&dir, "a").with_format(ImageFormat::Jpg), &backend).unwrap();
    assert_eq!(report.image_path, dir.path().join("a.jpg"));

    let report =
        generate(yaml, &options_in(&dir, "b").with_format(ImageFormat::Jpeg), &backend).unwrap();
    assert_eq!(report.image_path, dir.path().join("b.jpeg"));
}
