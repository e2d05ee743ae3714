//! End-to-end diagram generation
//!
//! Parse a configuration, build the graph, render through a backend, and
//! only then touch the filesystem. Every failure path leaves zero new
//! files behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::PipelineSpec;
use crate::dag::ModuleGraph;
use crate::error::{PipevizError, Result};
use crate::render::{dot_source, ImageFormat, RenderBackend};

/// Default output file stem
pub const DEFAULT_OUTPUT_BASE: &str = "pipeline_dag";

/// Options for diagram generation
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// Output path without extension
    pub output_base: String,
    /// Image format (decides the file extension too)
    pub format: ImageFormat,
    /// Also persist the DOT source next to the image (on success only)
    pub save_dot: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            output_base: DEFAULT_OUTPUT_BASE.to_string(),
            format: ImageFormat::Png,
            save_dot: false,
        }
    }
}

impl DiagramOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output path stem
    pub fn with_output_base(mut self, base: impl Into<String>) -> Self {
        self.output_base = base.into();
        self
    }

    /// Set the image format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Persist the DOT source next to the image
    pub fn with_saved_dot(mut self) -> Self {
        self.save_dot = true;
        self
    }

    /// Path of the image this configuration will produce
    pub fn image_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.output_base, self.format.extension()))
    }

    fn dot_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.dot", self.output_base))
    }
}

/// What a successful generation produced
#[derive(Debug)]
pub struct DiagramReport {
    pub image_path: PathBuf,
    pub dot_path: Option<PathBuf>,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Generate a diagram from YAML text.
///
/// The image file is written only after the backend has produced bytes,
/// so parse, availability, and render failures leave the filesystem
/// untouched. A failed sidecar write removes the image again.
pub fn generate(
    yaml: &str,
    options: &DiagramOptions,
    backend: &dyn RenderBackend,
) -> Result<DiagramReport> {
    let spec = PipelineSpec::from_yaml(yaml)?;
    let graph = ModuleGraph::from_spec(&spec);
    tracing::debug!(
        modules = graph.node_count(),
        edges = graph.edge_count(),
        skipped = graph.dropped().len(),
        "graph built"
    );

    let dot = dot_source(&graph);

    if !backend.is_available() {
        return Err(PipevizError::BackendUnavailable {
            backend: backend.name().to_string(),
        });
    }

    let image_bytes = backend.render(&dot, options.format)?;

    let image_path = options.image_path();
    fs::write(&image_path, &image_bytes)?;

    let dot_path = if options.save_dot {
        let path = options.dot_path();
        // A sidecar failure must not leave the image behind
        if let Err(err) = fs::write(&path, dot.as_bytes()) {
            let _ = fs::remove_file(&image_path);
            return Err(err.into());
        }
        Some(path)
    } else {
        None
    };
    tracing::info!(path = %image_path.display(), "diagram written");

    Ok(DiagramReport {
        image_path,
        dot_path,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
    })
}

/// Read a configuration file and generate its diagram.
pub fn generate_from_file(
    path: &Path,
    options: &DiagramOptions,
    backend: &dyn RenderBackend,
) -> Result<DiagramReport> {
    if !path.exists() {
        return Err(PipevizError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    let yaml = fs::read_to_string(path)?;
    generate(&yaml, options, backend)
}
