//! Error types with fix suggestions
//!
//! Error code ranges:
//! - PIPEVIZ-001-009: Config and report errors
//! - PIPEVIZ-010-019: Graph and validation errors
//! - PIPEVIZ-020-029: Render errors
//! - PIPEVIZ-030-039: Scaffold/discovery errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipevizError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
/// Some variants are only constructed in library code/tests.
#[derive(Error, Debug)]
pub enum PipevizError {
    // ─────────────────────────────────────────────────────────────
    // Config errors (PIPEVIZ-001 to PIPEVIZ-004)
    // ─────────────────────────────────────────────────────────────
    #[error("[PIPEVIZ-001] Failed to parse pipeline config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("[PIPEVIZ-002] Pipeline config not found: {path}")]
    ConfigNotFound { path: String },

    #[error("[PIPEVIZ-003] IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[PIPEVIZ-004] Failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Graph errors (PIPEVIZ-010 to PIPEVIZ-011)
    // ─────────────────────────────────────────────────────────────
    #[error("[PIPEVIZ-010] Pipeline contains a dependency cycle involving: {modules}")]
    CycleDetected { modules: String },

    #[error("[PIPEVIZ-011] Validation failed with {count} error(s)")]
    ValidationFailed { count: usize },

    // ─────────────────────────────────────────────────────────────
    // Render errors (PIPEVIZ-020 to PIPEVIZ-023)
    // ─────────────────────────────────────────────────────────────
    #[error("[PIPEVIZ-020] Rendering backend '{backend}' is not available")]
    BackendUnavailable { backend: String },

    #[error("[PIPEVIZ-021] Rendering failed: {details}")]
    RenderFailed { details: String },

    #[error("[PIPEVIZ-022] Unknown rendering backend: {name}")]
    UnknownBackend { name: String },

    #[error("[PIPEVIZ-023] Unknown output format: {format}")]
    UnknownFormat { format: String },

    // ─────────────────────────────────────────────────────────────
    // Scaffold/discovery errors (PIPEVIZ-030 to PIPEVIZ-031)
    // ─────────────────────────────────────────────────────────────
    #[error("[PIPEVIZ-030] File already exists: {path}")]
    AlreadyExists { path: String },

    #[error("[PIPEVIZ-031] No pipeline configs found in: {path}")]
    NoConfigsFound { path: String },
}

impl FixSuggestion for PipevizError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PipevizError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            PipevizError::ConfigNotFound { .. } => Some("Check the file path exists"),
            PipevizError::Io(_) => Some("Check file path and permissions"),
            PipevizError::Json(_) => None,
            PipevizError::CycleDetected { .. } => {
                Some("Break the cycle by removing one of the listed source references")
            }
            PipevizError::ValidationFailed { .. } => {
                Some("Run 'pipeviz validate --strict <config>' for the full diagnostic list")
            }
            PipevizError::BackendUnavailable { .. } => Some(
                "Install Graphviz and ensure 'dot' is on your PATH \
                 (https://graphviz.org/download/)",
            ),
            PipevizError::RenderFailed { .. } => {
                Some("Run with RUST_LOG=debug to see the backend invocation")
            }
            PipevizError::UnknownBackend { .. } => {
                Some("Supported backends: graphviz (alias: dot)")
            }
            PipevizError::UnknownFormat { .. } => {
                Some("Supported formats: png, svg, pdf, jpg, jpeg")
            }
            PipevizError::AlreadyExists { .. } => {
                Some("Remove the existing file or scaffold into a different directory")
            }
            PipevizError::NoConfigsFound { .. } => {
                Some("Check the directory contains .yaml or .yml pipeline configs")
            }
        }
    }
}
