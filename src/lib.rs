//! Pipeviz - DAG visualizer for module pipeline configurations

pub mod ast;
pub mod dag;
pub mod diagram;
pub mod error;
pub mod init;
pub mod render;

pub use ast::{GlobalContext, InputPort, ModuleMap, ModuleSpec, ModuleType, OutputPort, PipelineSpec};
pub use dag::{Diagnostic, DropReason, DroppedInput, ModuleGraph, Severity, ValidationReport};
pub use diagram::{generate, generate_from_file, DiagramOptions, DiagramReport};
pub use error::{FixSuggestion, PipevizError, Result};
pub use render::{create_backend, dot_source, GraphvizBackend, ImageFormat, MockBackend, RenderBackend};
