//! DAG Module - directed graph derived from a pipeline configuration
//!
//! Contains the graph representation and diagnostics:
//! - `graph`: ModuleGraph built from module input references
//! - `sort`: execution-order computation (Kahn's algorithm)
//! - `validate`: diagnostic sweep for the validate command
//!
//! The graph is a multigraph: self-loops and parallel edges are kept as
//! written. ModuleGraph is immutable after construction.

mod graph;
mod sort;
mod validate;

// Re-export public types
pub use graph::{DropReason, DroppedInput, GraphEdge, GraphNode, ModuleGraph};
pub use sort::topological_order;
pub use validate::{collect_diagnostics, validate_spec, Diagnostic, Severity, ValidationReport};
