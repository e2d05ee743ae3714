//! AST Module - parsed pipeline configuration
//!
//! Contains parsed Rust types from YAML pipeline definitions:
//! - `pipeline`: PipelineSpec, GlobalContext, ModuleMap
//! - `module`: ModuleSpec, InputPort, OutputPort
//! - `module_type`: ModuleType registry
//!
//! These types represent the "what" - static structure parsed from YAML.
//! For the derived graph, see the `dag` module.

mod module;
mod module_type;
mod pipeline;

// Re-export all public types
pub use module::{InputPort, ModuleSpec, OutputPort};
pub use module_type::ModuleType;
pub use pipeline::{GlobalContext, ModuleMap, PipelineSpec};
