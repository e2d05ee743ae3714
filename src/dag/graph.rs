//! Module graph built from pipeline input references

use std::collections::HashSet;

use crate::ast::PipelineSpec;

/// A graph node (one per configured module)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Module name, unique within the configuration
    pub id: String,
    /// Three-line display label: name, (type), Device: ...
    pub label: String,
}

/// A directed edge from a producing module to a consuming module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    /// Name of the output being consumed (the part of the source
    /// reference after the first '.')
    pub label: String,
}

/// Why an input reference produced no edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Source did not split into two non-empty parts around the first '.'
    MalformedSource,
    /// Source names a module absent from the configuration
    UnknownModule,
}

/// Record of an input reference skipped during graph building
#[derive(Debug, Clone)]
pub struct DroppedInput {
    pub module: String,
    pub input: String,
    pub source: String,
    pub reason: DropReason,
}

/// Directed multigraph derived from `pipeline_modules`.
///
/// Construction is total: anything that cannot become an edge is recorded
/// in `dropped` instead of failing the build. Self-loops and parallel
/// edges are kept as written. Immutable after construction.
#[derive(Debug)]
pub struct ModuleGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    dropped: Vec<DroppedInput>,
}

impl ModuleGraph {
    pub fn from_spec(spec: &PipelineSpec) -> Self {
        // Membership is checked against the full module set, so a source
        // may reference a module declared later in the document.
        let module_names: HashSet<&str> =
            spec.pipeline_modules.iter().map(|(name, _)| name).collect();

        let mut nodes = Vec::with_capacity(spec.pipeline_modules.len());
        let mut edges = Vec::new();
        let mut dropped = Vec::new();

        for (name, module) in spec.pipeline_modules.iter() {
            nodes.push(GraphNode {
                id: name.to_string(),
                label: format!(
                    "{}\n({})\nDevice: {}",
                    name,
                    module.type_label(),
                    module.device_label()
                ),
            });

            for input in &module.inputs {
                let Some(source) = input.source.as_deref().filter(|s| !s.is_empty()) else {
                    continue; // unwired input, not a reference
                };
                let input_name = input.name.as_deref().unwrap_or("");

                let Some((source_module, source_output)) = split_source(source) else {
                    tracing::debug!(module = name, source, "skipping malformed source reference");
                    dropped.push(DroppedInput {
                        module: name.to_string(),
                        input: input_name.to_string(),
                        source: source.to_string(),
                        reason: DropReason::MalformedSource,
                    });
                    continue;
                };

                if !module_names.contains(source_module) {
                    tracing::debug!(module = name, source, "skipping reference to unknown module");
                    dropped.push(DroppedInput {
                        module: name.to_string(),
                        input: input_name.to_string(),
                        source: source.to_string(),
                        reason: DropReason::UnknownModule,
                    });
                    continue;
                }

                edges.push(GraphEdge {
                    from: source_module.to_string(),
                    to: name.to_string(),
                    label: source_output.to_string(),
                });
            }
        }

        Self { nodes, edges, dropped }
    }

    /// Nodes in configuration order
    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in configuration order (parallel edges not deduplicated)
    #[inline]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Input references that were skipped, in configuration order
    #[inline]
    pub fn dropped(&self) -> &[DroppedInput] {
        &self.dropped
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Split `module.output` on the FIRST dot; both halves must be non-empty.
fn split_source(source: &str) -> Option<(&str, &str)> {
    let (module, output) = source.split_once('.')?;
    if module.is_empty() || output.is_empty() {
        return None;
    }
    Some((module, output))
}
