//! DOT source generation for module graphs

use std::collections::{HashMap, HashSet};

use crate::dag::ModuleGraph;

/// Emit deterministic DOT source for a module graph.
///
/// Nodes and edges appear in configuration order, so identical configs
/// produce byte-identical DOT. Node ids are sanitized for the DOT grammar
/// and uniqued on collision; display text lives in the label attribute.
pub fn dot_source(graph: &ModuleGraph) -> String {
    let ids = assign_ids(graph);

    let mut out = String::new();
    out.push_str("digraph pipeline {\n");
    out.push_str("    rankdir=TB;\n");
    out.push_str("    splines=spline;\n");
    out.push_str("    bgcolor=\"white\";\n");
    out.push_str(
        "    node [shape=box, style=filled, fillcolor=\"#E0F7FA\", \
         color=\"#00BCD4\", fontname=\"Helvetica\"];\n",
    );
    out.push_str("    edge [color=\"#00BCD4\", fontname=\"Helvetica\"];\n");
    out.push('\n');

    for node in graph.nodes() {
        out.push_str(&format!(
            "    {} [label=\"{}\"];\n",
            ids[node.id.as_str()],
            escape_label(&node.label)
        ));
    }

    if !graph.edges().is_empty() {
        out.push('\n');
    }
    for edge in graph.edges() {
        out.push_str(&format!(
            "    {} -> {} [label=\"{}\"];\n",
            ids[edge.from.as_str()],
            ids[edge.to.as_str()],
            escape_label(&edge.label)
        ));
    }

    out.push_str("}\n");
    out
}

/// Map each module name to a unique DOT-safe id.
///
/// Distinct names can sanitize to the same id ("a.b" and "a_b"), so
/// collisions get a numeric suffix.
fn assign_ids(graph: &ModuleGraph) -> HashMap<&str, String> {
    let mut ids: HashMap<&str, String> = HashMap::with_capacity(graph.node_count());
    let mut used: HashSet<String> = HashSet::with_capacity(graph.node_count());

    for node in graph.nodes() {
        let base = sanitize_id(&node.id);
        let mut candidate = base.clone();
        let mut counter = 2;
        while !used.insert(candidate.clone()) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        ids.insert(node.id.as_str(), candidate);
    }
    ids
}

/// Keep alphanumerics and '_', replace everything else; ids cannot start
/// with a digit or be empty.
fn sanitize_id(name: &str) -> String {
    let mut id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// Escape a string for use inside a double-quoted DOT attribute
fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
