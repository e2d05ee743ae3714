//! Execution-order computation over the module graph

use std::collections::{HashMap, HashSet};

use crate::dag::ModuleGraph;
use crate::error::{PipevizError, Result};

/// Topological order via Kahn's algorithm.
///
/// Parallel edges count once. Ties keep configuration order, so the
/// result is deterministic. A cycle (self-loops included) yields
/// `CycleDetected` naming the modules that could not be ordered.
///
/// Rendering never calls this; only `inspect` and strict validation do.
pub fn topological_order(graph: &ModuleGraph) -> Result<Vec<String>> {
    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    // Edge endpoints come from the same configuration as the nodes,
    // so the index lookups cannot miss.
    let mut unique_edges: HashSet<(usize, usize)> = HashSet::new();
    for edge in graph.edges() {
        unique_edges.insert((index[edge.from.as_str()], index[edge.to.as_str()]));
    }

    let mut in_degree = vec![0usize; ids.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
    for &(from, to) in &unique_edges {
        in_degree[to] += 1;
        successors[from].push(to);
    }

    let mut order = Vec::with_capacity(ids.len());
    let mut emitted = vec![false; ids.len()];
    while let Some(next) = (0..ids.len()).find(|&i| !emitted[i] && in_degree[i] == 0) {
        emitted[next] = true;
        order.push(ids[next].to_string());
        for &successor in &successors[next] {
            in_degree[successor] -= 1;
        }
    }

    if order.len() < ids.len() {
        let stuck: Vec<&str> = (0..ids.len()).filter(|&i| !emitted[i]).map(|i| ids[i]).collect();
        return Err(PipevizError::CycleDetected {
            modules: stuck.join(", "),
        });
    }
    Ok(order)
}
