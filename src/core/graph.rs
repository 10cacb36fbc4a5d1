//! Structural validation of the failure/escalation graph.
//!
//! A contract's failure graph is a directed graph whose nodes carry a policy
//! action. The validator checks the structural invariants a well-formed
//! policy must satisfy: unique node ids, resolvable edge endpoints, bounded
//! retry counts, at least one termination node, termination nodes without
//! outgoing edges, and cycle freedom. All checks run in one pass so a caller
//! gets the full diagnostic set; only cycle detection is skipped when an edge
//! points at a missing node, since traversal over a broken edge relation
//! would emit spurious noise.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

pub const MAX_RETRIES_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub action: String,
    #[serde(default)]
    pub max_retries: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureGraph {
    #[serde(default)]
    pub nodes: Vec<FailureNode>,
    #[serde(default)]
    pub edges: Vec<FailureEdge>,
}

/// Validate every structural invariant of the failure graph.
///
/// Never fails; an empty list means the graph is well-formed.
pub fn validate_failure_graph(graph: &FailureGraph) -> Vec<String> {
    let mut errors = Vec::new();

    // Node id uniqueness; duplicates reported once each.
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates: Vec<&str> = Vec::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id.as_str()) {
            duplicates.push(node.id.as_str());
        }
    }
    if !duplicates.is_empty() {
        errors.push(format!(
            "Duplicate node IDs found: {}",
            duplicates.join(", ")
        ));
    }

    // Edge referential integrity.
    let node_ids: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut referential_error = false;
    for (i, edge) in graph.edges.iter().enumerate() {
        if !node_ids.contains(edge.from.as_str()) {
            errors.push(format!(
                "Edge {}: 'from' node '{}' does not exist",
                i, edge.from
            ));
            referential_error = true;
        }
        if !node_ids.contains(edge.to.as_str()) {
            errors.push(format!("Edge {}: 'to' node '{}' does not exist", i, edge.to));
            referential_error = true;
        }
    }

    // Termination nodes must not escalate further.
    let termination_nodes: FxHashSet<&str> = graph
        .nodes
        .iter()
        .filter(|n| n.action == "terminate")
        .map(|n| n.id.as_str())
        .collect();
    for edge in &graph.edges {
        if termination_nodes.contains(edge.from.as_str()) {
            errors.push(format!(
                "Termination node '{}' has outgoing edge to '{}' (termination nodes cannot escalate)",
                edge.from, edge.to
            ));
        }
    }

    // Retry bounds, both checked independently.
    for node in &graph.nodes {
        if let Some(max_retries) = node.max_retries {
            if max_retries < 0 {
                errors.push(format!("Node '{}': max_retries must be >= 0", node.id));
            }
            if max_retries > MAX_RETRIES_LIMIT {
                errors.push(format!(
                    "Node '{}': max_retries must be <= {}",
                    node.id, MAX_RETRIES_LIMIT
                ));
            }
        }
    }

    if termination_nodes.is_empty() {
        errors.push("Failure graph must contain at least one termination node".to_string());
    }

    // Cycle detection is meaningless over dangling edges.
    if !referential_error {
        errors.extend(detect_cycles(graph));
    }

    errors
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Iterative depth-first search with explicit white/gray/black coloring.
///
/// Nodes live in an index arena; the traversal keeps an explicit frame stack
/// (node index plus next-neighbor cursor) and the current gray path, so no
/// recursion depth limit applies. Hitting a gray neighbor closes a cycle; the
/// diagnostic carries the actual node sequence from the point the cycle
/// closes back to itself, including the repeated closing node. A self-loop is
/// a cycle of length one.
fn detect_cycles(graph: &FailureGraph) -> Vec<String> {
    let index_of: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    for edge in &graph.edges {
        // Endpoints are known to resolve; referential errors suppress this pass.
        if let (Some(&from), Some(&to)) = (
            index_of.get(edge.from.as_str()),
            index_of.get(edge.to.as_str()),
        ) {
            adjacency[from].push(to);
        }
    }

    let mut colors = vec![Color::White; graph.nodes.len()];
    let mut errors = Vec::new();

    for start in 0..graph.nodes.len() {
        if colors[start] != Color::White {
            continue;
        }

        // Frame: (node, index of next neighbor to visit).
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        let mut path: Vec<usize> = vec![start];
        colors[start] = Color::Gray;

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if frame.1 >= adjacency[node].len() {
                colors[node] = Color::Black;
                stack.pop();
                path.pop();
                continue;
            }
            let neighbor = adjacency[node][frame.1];
            frame.1 += 1;

            match colors[neighbor] {
                Color::Gray => {
                    let closing = path
                        .iter()
                        .position(|&n| n == neighbor)
                        .unwrap_or(path.len() - 1);
                    let mut cycle: Vec<&str> = path[closing..]
                        .iter()
                        .map(|&n| graph.nodes[n].id.as_str())
                        .collect();
                    cycle.push(graph.nodes[neighbor].id.as_str());
                    errors.push(format!(
                        "Cycle detected in failure graph: {}",
                        cycle.join(" -> ")
                    ));
                }
                Color::White => {
                    colors[neighbor] = Color::Gray;
                    stack.push((neighbor, 0));
                    path.push(neighbor);
                }
                Color::Black => {}
            }
        }
    }

    errors
}
