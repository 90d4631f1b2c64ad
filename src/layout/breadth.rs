use std::collections::VecDeque;

use super::error::LayoutError;
use super::types::{NodeId, SankeyLink, SankeyNode};

/// Rejects graphs whose links form a cycle (self loops included).
///
/// Frontier leveling never terminates on a cycle, so this runs first.
pub(super) fn ensure_acyclic(nodes: &[SankeyNode], links: &[SankeyLink]) -> Result<(), LayoutError> {
    let mut indegree: Vec<usize> = nodes.iter().map(|node| node.target_links.len()).collect();
    let mut queue: VecDeque<usize> = indegree
        .iter()
        .enumerate()
        .filter_map(|(idx, deg)| (*deg == 0).then_some(idx))
        .collect();
    let mut visited = 0usize;
    while let Some(node_idx) = queue.pop_front() {
        visited += 1;
        for link_id in &nodes[node_idx].source_links {
            let to_idx = links[link_id.0].target.0;
            indegree[to_idx] -= 1;
            if indegree[to_idx] == 0 {
                queue.push_back(to_idx);
            }
        }
    }
    if visited == nodes.len() {
        return Ok(());
    }
    // Everything left with a positive indegree is on, or downstream of, a cycle.
    // Walk backwards along unresolved incoming links until a node repeats.
    let start = indegree
        .iter()
        .position(|deg| *deg > 0)
        .unwrap_or_default();
    let mut seen = vec![false; nodes.len()];
    let mut current = start;
    while !seen[current] {
        seen[current] = true;
        let Some(prev) = nodes[current]
            .target_links
            .iter()
            .map(|link_id| links[link_id.0].source.0)
            .find(|src| indegree[*src] > 0)
        else {
            break;
        };
        current = prev;
    }
    Err(LayoutError::CyclicGraph {
        node: nodes[current].id.clone(),
    })
}

/// Assigns column indices and horizontal pixel positions, returning the nodes
/// grouped by column (leftmost first, input order within a column).
///
/// Every node starts in the first frontier; each round the frontier is
/// replaced by the distinct targets of its outgoing links, so a node ends up
/// at the length of the longest path reaching it. Nodes without outgoing
/// links are then moved to the last column.
pub(super) fn compute_node_breadths(
    nodes: &mut [SankeyNode],
    links: &[SankeyLink],
    width: f32,
    node_width: f32,
) -> Vec<Vec<NodeId>> {
    let mut frontier: Vec<usize> = (0..nodes.len()).collect();
    let mut queued_in = vec![usize::MAX; nodes.len()];
    let mut levels = 0usize;

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &node_idx in &frontier {
            nodes[node_idx].breadth = levels;
            nodes[node_idx].width = node_width;
            for link_id in &nodes[node_idx].source_links {
                let to_idx = links[link_id.0].target.0;
                if queued_in[to_idx] != levels {
                    queued_in[to_idx] = levels;
                    next.push(to_idx);
                }
            }
        }
        frontier = next;
        levels += 1;
    }

    move_sinks_right(nodes, levels);

    let kx = if levels > 1 {
        (width - node_width) / (levels - 1) as f32
    } else {
        0.0
    };
    for node in nodes.iter_mut() {
        node.x = node.breadth as f32 * kx;
    }
    log::debug!("leveled {} nodes into {} columns", nodes.len(), levels);

    group_by_breadth(nodes, levels)
}

fn move_sinks_right(nodes: &mut [SankeyNode], levels: usize) {
    let last = levels.saturating_sub(1);
    for node in nodes.iter_mut() {
        if node.source_links.is_empty() {
            node.breadth = last;
        }
    }
}

fn group_by_breadth(nodes: &[SankeyNode], levels: usize) -> Vec<Vec<NodeId>> {
    let mut columns: Vec<Vec<NodeId>> = vec![Vec::new(); levels];
    for (idx, node) in nodes.iter().enumerate() {
        columns[node.breadth].push(NodeId(idx));
    }
    columns.retain(|column| !column.is_empty());
    columns
}
