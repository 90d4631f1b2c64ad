use super::depth::push_overlaps_down;
use super::types::{LinkId, NodeId, SankeyLink, SankeyNode};

pub const DEFAULT_ITERATIONS: usize = 32;
const ALPHA_DECAY: f32 = 0.99;

/// Iterative barycenter relaxation.
///
/// Each iteration pulls nodes toward the value-weighted centre of their
/// targets (right to left) and then of their sources (left to right), with
/// collisions resolved after every pass.
pub(super) fn relax_node_depths(
    nodes: &mut [SankeyNode],
    links: &[SankeyLink],
    columns: &mut [Vec<NodeId>],
    height: f32,
    padding: f32,
    iterations: usize,
) {
    resolve_collisions(nodes, columns, height, padding);
    let mut alpha = 1.0f32;
    for _ in 0..iterations {
        alpha *= ALPHA_DECAY;
        relax_right_to_left(nodes, links, columns, alpha);
        resolve_collisions(nodes, columns, height, padding);
        relax_left_to_right(nodes, links, columns, alpha);
        resolve_collisions(nodes, columns, height, padding);
    }
    log::debug!("relaxed {} columns over {iterations} iterations", columns.len());
}

/// Pushes overlapping nodes down, then back up if the column overflows the
/// canvas.
pub(super) fn resolve_collisions(
    nodes: &mut [SankeyNode],
    columns: &mut [Vec<NodeId>],
    height: f32,
    padding: f32,
) {
    for column in columns.iter_mut() {
        let y0 = push_overlaps_down(nodes, column, padding);
        let overflow = y0 - padding - height;
        let Some((last, rest)) = column.split_last() else {
            continue;
        };
        if overflow <= 0.0 {
            continue;
        }
        nodes[last.0].y -= overflow;
        let mut y0 = nodes[last.0].y;
        for id in rest.iter().rev() {
            let node = &mut nodes[id.0];
            let dy = node.bottom() + padding - y0;
            if dy > 0.0 {
                node.y -= dy;
            }
            y0 = node.y;
        }
    }
}

fn relax_right_to_left(
    nodes: &mut [SankeyNode],
    links: &[SankeyLink],
    columns: &[Vec<NodeId>],
    alpha: f32,
) {
    for column in columns.iter().rev() {
        for id in column {
            let target =
                weighted_center(nodes, links, &nodes[id.0].source_links, |link| link.target);
            if let Some(y) = target {
                let node = &mut nodes[id.0];
                node.y += (y - node.center()) * alpha;
            }
        }
    }
}

fn relax_left_to_right(
    nodes: &mut [SankeyNode],
    links: &[SankeyLink],
    columns: &[Vec<NodeId>],
    alpha: f32,
) {
    for column in columns {
        for id in column {
            let source =
                weighted_center(nodes, links, &nodes[id.0].target_links, |link| link.source);
            if let Some(y) = source {
                let node = &mut nodes[id.0];
                node.y += (y - node.center()) * alpha;
            }
        }
    }
}

/// Value-weighted mean centre of the nodes at the far end of `link_ids`.
/// `None` when there are no links or they carry no value.
fn weighted_center(
    nodes: &[SankeyNode],
    links: &[SankeyLink],
    link_ids: &[LinkId],
    far_end: impl Fn(&SankeyLink) -> NodeId,
) -> Option<f32> {
    let mut weighted = 0.0f32;
    let mut total = 0.0f32;
    for link_id in link_ids {
        let link = &links[link_id.0];
        weighted += nodes[far_end(link).0].center() * link.value;
        total += link.value;
    }
    (total > 0.0).then(|| weighted / total)
}
