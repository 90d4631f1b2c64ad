use super::error::LayoutError;
use super::types::{NodeId, SankeyLink, SankeyNode};

/// Share of the padding reserved between nodes when deriving the scale.
const PADDING_RESERVE: f32 = 1.1;

/// Value to pixel factor, bounded by the most crowded column.
///
/// Columns carrying no value impose no bound. When no column carries value
/// the factor is 0, which leaves every height at 0.
pub(super) fn compute_value_scale(
    nodes: &[SankeyNode],
    columns: &[Vec<NodeId>],
    height: f32,
    padding: f32,
) -> Result<f32, LayoutError> {
    let mut scale: Option<(usize, f32)> = None;
    for (column_idx, column) in columns.iter().enumerate() {
        let total: f32 = column.iter().map(|id| nodes[id.0].value).sum();
        if total <= 0.0 {
            continue;
        }
        let gaps = column.len().saturating_sub(1) as f32;
        let candidate = (height - gaps * PADDING_RESERVE * padding) / total;
        if scale.is_none_or(|(_, best)| candidate < best) {
            scale = Some((column_idx, candidate));
        }
    }

    let Some((column, scale)) = scale else {
        return Ok(0.0);
    };
    if !scale.is_finite() || scale < 0.0 {
        return Err(LayoutError::DegenerateScale { column, scale });
    }
    log::debug!("value scale {scale} bounded by column {column}");
    Ok(scale)
}

/// Seeds each node's top with its index in the column and sizes nodes and
/// links with the shared scale.
pub(super) fn initialize_node_depths(
    nodes: &mut [SankeyNode],
    links: &mut [SankeyLink],
    columns: &[Vec<NodeId>],
    scale: f32,
) {
    for column in columns {
        for (idx, id) in column.iter().enumerate() {
            let node = &mut nodes[id.0];
            node.y = idx as f32;
            node.height = node.value * scale;
        }
    }
    for link in links.iter_mut() {
        link.thickness = link.value * scale;
    }
}

/// Sorts the column by top edge and pushes overlapping nodes down.
///
/// Returns the running bottom edge, which includes one trailing padding.
pub(super) fn push_overlaps_down(nodes: &mut [SankeyNode], column: &mut [NodeId], padding: f32) -> f32 {
    column.sort_by(|a, b| nodes[a.0].y.total_cmp(&nodes[b.0].y));
    let mut y0 = 0.0f32;
    for id in column.iter() {
        let node = &mut nodes[id.0];
        let dy = y0 - node.y;
        if dy > 0.0 {
            node.y += dy;
        }
        y0 = node.bottom() + padding;
    }
    y0
}

/// Packs each column top-down, then centers it vertically as one block.
pub(super) fn pack_and_center(
    nodes: &mut [SankeyNode],
    columns: &mut [Vec<NodeId>],
    height: f32,
    padding: f32,
) {
    for column in columns.iter_mut() {
        let y0 = push_overlaps_down(nodes, column, padding);
        let offset = (height - (y0 - padding)) / 2.0;
        for id in column.iter() {
            nodes[id.0].y += offset;
        }
    }
}
