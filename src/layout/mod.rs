mod breadth;
mod depth;
pub mod error;
mod link_depth;
pub mod path;
pub mod relax;
mod topology;
mod values;
pub(crate) mod types;
pub use error::{LayoutError, LinkEnd};
pub use path::{LinkPath, link_path};
pub use types::*;
use breadth::*;
use depth::*;
use link_depth::*;
use relax::*;
use topology::*;
use values::*;

use crate::config::{LayoutConfig, Strategy};
use crate::ir::Graph;

/// Vertical placement step of the pipeline. Everything else (topology,
/// values, breadths, link depths) is shared between strategies.
pub trait DepthStrategy {
    /// Positions nodes inside `layout.columns`. Heights, thicknesses and
    /// seed positions are already set when this runs.
    fn position_nodes(&self, layout: &mut SankeyLayout);
}

/// One packing pass per column followed by vertical centering.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPacker;

impl DepthStrategy for BasicPacker {
    fn position_nodes(&self, layout: &mut SankeyLayout) {
        pack_and_center(
            &mut layout.nodes,
            &mut layout.columns,
            layout.height,
            layout.node_padding,
        );
    }
}

/// Barycenter relaxation; zero iterations leaves a packed, uncentered layout.
#[derive(Debug, Clone, Copy)]
pub struct Relaxation {
    pub iterations: usize,
}

impl Default for Relaxation {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl DepthStrategy for Relaxation {
    fn position_nodes(&self, layout: &mut SankeyLayout) {
        let SankeyLayout {
            nodes,
            links,
            columns,
            height,
            node_padding,
            ..
        } = layout;
        relax_node_depths(nodes, links, columns, *height, *node_padding, self.iterations);
    }
}

/// Lays out `graph` with the strategy named in `config`.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Result<SankeyLayout, LayoutError> {
    match config.strategy {
        Strategy::Basic => compute_layout_with(graph, config, &BasicPacker),
        Strategy::Optimized => compute_layout_with(
            graph,
            config,
            &Relaxation {
                iterations: config.iterations,
            },
        ),
    }
}

/// Runs the full pipeline with an explicit vertical placement strategy.
///
/// The graph must be acyclic; cycles are reported as
/// [`LayoutError::CyclicGraph`] before any geometry is computed.
pub fn compute_layout_with(
    graph: &Graph,
    config: &LayoutConfig,
    strategy: &dyn DepthStrategy,
) -> Result<SankeyLayout, LayoutError> {
    config.validate()?;

    let (mut nodes, mut links) = build_topology(graph)?;
    compute_node_values(&mut nodes, &links);
    ensure_acyclic(&nodes, &links)?;
    let columns = compute_node_breadths(&mut nodes, &links, config.width, config.node_width);
    if columns.len() > 1 && config.node_width >= config.width {
        return Err(LayoutError::InvalidConfig(format!(
            "node width {} leaves no room for {} columns on a canvas {} wide",
            config.node_width,
            columns.len(),
            config.width
        )));
    }
    let scale = compute_value_scale(&nodes, &columns, config.height, config.node_padding)?;
    initialize_node_depths(&mut nodes, &mut links, &columns, scale);

    let mut layout = SankeyLayout {
        width: config.width,
        height: config.height,
        node_width: config.node_width,
        node_padding: config.node_padding,
        scale,
        nodes,
        links,
        columns,
    };
    strategy.position_nodes(&mut layout);
    compute_link_depths(&mut layout.nodes, &mut layout.links);
    Ok(layout)
}

impl SankeyLayout {
    /// Recomputes link offsets after node tops were changed externally.
    ///
    /// Breadths, values and heights are left as they are; no collision or
    /// bounds check runs.
    pub fn relayout(&mut self) -> Vec<LinkOffsets> {
        compute_link_depths(&mut self.nodes, &mut self.links);
        self.link_offsets()
    }

    /// Sets a node's top edge as given and recomputes link offsets.
    pub fn move_node(&mut self, id: NodeId, y: f32) -> Result<Vec<LinkOffsets>, LayoutError> {
        self.move_nodes(&[(id, y)])
    }

    /// Moves several nodes, then recomputes link offsets once.
    pub fn move_nodes(&mut self, moves: &[(NodeId, f32)]) -> Result<Vec<LinkOffsets>, LayoutError> {
        if let Some((id, _)) = moves.iter().find(|(id, _)| id.0 >= self.nodes.len()) {
            return Err(LayoutError::UnknownNode(*id));
        }
        for (id, y) in moves {
            self.nodes[id.0].y = *y;
        }
        Ok(self.relayout())
    }

    /// Like [`SankeyLayout::move_node`] but keeps the node on the canvas.
    pub fn drag_node(&mut self, id: NodeId, y: f32) -> Result<Vec<LinkOffsets>, LayoutError> {
        let node = self.node(id).ok_or(LayoutError::UnknownNode(id))?;
        let max_y = (self.height - node.height).max(0.0);
        self.move_node(id, y.clamp(0.0, max_y))
    }
}
