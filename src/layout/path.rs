use super::types::{SankeyLayout, SankeyLink};

pub const DEFAULT_CURVATURE: f32 = 0.5;

/// Cubic curve along the middle of a link, from the right edge of its source
/// to the left edge of its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPath {
    pub start: (f32, f32),
    pub control_start: (f32, f32),
    pub control_end: (f32, f32),
    pub end: (f32, f32),
}

impl LinkPath {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M{:.2},{:.2}C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            self.start.0,
            self.start.1,
            self.control_start.0,
            self.control_start.1,
            self.control_end.0,
            self.control_end.1,
            self.end.0,
            self.end.1
        )
    }
}

pub fn link_path(layout: &SankeyLayout, link: &SankeyLink, curvature: f32) -> LinkPath {
    let source = &layout.nodes[link.source.0];
    let target = &layout.nodes[link.target.0];
    let x0 = source.x + source.width;
    let x1 = target.x;
    let lerp = |t: f32| x0 + (x1 - x0) * t;
    let y0 = source.y + link.source_offset + link.thickness / 2.0;
    let y1 = target.y + link.target_offset + link.thickness / 2.0;
    LinkPath {
        start: (x0, y0),
        control_start: (lerp(curvature), y0),
        control_end: (lerp(1.0 - curvature), y1),
        end: (x1, y1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Endpoint, Graph};
    use crate::layout::compute_layout;

    #[test]
    fn path_runs_between_facing_node_edges() {
        let mut graph = Graph::new();
        graph.ensure_node("a", None);
        graph.ensure_node("b", None);
        graph.add_link(Endpoint::index(0), Endpoint::index(1), 4.0);
        let config = LayoutConfig::basic().with_size(124.0, 80.0);
        let layout = compute_layout(&graph, &config).unwrap();

        let path = link_path(&layout, &layout.links[0], DEFAULT_CURVATURE);
        assert_eq!(path.start, (24.0, 40.0));
        assert_eq!(path.end, (100.0, 40.0));
        assert_eq!(path.control_start.0, 62.0);
        assert_eq!(path.control_end.0, 62.0);
        assert_eq!(
            path.to_svg_path(),
            "M24.00,40.00C62.00,40.00 62.00,40.00 100.00,40.00"
        );
    }
}
