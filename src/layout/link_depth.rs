use super::types::{SankeyLink, SankeyNode};

/// Orders links at each node by the centre of their far endpoint and stacks
/// their thicknesses top to bottom.
///
/// Sorting is stable, so links whose far endpoints share a centre keep their
/// previous relative order.
pub(super) fn compute_link_depths(nodes: &mut [SankeyNode], links: &mut [SankeyLink]) {
    let centers: Vec<f32> = nodes.iter().map(SankeyNode::center).collect();
    for node in nodes.iter_mut() {
        node.source_links
            .sort_by(|a, b| centers[links[a.0].target.0].total_cmp(&centers[links[b.0].target.0]));
        node.target_links
            .sort_by(|a, b| centers[links[a.0].source.0].total_cmp(&centers[links[b.0].source.0]));
    }
    for node in nodes.iter() {
        let mut sy = 0.0f32;
        for id in &node.source_links {
            let link = &mut links[id.0];
            link.source_offset = sy;
            sy += link.thickness;
        }
        let mut ty = 0.0f32;
        for id in &node.target_links {
            let link = &mut links[id.0];
            link.target_offset = ty;
            ty += link.thickness;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{LinkId, NodeId};

    fn node(y: f32, height: f32) -> SankeyNode {
        SankeyNode {
            id: String::new(),
            label: String::new(),
            declared_value: None,
            value: 0.0,
            breadth: 0,
            x: 0.0,
            y,
            width: 0.0,
            height,
            source_links: Vec::new(),
            target_links: Vec::new(),
        }
    }

    fn link(source: usize, target: usize, thickness: f32) -> SankeyLink {
        SankeyLink {
            source: NodeId(source),
            target: NodeId(target),
            value: thickness,
            thickness,
            source_offset: 0.0,
            target_offset: 0.0,
        }
    }

    #[test]
    fn stacks_outgoing_links_by_target_position() {
        // hub fans out to a low node (link 0) and a high node (link 1)
        let mut nodes = vec![node(0.0, 30.0), node(60.0, 10.0), node(0.0, 20.0)];
        nodes[0].source_links = vec![LinkId(0), LinkId(1)];
        nodes[1].target_links = vec![LinkId(0)];
        nodes[2].target_links = vec![LinkId(1)];
        let mut links = vec![link(0, 1, 10.0), link(0, 2, 20.0)];

        compute_link_depths(&mut nodes, &mut links);

        assert_eq!(nodes[0].source_links, vec![LinkId(1), LinkId(0)]);
        assert_eq!(links[1].source_offset, 0.0);
        assert_eq!(links[0].source_offset, 20.0);
        assert_eq!(links[0].target_offset, 0.0);
        assert_eq!(links[1].target_offset, 0.0);
    }

    #[test]
    fn tall_node_sorts_by_centre_not_top_edge() {
        // node 1 starts above node 2 but its centre (50) lies below node 2's (15)
        let mut nodes = vec![
            node(0.0, 50.0),
            node(0.0, 100.0),
            node(10.0, 10.0),
            node(0.0, 50.0),
        ];
        nodes[0].source_links = vec![LinkId(0), LinkId(1)];
        nodes[1].target_links = vec![LinkId(0)];
        nodes[1].source_links = vec![LinkId(2)];
        nodes[2].target_links = vec![LinkId(1)];
        nodes[2].source_links = vec![LinkId(3)];
        nodes[3].target_links = vec![LinkId(2), LinkId(3)];
        let mut links = vec![
            link(0, 1, 30.0),
            link(0, 2, 20.0),
            link(1, 3, 15.0),
            link(2, 3, 5.0),
        ];

        compute_link_depths(&mut nodes, &mut links);

        assert_eq!(nodes[0].source_links, vec![LinkId(1), LinkId(0)]);
        assert_eq!(links[1].source_offset, 0.0);
        assert_eq!(links[0].source_offset, 20.0);
        assert_eq!(nodes[3].target_links, vec![LinkId(3), LinkId(2)]);
        assert_eq!(links[3].target_offset, 0.0);
        assert_eq!(links[2].target_offset, 5.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut nodes = vec![node(0.0, 10.0), node(0.0, 10.0), node(40.0, 10.0)];
        nodes[0].source_links = vec![LinkId(0)];
        nodes[1].source_links = vec![LinkId(1), LinkId(2)];
        nodes[2].target_links = vec![LinkId(1), LinkId(0), LinkId(2)];
        let mut links = vec![link(0, 2, 3.0), link(1, 2, 4.0), link(1, 2, 3.0)];

        compute_link_depths(&mut nodes, &mut links);

        // nodes 0 and 1 share a centre, so incoming order is untouched
        assert_eq!(nodes[2].target_links, vec![LinkId(1), LinkId(0), LinkId(2)]);
        assert_eq!(links[1].target_offset, 0.0);
        assert_eq!(links[0].target_offset, 4.0);
        assert_eq!(links[2].target_offset, 7.0);
        assert_eq!(links[2].source_offset, 4.0);
    }
}
