use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LinkId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SankeyNode {
    pub id: String,
    pub label: String,
    /// Magnitude hint from the input, if any.
    pub declared_value: Option<f32>,
    pub value: f32,
    /// Column index before pixel scaling.
    pub breadth: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Outgoing links, ordered by target centre once link depths are computed.
    pub source_links: Vec<LinkId>,
    /// Incoming links, ordered by source centre once link depths are computed.
    pub target_links: Vec<LinkId>,
}

impl SankeyNode {
    pub fn center(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct SankeyLink {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f32,
    pub thickness: f32,
    pub source_offset: f32,
    pub target_offset: f32,
}

/// Link offsets reported by relayout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkOffsets {
    pub link: LinkId,
    pub source_offset: f32,
    pub target_offset: f32,
}

#[derive(Debug, Clone)]
pub struct SankeyLayout {
    pub width: f32,
    pub height: f32,
    pub node_width: f32,
    pub node_padding: f32,
    /// Value to pixel factor shared by node heights and link thicknesses.
    pub scale: f32,
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
    /// Node ids grouped by breadth, leftmost column first.
    pub columns: Vec<Vec<NodeId>>,
}

impl SankeyLayout {
    pub fn node(&self, id: NodeId) -> Option<&SankeyNode> {
        self.nodes.get(id.0)
    }

    pub fn link(&self, id: LinkId) -> Option<&SankeyLink> {
        self.links.get(id.0)
    }

    pub fn node_by_id(&self, id: &str) -> Option<(NodeId, &SankeyNode)> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.id == id)
            .map(|(idx, node)| (NodeId(idx), node))
    }

    pub(crate) fn link_offsets(&self) -> Vec<LinkOffsets> {
        self.links
            .iter()
            .enumerate()
            .map(|(idx, link)| LinkOffsets {
                link: LinkId(idx),
                source_offset: link.source_offset,
                target_offset: link.target_offset,
            })
            .collect()
    }
}
