use serde::{Deserialize, Serialize};

/// How a link names one of its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// Position in `Graph::nodes`.
    ByIndex(u32),
    /// Value of a node's `id`.
    ByReference(String),
}

impl Endpoint {
    pub fn index(idx: u32) -> Self {
        Self::ByIndex(idx)
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::ByReference(id.into())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::ByIndex(idx) => write!(f, "#{idx}"),
            Endpoint::ByReference(id) => write!(f, "\"{id}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(alias = "name")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Magnitude supplied by the caller. Layout always derives its own value
    /// from the links; this is only carried through to the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: Endpoint,
    pub target: Endpoint,
    pub value: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the node named `id`, appending it when missing.
    pub fn ensure_node(&mut self, id: &str, label: Option<String>) -> usize {
        if let Some(idx) = self.nodes.iter().position(|node| node.id == id) {
            if let Some(label) = label {
                self.nodes[idx].label = Some(label);
            }
            return idx;
        }
        self.nodes.push(Node {
            id: id.to_string(),
            label,
            value: None,
        });
        self.nodes.len() - 1
    }

    pub fn add_link(&mut self, source: Endpoint, target: Endpoint, value: f32) {
        self.links.push(Link {
            source,
            target,
            value,
        });
    }
}
