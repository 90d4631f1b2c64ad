use thiserror::Error;

use super::types::NodeId;

/// Which end of a link an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEnd {
    Source,
    Target,
}

impl std::fmt::Display for LinkEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkEnd::Source => f.write_str("source"),
            LinkEnd::Target => f.write_str("target"),
        }
    }
}

/// Reasons a layout call is aborted. No partial layout is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("link {link}: {end} {reference} does not resolve to a node")]
    UnresolvedReference {
        link: usize,
        end: LinkEnd,
        reference: String,
    },

    #[error("link {link}: {end} \"{id}\" is ambiguous, {count} nodes share that id")]
    DuplicateNode {
        link: usize,
        end: LinkEnd,
        id: String,
        count: usize,
    },

    #[error("link {link} has invalid value {value}; values must be finite and non-negative")]
    InvalidLinkValue { link: usize, value: f32 },

    #[error("graph contains a cycle through node \"{node}\"")]
    CyclicGraph { node: String },

    #[error("value scale is undefined ({scale}); column {column} cannot fit the canvas")]
    DegenerateScale { column: usize, scale: f32 },

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("no node with index {0}")]
    UnknownNode(NodeId),
}
