use std::collections::HashMap;

use crate::ir::{Endpoint, Graph};

use super::error::{LayoutError, LinkEnd};
use super::types::{LinkId, NodeId, SankeyLink, SankeyNode};

/// Resolves every link endpoint once and attaches adjacency lists to nodes.
///
/// Links are appended to their source's outgoing list and their target's
/// incoming list in input order. Geometry fields are left at zero for the
/// later stages.
pub(super) fn build_topology(
    graph: &Graph,
) -> Result<(Vec<SankeyNode>, Vec<SankeyLink>), LayoutError> {
    let mut by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, node) in graph.nodes.iter().enumerate() {
        by_id.entry(node.id.as_str()).or_default().push(idx);
    }

    let resolve = |endpoint: &Endpoint, link: usize, end: LinkEnd| -> Result<NodeId, LayoutError> {
        match endpoint {
            Endpoint::ByIndex(idx) => {
                let idx = *idx as usize;
                if idx < graph.nodes.len() {
                    Ok(NodeId(idx))
                } else {
                    Err(LayoutError::UnresolvedReference {
                        link,
                        end,
                        reference: endpoint.to_string(),
                    })
                }
            }
            Endpoint::ByReference(id) => match by_id.get(id.as_str()).map(Vec::as_slice) {
                Some([idx]) => Ok(NodeId(*idx)),
                Some(matches) if matches.len() > 1 => Err(LayoutError::DuplicateNode {
                    link,
                    end,
                    id: id.clone(),
                    count: matches.len(),
                }),
                _ => Err(LayoutError::UnresolvedReference {
                    link,
                    end,
                    reference: endpoint.to_string(),
                }),
            },
        }
    };

    let mut nodes: Vec<SankeyNode> = graph
        .nodes
        .iter()
        .map(|node| SankeyNode {
            id: node.id.clone(),
            label: node.label.clone().unwrap_or_else(|| node.id.clone()),
            declared_value: node.value,
            value: 0.0,
            breadth: 0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            source_links: Vec::new(),
            target_links: Vec::new(),
        })
        .collect();

    let mut links = Vec::with_capacity(graph.links.len());
    for (link_idx, link) in graph.links.iter().enumerate() {
        if !link.value.is_finite() || link.value < 0.0 {
            return Err(LayoutError::InvalidLinkValue {
                link: link_idx,
                value: link.value,
            });
        }
        let source = resolve(&link.source, link_idx, LinkEnd::Source)?;
        let target = resolve(&link.target, link_idx, LinkEnd::Target)?;
        nodes[source.0].source_links.push(LinkId(link_idx));
        nodes[target.0].target_links.push(LinkId(link_idx));
        links.push(SankeyLink {
            source,
            target,
            value: link.value,
            thickness: 0.0,
            source_offset: 0.0,
            target_offset: 0.0,
        });
    }

    Ok((nodes, links))
}
