use super::types::{SankeyLink, SankeyNode};

/// A node's value is the larger of its outgoing and incoming link sums.
pub(super) fn compute_node_values(nodes: &mut [SankeyNode], links: &[SankeyLink]) {
    for node in nodes.iter_mut() {
        let outgoing: f32 = node.source_links.iter().map(|id| links[id.0].value).sum();
        let incoming: f32 = node.target_links.iter().map(|id| links[id.0].value).sum();
        node.value = outgoing.max(incoming);

        if let Some(declared) = node.declared_value {
            if (declared - node.value).abs() > f32::EPSILON * node.value.max(1.0) {
                log::warn!(
                    "node \"{}\" declares value {} but its links carry {}",
                    node.id,
                    declared,
                    node.value
                );
            }
        }
    }
}
