use crate::layout::{SankeyLayout, link_path};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub node_width: f32,
    pub node_padding: f32,
    pub scale: f32,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub value: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_value: Option<f32>,
    pub breadth: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    pub value: f32,
    pub thickness: f32,
    pub source_offset: f32,
    pub target_offset: f32,
    pub path: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &SankeyLayout, curvature: f32) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.clone(),
                value: node.value,
                declared_value: node.declared_value,
                breadth: node.breadth,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                source: layout.nodes[link.source.0].id.clone(),
                target: layout.nodes[link.target.0].id.clone(),
                value: link.value,
                thickness: link.thickness,
                source_offset: link.source_offset,
                target_offset: link.target_offset,
                path: link_path(layout, link, curvature).to_svg_path(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            node_width: layout.node_width,
            node_padding: layout.node_padding,
            scale: layout.scale,
            nodes,
            links,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &SankeyLayout, curvature: f32) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, curvature);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
