#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, Strategy, load_config};
pub use ir::{Endpoint, Graph, Link, Node};
pub use layout::{
    BasicPacker, DepthStrategy, LayoutError, LinkId, NodeId, Relaxation, SankeyLayout,
    compute_layout, compute_layout_with,
};
pub use layout_dump::LayoutDump;
pub use parser::parse_sankey;

use anyhow::Result;

/// Parses `source`, applies any init directive on top of `config` and lays
/// the graph out.
pub fn layout_source(source: &str, config: &LayoutConfig) -> Result<(SankeyLayout, LayoutConfig)> {
    let parsed = parse_sankey(source)?;
    let mut config = config.clone();
    if let Some(init) = parsed.init_config.as_ref() {
        config.merge_init(init);
    }
    let layout = compute_layout(&parsed.graph, &config)?;
    Ok((layout, config))
}

/// Convenience wrapper returning the layout as pretty JSON.
pub fn layout_to_json(source: &str, config: &LayoutConfig) -> Result<String> {
    let (layout, config) = layout_source(source, config)?;
    let dump = LayoutDump::from_layout(&layout, config.link_curvature);
    Ok(serde_json::to_string_pretty(&dump)?)
}
