use crate::config::{LayoutConfig, Strategy, load_config};
use crate::layout::{SankeyLayout, compute_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_sankey;
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sankey-layout", version, about = "Sankey diagram layout engine")]
pub struct Args {
    /// Input file (JSON graph or sankey-beta rows) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output JSON file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Horizontal extent of every node
    #[arg(long = "nodeWidth")]
    pub node_width: Option<f32>,

    /// Vertical gap between nodes in a column
    #[arg(long = "nodePadding")]
    pub node_padding: Option<f32>,

    /// Vertical placement strategy
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategy: Option<Strategy>,

    /// Relaxation iterations (optimized strategy only)
    #[arg(long = "iterations")]
    pub iterations: Option<usize>,

    /// Move a node after layout, as ID=Y (repeatable); Y is clamped to the canvas
    #[arg(long = "drag", value_parser = parse_drag)]
    pub drag: Vec<(String, f32)>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let parsed = parse_sankey(&input)?;
    if let Some(init) = parsed.init_config.as_ref() {
        config.merge_init(init);
    }
    apply_overrides(&mut config, &args);
    log::debug!("layout config: {config:?}");

    let mut layout = compute_layout(&parsed.graph, &config)?;
    apply_drags(&mut layout, &args.drag)?;

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, config.link_curvature)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let dump = LayoutDump::from_layout(&layout, config.link_curvature);
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut LayoutConfig, args: &Args) {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(node_width) = args.node_width {
        config.node_width = node_width;
    }
    if let Some(node_padding) = args.node_padding {
        config.node_padding = node_padding;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
}

fn apply_drags(layout: &mut SankeyLayout, drags: &[(String, f32)]) -> Result<()> {
    for (id, y) in drags {
        let (node_id, _) = layout
            .node_by_id(id)
            .ok_or_else(|| anyhow!("--drag: no node named \"{id}\""))?;
        layout.drag_node(node_id, *y)?;
    }
    Ok(())
}

fn parse_drag(raw: &str) -> Result<(String, f32), String> {
    let (id, y) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ID=Y, got \"{raw}\""))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|err| format!("invalid position \"{y}\": {err}"))?;
    Ok((id.trim().to_string(), y))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Endpoint, Graph};

    #[test]
    fn parses_drag_arguments() {
        assert_eq!(parse_drag("Coal=12.5"), Ok(("Coal".to_string(), 12.5)));
        assert_eq!(parse_drag("a=b=3"), Ok(("a=b".to_string(), 3.0)));
        assert!(parse_drag("Coal").is_err());
        assert!(parse_drag("Coal=high").is_err());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "sankey-layout",
            "--nodeWidth",
            "10",
            "--strategy",
            "basic",
            "-H",
            "200",
        ]);
        let mut config = LayoutConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.node_width, 10.0);
        assert_eq!(config.height, 200.0);
        assert_eq!(config.width, 560.0);
        assert_eq!(config.strategy, Strategy::Basic);
    }

    #[test]
    fn drags_unknown_node_fail() {
        let mut graph = Graph::new();
        graph.ensure_node("a", None);
        graph.ensure_node("b", None);
        graph.add_link(Endpoint::index(0), Endpoint::index(1), 1.0);
        let mut layout = compute_layout(&graph, &LayoutConfig::default()).unwrap();

        assert!(apply_drags(&mut layout, &[("a".to_string(), 0.0)]).is_ok());
        assert!(apply_drags(&mut layout, &[("nope".to_string(), 0.0)]).is_err());
    }
}
