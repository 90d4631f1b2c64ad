use crate::ir::{Endpoint, Graph, Node};
use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^sankey(-beta)?\s*$").unwrap());

#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub graph: Graph,
    pub init_config: Option<serde_json::Value>,
}

/// Parses either a JSON graph document or Mermaid `sankey-beta` CSV rows.
pub fn parse_sankey(input: &str) -> Result<ParseOutput> {
    if input.trim_start().starts_with('{') {
        parse_json_graph(input)
    } else {
        parse_sankey_rows(input)
    }
}

fn parse_json_graph(input: &str) -> Result<ParseOutput> {
    let graph = match serde_json::from_str::<Graph>(input) {
        Ok(graph) => graph,
        Err(json_err) => json5::from_str::<Graph>(input)
            .with_context(|| format!("invalid graph document ({json_err})"))?,
    };
    Ok(ParseOutput {
        graph,
        init_config: None,
    })
}

fn parse_sankey_rows(input: &str) -> Result<ParseOutput> {
    let mut graph = Graph::new();
    let mut seen: HashSet<String> = HashSet::new();
    let (lines, init_config) = preprocess_input(input);

    for (line_no, line) in lines {
        if HEADER_RE.is_match(&line) {
            continue;
        }
        let parts = split_args(&line);
        let [from, to, value] = parts.as_slice() else {
            return Err(anyhow!(
                "line {line_no}: expected `source,target,value`, got {} field(s)",
                parts.len()
            ));
        };
        let from = strip_quotes(from);
        let to = strip_quotes(to);
        if from.is_empty() || to.is_empty() {
            return Err(anyhow!("line {line_no}: empty node name"));
        }
        let value: f32 = strip_quotes(value)
            .parse()
            .with_context(|| format!("line {line_no}: invalid value {value:?}"))?;

        for id in [&from, &to] {
            if seen.insert(id.clone()) {
                graph.nodes.push(Node {
                    id: id.clone(),
                    label: None,
                    value: None,
                });
            }
        }
        graph.add_link(Endpoint::ByReference(from), Endpoint::ByReference(to), value);
    }

    Ok(ParseOutput { graph, init_config })
}

/// Drops blank and `%%` comment lines, capturing an init directive if present.
/// Returned lines keep their 1-based line number.
fn preprocess_input(input: &str) -> (Vec<(usize, String)>, Option<serde_json::Value>) {
    let mut init_config: Option<serde_json::Value> = None;
    let mut lines = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let trimmed_line = raw_line.trim();
        if trimmed_line.is_empty() {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(trimmed_line) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else if let Ok(value) = json5::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else {
                    log::warn!("line {}: ignoring malformed init directive", idx + 1);
                }
            }
            continue;
        }
        if trimmed_line.starts_with("%%") {
            continue;
        }
        lines.push((idx + 1, trimmed_line.to_string()));
    }

    (lines, init_config)
}

fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in input.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
            continue;
        }
        if ch == ',' && !in_quotes {
            args.push(current.trim().to_string());
            current.clear();
            continue;
        }
        current.push(ch);
    }
    args.push(current.trim().to_string());
    args
}

fn strip_quotes(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].replace("\"\"", "\"")
    } else {
        trimmed.to_string()
    }
}
