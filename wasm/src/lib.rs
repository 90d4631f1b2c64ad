use sankey_layout::{LayoutConfig, Strategy, layout_to_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyLayoutOptions {
    width: Option<f32>,
    height: Option<f32>,
    node_width: Option<f32>,
    node_padding: Option<f32>,
    strategy: Option<Strategy>,
    iterations: Option<usize>,
}

fn build_layout_config(options: SankeyLayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(width) = options.width {
        config.width = width;
    }
    if let Some(height) = options.height {
        config.height = height;
    }
    if let Some(node_width) = options.node_width {
        config.node_width = node_width;
    }
    if let Some(node_padding) = options.node_padding {
        config.node_padding = node_padding;
    }
    if let Some(strategy) = options.strategy {
        config.strategy = strategy;
    }
    if let Some(iterations) = options.iterations {
        config.iterations = iterations;
    }
    config
}

fn layout_with_options(code: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw_options) => serde_json::from_str::<SankeyLayoutOptions>(raw_options)
            .map_err(|error| error.to_string())?,
        None => SankeyLayoutOptions::default(),
    };
    layout_to_json(code, &build_layout_config(options)).map_err(|error| format!("{error:#}"))
}

#[wasm_bindgen]
pub fn layout_sankey_json(code: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_with_options(code, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
