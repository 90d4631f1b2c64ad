use crate::layout::error::LayoutError;
use crate::layout::path::DEFAULT_CURVATURE;
use crate::layout::relax::DEFAULT_ITERATIONS;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How nodes are positioned vertically inside their columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Single packing pass, each column centered.
    Basic,
    /// Barycenter relaxation with collision resolution.
    Optimized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub node_width: f32,
    pub node_padding: f32,
    pub strategy: Strategy,
    /// Only used by [`Strategy::Optimized`].
    pub iterations: usize,
    pub link_curvature: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 560.0,
            height: 360.0,
            node_width: 24.0,
            node_padding: 8.0,
            strategy: Strategy::Optimized,
            iterations: DEFAULT_ITERATIONS,
            link_curvature: DEFAULT_CURVATURE,
        }
    }
}

impl LayoutConfig {
    pub fn basic() -> Self {
        Self {
            strategy: Strategy::Basic,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !(self.node_width.is_finite() && self.node_width >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "node width must be non-negative, got {}",
                self.node_width
            )));
        }
        if self.node_width > self.width {
            return Err(LayoutError::InvalidConfig(format!(
                "node width {} exceeds canvas width {}",
                self.node_width, self.width
            )));
        }
        if !(self.node_padding.is_finite() && self.node_padding >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "node padding must be non-negative, got {}",
                self.node_padding
            )));
        }
        Ok(())
    }

    /// Applies the `sankey` section of a `%%{init: ...}%%` directive.
    pub fn merge_init(&mut self, init: &serde_json::Value) {
        let Some(section) = init.get("sankey") else {
            return;
        };
        if let Some(val) = section.get("width").and_then(|v| v.as_f64()) {
            self.width = val as f32;
        }
        if let Some(val) = section.get("height").and_then(|v| v.as_f64()) {
            self.height = val as f32;
        }
        if let Some(val) = section.get("nodeWidth").and_then(|v| v.as_f64()) {
            self.node_width = val as f32;
        }
        if let Some(val) = section.get("nodePadding").and_then(|v| v.as_f64()) {
            self.node_padding = val as f32;
        }
        if let Some(val) = section.get("iterations").and_then(|v| v.as_u64()) {
            self.iterations = val as usize;
        }
        if let Some(val) = section.get("linkCurvature").and_then(|v| v.as_f64()) {
            self.link_curvature = val as f32;
        }
        if let Some(val) = section.get("strategy").and_then(|v| v.as_str()) {
            match val {
                "basic" => self.strategy = Strategy::Basic,
                "optimized" => self.strategy = Strategy::Optimized,
                other => log::warn!("ignoring unknown sankey strategy \"{other}\""),
            }
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}
