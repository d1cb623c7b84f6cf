use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::theme::Theme;

/// Worker pacing and default routing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay between worker request-processing ticks, in milliseconds.
    /// A tunable constant, not a protocol requirement.
    pub tick_interval_ms: f64,
    /// Grid cell size applied when a request does not carry a usable one.
    pub grid_size: f64,
    /// Default corner rounding for connectors rendered by the CLI, in px.
    pub curvature_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 6.0,
            grid_size: 12.0,
            curvature_px: 0.0,
        }
    }
}

/// Scene renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Padding around the scene's bounding box, in px.
    pub padding: f64,
    /// Draw the connector anchor boxes.
    pub show_anchors: bool,
    /// Draw dots on the path waypoints; useful when debugging routes.
    pub show_waypoints: bool,
    /// Raster output size for PNG rendering.
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding: 24.0,
            show_anchors: true,
            show_waypoints: false,
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub render: RenderConfig,
    pub theme: Theme,
}

/// Load a config file, or the defaults when no path is given. Strict JSON
/// is tried first; JSON5 as a fallback tolerates comments and trailing
/// commas in hand-edited files.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config = match serde_json::from_str::<Config>(&contents) {
        Ok(config) => config,
        Err(_) => json5::from_str::<Config>(&contents)?,
    };
    Ok(config)
}
