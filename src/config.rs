//! Chart configuration
//! Layout, animation and data-source settings, loaded from an optional JSON file.

use crate::data::Metric;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "health_scatter.json";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "HEALTH_SCATTER_CONFIG";

/// Space reserved around the plotting area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

/// How the canvas follows the window size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width as a fraction of the viewport width
    pub width_fraction: f64,
    /// Canvas height as a fraction of the viewport height
    pub height_fraction: f64,
    /// Below this viewport extent the fixed floor sizes apply
    pub min_viewport: f64,
    pub floor_width: f64,
    pub floor_height: f64,
    pub margin: Margin,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.75,
            height_fraction: 0.5,
            min_viewport: 600.0,
            floor_width: 500.0,
            floor_height: 300.0,
            margin: Margin::default(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_path: PathBuf,
    pub initial_x: Metric,
    pub initial_y: Metric,
    pub transition_ms: u64,
    pub point_radius: f64,
    pub tick_count: usize,
    pub layout: LayoutConfig,
    /// Open exported SVG files with the system viewer
    pub open_after_export: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/data/data.csv"),
            initial_x: Metric::Poverty,
            initial_y: Metric::Healthcare,
            transition_ms: 1000,
            point_radius: 10.0,
            tick_count: 10,
            layout: LayoutConfig::default(),
            open_after_export: false,
        }
    }
}

impl ChartConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ChartConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load from `$HEALTH_SCATTER_CONFIG` or `health_scatter.json`; defaults if neither exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.exists() {
            log::info!("Loading config from {}", path.display());
            Self::load_from_file(&path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}
