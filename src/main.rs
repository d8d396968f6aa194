//! Health Scatter - Interactive Demographics vs. Health Risk Chart
//!
//! Plots US states on a scatter chart with switchable axis metrics.

mod charts;
mod config;
mod controller;
mod data;
mod gui;

use anyhow::anyhow;
use config::ChartConfig;
use eframe::egui;
use gui::ScatterApp;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ChartConfig::load().unwrap_or_else(|e| {
        log::error!("{:#}; falling back to defaults", e);
        ChartConfig::default()
    });
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Health Scatter"),
        ..Default::default()
    };

    eframe::run_native(
        "Health Scatter",
        options,
        Box::new(|cc| Ok(Box::new(ScatterApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Failed to run application: {}", e))
}
