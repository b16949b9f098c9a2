mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::DashboardApp;
use config::{CONFIG_FILE, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;

    // Load and clean before any window exists: a bad dataset means no dashboard.
    let dataset = data::loader::load_file(&config.data_path, &config.sheet_name)
        .inspect_err(|e| log::error!("Cannot start dashboard: {e}"))
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let source = config.data_path.clone();
    let state = AppState::new(config, source, dataset);

    eframe::run_native(
        "Patient Data Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
