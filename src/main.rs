mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod figure;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::LaunchDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    if let Some(path) = std::env::args().nth(1) {
        config.data_path = PathBuf::from(path);
    }

    // Load once at startup; a failure leaves the window up with the error.
    let mut state = AppState::new(config.clone());
    ui::panels::load_into(&mut state, &config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
}
