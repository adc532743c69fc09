mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, anyhow};
use app::DashboardApp;
use customer_dashboard::config::{CONFIG_FILE, DashboardConfig};
use customer_dashboard::session::Session;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;
    // Without the dataset there is nothing to show.
    let session = Session::init(&config).context("starting the dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Customer Behavior Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(session)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
