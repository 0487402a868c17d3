mod app;
mod chart;
mod chrome;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::OriginShareApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([420.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Origin Share – Enrollment by Province of Origin",
        options,
        Box::new(|_cc| Ok(Box::new(OriginShareApp::new(config)))),
    )
}
