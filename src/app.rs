use std::time::Duration;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{page, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OriginShareApp {
    pub state: AppState,
}

impl OriginShareApp {
    /// Build the app and load the configured table once.
    pub fn new(config: ViewerConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_configured();
        Self { state }
    }
}

impl eframe::App for OriginShareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        if let Some(remaining) = self.state.nav.tick(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
        let compact = ctx.screen_rect().width() < self.state.config.compact_width;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, compact, now);
        });

        // ---- Compact navigation ----
        if compact && self.state.nav.is_open() {
            egui::TopBottomPanel::top("nav_panel").show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state, now);
            });
        }

        // ---- Left side panel: regions ----
        egui::SidePanel::left("region_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            page::page(ui, &mut self.state);
        });
    }
}
