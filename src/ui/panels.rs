use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chrome::Section;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – region list
// ---------------------------------------------------------------------------

/// Render the multi-select region list.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regions");
    ui.separator();

    let entries = match &state.color_map {
        Some(cm) if state.dataset.is_some() => cm.legend_entries(),
        _ => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
        ui.label(format!("({}/{})", state.selection.len(), entries.len()));
    });
    ui.separator();

    ScrollArea::vertical()
        .id_salt("regions")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (region, color) in &entries {
                let mut checked = state.selection.contains(region);
                if ui
                    .checkbox(&mut checked, RichText::new(region).color(*color))
                    .changed()
                {
                    state.toggle_region(region);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. In compact layouts the section links move
/// behind a burger button.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, compact: bool, now: f64) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if compact {
            let icon = if state.nav.is_open() { "✕" } else { "☰" };
            if ui.button(icon).on_hover_text("Sections").clicked() {
                state.nav.toggle();
            }
        } else {
            section_links(ui, state, now);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} regions loaded, {} selected",
                ds.len(),
                state.selection.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// The navigation panel shown below the top bar in compact layouts.
pub fn nav_panel(ui: &mut Ui, state: &mut AppState, now: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Sections");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("✕").clicked() {
                state.nav.toggle();
            }
        });
    });
    ui.vertical(|ui: &mut Ui| section_links(ui, state, now));
}

fn section_links(ui: &mut Ui, state: &mut AppState, now: f64) {
    for section in Section::ALL {
        if ui.link(section.title()).clicked() {
            state.nav.follow(section, now);
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open enrollment table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
