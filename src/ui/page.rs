use eframe::egui::{self, Align, Align2, RichText, ScrollArea, Ui, vec2};

use crate::chrome::Section;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Central page: scrollable sections
// ---------------------------------------------------------------------------

/// Render the page body and the floating "back to top" button.
pub fn page(ui: &mut Ui, state: &mut AppState) {
    let mut area = ScrollArea::vertical()
        .id_salt("page")
        .auto_shrink([false, false]);
    if state.scroll_top.take_request() {
        area = area.vertical_scroll_offset(0.0);
    }

    let target = state.nav.take_target();

    let output = area.show(ui, |ui: &mut Ui| {
        for section in Section::ALL {
            if target == Some(section) {
                ui.scroll_to_cursor(Some(Align::TOP));
            }
            ui.heading(section.title());
            ui.separator();
            match section {
                Section::Overview => overview(ui, state),
                Section::Chart => plot::enrollment_plot(ui, state),
                Section::Table => table::data_table(ui, state),
                Section::About => about(ui, state),
            }
            ui.add_space(24.0);
        }
    });

    if state.scroll_top.is_visible(output.state.offset.y) {
        egui::Area::new(egui::Id::new("scroll_to_top"))
            .anchor(Align2::RIGHT_BOTTOM, vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui: &mut Ui| {
                if ui.button("⬆ Top").on_hover_text("Back to top").clicked() {
                    state.scroll_top.request();
                }
            });
    }
}

fn overview(ui: &mut Ui, state: &AppState) {
    ui.label(format!(
        "Share of students enrolled in {} by province or territory of origin. \
         Pick regions in the left panel; hover a point for its numbers.",
        state.config.destination
    ));
    if let Some(ds) = &state.dataset {
        let (first, last) = ds.year_extent();
        ui.label(
            RichText::new(format!(
                "{} regions, {first}–{last}, {} selected",
                ds.len(),
                state.selection.len()
            ))
            .weak(),
        );
    }
}

fn about(ui: &mut Ui, state: &AppState) {
    ui.label(format!(
        "Each percentage is the region's count divided by the total over all \
         regions for that year. Data file: {}",
        state.config.data_path.display()
    ));
    if let Some(ds) = &state.dataset {
        egui::Grid::new("year_totals")
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                ui.strong("Year");
                ui.strong("Total students");
                ui.end_row();
                for t in &ds.totals {
                    ui.label(t.year.to_string());
                    ui.label(crate::chart::tooltip::format_count(t.total));
                    ui.end_row();
                }
            });
    }
}
