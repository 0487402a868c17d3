use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::EMPTY_MESSAGE;
use crate::chart::tooltip::{format_count, format_percentage};
use crate::data::selection::visible_series;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table: the numbers behind the chart
// ---------------------------------------------------------------------------

/// One row per selected region and year.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let rows: Vec<_> = visible_series(dataset, &state.selection)
        .into_iter()
        .flat_map(|s| s.points.iter().map(move |p| (s, p)))
        .collect();

    if rows.is_empty() {
        ui.label(EMPTY_MESSAGE);
        return;
    }

    let color_map = state.color_map.as_ref();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(90.0), 3)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for title in ["Region", "Year", "Students", "Total", "Share"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let (series, point) = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    let mut text = RichText::new(&series.region);
                    if let Some(cm) = color_map {
                        text = text.color(cm.color_for(&series.region));
                    }
                    ui.label(text);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(point.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_count(point.count));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_count(point.total));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_percentage(point.percentage));
                });
            });
        });
}
