use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, RichText, Ui, vec2};
use egui_plot::{
    GridMark, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text,
    uniform_grid_spacer,
};

use crate::chart::hover::{HOVER_RADIUS, hit_test, line_width};
use crate::chart::tooltip::detail_lines;
use crate::chart::{EMPTY_MESSAGE, SeriesView, Y_AXIS_TITLE};
use crate::state::AppState;

/// Extra room right of the last year, as a share of the year span, so the
/// region labels are not clipped.
const LABEL_ROOM: f64 = 0.3;

// ---------------------------------------------------------------------------
// Enrollment share plot
// ---------------------------------------------------------------------------

/// Render the chart section of the page.
pub fn enrollment_plot(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        config,
        dataset,
        chart,
        chart_generation,
        hover,
        tooltip,
        status_message,
        ..
    } = state;
    let height = config.chart_height;

    if dataset.is_none() {
        placeholder(ui, height, |ui: &mut Ui| match status_message {
            Some(msg) => {
                ui.label(RichText::new(msg.as_str()).color(Color32::RED));
            }
            None => {
                ui.label("Loading data...");
            }
        });
        return;
    }

    let Some(model) = chart.model() else {
        hover.clear(tooltip);
        placeholder(ui, height, |ui: &mut Ui| {
            ui.label(EMPTY_MESSAGE);
        });
        return;
    };

    let (x0, x1) = model.x_domain;
    let (y0, y1) = model.y_domain;

    // A fresh id per rebuild: nothing of the previous drawing survives.
    Plot::new(("enrollment_plot", *chart_generation))
        .height(height)
        .x_axis_label("Year")
        .y_axis_label(Y_AXIS_TITLE)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| year_tick(mark.value))
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format!("{:.1}%", mark.value * 100.0)
        })
        .include_x(x0)
        .include_x(x1 + (x1 - x0).max(1.0) * LABEL_ROOM)
        .include_y(y0)
        .include_y(y1)
        .set_margin_fraction(vec2(0.0, 0.0))
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            let pointer = plot_ui.response().hover_pos();
            let hit = pointer.and_then(|p| {
                hit_test(model, p, HOVER_RADIUS, |year, share| {
                    plot_ui.screen_from_plot(PlotPoint::new(year, share))
                })
            });
            hover.update(hit, pointer, tooltip);
            let highlighted = hover.highlighted_region();

            for series in &model.series {
                let coords = series.coordinates();

                plot_ui.line(series_line(series, coords.clone(), highlighted));

                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(HOVER_RADIUS)
                        .color(series.color),
                );

                if let Some(label) = &series.label {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(f64::from(label.year), label.percentage),
                            RichText::new(format!("   {}", label.text))
                                .size(12.0)
                                .color(series.color),
                        )
                        .anchor(Align2::LEFT_CENTER),
                    );
                }
            }
        });

    if let Some(target) = tooltip.content() {
        egui::Area::new(egui::Id::new("detail_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(tooltip.anchor())
            .interactable(false)
            .show(ui.ctx(), |ui: &mut Ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(&target.region).strong());
                    ui.add_space(6.0);
                    for (label, value) in detail_lines(target, &config.destination) {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label(RichText::new(format!("{label}:")).strong());
                            ui.label(value);
                        });
                    }
                });
            });
    }
}

/// Lines stay unnamed so the plot has no legend: the region list is the only
/// way to hide one.
fn series_line(series: &SeriesView, coords: Vec<[f64; 2]>, highlighted: Option<&str>) -> Line<'static> {
    Line::new(PlotPoints::from(coords))
        .color(series.color)
        .width(line_width(&series.region, highlighted))
}

/// Whole years only; the spacer may still ask for fractional marks.
fn year_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{:.0}", value)
    } else {
        String::new()
    }
}

fn placeholder(ui: &mut Ui, height: f32, add_contents: impl FnOnce(&mut Ui)) {
    ui.allocate_ui(vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(add_contents);
    });
}

#[cfg(test)]
mod tests {
    use egui_plot::PlotItem;

    use super::*;

    fn view() -> SeriesView {
        SeriesView {
            region: "A".to_string(),
            color: Color32::RED,
            points: Vec::new(),
            label: None,
        }
    }

    #[test]
    fn series_lines_carry_no_legend_name() {
        let series = view();
        let line = series_line(&series, series.coordinates(), None);
        assert!(PlotItem::name(&line).is_empty());
        assert_eq!(PlotItem::color(&line), Color32::RED);
    }

    #[test]
    fn year_ticks_are_whole() {
        assert_eq!(year_tick(2015.0), "2015");
        assert_eq!(year_tick(2015.5), "");
    }
}
