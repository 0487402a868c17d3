//! Chart model: what to draw for a given selection.
//!
//! [`build_chart`] is pure. The plot widget in `ui::plot` only turns a
//! [`ChartModel`] into `egui_plot` items and feeds pointer positions back
//! through [`hover`].

pub mod hover;
pub mod scale;
pub mod tooltip;

use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::model::{EnrollmentDataset, SeriesPoint};
use crate::data::selection::{Selection, visible_series};

/// Shown instead of a chart when nothing is selected.
pub const EMPTY_MESSAGE: &str = "No regions selected. Please select one or more regions.";

pub const Y_AXIS_TITLE: &str = "Percentage of Total Students (%)";

/// A point of a visible series, tagged with its region.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    pub region: String,
    pub point: SeriesPoint,
}

/// Region name placed at the series' most recent point.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLabel {
    pub year: i32,
    pub percentage: f64,
    pub text: String,
}

/// One drawable line.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub region: String,
    pub color: Color32,
    /// Ordered by year ascending.
    pub points: Vec<SeriesPoint>,
    pub label: Option<SeriesLabel>,
}

impl SeriesView {
    /// `[year, percentage]` pairs for the plot widget.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [f64::from(p.year), p.percentage])
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    /// Full year range of the dataset, independent of the selection.
    pub x_domain: (f64, f64),
    /// `[0, nice(max visible percentage)]`.
    pub y_domain: (f64, f64),
    pub series: Vec<SeriesView>,
}

#[cfg(test)]
impl ChartModel {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn color_of(&self, region: &str) -> Option<Color32> {
        self.series.iter().find(|s| s.region == region).map(|s| s.color)
    }
}

/// Result of a redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// Nothing selected: show [`EMPTY_MESSAGE`] and draw nothing else.
    Empty,
    Drawn(ChartModel),
}

impl ChartView {
    pub fn model(&self) -> Option<&ChartModel> {
        match self {
            ChartView::Empty => None,
            ChartView::Drawn(model) => Some(model),
        }
    }

    #[cfg(test)]
    pub fn into_model(self) -> Option<ChartModel> {
        match self {
            ChartView::Empty => None,
            ChartView::Drawn(model) => Some(model),
        }
    }
}

/// Build the chart for the regions in `selection`.
///
/// Rebuilt from scratch on every call; the same inputs always give the same
/// view. The x domain spans every year of the dataset, so changing the
/// selection only ever rescales the y axis.
pub fn build_chart(
    dataset: &EnrollmentDataset,
    selection: &Selection,
    colors: &ColorMap,
) -> ChartView {
    let visible = visible_series(dataset, selection);
    if visible.is_empty() {
        return ChartView::Empty;
    }

    let (first, last) = dataset.year_extent();
    let x_domain = (f64::from(first), f64::from(last));

    let max = visible
        .iter()
        .filter_map(|s| s.max_percentage())
        .fold(0.0, f64::max);
    let y_domain = scale::percentage_domain(max);

    let series = visible
        .into_iter()
        .map(|s| SeriesView {
            region: s.region.clone(),
            color: colors.color_for(&s.region),
            points: s.points.clone(),
            label: s.last_point().map(|p| SeriesLabel {
                year: p.year,
                percentage: p.percentage,
                text: s.region.clone(),
            }),
        })
        .collect();

    ChartView::Drawn(ChartModel {
        x_domain,
        y_domain,
        series,
    })
}
