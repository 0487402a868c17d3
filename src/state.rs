use std::path::Path;

use anyhow::Context;

use crate::chart::hover::HoverState;
use crate::chart::tooltip::DetailTooltip;
use crate::chart::{ChartView, build_chart};
use crate::chrome::{NavToggle, ScrollToTop};
use crate::color::ColorMap;
use crate::config::ViewerConfig;
use crate::data::loader::load_file;
use crate::data::model::EnrollmentDataset;
use crate::data::selection::Selection;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until a table loads successfully).
    pub dataset: Option<EnrollmentDataset>,

    /// Regions currently drawn. Only the region list writes to it.
    pub selection: Selection,

    /// Colours for every region of the dataset.
    pub color_map: Option<ColorMap>,

    /// Chart for the current selection (cached, rebuilt on every change).
    pub chart: ChartView,

    /// Bumped on every rebuild so the plot can reset its view.
    pub chart_generation: u64,

    pub hover: HoverState,

    /// The floating detail panel, kept for the whole session.
    pub tooltip: DetailTooltip,

    pub scroll_top: ScrollToTop,
    pub nav: NavToggle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let scroll_top = ScrollToTop::new(config.scroll_threshold);
        Self {
            config,
            dataset: None,
            selection: Selection::default(),
            color_map: None,
            chart: ChartView::Empty,
            chart_generation: 0,
            hover: HoverState::default(),
            tooltip: DetailTooltip::default(),
            scroll_top,
            nav: NavToggle::default(),
            status_message: None,
        }
    }

    /// Load the configured table. Failures end up in `status_message`.
    pub fn load_configured(&mut self) {
        let path = self.config.data_path.clone();
        self.load_path(&path);
    }

    /// Load and normalize a table, replacing the current dataset on success.
    pub fn load_path(&mut self, path: &Path) {
        let layout = self.config.table_layout();
        let result = load_file(path, &layout).and_then(|rows| {
            EnrollmentDataset::from_rows(&rows, &layout.years).context("normalizing table")
        });

        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} regions over {} years from {}",
                    dataset.len(),
                    dataset.years.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!(
                    "Error: Could not load visualization. Check file path: {} ({e:#})",
                    path.display()
                ));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise selection and colour.
    pub fn set_dataset(&mut self, dataset: EnrollmentDataset) {
        self.color_map = Some(ColorMap::new(&dataset.regions(), self.config.color_scheme));
        self.selection = Selection::with_default(&dataset, &self.config.default_region);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_chart();
    }

    /// Throw away the current chart and build it again for the selection.
    pub fn rebuild_chart(&mut self) {
        self.chart = match (&self.dataset, &self.color_map) {
            (Some(ds), Some(cm)) => build_chart(ds, &self.selection, cm),
            _ => ChartView::Empty,
        };
        self.chart_generation += 1;
        self.hover.clear(&mut self.tooltip);
        log::debug!(
            "chart rebuilt for {:?}",
            self.selection.iter().collect::<Vec<_>>()
        );
    }

    /// Toggle a single region and redraw.
    pub fn toggle_region(&mut self, region: &str) {
        if self.selection.toggle(region) {
            self.rebuild_chart();
        }
    }

    /// Select every region.
    pub fn select_all(&mut self) {
        self.selection.select_all();
        self.rebuild_chart();
    }

    /// Deselect every region.
    pub fn select_none(&mut self) {
        self.selection.clear();
        self.rebuild_chart();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::chart::hover::hit_test;

    fn write_table(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("table.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "Location of residence at the time of admission,2020,2021\n{body}"
        )
        .unwrap();
        path
    }

    fn config(path: std::path::PathBuf) -> ViewerConfig {
        ViewerConfig {
            data_path: path,
            years: vec![2020, 2021],
            default_region: "B".to_string(),
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn initial_load_selects_default_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "A,30,10\nB,70,90\n");
        let mut state = AppState::new(config(path));
        state.load_configured();

        assert!(state.status_message.is_none());
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), vec!["B"]);
        let model = state.chart.model().unwrap();
        assert_eq!(model.series.len(), 1);
        assert!((model.y_domain.1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.csv");
        let mut state = AppState::new(config(path));
        state.load_configured();

        assert!(state.dataset.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("Check file path"));
        assert!(msg.contains("nowhere.csv"));
    }

    #[test]
    fn zero_total_is_reported_not_drawn() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "A,0,1\nB,0,2\n");
        let mut state = AppState::new(config(path));
        state.load_configured();

        assert!(state.dataset.is_none());
        assert_eq!(state.chart, ChartView::Empty);
        assert!(state.status_message.unwrap().contains("total for 2020 is zero"));
    }

    #[test]
    fn selection_changes_rebuild_and_drop_hover() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "A,30,10\nB,70,90\n");
        let mut state = AppState::new(config(path));
        state.load_configured();
        let generation = state.chart_generation;

        let model = state.chart.model().unwrap().clone();
        let hit = hit_test(&model, eframe::egui::pos2(0.0, 0.0), 1e9, |_, _| {
            eframe::egui::pos2(0.0, 0.0)
        });
        state.hover.update(hit, Some(eframe::egui::pos2(0.0, 0.0)), &mut state.tooltip);
        assert!(state.tooltip.is_visible());

        state.toggle_region("A");
        assert_eq!(state.chart_generation, generation + 1);
        assert!(!state.tooltip.is_visible());
        assert_eq!(state.chart.model().unwrap().series.len(), 2);

        state.select_none();
        assert_eq!(state.chart, ChartView::Empty);

        state.toggle_region("Z");
        assert_eq!(state.chart_generation, generation + 2);
    }
}
