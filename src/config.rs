//! Viewer configuration, read from JSON with built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::TableLayout;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "ORIGIN_SHARE_CONFIG";

/// Looked up in the working directory when `ORIGIN_SHARE_CONFIG` is unset.
pub const CONFIG_FILE: &str = "origin-share.json";

/// How region colours are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// The ten-colour categorical Tableau palette, cycled.
    #[default]
    Tableau10,
    /// Evenly spaced hues, one per region.
    Hues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Table loaded at start-up.
    pub data_path: PathBuf,
    /// Header of the column naming each region.
    pub region_column: String,
    /// Year columns, strictly ascending.
    pub years: Vec<i32>,
    /// Region selected on the first frame.
    pub default_region: String,
    /// Where the students are enrolled; used in the tooltip wording.
    pub destination: String,
    pub color_scheme: ColorScheme,
    pub chart_height: f32,
    /// Scroll offset (points) past which the "back to top" button shows.
    pub scroll_threshold: f32,
    /// Window width (points) below which navigation collapses behind a button.
    pub compact_width: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/number_of_undergrads_graduates_in_ontario.csv"),
            region_column: "Location of residence at the time of admission".to_string(),
            years: (2012..=2021).collect(),
            default_region: "British Columbia, origin".to_string(),
            destination: "Ontario".to_string(),
            color_scheme: ColorScheme::default(),
            chart_height: 550.0,
            scroll_threshold: 50.0,
            compact_width: 720.0,
        }
    }
}

impl ViewerConfig {
    /// Resolve the configuration for this run.
    ///
    /// An unreadable or invalid file is logged and replaced by defaults; the
    /// viewer should still open and report data problems on its own.
    pub fn load() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    log::info!("No {CONFIG_FILE} found, using built-in configuration");
                    return Self::default();
                }
                local
            }
        };

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading configuration")?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing configuration")
    }

    pub fn table_layout(&self) -> TableLayout {
        TableLayout {
            region_column: self.region_column.clone(),
            years: self.years.clone(),
        }
    }
}
