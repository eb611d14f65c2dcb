use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Dashboard settings. Every field has a default, so a partial
/// `dashboard.json` only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub data_path: PathBuf,
    pub payload_slider: SliderConfig,
    /// Discrete colour sequence for chart categories (`#rrggbb`).
    pub palette: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            data_path: PathBuf::from("spacex_launch_dash.csv"),
            payload_slider: SliderConfig::default(),
            palette: ["#4d4d4d", "#7f7f7f", "#b3b3b3", "#d9d9d9", "#a6cee3", "#1f78b4"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    /// Labelled positions every `step` from `min` to `max` inclusive.
    pub fn marks(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.max < self.min {
            return Vec::new();
        }
        let count = ((self.max - self.min) / self.step).floor() as usize;
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }
}

impl DashboardConfig {
    /// Read the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`DashboardConfig::load`], but falls back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid config: {e:#}");
            Self::default()
        })
    }
}
