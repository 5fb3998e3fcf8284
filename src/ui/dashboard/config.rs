use std::path::Path;

use egui::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use velocity::VelocityError;
use velocity::projection::DEFAULT_CITATION_LIMIT;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct WindowSize {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.,
            height: 860.,
        }
    }
}

impl From<WindowSize> for Vec2 {
    fn from(value: WindowSize) -> Self {
        Vec2::new(value.width, value.height)
    }
}

/// Window preferences. The file is only read, never written back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) refresh_rate_ms: u64,
    pub(crate) window_size: WindowSize,
    pub(crate) standings_panel_width: f32,
    pub(crate) citation_limit: usize,
    pub(crate) show_history_chart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: super::REFRESH_RATE_MS,
            window_size: WindowSize::default(),
            standings_panel_width: 380.,
            citation_limit: DEFAULT_CITATION_LIMIT,
            show_history_chart: true,
        }
    }
}

impl AppConfig {
    /// Reads `velocity/config.json` from the platform config directory.
    /// Returns `Ok(None)` when there is no config file.
    pub(crate) fn from_local_file() -> Result<Option<Self>, VelocityError> {
        let config_path = dirs::config_dir()
            .ok_or(VelocityError::NoConfigDir)?
            .join("velocity")
            .join(CONFIG_FILE_NAME);
        Self::from_path(&config_path)
    }

    pub(crate) fn from_path(config_path: &Path) -> Result<Option<Self>, VelocityError> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| VelocityError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| VelocityError::ConfigParseError { source: e })?;
        info!("Loaded config from {:?}", config_path);
        Ok(Some(config))
    }
}
