use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::geometry::Color;
use crate::platform::WindowConfig;

/// Engine settings, usually read from a JSON file next to the game.
/// Every field is optional in the file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    pub asset_root: PathBuf,
    /// Escape raises the close signal, like the window's close button.
    pub close_on_escape: bool,
    pub clear_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Kite".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            asset_root: PathBuf::from("assets"),
            close_on_escape: true,
            clear_color: Color::BLACK,
        }
    }
}

impl EngineConfig {
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            size: (!self.fullscreen).then_some((self.width, self.height)),
            vsync: self.vsync,
            clear_color: self.clear_color,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|e| EngineError::Config(format!("Failed to read {}: {e}", path.display())))?;
    let config: EngineConfig = serde_json::from_str(&raw).map_err(|e| {
        EngineError::Config(format!("Failed to parse config JSON {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &EngineConfig) -> Result<()> {
    if !config.fullscreen && (config.width == 0 || config.height == 0) {
        return Err(EngineError::Config(
            "Config validation failed: width and height must be > 0".to_string(),
        ));
    }
    if config.title.trim().is_empty() {
        log::warn!("Config has an empty window title.");
    }
    Ok(())
}
