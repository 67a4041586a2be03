use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::physics::PhysicsConfig;
use crate::viewport::{CameraConfig, LabelStyle, NodeSizing};

/// Viewer settings, read from an optional TOML file. Every key has a default,
/// so a file only needs the values it changes.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub nodes: NodeSizing,
    pub labels: LabelStyle,
    pub physics: PhysicsConfig,
}

pub fn read_config(path: &Path) -> Result<ViewerConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Falls back to defaults when no path is given or the file is unusable.
pub fn load_config(path: Option<&Path>) -> ViewerConfig {
    let Some(path) = path else {
        return ViewerConfig::default();
    };

    match read_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded viewer config");
            config
        }
        Err(error) => {
            warn!("using default viewer config: {error:#}");
            ViewerConfig::default()
        }
    }
}
