//! Behaviour and layout constants, loadable from TOML.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Tunable constants of the graph widgets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Total padding added to a group's bounds; half of it on each side.
    pub group_margin: f32,
    /// Opacity of the ghost pin and ghost link shown while dragging.
    pub ghost_alpha: u8,
    /// Side of a pin figure.
    pub pin_size: f32,
    pub node_width: f32,
    pub header_height: f32,
    pub pin_row_height: f32,
    /// Distance between a pin centre and the node edge.
    pub pin_margin: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            group_margin: 60.0,
            ghost_alpha: 128,
            pin_size: 10.0,
            node_width: 180.0,
            header_height: 24.0,
            pin_row_height: 20.0,
            pin_margin: 12.0,
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, GraphError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, GraphError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    pub fn save(&self, path: &Path) -> Result<(), GraphError> {
        self.validate()?;
        fs::write(path, self.to_toml_string()?)?;
        info!("Graph config saved to {}", path.display());
        Ok(())
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load graph config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        let sizes = [
            ("group_margin", self.group_margin),
            ("pin_size", self.pin_size),
            ("node_width", self.node_width),
            ("header_height", self.header_height),
            ("pin_row_height", self.pin_row_height),
            ("pin_margin", self.pin_margin),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidArgument(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
