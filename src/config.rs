//! Editor configuration
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! defaults below.
//!
//! ```toml
//! log_filter = "info"
//! default_scene_name = "Untitled"
//!
//! [viewport]
//! origin = [480.0, 480.0]
//! scale = 1.0
//! ```

use std::fs;
use std::path::Path;

use cgmath::vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gfx::Viewport;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub origin: [f32; 2],
    pub scale: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            origin: [480.0, 480.0],
            scale: 1.0,
        }
    }
}

impl ViewportConfig {
    pub fn to_viewport(&self) -> Viewport {
        Viewport::new(vec2(self.origin[0], self.origin[1]), self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// `env_logger` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Name given to scenes created with [`crate::app::EditorApp::new_scene`]
    pub default_scene_name: String,
    pub viewport: ViewportConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            default_scene_name: "Untitled".to_string(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.viewport.scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport.scale must be positive, got {}",
                scale
            )));
        }
        if self.default_scene_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_scene_name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
