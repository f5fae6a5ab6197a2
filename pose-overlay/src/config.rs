//! Overlay configuration, set from JavaScript as JSON

use crate::error::ConfigError;
use crate::renderer::SkeletonStyle;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/analyze";

/// Runtime options. Every field is optional in the JSON form.
///
/// ```json
/// { "endpoint": "/api/analyze", "style": { "bone_color": "#00ffff", "joint_radius": 4 } }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// URL the video is POSTed to
    pub endpoint: String,
    pub style: SkeletonStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            style: SkeletonStyle::default(),
        }
    }
}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: OverlayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                field: "endpoint",
                reason: "must not be empty".to_string(),
            });
        }
        self.style.validate()
    }
}
