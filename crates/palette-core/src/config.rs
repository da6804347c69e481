//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```rust
//! use palette_core::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{ "width": 8, "height": 4 }"#).unwrap();
//! assert_eq!(config.width, 8);
//! assert_eq!(config.history_limit, 1000);
//! ```

use crate::color::Color;
use crate::error::ConfigError;
use crate::geometry::Dimensions;
use crate::history::DEFAULT_MAX_DEPTH;
use crate::tool::Tool;
use serde::{Deserialize, Serialize};

/// Initial grid and history settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial grid width.
    pub width: usize,
    /// Initial grid height.
    pub height: usize,
    /// Color of new, cleared and vacated cells.
    pub background: Color,
    /// Initial paint color.
    pub default_color: Color,
    /// Initial tool.
    pub default_tool: Tool,
    /// Maximum undo depth.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            background: Color::WHITE,
            default_color: Color::BLACK,
            default_tool: Tool::Paint,
            history_limit: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject unusable grid sizes and a zero history limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions().validate().is_err() {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1 and addressable, got {}x{}",
                self.width, self.height
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial grid size.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}
