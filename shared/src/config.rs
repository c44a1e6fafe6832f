use serde::Deserialize;
use thiserror::Error;

use crate::Size;

// Browsers refuse canvases much larger than this.
const MAX_CANVAS_SIDE: f64 = 32_767.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON for the editor: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("{field} must be a finite number in range, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("defaultColor must not be empty")]
    EmptyColor,
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Tunables of one editor instance. Every field has a default, so an
/// embedding only spells out what it wants to change.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub pen_width: f64,
    pub eraser_radius: f64,
    pub figure_size: f64,
    pub double_press_ms: f64,
    pub default_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 900.0,
            canvas_height: 500.0,
            pen_width: 3.0,
            eraser_radius: 20.0,
            figure_size: 80.0,
            double_press_ms: 300.0,
            default_color: "black".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parses overrides and checks every tunable is usable.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvasWidth", self.canvas_width)?;
        positive("canvasHeight", self.canvas_height)?;
        if self.canvas_width > MAX_CANVAS_SIDE || self.canvas_height > MAX_CANVAS_SIDE {
            return Err(ConfigError::OutOfRange {
                field: "canvasWidth/canvasHeight",
                value: self.canvas_width.max(self.canvas_height),
            });
        }
        positive("penWidth", self.pen_width)?;
        positive("figureSize", self.figure_size)?;
        non_negative("eraserRadius", self.eraser_radius)?;
        non_negative("doublePressMs", self.double_press_ms)?;
        if self.default_color.trim().is_empty() {
            return Err(ConfigError::EmptyColor);
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn figure_extent(&self) -> Size {
        Size::new(self.figure_size, self.figure_size)
    }
}
