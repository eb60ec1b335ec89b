use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::SmoothingMode;
use crate::stroke::StrokeStyle;

/// Line widths offered by the width picker.
pub const LINE_WIDTH_PRESETS: [(&str, f64); 3] = [("Thin", 2.0), ("Medium", 5.0), ("Thick", 10.0)];

/// Errors that can occur while loading a drawing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub width: f64,
    pub color: String,
    pub preview_color: String,
    pub preview_opacity: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: "#000000".to_owned(),
            preview_color: "#333333".to_owned(),
            preview_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraserConfig {
    /// Hit radius of the eraser, in canvas pixels.
    pub width: f64,
    pub preview_color: String,
    pub preview_opacity: f32,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            preview_color: "#ff9999".to_owned(),
            preview_opacity: 0.8,
        }
    }
}

/// Pixel size of the drawing surface; also the exported document size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Everything the canvas needs from its host: pen, eraser, smoothing and
/// surface size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub stroke: StrokeConfig,
    pub eraser: EraserConfig,
    pub smoothing: SmoothingMode,
    pub surface: SurfaceSize,
}

impl DrawingConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_positive("stroke.width", self.stroke.width)?;
        check_positive("eraser.width", self.eraser.width)?;
        check_positive("surface.width", self.surface.width)?;
        check_positive("surface.height", self.surface.height)?;
        for (name, color) in [
            ("stroke.color", &self.stroke.color),
            ("stroke.preview_color", &self.stroke.preview_color),
            ("eraser.preview_color", &self.eraser.preview_color),
        ] {
            if parse_color(color).is_none() {
                return Err(ConfigError::Invalid(format!("{name} is not a hex color: {color:?}")));
            }
        }
        Ok(())
    }

    /// Style applied to newly started strokes.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.stroke.width,
            color: parse_color(&self.stroke.color).unwrap_or(Color32::BLACK),
        }
    }

    pub fn stroke_preview_color(&self) -> Color32 {
        parse_color(&self.stroke.preview_color)
            .unwrap_or(Color32::DARK_GRAY)
            .gamma_multiply(self.stroke.preview_opacity)
    }

    pub fn eraser_preview_color(&self) -> Color32 {
        parse_color(&self.eraser.preview_color)
            .unwrap_or(Color32::LIGHT_RED)
            .gamma_multiply(self.eraser.preview_opacity)
    }
}

fn check_positive(name: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(hex: &str) -> Option<Color32> {
    Color32::from_hex(hex.trim()).ok()
}

/// `#rrggbb`, dropping alpha.
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DrawingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stroke_style().color, Color32::BLACK);
        assert_eq!(config.eraser.width, 10.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DrawingConfig::from_json(r##"{"stroke": {"width": 5.0, "color": "#ff0000"}}"##).unwrap();
        assert_eq!(config.stroke.width, 5.0);
        assert_eq!(config.stroke_style().color, Color32::from_rgb(255, 0, 0));
        assert_eq!(config.stroke.preview_color, "#333333");
        assert_eq!(config.smoothing, SmoothingMode::Bezier);
    }

    #[test]
    fn test_smoothing_mode_from_json() {
        let config = DrawingConfig::from_json(r#"{"smoothing": "polyline"}"#).unwrap();
        assert_eq!(config.smoothing, SmoothingMode::Polyline);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            DrawingConfig::from_json(r#"{"eraser": {"width": 0.0}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DrawingConfig::from_json(r#"{"stroke": {"color": "black"}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(DrawingConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = DrawingConfig::default();
        config.surface = SurfaceSize { width: 1024.0, height: 768.0 };
        let json = config.to_json().unwrap();
        assert_eq!(DrawingConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(color_to_hex(Color32::from_rgb(255, 153, 153)), "#ff9999");
        assert_eq!(parse_color("#ff9999"), Some(Color32::from_rgb(255, 153, 153)));
        assert_eq!(parse_color("nope"), None);
    }
}
