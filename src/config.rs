use std::path::PathBuf;

use eframe::egui::Color32;

/// Demo configuration, read from `config.json` in the working directory.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mask fill color as a hex string, e.g. "#bbb" or "#1a2b3c".
    pub mask_color: String,
    /// Brush radius in pixels.
    pub brush_size: f32,
    /// Fraction of erased pixels required to reveal the prize.
    pub ratio: f32,
    /// Image painted below the mask; a checkerboard when absent.
    pub prize_image: Option<PathBuf>,
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mask_color: "#bbb".into(),
            brush_size: 16.0,
            ratio: 0.5,
            prize_image: None,
            window: Default::default(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub viewport: emath::Vec2,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            viewport: emath::Vec2::new(480.0, 360.0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid mask color {0:?}, expected a hex string like #bbb")]
    InvalidColor(String),
}

impl Config {
    pub fn mask_color(&self) -> Result<Color32, ConfigError> {
        Color32::from_hex(&self.mask_color)
            .map_err(|_| ConfigError::InvalidColor(self.mask_color.clone()))
    }
}
