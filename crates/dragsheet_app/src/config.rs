//! dragsheet configuration file handling

use anyhow::{Context, Result};
use dragsheet_animation::SpringConfig;
use dragsheet_core::{Color, FixedViewport};
use dragsheet_widgets::{DragModalConfig, GestureConfig, SheetSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "dragsheet.toml";

/// Top-level configuration (dragsheet.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub modal: ModalConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub gesture: GestureSection,
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// Initial viewport metrics
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Platform safe-area top inset; the 44pt fallback applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_area_top: Option<f32>,
}

fn default_width() -> f32 {
    390.0
}

fn default_height() -> f32 {
    844.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            safe_area_top: None,
        }
    }
}

/// Sheet appearance and dismiss behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModalConfig {
    #[serde(default = "default_size")]
    pub size: SheetSize,
    /// Sheet fill as 0xRRGGBB
    #[serde(default = "default_background")]
    pub background: u32,
    #[serde(default = "default_max_backdrop_opacity")]
    pub max_backdrop_opacity: f32,
    #[serde(default = "default_dismiss_ratio")]
    pub dismiss_ratio: f32,
}

fn default_size() -> SheetSize {
    SheetSize::Fullscreen
}

fn default_background() -> u32 {
    0xE6E6E6
}

fn default_max_backdrop_opacity() -> f32 {
    0.5
}

fn default_dismiss_ratio() -> f32 {
    2.0 / 3.0
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            background: default_background(),
            max_backdrop_opacity: default_max_backdrop_opacity(),
            dismiss_ratio: default_dismiss_ratio(),
        }
    }
}

/// Spring shared by the sheet offset and the backdrop fade
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_initial_velocity")]
    pub initial_velocity: f32,
}

fn default_stiffness() -> f32 {
    300.0
}

fn default_damping() -> f32 {
    30.0
}

fn default_initial_velocity() -> f32 {
    10.0
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            initial_velocity: default_initial_velocity(),
        }
    }
}

/// Drag recognition tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GestureSection {
    #[serde(default = "default_min_drag_distance")]
    pub min_drag_distance: f32,
    #[serde(default = "default_deceleration_rate")]
    pub deceleration_rate: f32,
    #[serde(default = "default_velocity_window_ms")]
    pub velocity_window_ms: u64,
}

fn default_min_drag_distance() -> f32 {
    10.0
}

fn default_deceleration_rate() -> f32 {
    0.998
}

fn default_velocity_window_ms() -> u64 {
    100
}

impl Default for GestureSection {
    fn default() -> Self {
        Self {
            min_drag_distance: default_min_drag_distance(),
            deceleration_rate: default_deceleration_rate(),
            velocity_window_ms: default_velocity_window_ms(),
        }
    }
}

/// Headless scenario clock
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeadlessConfig {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file, or from `dragsheet.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No configuration found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Viewport the host starts with
    pub fn viewport(&self) -> FixedViewport {
        let viewport = FixedViewport::new(self.viewport.width, self.viewport.height);
        match self.viewport.safe_area_top {
            Some(inset) => viewport.with_safe_area_top(inset),
            None => viewport,
        }
    }

    /// Widget configuration for the modal
    pub fn modal_config(&self) -> DragModalConfig {
        DragModalConfig {
            background: Color::from_hex(self.modal.background),
            size: self.modal.size,
            spring: SpringConfig::interpolating(self.animation.stiffness, self.animation.damping),
            initial_velocity: self.animation.initial_velocity,
            max_backdrop_opacity: self.modal.max_backdrop_opacity.clamp(0.0, 1.0),
            dismiss_ratio: self.modal.dismiss_ratio,
            gesture: GestureConfig {
                min_drag_distance: self.gesture.min_drag_distance,
                deceleration_rate: self.gesture.deceleration_rate,
                velocity_window_ms: self.gesture.velocity_window_ms,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.viewport.width, 390.0);
        assert_eq!(config.modal.size, SheetSize::Fullscreen);
        assert_eq!(config.animation.stiffness, 300.0);
        assert_eq!(config.gesture.velocity_window_ms, 100);
        assert_eq!(config.headless.tick_ms, 16);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml_str(
            r#"
            [viewport]
            height = 1000.0
            safe_area_top = 47.0

            [modal]
            size = "small"
            background = 0xFFFFFF

            [animation]
            damping = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.viewport.width, 390.0);
        assert_eq!(config.viewport.height, 1000.0);
        assert_eq!(config.modal.size, SheetSize::Small);
        assert_eq!(config.animation.stiffness, 300.0);

        let modal = config.modal_config();
        assert_eq!(modal.background, Color::WHITE);
        assert_eq!(modal.spring.damping, 20.0);
        assert_eq!(modal.initial_velocity, 10.0);
        assert_eq!(config.viewport().safe_area_top, Some(47.0));
    }

    #[test]
    fn test_custom_size() {
        let config = AppConfig::from_toml_str(
            r#"
            [modal]
            size = { custom = 321.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.modal.size, SheetSize::Custom(321.0));
    }

    #[test]
    fn test_unknown_size_is_rejected() {
        let result = AppConfig::from_toml_str("[modal]\nsize = \"huge\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[modal]"));
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = AppConfig::load(Path::new("does/not/exist.toml"));
        assert!(result.is_err());
    }
}
