//! Studio configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use crate::error::{StudioError, StudioResult};
use crate::history::DEFAULT_HISTORY_CAP;
use crate::tools::BrushProperties;
use serde::{Deserialize, Serialize};
use std::path::Path;
use sumi_core::{Color, Scene};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Paper color. The eraser paints with it.
    pub background: Color,
    pub history_cap: usize,
    /// Resolution multiplier for PNG export.
    pub export_multiplier: f32,
    pub brush: BrushProperties,
    pub color: Color,
    /// Seal edge length in pixels.
    pub seal_size: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            background: Scene::DEFAULT_BACKGROUND,
            history_cap: DEFAULT_HISTORY_CAP,
            export_multiplier: 2.0,
            brush: BrushProperties::default(),
            color: Color::BLACK,
            seal_size: 200,
        }
    }
}

impl StudioConfig {
    pub fn from_json(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json).map_err(|e| StudioError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("config: loaded {}", path.display());
        Self::from_json(&json)
    }

    /// An empty scene of the configured size and paper.
    pub fn blank_scene(&self) -> Scene {
        Scene::new(self.canvas_width, self.canvas_height, self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(StudioConfig::from_json("{}").unwrap(), StudioConfig::default());
    }

    #[test]
    fn partial_overrides() {
        let cfg = StudioConfig::from_json(
            r##"{ "canvasWidth": 1024, "historyCap": 10, "brush": { "size": 4 }, "color": "#8b4513" }"##,
        )
        .unwrap();
        assert_eq!(cfg.canvas_width, 1024.0);
        assert_eq!(cfg.canvas_height, 600.0);
        assert_eq!(cfg.history_cap, 10);
        assert_eq!(cfg.brush.size, 4.0);
        assert_eq!(cfg.brush.bleed_factor, 0.5);
        assert_eq!(cfg.color.to_hex(), "#8B4513");
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            StudioConfig::from_json(r#"{ "historyCap": "lots" }"#),
            Err(StudioError::Config(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StudioConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
