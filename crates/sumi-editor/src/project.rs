//! Project files.
//!
//! ```json
//! { "version": "1.0", "canvas": { …scene… }, "layers": [ … ], "timestamp": "…" }
//! ```
//!
//! `canvas` is the scene JSON with every object's `layerId`. The layer list
//! carries each layer's member ids for readers; they are recomputed from
//! the object tags on load.

use crate::error::StudioResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sumi_core::document::validate_scene;
use sumi_core::{Layer, LayerStack, Scene};

pub const PROJECT_VERSION: &str = "1.0";
const FILE_STEM: &str = "korean-painting";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: String,
    pub canvas: Scene,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub timestamp: String,
}

impl ProjectFile {
    /// Capture the document as of now.
    pub fn capture(scene: &Scene, layers: &LayerStack) -> Self {
        Self::capture_at(scene, layers, Utc::now())
    }

    pub fn capture_at(scene: &Scene, layers: &LayerStack, at: DateTime<Utc>) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            canvas: scene.clone(),
            layers: layers.snapshot(scene),
            timestamp: at.to_rfc3339(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> StudioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a project file.
    pub fn from_json(json: &str) -> StudioResult<Self> {
        let project: ProjectFile = serde_json::from_str(json)?;
        validate_scene(&project.canvas)?;
        if project.version != PROJECT_VERSION {
            log::warn!(
                "project: version {:?} (expected {PROJECT_VERSION}), loading anyway",
                project.version
            );
        }
        Ok(project)
    }

    /// Split into the scene and a layer stack that covers every tag in it.
    ///
    /// An empty layer list becomes a fresh main layer. Objects follow their
    /// layer when ids are renumbered; objects tagged with a layer the file
    /// does not list are moved to the base layer.
    pub fn into_document(self) -> (Scene, LayerStack) {
        let mut scene = self.canvas;
        let (mut layers, orphans) = LayerStack::adopt(self.layers, &mut scene);
        if orphans > 0 {
            log::warn!("project: {orphans} objects on missing layers moved to layer 0");
        }
        layers.sync_membership(&scene);
        (scene, layers)
    }
}

/// `korean-painting-<millis>.<ext>`
pub fn suggested_file_name(extension: &str, at: DateTime<Utc>) -> String {
    format!("{FILE_STEM}-{}.{extension}", at.timestamp_millis())
}

pub fn project_file_name() -> String {
    suggested_file_name("json", Utc::now())
}

pub fn png_file_name() -> String {
    suggested_file_name("png", Utc::now())
}
