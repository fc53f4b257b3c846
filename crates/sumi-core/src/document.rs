//! Scene ⇄ JSON.
//!
//! The JSON form is what history snapshots hold and what a project file
//! embeds under `canvas`. Every object keeps its `layerId` tag across the
//! round trip.

use crate::error::{CoreError, CoreResult};
use crate::model::Scene;
use std::collections::HashSet;

/// Serialize a scene to compact JSON.
pub fn emit_scene(scene: &Scene) -> CoreResult<String> {
    Ok(serde_json::to_string(scene)?)
}

/// Parse scene JSON, rejecting documents that reuse an object id.
#[must_use = "parsing result should be used"]
pub fn parse_scene(json: &str) -> CoreResult<Scene> {
    let scene: Scene = serde_json::from_str(json)?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Check the invariants a deserialized scene must satisfy.
pub fn validate_scene(scene: &Scene) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(scene.objects.len());
    for obj in &scene.objects {
        if !seen.insert(obj.id) {
            return Err(CoreError::DuplicateObject(obj.id.as_str().to_string()));
        }
    }
    Ok(())
}
