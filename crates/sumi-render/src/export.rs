//! Export: scene → PNG bytes or data URI.
//!
//! Particles are transient and never exported; only scene objects are.

use crate::data_uri::encode_png_data_uri;
use crate::error::{RenderError, RenderResult};
use crate::paint::Painter;
use sumi_core::model::Scene;
use tiny_skia::{Pixmap, Transform};

/// Options for PNG export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Resolution multiplier applied to the paper size.
    pub multiplier: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { multiplier: 2.0 }
    }
}

/// Rasterize the scene at `multiplier` × paper size.
pub fn render_scene(scene: &Scene, multiplier: f32) -> RenderResult<Pixmap> {
    let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        1.0
    };
    let width = (scene.width * multiplier).round().max(0.0) as u32;
    let height = (scene.height * multiplier).round().max(0.0) as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
    Painter::new().paint_scene(
        &mut pixmap,
        scene,
        Transform::from_scale(multiplier, multiplier),
    );
    Ok(pixmap)
}

/// Render and encode as PNG.
pub fn export_png(scene: &Scene, options: ExportOptions) -> RenderResult<Vec<u8>> {
    let pixmap = render_scene(scene, options.multiplier)?;
    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    log::info!(
        "export: {}x{} PNG, {} bytes",
        pixmap.width(),
        pixmap.height(),
        png.len()
    );
    Ok(png)
}

/// Render and encode as a `data:image/png;base64,` URI.
pub fn export_png_data_uri(scene: &Scene, options: ExportOptions) -> RenderResult<String> {
    export_png(scene, options).map(|png| encode_png_data_uri(&png))
}
