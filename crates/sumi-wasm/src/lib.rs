//! WASM bridge for Sumi: exposes the studio to the browser page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM
//! (toolbar, file dialogs, downloads) and forwards pointer, key and
//! animation-frame events here; every frame it calls `tick` then `render`.

mod console;

use sumi_core::LayerId;
use sumi_editor::input::Modifiers;
use sumi_editor::project::{png_file_name, project_file_name};
use sumi_editor::tools::ToolKind;
use sumi_editor::{Studio, StudioConfig};
use sumi_render::{SealEffect, SealShape};
use tiny_skia::Pixmap;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, ImageData};

/// The browser-facing studio. One per `<canvas>`.
#[wasm_bindgen]
pub struct SumiCanvas {
    studio: Studio,
    /// Display surface, sized to the viewport.
    frame: Pixmap,
}

#[wasm_bindgen]
impl SumiCanvas {
    /// A studio with default settings and paper of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<SumiCanvas, JsError> {
        let config = StudioConfig {
            canvas_width: width as f32,
            canvas_height: height as f32,
            ..StudioConfig::default()
        };
        Self::from_config(config)
    }

    /// A studio configured from JSON (see `StudioConfig`).
    pub fn with_config(config_json: &str) -> Result<SumiCanvas, JsError> {
        Self::from_config(StudioConfig::from_json(config_json)?)
    }

    fn from_config(config: StudioConfig) -> Result<SumiCanvas, JsError> {
        console::init(log::LevelFilter::Info);
        let frame = surface(config.canvas_width, config.canvas_height)?;
        Ok(Self {
            studio: Studio::new(config),
            frame,
        })
    }

    /// Change how chatty the console logger is (`"debug"`, `"warn"`, ...).
    pub fn set_log_level(level: &str) {
        log::set_max_level(console::parse_level(level));
    }

    // ─── Frames ──────────────────────────────────────────────────────────

    /// Advance one animation frame. Returns the number of live particles,
    /// so the page can tell when it may stop animating.
    pub fn tick(&mut self, elapsed_ms: f32) -> usize {
        self.studio.tick(elapsed_ms);
        self.studio.particles().len()
    }

    /// Paint the scene and particles onto a 2D context.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        self.studio.render(&mut self.frame);
        let rgba = rgba_bytes(&self.frame);
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            wasm_bindgen::Clamped(&rgba[..]),
            self.frame.width(),
            self.frame.height(),
        )?;
        ctx.put_image_data(&image, 0.0, 0.0)
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.studio.pointer_down(x, y, pressure, mods);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.studio.pointer_move(x, y, pressure, mods);
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool, meta: bool) {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.studio.pointer_up(x, y, mods);
    }

    /// Handle a key press. Returns JSON:
    /// `{"handled":bool, "action":"<name>", "tool":"<name>"}`
    ///
    /// `save_project` and `load_project` are left to the page, which owns
    /// the file dialogs.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let mods = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let action = self.studio.handle_key(key, mods);
        serde_json::json!({
            "handled": action.is_some(),
            "action": action.map_or("none", |a| a.as_str()),
            "tool": self.studio.tool().as_str(),
        })
        .to_string()
    }

    // ─── Tool & brush ────────────────────────────────────────────────────

    pub fn set_tool(&mut self, name: &str) -> Result<(), JsError> {
        Ok(self.studio.set_tool_by_name(name)?)
    }

    pub fn tool(&self) -> String {
        self.studio.tool().to_string()
    }

    pub fn set_color(&mut self, css: &str) -> Result<(), JsError> {
        Ok(self.studio.set_color(css)?)
    }

    pub fn color(&self) -> String {
        self.studio.color().to_hex()
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.studio.set_brush_size(size);
    }

    pub fn set_brush_opacity(&mut self, opacity: f32) {
        self.studio.set_brush_opacity(opacity);
    }

    pub fn set_bleed_factor(&mut self, bleed: f32) {
        self.studio.set_bleed_factor(bleed);
    }

    pub fn set_texture_strength(&mut self, strength: f32) {
        self.studio.set_texture_strength(strength);
    }

    /// Current brush properties as camelCase JSON.
    pub fn brush_json(&self) -> String {
        serde_json::to_string(self.studio.brush()).unwrap_or_else(|_| "{}".to_string())
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.studio.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.studio.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.studio.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.studio.can_redo()
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// Layer panel state: `{"active":N, "layers":[{id,name,visible,objects}]}`
    pub fn layers_json(&self) -> String {
        let layers = self.studio.layers().snapshot(self.studio.scene());
        serde_json::json!({
            "active": self.studio.layers().active(),
            "layers": layers,
        })
        .to_string()
    }

    pub fn add_layer(&mut self) -> LayerId {
        self.studio.add_layer()
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> Result<(), JsError> {
        Ok(self.studio.set_active_layer(id)?)
    }

    /// Returns the layer's new visibility.
    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<bool, JsError> {
        Ok(self.studio.toggle_layer_visibility(id)?)
    }

    pub fn delete_layer(&mut self) -> Result<(), JsError> {
        Ok(self.studio.delete_layer()?)
    }

    /// Returns the layer that received the objects.
    pub fn merge_layer(&mut self) -> Result<LayerId, JsError> {
        Ok(self.studio.merge_layer()?)
    }

    // ─── Seals ───────────────────────────────────────────────────────────

    /// Font used for seal text (TTF/OTF bytes).
    pub fn set_seal_font(&mut self, bytes: Vec<u8>) -> Result<(), JsError> {
        Ok(self.studio.set_seal_font(bytes)?)
    }

    pub fn has_seal_font(&self) -> bool {
        self.studio.has_seal_font()
    }

    /// Design and store a seal. Returns its PNG data URI for the preview.
    pub fn design_seal(&mut self, text: &str, shape: &str, effect: &str) -> Result<String, JsError> {
        let shape: SealShape = shape.parse().map_err(|e: String| JsError::new(&e))?;
        let effect: SealEffect = effect.parse().map_err(|e: String| JsError::new(&e))?;
        self.studio.design_seal(text, shape, effect)?;
        Ok(self
            .studio
            .stored_seal()
            .map(|seal| seal.src.clone())
            .unwrap_or_default())
    }

    /// Stamp the stored seal. Returns the new object's id.
    pub fn apply_seal(&mut self) -> Result<String, JsError> {
        Ok(self.studio.apply_seal()?.to_string())
    }

    // ─── Files ───────────────────────────────────────────────────────────

    pub fn save_project(&mut self) -> Result<String, JsError> {
        Ok(self.studio.save_project()?)
    }

    pub fn load_project(&mut self, json: &str) -> Result<(), JsError> {
        Ok(self.studio.load_project(json)?)
    }

    /// The scene alone as JSON, for hosts that keep their own store.
    pub fn scene_json(&self) -> Result<String, JsError> {
        Ok(self.studio.scene_json()?)
    }

    /// Full-resolution PNG as a data URI, ready for a download link.
    pub fn export_png_data_uri(&self) -> Result<String, JsError> {
        Ok(self.studio.export_png_data_uri()?)
    }

    pub fn project_file_name() -> String {
        project_file_name()
    }

    pub fn png_file_name() -> String {
        png_file_name()
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.studio.zoom(sumi_core::viewport::ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.studio.zoom(sumi_core::viewport::ZOOM_OUT_FACTOR);
    }

    pub fn reset_zoom(&mut self) {
        self.studio.reset_zoom();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.studio.pan(dx, dy);
    }

    pub fn zoom_level(&self) -> f32 {
        self.studio.viewport().zoom
    }

    /// Fit the canvas into its container. Returns `[width, height]` for
    /// the page to apply to the element.
    pub fn fit_to_container(&mut self, width: f32, height: f32) -> Result<Vec<f32>, JsError> {
        let (w, h) = self.studio.fit_to_container(width, height);
        self.frame = surface(w, h)?;
        Ok(vec![w, h])
    }
}

fn surface(width: f32, height: f32) -> Result<Pixmap, JsError> {
    let (w, h) = (width.round() as u32, height.round() as u32);
    Pixmap::new(w, h).ok_or_else(|| JsError::new(&format!("cannot allocate a {w}x{h} canvas")))
}

/// Straight-alpha RGBA bytes, the layout `ImageData` expects.
fn rgba_bytes(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Tool names the toolbar may pass to `set_tool`.
#[wasm_bindgen]
pub fn tool_names() -> Vec<String> {
    [ToolKind::Brush, ToolKind::Pencil, ToolKind::Eraser, ToolKind::Select]
        .iter()
        .map(|t| t.as_str().to_string())
        .collect()
}
