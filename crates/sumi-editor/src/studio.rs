//! The studio controller.
//!
//! Owns the scene host, layers, history, bleed simulator and seal designer,
//! and exposes the commands a host page binds to its toolbar, pointer and
//! keyboard events, and animation frames. Pointer coordinates come in as
//! canvas-element pixels and are mapped through the viewport.
//!
//! Undoable commands end with `save_state`: finished strokes, finished
//! drags, layer delete/merge, seal stamps and project loads.

use crate::bleed::{DwellTimer, InkBleed};
use crate::config::StudioConfig;
use crate::error::{StudioError, StudioResult};
use crate::history::{History, Snapshot};
use crate::host::{SceneHost, SceneMutation};
use crate::input::{InputEvent, Modifiers};
use crate::project::ProjectFile;
use crate::seal::{SealDesigner, StoredSeal};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{BrushProperties, SelectTool, StrokeSettings, StrokeTool, Tool, ToolContext, ToolKind};
use sumi_core::id::ObjectId;
use sumi_core::model::*;
use sumi_core::{Color, LayerStack, Particle, Viewport};
use sumi_render::{ExportOptions, Painter, SealEffect, SealShape, SealSpec, hit_test, paint_particles};
use tiny_skia::{Pixmap, Transform};

/// Screen pixels of slack when picking thin strokes.
const PICK_TOLERANCE_PX: f32 = 4.0;

pub struct Studio {
    config: StudioConfig,
    host: SceneHost,
    layers: LayerStack,
    history: History,
    bleed: InkBleed,
    dwell: DwellTimer,
    seal: SealDesigner,
    painter: Painter,
    tool: ToolKind,
    stroke_tool: StrokeTool,
    select_tool: SelectTool,
    color: Color,
    brush: BrushProperties,
    drawing: bool,
    last_point: Option<(f32, f32)>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

impl Studio {
    pub fn new(config: StudioConfig) -> Self {
        Self::with_bleed(config, InkBleed::new())
    }

    /// A studio whose bleed is reproducible.
    pub fn seeded(config: StudioConfig, seed: u64) -> Self {
        Self::with_bleed(config, InkBleed::seeded(seed))
    }

    fn with_bleed(config: StudioConfig, bleed: InkBleed) -> Self {
        let mut studio = Self {
            host: SceneHost::new(config.blank_scene()),
            layers: LayerStack::new(),
            history: History::new(config.history_cap),
            bleed,
            dwell: DwellTimer::new(),
            seal: SealDesigner::new(),
            painter: Painter::new(),
            tool: ToolKind::Brush,
            stroke_tool: StrokeTool::new(ToolKind::Brush),
            select_tool: SelectTool::new(),
            color: config.color,
            brush: config.brush,
            drawing: false,
            last_point: None,
            config,
        };
        studio.save_state();
        log::info!(
            "studio: {}x{} paper, history cap {}",
            studio.host.scene.width,
            studio.host.scene.height,
            studio.history.cap()
        );
        studio
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.host.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.host.viewport
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn particles(&self) -> &[Particle] {
        self.bleed.particles()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn brush(&self) -> &BrushProperties {
        &self.brush
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.select_tool.selected
    }

    pub fn stored_seal(&self) -> Option<&StoredSeal> {
        self.seal.stored()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn dwell_ms(&self) -> f32 {
        self.dwell.dwell_ms()
    }

    // ─── Tool & brush ────────────────────────────────────────────────────

    /// Switch tools. A stroke in progress is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.tool = tool;
        self.stroke_tool = StrokeTool::new(tool);
        log::debug!("studio: tool {tool}");
    }

    pub fn set_tool_by_name(&mut self, name: &str) -> StudioResult<()> {
        let tool = name.parse().map_err(StudioError::UnknownTool)?;
        self.set_tool(tool);
        Ok(())
    }

    /// Any CSS color the core parser accepts (`#rgb`, `rgba(...)`, ...).
    pub fn set_color(&mut self, css: &str) -> StudioResult<()> {
        self.color = Color::parse(css).ok_or_else(|| StudioError::InvalidColor(css.to_string()))?;
        Ok(())
    }

    pub fn set_brush(&mut self, brush: BrushProperties) {
        self.brush = BrushProperties {
            size: brush.size.max(0.0),
            opacity: brush.opacity.clamp(0.0, 1.0),
            bleed_factor: brush.bleed_factor.clamp(0.0, 1.0),
            texture_strength: brush.texture_strength.clamp(0.0, 1.0),
        };
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.set_brush(BrushProperties { size, ..self.brush });
    }

    pub fn set_brush_opacity(&mut self, opacity: f32) {
        self.set_brush(BrushProperties { opacity, ..self.brush });
    }

    pub fn set_bleed_factor(&mut self, bleed_factor: f32) {
        self.set_brush(BrushProperties {
            bleed_factor,
            ..self.brush
        });
    }

    pub fn set_texture_strength(&mut self, texture_strength: f32) {
        self.set_brush(BrushProperties {
            texture_strength,
            ..self.brush
        });
    }

    /// The stroke the current tool would lay down.
    pub fn stroke_settings(&self) -> Option<StrokeSettings> {
        StrokeSettings::for_tool(self.tool, &self.brush, self.color, self.host.scene.background)
    }

    // ─── Pointer & frames ────────────────────────────────────────────────

    pub fn pointer_down(&mut self, sx: f32, sy: f32, pressure: f32, modifiers: Modifiers) {
        let (x, y) = self.host.viewport.screen_to_scene(sx, sy);
        self.drawing = true;
        self.last_point = Some((x, y));
        self.dwell.start();

        let event = InputEvent::from_pointer_down(x, y, pressure, modifiers);
        let mutations = self.dispatch(&event);
        self.commit(mutations);

        if self.tool == ToolKind::Select {
            self.activate_selection_layer();
        }
    }

    pub fn pointer_move(&mut self, sx: f32, sy: f32, pressure: f32, modifiers: Modifiers) {
        let (x, y) = self.host.viewport.screen_to_scene(sx, sy);
        if self.drawing && self.tool == ToolKind::Brush {
            if let Some(prev) = self.last_point {
                self.bleed.bleed_motion(
                    prev,
                    (x, y),
                    self.brush.bleed_factor,
                    self.dwell.dwell_ms(),
                    self.color,
                );
            }
            self.last_point = Some((x, y));
        }

        let event = InputEvent::from_pointer_move(x, y, pressure, modifiers);
        let mutations = self.dispatch(&event);
        self.commit(mutations);
    }

    pub fn pointer_up(&mut self, sx: f32, sy: f32, modifiers: Modifiers) {
        let (x, y) = self.host.viewport.screen_to_scene(sx, sy);
        let event = InputEvent::from_pointer_up(x, y, modifiers);
        let mutations = self.dispatch(&event);
        let finished_stroke = self.commit(mutations);
        let finished_drag = self.tool == ToolKind::Select && self.select_tool.take_moved();

        if finished_stroke || finished_drag {
            self.save_state();
        }
        self.drawing = false;
        self.last_point = None;
        self.dwell.stop();
    }

    /// One animation frame: advance the dwell timer and the particles.
    pub fn tick(&mut self, elapsed_ms: f32) {
        self.dwell.tick(elapsed_ms);
        self.bleed.update();
    }

    fn dispatch(&mut self, event: &InputEvent) -> Vec<SceneMutation> {
        let ctx = ToolContext {
            hit: self.pick(event),
            layer: self.layers.active(),
            stroke: self.stroke_settings(),
        };
        match self.tool {
            ToolKind::Select => self.select_tool.handle(event, &ctx),
            _ => self.stroke_tool.handle(event, &ctx),
        }
    }

    fn pick(&self, event: &InputEvent) -> Option<ObjectId> {
        if self.tool != ToolKind::Select || !matches!(event, InputEvent::PointerDown { .. }) {
            return None;
        }
        let (x, y) = event.position();
        hit_test(&self.host.scene, x, y, PICK_TOLERANCE_PX / self.host.viewport.zoom)
    }

    /// Apply tool output. New strokes bleed if the tool allows it.
    /// Returns whether a stroke was added.
    fn commit(&mut self, mutations: Vec<SceneMutation>) -> bool {
        let mut added_stroke = false;
        for mutation in mutations {
            if let SceneMutation::AddObject { object } = &mutation
                && let ObjectKind::Path { commands, .. } = &object.kind
            {
                added_stroke = true;
                if self.stroke_settings().is_some_and(|s| s.bleeds) {
                    self.bleed.bleed_stroke(
                        commands,
                        self.brush.bleed_factor,
                        self.dwell.dwell_ms(),
                        self.color,
                    );
                }
            }
            self.host.apply(mutation);
        }
        added_stroke
    }

    fn activate_selection_layer(&mut self) {
        let Some(layer) = self
            .select_tool
            .selected
            .and_then(|id| self.host.scene.get(id))
            .map(|obj| obj.layer_id)
        else {
            return;
        };
        if let Err(e) = self.layers.set_active(layer) {
            log::warn!("studio: selected object has no layer: {e}");
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Append the current document to the history.
    pub fn save_state(&mut self) {
        let snapshot = Snapshot {
            scene: self.host.scene.clone(),
            layers: self.layers.snapshot(&self.host.scene),
            active_layer: self.layers.active(),
        };
        match snapshot.to_json() {
            Ok(json) => self.history.save(json),
            Err(e) => log::error!("history: cannot snapshot: {e}"),
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().map(str::to_owned) {
            Some(json) => self.restore(&json),
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().map(str::to_owned) {
            Some(json) => self.restore(&json),
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, json: &str) -> bool {
        let snapshot = match Snapshot::from_json(json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("history: corrupt snapshot: {e}");
                return false;
            }
        };
        self.host.scene = snapshot.scene;
        self.layers = LayerStack::from_layers(snapshot.layers);
        if let Err(e) = self.layers.set_active(snapshot.active_layer) {
            log::warn!("history: {e}, keeping layer 0 active");
        }
        self.select_tool = SelectTool::new();
        true
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    pub fn add_layer(&mut self) -> LayerId {
        self.layers.add()
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> StudioResult<()> {
        Ok(self.layers.set_active(id)?)
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> StudioResult<bool> {
        Ok(self.layers.toggle_visibility(id, &mut self.host.scene)?)
    }

    /// Delete the active layer and everything on it.
    pub fn delete_layer(&mut self) -> StudioResult<()> {
        let removed = self.layers.delete_active(&mut self.host.scene)?;
        if removed.iter().any(|o| Some(o.id) == self.select_tool.selected) {
            self.select_tool = SelectTool::new();
        }
        self.save_state();
        Ok(())
    }

    /// Merge the active layer into the one below.
    pub fn merge_layer(&mut self) -> StudioResult<LayerId> {
        let target = self.layers.merge_active(&mut self.host.scene)?;
        self.save_state();
        Ok(target)
    }

    // ─── Seals ───────────────────────────────────────────────────────────

    pub fn set_seal_font(&mut self, bytes: Vec<u8>) -> StudioResult<()> {
        self.seal.set_font(bytes)
    }

    pub fn has_seal_font(&self) -> bool {
        self.seal.has_font()
    }

    /// Design a seal at the configured size.
    pub fn design_seal(
        &mut self,
        text: &str,
        shape: SealShape,
        effect: SealEffect,
    ) -> StudioResult<()> {
        let spec = SealSpec {
            text: text.to_string(),
            shape,
            effect,
            size: self.config.seal_size,
            marks: Vec::new(),
        };
        self.design_seal_spec(&spec)
    }

    pub fn design_seal_spec(&mut self, spec: &SealSpec) -> StudioResult<()> {
        self.seal.design(spec)?;
        Ok(())
    }

    /// Stamp the stored seal onto the active layer and select it.
    pub fn apply_seal(&mut self) -> StudioResult<ObjectId> {
        let object = self.seal.stamp(self.layers.active()).inspect_err(|e| {
            log::warn!("studio: {e}");
        })?;
        let id = object.id;
        self.host.apply(SceneMutation::AddObject {
            object: Box::new(object),
        });
        self.select_tool.selected = Some(id);
        self.save_state();
        Ok(id)
    }

    // ─── Files ───────────────────────────────────────────────────────────

    /// Serialize the project file.
    pub fn save_project(&mut self) -> StudioResult<String> {
        self.layers.sync_membership(&self.host.scene);
        let json = ProjectFile::capture(&self.host.scene, &self.layers).to_json()?;
        log::info!("project: saved {} objects", self.host.scene.len());
        Ok(json)
    }

    /// Replace the document with a project file. On error nothing changes.
    pub fn load_project(&mut self, json: &str) -> StudioResult<()> {
        let project = ProjectFile::from_json(json).inspect_err(|e| {
            log::error!("project: load failed: {e}");
        })?;
        let (scene, layers) = project.into_document();
        log::info!(
            "project: loaded {} objects on {} layers",
            scene.len(),
            layers.len()
        );
        self.host.scene = scene;
        self.layers = layers;
        self.select_tool = SelectTool::new();
        self.stroke_tool = StrokeTool::new(self.tool);
        self.bleed.clear();
        self.save_state();
        Ok(())
    }

    /// The bare scene JSON, without layers or version.
    pub fn scene_json(&self) -> StudioResult<String> {
        Ok(self.host.to_json()?)
    }

    pub fn export_png(&self) -> StudioResult<Vec<u8>> {
        Ok(sumi_render::export_png(&self.host.scene, self.export_options())?)
    }

    pub fn export_png_data_uri(&self) -> StudioResult<String> {
        Ok(sumi_render::export_png_data_uri(
            &self.host.scene,
            self.export_options(),
        )?)
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            multiplier: self.config.export_multiplier,
        }
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom(&mut self, factor: f32) {
        self.host.viewport.zoom_by(factor);
    }

    pub fn reset_zoom(&mut self) {
        self.host.viewport.reset();
    }

    /// Scroll the paper by screen pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.host.viewport.pan_by(dx, dy);
    }

    /// Fit the display surface into a container. The paper keeps its size.
    pub fn fit_to_container(&mut self, width: f32, height: f32) -> (f32, f32) {
        self.host.viewport.fit(width, height)
    }

    /// Paint the scene and live particles through the viewport.
    pub fn render(&mut self, pixmap: &mut Pixmap) {
        let vp = self.host.viewport;
        let view = Transform::from_row(vp.zoom, 0.0, 0.0, vp.zoom, vp.pan_x, vp.pan_y);
        self.painter.paint_scene(pixmap, &self.host.scene, view);
        paint_particles(pixmap, self.bleed.particles(), view);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Run a shortcut. Save and load are returned for the host to handle.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        )?;
        match action {
            ShortcutAction::ToolBrush => self.set_tool(ToolKind::Brush),
            ShortcutAction::ToolPencil => self.set_tool(ToolKind::Pencil),
            ShortcutAction::ToolEraser => self.set_tool(ToolKind::Eraser),
            ShortcutAction::ToolSelect => self.set_tool(ToolKind::Select),
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::SaveProject | ShortcutAction::LoadProject => {}
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumi_core::CoreError;

    fn studio() -> Studio {
        Studio::seeded(StudioConfig::default(), 11)
    }

    fn draw(studio: &mut Studio, points: &[(f32, f32)]) {
        let (&(x0, y0), rest) = points.split_first().unwrap();
        studio.pointer_down(x0, y0, 1.0, Modifiers::NONE);
        for &(x, y) in rest {
            studio.pointer_move(x, y, 1.0, Modifiers::NONE);
        }
        let &(xn, yn) = points.last().unwrap();
        studio.pointer_up(xn, yn, Modifiers::NONE);
    }

    #[test]
    fn starts_with_one_snapshot() {
        let s = studio();
        assert_eq!(s.history().len(), 1);
        assert!(!s.can_undo() && !s.can_redo());
        assert_eq!(s.layers().len(), 1);
        assert_eq!(s.tool(), ToolKind::Brush);
    }

    #[test]
    fn brush_stroke_is_tagged_saved_and_bleeds() {
        let mut s = studio();
        s.add_layer();
        draw(&mut s, &[(10.0, 10.0), (12.0, 10.0), (14.0, 11.0), (16.0, 12.0)]);

        assert_eq!(s.scene().len(), 1);
        let obj = &s.scene().objects[0];
        assert_eq!(obj.layer_id, 1);
        assert!(obj.id.as_str().starts_with("stroke_"));
        assert!(!s.particles().is_empty());
        assert!(s.can_undo());
        assert!(!s.is_drawing());
        assert_eq!(s.dwell_ms(), 0.0);
    }

    #[test]
    fn pencil_and_eraser_never_bleed() {
        for tool in [ToolKind::Pencil, ToolKind::Eraser] {
            let mut s = studio();
            s.set_tool(tool);
            draw(&mut s, &[(10.0, 10.0), (11.0, 10.0), (12.0, 10.0)]);
            assert_eq!(s.scene().len(), 1);
            assert!(s.particles().is_empty(), "{tool} bled");
        }
        // Pencil keeps the user's bleed factor for when the brush returns.
        let mut s = studio();
        s.set_tool(ToolKind::Pencil);
        assert_eq!(s.brush().bleed_factor, 0.5);
    }

    #[test]
    fn eraser_paints_with_the_paper_color() {
        let mut s = studio();
        s.set_tool(ToolKind::Eraser);
        draw(&mut s, &[(10.0, 10.0), (20.0, 10.0)]);
        let ObjectKind::Path { stroke, .. } = &s.scene().objects[0].kind else {
            panic!("expected a path");
        };
        assert_eq!(stroke.color, Scene::DEFAULT_BACKGROUND);
        assert_eq!(stroke.width, 15.0);
    }

    #[test]
    fn ticks_age_particles_and_dwell() {
        let mut s = studio();
        s.pointer_down(50.0, 50.0, 1.0, Modifiers::NONE);
        for _ in 0..10 {
            s.tick(16.0);
        }
        assert_eq!(s.dwell_ms(), 160.0);
        // Stationary move: intensity 1.0 plus 1.6 from dwell → 11 particles.
        s.pointer_move(50.0, 50.0, 1.0, Modifiers::NONE);
        assert_eq!(s.particles().len(), 11);
        s.pointer_up(50.0, 50.0, Modifiers::NONE);
        for _ in 0..150 {
            s.tick(16.0);
        }
        assert!(s.particles().is_empty());
    }

    #[test]
    fn undo_redo_restores_scene() {
        let mut s = studio();
        draw(&mut s, &[(10.0, 10.0), (40.0, 40.0)]);
        let after = s.scene().clone();

        assert!(s.undo());
        assert!(s.scene().is_empty());
        assert!(!s.undo());
        assert!(s.redo());
        assert_eq!(s.scene(), &after);
        assert!(!s.redo());
    }

    #[test]
    fn layer_guards_surface_as_errors() {
        let mut s = studio();
        assert!(matches!(
            s.delete_layer(),
            Err(StudioError::Core(CoreError::LastLayer))
        ));
        assert!(matches!(
            s.merge_layer(),
            Err(StudioError::Core(CoreError::MergeBaseLayer))
        ));
        assert!(matches!(
            s.set_active_layer(5),
            Err(StudioError::Core(CoreError::UnknownLayer(5)))
        ));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn undo_brings_back_a_deleted_layer() {
        let mut s = studio();
        s.add_layer();
        draw(&mut s, &[(10.0, 10.0), (40.0, 40.0)]);
        s.delete_layer().unwrap();
        assert_eq!(s.layers().len(), 1);
        assert!(s.scene().is_empty());

        assert!(s.undo());
        assert_eq!(s.layers().len(), 2);
        assert_eq!(s.layers().active(), 1);
        assert_eq!(s.scene().len(), 1);
    }

    #[test]
    fn select_activates_layer_and_drag_is_undoable() {
        let mut s = studio();
        draw(&mut s, &[(100.0, 100.0), (200.0, 100.0)]);
        s.add_layer();
        assert_eq!(s.layers().active(), 1);

        s.set_tool(ToolKind::Select);
        s.pointer_down(150.0, 100.0, 1.0, Modifiers::NONE);
        let id = s.selected().unwrap();
        assert_eq!(s.layers().active(), 0);

        s.pointer_move(160.0, 110.0, 1.0, Modifiers::NONE);
        s.pointer_up(160.0, 110.0, Modifiers::NONE);
        let moved = s.scene().get(id).unwrap();
        assert_eq!((moved.left, moved.top), (10.0, 10.0));

        assert!(s.undo());
        let back = s.scene().get(id).unwrap();
        assert_eq!((back.left, back.top), (0.0, 0.0));
    }

    #[test]
    fn zoom_maps_pointer_into_scene() {
        let mut s = studio();
        s.zoom(2.0);
        draw(&mut s, &[(100.0, 100.0), (200.0, 100.0)]);
        let b = s.scene().objects[0].bounds();
        assert!((b.x - 45.0).abs() < 1e-3, "{b:?}");
        s.pan(10.0, -20.0);
        assert_eq!(s.viewport().screen_to_scene(10.0, -20.0), (0.0, 0.0));
        s.reset_zoom();
        assert_eq!(s.viewport().zoom, 1.0);
        assert_eq!((s.viewport().pan_x, s.viewport().pan_y), (0.0, 0.0));
    }

    #[test]
    fn seal_must_be_designed_before_stamping() {
        let mut s = studio();
        assert!(matches!(s.apply_seal(), Err(StudioError::NoSeal)));
        assert_eq!(s.history().len(), 1);

        s.add_layer();
        s.design_seal("", SealShape::Square, SealEffect::Engrave).unwrap();
        let id = s.apply_seal().unwrap();
        let seal = s.scene().get(id).unwrap();
        assert_eq!(seal.layer_id, 1);
        assert_eq!((seal.left, seal.top, seal.scale_x), (100.0, 100.0, 0.5));
        assert_eq!(s.selected(), Some(id));
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn keyboard_shortcuts_drive_tools_and_history() {
        let mut s = studio();
        draw(&mut s, &[(1.0, 1.0), (5.0, 5.0)]);

        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(s.handle_key("z", ctrl), Some(ShortcutAction::Undo));
        assert!(s.scene().is_empty());
        let ctrl_shift = Modifiers { shift: true, ..ctrl };
        assert_eq!(s.handle_key("Z", ctrl_shift), Some(ShortcutAction::Redo));
        assert_eq!(s.scene().len(), 1);

        assert_eq!(s.handle_key("p", Modifiers::NONE), Some(ShortcutAction::ToolPencil));
        assert_eq!(s.tool(), ToolKind::Pencil);
        assert_eq!(s.handle_key("s", ctrl), Some(ShortcutAction::SaveProject));
        assert_eq!(s.handle_key("q", Modifiers::NONE), None);
    }

    #[test]
    fn bad_color_and_tool_names_are_rejected() {
        let mut s = studio();
        assert!(matches!(s.set_color("ink"), Err(StudioError::InvalidColor(_))));
        assert_eq!(s.color(), Color::BLACK);
        s.set_color("#8b4513").unwrap();
        assert_eq!(s.color().to_hex(), "#8B4513");

        assert!(matches!(
            s.set_tool_by_name("lasso"),
            Err(StudioError::UnknownTool(_))
        ));
        s.set_tool_by_name("eraser").unwrap();
        assert_eq!(s.tool(), ToolKind::Eraser);
    }

    #[test]
    fn brush_setters_clamp() {
        let mut s = studio();
        s.set_brush_opacity(3.0);
        s.set_bleed_factor(-1.0);
        s.set_brush_size(-4.0);
        assert_eq!(s.brush().opacity, 1.0);
        assert_eq!(s.brush().bleed_factor, 0.0);
        assert_eq!(s.brush().size, 0.0);
    }

    #[test]
    fn render_shows_strokes_through_the_viewport() {
        let mut s = studio();
        draw(&mut s, &[(100.0, 100.0), (300.0, 100.0)]);
        s.tick(16.0);
        let mut pixmap = Pixmap::new(800, 600).unwrap();
        s.render(&mut pixmap);
        let ink = pixmap.pixel(200, 100).unwrap().demultiply();
        assert_eq!(ink.alpha(), 255);
        assert!(ink.red() < 60);
        let paper = pixmap.pixel(700, 500).unwrap().demultiply();
        assert_eq!((paper.red(), paper.green(), paper.blue()), (254, 252, 248));
    }
}
