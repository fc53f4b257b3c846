//! Tool system for canvas interactions.
//!
//! Each tool translates input events into `SceneMutation`s that the
//! studio applies through the scene host.
//!
//! | Tool   | Pointer down            | Move              | Up                 |
//! |--------|-------------------------|-------------------|--------------------|
//! | Brush / Pencil / Eraser | start collecting points | collect | emit one path |
//! | Select | pick topmost object     | drag it           | stop dragging      |

use crate::host::SceneMutation;
use crate::input::InputEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use sumi_core::id::ObjectId;
use sumi_core::model::*;
use sumi_core::Color;

/// The active tool determines how input events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Pencil,
    Eraser,
    Select,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
            ToolKind::Select => "select",
        }
    }

    /// Brush, pencil and eraser all lay down paths.
    pub fn draws(&self) -> bool {
        !matches!(self, ToolKind::Select)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brush" => Ok(ToolKind::Brush),
            "pencil" => Ok(ToolKind::Pencil),
            "eraser" => Ok(ToolKind::Eraser),
            "select" => Ok(ToolKind::Select),
            other => Err(other.to_string()),
        }
    }
}

/// User-adjustable brush parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrushProperties {
    /// Nominal stroke width.
    pub size: f32,
    pub opacity: f32,
    /// Ink-spread density, 0 disables stroke bleed.
    pub bleed_factor: f32,
    /// Stored with the brush; no renderer reads it yet.
    pub texture_strength: f32,
}

impl Default for BrushProperties {
    fn default() -> Self {
        Self {
            size: 10.0,
            opacity: 1.0,
            bleed_factor: 0.5,
            texture_strength: 0.7,
        }
    }
}

/// The stroke a drawing tool lays down with the current brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSettings {
    pub color: Color,
    pub width: f32,
    pub opacity: f32,
    /// Whether finished strokes spawn bleed particles.
    pub bleeds: bool,
}

impl StrokeSettings {
    /// Per-tool stroke derivation. `None` for the select tool.
    pub fn for_tool(
        tool: ToolKind,
        brush: &BrushProperties,
        color: Color,
        background: Color,
    ) -> Option<Self> {
        match tool {
            ToolKind::Brush => Some(Self {
                color,
                width: brush.size,
                opacity: brush.opacity,
                bleeds: brush.bleed_factor != 0.0,
            }),
            ToolKind::Pencil => Some(Self {
                color,
                width: (brush.size * 0.7).max(1.0),
                opacity: brush.opacity * 0.8,
                bleeds: false,
            }),
            ToolKind::Eraser => Some(Self {
                color: background,
                width: brush.size * 1.5,
                opacity: 1.0,
                bleeds: false,
            }),
            ToolKind::Select => None,
        }
    }

    /// Width scaled by pen pressure: half width at zero, full at one.
    pub fn width_at(&self, pressure: f32) -> f32 {
        self.width * (0.5 + pressure.clamp(0.0, 1.0) * 0.5)
    }
}

/// What a tool may consult while handling an event.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext {
    /// Topmost object under the pointer, if any.
    pub hit: Option<ObjectId>,
    pub layer: LayerId,
    pub stroke: Option<StrokeSettings>,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext) -> Vec<SceneMutation>;
}

/// Turn raw pointer samples into a smooth path: quadratic segments through
/// the midpoints of consecutive samples, finished with a line to the last.
/// A single sample becomes a zero-length line, which round caps draw as a dot.
pub fn smooth_path(points: &[(f32, f32)]) -> Vec<PathCmd> {
    let Some(&(x0, y0)) = points.first() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len() + 1);
    commands.push(PathCmd::MoveTo(x0, y0));
    for pair in points.windows(2) {
        let ((ax, ay), (bx, by)) = (pair[0], pair[1]);
        commands.push(PathCmd::QuadTo(ax, ay, (ax + bx) / 2.0, (ay + by) / 2.0));
    }
    let &(xn, yn) = points.last().unwrap_or(&(x0, y0));
    commands.push(PathCmd::LineTo(xn, yn));
    commands
}

// ─── Stroke tools ────────────────────────────────────────────────────────

/// Brush, pencil and eraser: collect samples while the pointer is down and
/// emit one path object on release.
pub struct StrokeTool {
    kind: ToolKind,
    drawing: bool,
    points: Vec<(f32, f32)>,
    pressures: Vec<f32>,
}

impl StrokeTool {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            drawing: false,
            points: Vec::new(),
            pressures: Vec::new(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points collected so far in the current stroke.
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    fn mean_pressure(&self) -> f32 {
        if self.pressures.is_empty() {
            return 1.0;
        }
        self.pressures.iter().sum::<f32>() / self.pressures.len() as f32
    }

    fn sample(&mut self, x: f32, y: f32, pressure: f32) {
        self.points.push((x, y));
        // No pressure reported (0) counts as full pressure.
        self.pressures
            .push(if pressure > 0.0 { pressure } else { 1.0 });
    }
}

impl Tool for StrokeTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext) -> Vec<SceneMutation> {
        match *event {
            InputEvent::PointerDown { x, y, pressure, .. } => {
                self.drawing = true;
                self.points.clear();
                self.pressures.clear();
                self.sample(x, y, pressure);
                vec![]
            }
            InputEvent::PointerMove { x, y, pressure, .. } => {
                if self.drawing {
                    self.sample(x, y, pressure);
                }
                vec![]
            }
            InputEvent::PointerUp { .. } => {
                if !self.drawing {
                    return vec![];
                }
                self.drawing = false;
                let Some(settings) = ctx.stroke else {
                    self.points.clear();
                    return vec![];
                };
                let style = StrokeStyle {
                    color: settings.color,
                    width: settings.width_at(self.mean_pressure()),
                    cap: StrokeCap::Round,
                    join: StrokeJoin::Round,
                };
                let mut object =
                    SceneObject::stroke(smooth_path(&self.points), style, ctx.layer);
                object.opacity = settings.opacity.clamp(0.0, 1.0);
                self.points.clear();
                self.pressures.clear();
                vec![SceneMutation::AddObject {
                    object: Box::new(object),
                }]
            }
        }
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SelectTool {
    /// Currently selected object.
    pub selected: Option<ObjectId>,
    dragging: bool,
    moved: bool,
    last_x: f32,
    last_y: f32,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gesture that just ended moved the selection.
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &InputEvent, ctx: &ToolContext) -> Vec<SceneMutation> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.selected = ctx.hit;
                self.dragging = ctx.hit.is_some();
                self.moved = false;
                self.last_x = x;
                self.last_y = y;
                vec![]
            }
            InputEvent::PointerMove { x, y, .. } => {
                let Some(id) = self.selected.filter(|_| self.dragging) else {
                    return vec![];
                };
                let (dx, dy) = (x - self.last_x, y - self.last_y);
                self.last_x = x;
                self.last_y = y;
                if dx == 0.0 && dy == 0.0 {
                    return vec![];
                }
                self.moved = true;
                vec![SceneMutation::MoveObject { id, dx, dy }]
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = false;
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    const PAPER: Color = Scene::DEFAULT_BACKGROUND;

    fn ctx(stroke: Option<StrokeSettings>, hit: Option<ObjectId>) -> ToolContext {
        ToolContext {
            hit,
            layer: 2,
            stroke,
        }
    }

    #[test]
    fn per_tool_stroke_settings() {
        let brush = BrushProperties {
            size: 10.0,
            opacity: 0.5,
            ..BrushProperties::default()
        };
        let red = Color::from_hex("#ff0000").unwrap();

        let b = StrokeSettings::for_tool(ToolKind::Brush, &brush, red, PAPER).unwrap();
        assert_eq!((b.width, b.opacity, b.bleeds), (10.0, 0.5, true));

        let p = StrokeSettings::for_tool(ToolKind::Pencil, &brush, red, PAPER).unwrap();
        assert!((p.width - 7.0).abs() < 1e-5);
        assert!((p.opacity - 0.4).abs() < 1e-6);
        assert!(!p.bleeds);

        let e = StrokeSettings::for_tool(ToolKind::Eraser, &brush, red, PAPER).unwrap();
        assert_eq!((e.color, e.width, e.opacity), (PAPER, 15.0, 1.0));

        assert!(StrokeSettings::for_tool(ToolKind::Select, &brush, red, PAPER).is_none());
    }

    #[test]
    fn pencil_width_never_drops_below_one() {
        let brush = BrushProperties {
            size: 1.0,
            ..BrushProperties::default()
        };
        let p = StrokeSettings::for_tool(ToolKind::Pencil, &brush, Color::BLACK, PAPER).unwrap();
        assert_eq!(p.width, 1.0);
    }

    #[test]
    fn pressure_scales_between_half_and_full() {
        let s = StrokeSettings::for_tool(
            ToolKind::Brush,
            &BrushProperties::default(),
            Color::BLACK,
            PAPER,
        )
        .unwrap();
        assert_eq!(s.width_at(0.0), 5.0);
        assert_eq!(s.width_at(1.0), 10.0);
        assert_eq!(s.width_at(0.5), 7.5);
    }

    #[test]
    fn smooth_path_goes_through_midpoints() {
        let cmds = smooth_path(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(
            cmds,
            vec![
                PathCmd::MoveTo(0.0, 0.0),
                PathCmd::QuadTo(0.0, 0.0, 5.0, 0.0),
                PathCmd::QuadTo(10.0, 0.0, 10.0, 5.0),
                PathCmd::LineTo(10.0, 10.0),
            ]
        );
        assert_eq!(
            smooth_path(&[(3.0, 4.0)]),
            vec![PathCmd::MoveTo(3.0, 4.0), PathCmd::LineTo(3.0, 4.0)]
        );
        assert!(smooth_path(&[]).is_empty());
    }

    #[test]
    fn stroke_tool_emits_one_path_on_release() {
        let settings = StrokeSettings::for_tool(
            ToolKind::Brush,
            &BrushProperties::default(),
            Color::BLACK,
            PAPER,
        );
        let c = ctx(settings, None);
        let mut tool = StrokeTool::new(ToolKind::Brush);

        assert!(tool.handle(&InputEvent::from_pointer_down(0.0, 0.0, 1.0, Modifiers::NONE), &c).is_empty());
        assert!(tool.handle(&InputEvent::from_pointer_move(5.0, 5.0, 1.0, Modifiers::NONE), &c).is_empty());
        assert!(tool.is_drawing());
        let out = tool.handle(&InputEvent::from_pointer_up(5.0, 5.0, Modifiers::NONE), &c);
        assert!(!tool.is_drawing());

        let [SceneMutation::AddObject { object }] = out.as_slice() else {
            panic!("expected one AddObject, got {out:?}");
        };
        assert_eq!(object.layer_id, 2);
        let ObjectKind::Path { commands, stroke } = &object.kind else {
            panic!("expected a path");
        };
        assert_eq!(commands.len(), 3);
        assert_eq!(stroke.width, 10.0);
        assert_eq!((stroke.cap, stroke.join), (StrokeCap::Round, StrokeJoin::Round));
    }

    #[test]
    fn stroke_tool_averages_pressure() {
        let settings = StrokeSettings::for_tool(
            ToolKind::Brush,
            &BrushProperties::default(),
            Color::BLACK,
            PAPER,
        );
        let c = ctx(settings, None);
        let mut tool = StrokeTool::new(ToolKind::Brush);
        tool.handle(&InputEvent::from_pointer_down(0.0, 0.0, 0.2, Modifiers::NONE), &c);
        tool.handle(&InputEvent::from_pointer_move(1.0, 0.0, 0.6, Modifiers::NONE), &c);
        let out = tool.handle(&InputEvent::from_pointer_up(1.0, 0.0, Modifiers::NONE), &c);
        let [SceneMutation::AddObject { object }] = out.as_slice() else {
            panic!("expected one AddObject");
        };
        let ObjectKind::Path { stroke, .. } = &object.kind else {
            panic!("expected a path");
        };
        assert!((stroke.width - 7.0).abs() < 1e-5);
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut tool = StrokeTool::new(ToolKind::Pencil);
        let c = ctx(None, None);
        assert!(tool.handle(&InputEvent::from_pointer_move(1.0, 1.0, 1.0, Modifiers::NONE), &c).is_empty());
        assert!(tool.handle(&InputEvent::from_pointer_up(1.0, 1.0, Modifiers::NONE), &c).is_empty());
    }

    #[test]
    fn select_tool_drags_the_hit_object() {
        let id = ObjectId::intern("tools_select_target");
        let mut tool = SelectTool::new();

        tool.handle(&InputEvent::from_pointer_down(10.0, 10.0, 1.0, Modifiers::NONE), &ctx(None, Some(id)));
        assert_eq!(tool.selected, Some(id));
        let out = tool.handle(&InputEvent::from_pointer_move(15.0, 12.0, 1.0, Modifiers::NONE), &ctx(None, None));
        assert_eq!(
            out,
            vec![SceneMutation::MoveObject {
                id,
                dx: 5.0,
                dy: 2.0
            }]
        );
        tool.handle(&InputEvent::from_pointer_up(15.0, 12.0, Modifiers::NONE), &ctx(None, None));
        assert!(tool.take_moved());
        assert!(!tool.take_moved());

        // Clicking empty paper clears the selection.
        tool.handle(&InputEvent::from_pointer_down(500.0, 500.0, 1.0, Modifiers::NONE), &ctx(None, None));
        assert_eq!(tool.selected, None);
    }

    #[test]
    fn tool_names_parse() {
        assert_eq!("Pencil".parse::<ToolKind>(), Ok(ToolKind::Pencil));
        assert!("lasso".parse::<ToolKind>().is_err());
    }
}
