//! Scene host data model.
//!
//! The scene is a flat, z-ordered list of objects (last = topmost). Each
//! object carries an integer `layer_id` tag; layers are a logical grouping
//! over those tags rather than owned collections (see [`crate::layer`]).
//! Strokes are freeform paths in scene coordinates; seals are raster images
//! carried as PNG data URIs.

use crate::color::Color;
use crate::id::ObjectId;
use serde::{Deserialize, Serialize};

/// Integer layer tag. Layer ids always equal their index in the layer stack.
pub type LayerId = usize;

// ─── Path data ───────────────────────────────────────────────────────────

/// A single path command (SVG-like but simplified).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),            // control, end
    CubicTo(f32, f32, f32, f32, f32, f32), // c1, c2, end
    Close,
}

impl PathCmd {
    /// The point the pen ends at after this command, if any.
    pub fn end_point(&self) -> Option<(f32, f32)> {
        match *self {
            PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => Some((x, y)),
            PathCmd::QuadTo(_, _, x, y) => Some((x, y)),
            PathCmd::CubicTo(_, _, _, _, x, y) => Some((x, y)),
            PathCmd::Close => None,
        }
    }

    /// Every point (control and end) referenced by this command.
    fn points(&self) -> impl Iterator<Item = (f32, f32)> {
        let pts: [Option<(f32, f32)>; 3] = match *self {
            PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => [Some((x, y)), None, None],
            PathCmd::QuadTo(cx, cy, x, y) => [Some((cx, cy)), Some((x, y)), None],
            PathCmd::CubicTo(ax, ay, bx, by, x, y) => [Some((ax, ay)), Some((bx, by)), Some((x, y))],
            PathCmd::Close => [None, None, None],
        };
        pts.into_iter().flatten()
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// How a path is stroked. Brush strokes always use round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    #[serde(default)]
    pub cap: StrokeCap,
    #[serde(default)]
    pub join: StrokeJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: StrokeCap::Round,
            join: StrokeJoin::Round,
        }
    }
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned bounds in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

// ─── Scene objects ───────────────────────────────────────────────────────

/// What an object draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// A brush, pencil or eraser stroke.
    Path {
        commands: Vec<PathCmd>,
        stroke: StrokeStyle,
    },
    /// A raster image, e.g. an applied seal. `src` is a PNG data URI.
    Image { src: String, width: u32, height: u32 },
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

/// A single object owned by the scene host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,

    pub kind: ObjectKind,

    /// Layer tag. Missing in foreign documents → base layer.
    #[serde(default)]
    pub layer_id: LayerId,

    /// Translation applied after scaling.
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,

    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,

    #[serde(default = "one")]
    pub opacity: f32,

    #[serde(default = "yes")]
    pub visible: bool,
}

impl SceneObject {
    pub fn new(id: ObjectId, kind: ObjectKind, layer_id: LayerId) -> Self {
        Self {
            id,
            kind,
            layer_id,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            visible: true,
        }
    }

    /// A stroke object with a fresh `stroke_N` id.
    pub fn stroke(commands: Vec<PathCmd>, stroke: StrokeStyle, layer_id: LayerId) -> Self {
        Self::new(
            ObjectId::with_prefix("stroke"),
            ObjectKind::Path { commands, stroke },
            layer_id,
        )
    }

    /// Map a local point into scene coordinates.
    pub fn to_scene(&self, x: f32, y: f32) -> (f32, f32) {
        (self.left + x * self.scale_x, self.top + y * self.scale_y)
    }

    /// Scene-space bounds, including half the stroke width for paths.
    pub fn bounds(&self) -> Bounds {
        let (min, max, pad) = match &self.kind {
            ObjectKind::Path { commands, stroke } => {
                let mut min = (f32::INFINITY, f32::INFINITY);
                let mut max = (f32::NEG_INFINITY, f32::NEG_INFINITY);
                for (x, y) in commands.iter().flat_map(PathCmd::points) {
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
                if !min.0.is_finite() {
                    return Bounds {
                        x: self.left,
                        y: self.top,
                        ..Bounds::default()
                    };
                }
                (min, max, stroke.width / 2.0)
            }
            ObjectKind::Image { width, height, .. } => {
                ((0.0, 0.0), (*width as f32, *height as f32), 0.0)
            }
        };
        let (x0, y0) = self.to_scene(min.0 - pad, min.1 - pad);
        let (x1, y1) = self.to_scene(max.0 + pad, max.1 + pad);
        Bounds {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The complete drawing: the scene host's document.
///
/// `objects` is in paint order: index 0 is painted first (bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Default paper: 800 × 600, warm rice-paper white.
    pub const DEFAULT_BACKGROUND: Color = Color::rgba(254.0 / 255.0, 252.0 / 255.0, 248.0 / 255.0, 1.0);

    #[must_use]
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Append an object on top of the stack.
    pub fn add(&mut self, object: SceneObject) {
        log::debug!("scene: add {} on layer {}", object.id, object.layer_id);
        self.objects.push(object);
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Objects in paint order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Objects tagged with `layer`, in paint order.
    pub fn objects_on_layer(&self, layer: LayerId) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |o| o.layer_id == layer)
    }

    /// Retag every object on `from` to `to`. Returns how many moved.
    pub fn retag(&mut self, from: LayerId, to: LayerId) -> usize {
        let mut moved = 0;
        for obj in self.objects.iter_mut().filter(|o| o.layer_id == from) {
            obj.layer_id = to;
            moved += 1;
        }
        moved
    }

    /// Set the visibility flag of every object on `layer`.
    pub fn set_layer_visible(&mut self, layer: LayerId, visible: bool) -> usize {
        let mut touched = 0;
        for obj in self.objects.iter_mut().filter(|o| o.layer_id == layer) {
            obj.visible = visible;
            touched += 1;
        }
        touched
    }

    /// Remove every object on `layer`, returning them in paint order.
    pub fn remove_layer_objects(&mut self, layer: LayerId) -> Vec<SceneObject> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.objects)
            .into_iter()
            .partition(|o| o.layer_id == layer);
        self.objects = kept;
        removed
    }

    /// Shift tags above `removed` down by one after a layer is deleted.
    pub fn close_layer_gap(&mut self, removed: LayerId) {
        for obj in self.objects.iter_mut().filter(|o| o.layer_id > removed) {
            obj.layer_id -= 1;
        }
    }

    /// Drop all objects, keeping paper size and background.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(800.0, 600.0, Self::DEFAULT_BACKGROUND)
    }
}
