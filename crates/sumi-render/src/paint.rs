//! Scene painting onto a `tiny_skia::Pixmap`.
//!
//! Paints the paper background, then every visible object in z-order.
//! Strokes go through `kurbo` path geometry; images (seals) are decoded
//! once per object id and cached until the object's `src` changes.

use crate::data_uri::decode_data_uri;
use crate::error::{RenderError, RenderResult};
use kurbo::{Affine, BezPath, PathEl};
use std::collections::HashMap;
use sumi_core::id::ObjectId;
use sumi_core::model::*;
use sumi_core::{Color, Particle};
use tiny_skia::{
    FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

/// Convert path commands into `kurbo` geometry.
pub fn to_bez_path(commands: &[PathCmd]) -> BezPath {
    let mut path = BezPath::new();
    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(x, y) => path.move_to((x as f64, y as f64)),
            PathCmd::LineTo(x, y) => path.line_to((x as f64, y as f64)),
            PathCmd::QuadTo(cx, cy, x, y) => {
                path.quad_to((cx as f64, cy as f64), (x as f64, y as f64))
            }
            PathCmd::CubicTo(ax, ay, bx, by, x, y) => path.curve_to(
                (ax as f64, ay as f64),
                (bx as f64, by as f64),
                (x as f64, y as f64),
            ),
            PathCmd::Close => path.close_path(),
        }
    }
    path
}

/// The object's local → scene transform.
pub fn object_affine(obj: &SceneObject) -> Affine {
    Affine::new([
        obj.scale_x as f64,
        0.0,
        0.0,
        obj.scale_y as f64,
        obj.left as f64,
        obj.top as f64,
    ])
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(a, b, p) => pb.cubic_to(
                a.x as f32, a.y as f32, b.x as f32, b.y as f32, p.x as f32, p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

pub(crate) fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn skia_stroke(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width.max(0.0),
        line_cap: match style.cap {
            StrokeCap::Butt => LineCap::Butt,
            StrokeCap::Round => LineCap::Round,
            StrokeCap::Square => LineCap::Square,
        },
        line_join: match style.join {
            StrokeJoin::Miter => LineJoin::Miter,
            StrokeJoin::Round => LineJoin::Round,
            StrokeJoin::Bevel => LineJoin::Bevel,
        },
        ..Stroke::default()
    }
}

/// A decoded image and the data URI it came from.
struct CachedImage {
    src: String,
    pixmap: Pixmap,
}

/// Stateful scene painter. Holds decoded images between frames.
#[derive(Default)]
pub struct Painter {
    images: HashMap<ObjectId, CachedImage>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decoded images currently cached.
    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    /// Paint the whole scene. `view` maps scene coordinates to pixels
    /// (zoom, pan, or an export multiplier).
    ///
    /// An image that fails to decode is skipped with a warning.
    pub fn paint_scene(&mut self, pixmap: &mut Pixmap, scene: &Scene, view: Transform) {
        pixmap.fill(skia_color(scene.background));
        self.images
            .retain(|id, _| scene.objects().any(|o| o.id == *id));

        for obj in scene.objects().filter(|o| o.visible && o.opacity > 0.0) {
            let ts = view.pre_concat(to_skia_transform(object_affine(obj)));
            match &obj.kind {
                ObjectKind::Path { commands, stroke } => {
                    paint_stroke(pixmap, commands, stroke, obj.opacity, ts);
                }
                ObjectKind::Image { src, .. } => {
                    if let Err(e) = self.paint_image(pixmap, obj.id, src, obj.opacity, ts) {
                        log::warn!("paint: skipping image {}: {e}", obj.id);
                    }
                }
            }
        }
    }

    fn paint_image(
        &mut self,
        pixmap: &mut Pixmap,
        id: ObjectId,
        src: &str,
        opacity: f32,
        ts: Transform,
    ) -> RenderResult<()> {
        let stale = self.images.get(&id).is_none_or(|cached| cached.src != src);
        if stale {
            self.images.remove(&id);
            let bytes = decode_data_uri(src)?;
            let image =
                Pixmap::decode_png(&bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
            log::debug!("paint: decoded {id} ({}x{})", image.width(), image.height());
            self.images.insert(
                id,
                CachedImage {
                    src: src.to_string(),
                    pixmap: image,
                },
            );
        }
        if let Some(CachedImage { pixmap: image, .. }) = self.images.get(&id) {
            let paint = PixmapPaint {
                opacity: opacity.clamp(0.0, 1.0),
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, ts, None);
        }
        Ok(())
    }
}

fn paint_stroke(
    pixmap: &mut Pixmap,
    commands: &[PathCmd],
    style: &StrokeStyle,
    opacity: f32,
    ts: Transform,
) {
    let Some(path) = to_skia_path(&to_bez_path(commands)) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(skia_color(style.color.with_alpha_factor(opacity)));
    paint.anti_alias = true;
    pixmap.stroke_path(&path, &paint, &skia_stroke(style), ts, None);
}

/// Paint ink-bleed particles as soft dots over the scene.
pub fn paint_particles(pixmap: &mut Pixmap, particles: &[Particle], view: Transform) {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    for p in particles.iter().filter(|p| p.opacity > 0.0 && p.size > 0.0) {
        let Some(dot) = PathBuilder::from_circle(p.x, p.y, p.size) else {
            continue;
        };
        paint.set_color(skia_color(p.color.with_alpha_factor(p.opacity)));
        pixmap.fill_path(&dot, &paint, FillRule::Winding, view, None);
    }
}
