//! Seal (chop) faces.
//!
//! A seal is a square raster: a brown stamp face (circle or square), an
//! optional line of text cut into it with a relief effect, and any freehand
//! marks drawn on top in red. Geometry is laid out on a 200-unit grid and
//! scaled to the requested pixel size.
//!
//! Relief is faked with two text passes, each preceded by a blurred, offset
//! shadow: light then dark for emboss, dark then light for engrave.

use crate::data_uri::encode_png_data_uri;
use crate::error::{RenderError, RenderResult};
use crate::paint::skia_color;
pub use rusttype::Font;
use rusttype::{Scale, point};
use std::fmt;
use std::str::FromStr;
use sumi_core::Color;
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};

const GRID: f32 = 200.0;
const FACE_COLOR: Color = Color::rgba(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 1.0);
const EMBOSS_FILL: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
const ENGRAVE_FILL: Color = Color::rgba(205.0 / 255.0, 92.0 / 255.0, 92.0 / 255.0, 1.0);
const LIGHT_SHADOW: Color = Color::rgba(1.0, 1.0, 1.0, 0.7);
const DARK_SHADOW: Color = Color::rgba(0.0, 0.0, 0.0, 0.5);
const MARK_COLOR: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
const MARK_WIDTH: f32 = 3.0;
const TEXT_PX: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SealShape {
    #[default]
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SealEffect {
    /// Raised text: bright red, lit from the top-left.
    #[default]
    Emboss,
    /// Cut-in text: muted red, shaded from the top-left.
    Engrave,
}

impl SealShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SealShape::Circle => "circle",
            SealShape::Square => "square",
        }
    }
}

impl SealEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SealEffect::Emboss => "emboss",
            SealEffect::Engrave => "engrave",
        }
    }

    /// Text fill plus the (first, second) pass shadow colors.
    fn palette(&self) -> (Color, Color, Color) {
        match self {
            SealEffect::Emboss => (EMBOSS_FILL, LIGHT_SHADOW, DARK_SHADOW),
            SealEffect::Engrave => (ENGRAVE_FILL, DARK_SHADOW, LIGHT_SHADOW),
        }
    }
}

impl FromStr for SealShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(SealShape::Circle),
            "square" => Ok(SealShape::Square),
            other => Err(format!("unknown seal shape `{other}` (circle, square)")),
        }
    }
}

impl FromStr for SealEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emboss" => Ok(SealEffect::Emboss),
            "engrave" => Ok(SealEffect::Engrave),
            other => Err(format!("unknown seal effect `{other}` (emboss, engrave)")),
        }
    }
}

impl fmt::Display for SealShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SealEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that describes one seal.
#[derive(Debug, Clone, PartialEq)]
pub struct SealSpec {
    pub text: String,
    pub shape: SealShape,
    pub effect: SealEffect,
    /// Output edge length in pixels.
    pub size: u32,
    /// Freehand marks as polylines on the 200-unit grid.
    pub marks: Vec<Vec<(f32, f32)>>,
}

impl Default for SealSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            shape: SealShape::default(),
            effect: SealEffect::default(),
            size: GRID as u32,
            marks: Vec::new(),
        }
    }
}

/// Parse TrueType/OpenType bytes for seal text.
pub fn load_font(bytes: Vec<u8>) -> RenderResult<Font<'static>> {
    Font::try_from_vec(bytes).ok_or(RenderError::Font)
}

/// Rasterize a seal. Text is skipped (with a warning) when no font is given.
pub fn render_seal(spec: &SealSpec, font: Option<&Font<'_>>) -> RenderResult<Pixmap> {
    let size = spec.size;
    let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::Allocation {
        width: size,
        height: size,
    })?;
    let k = size as f32 / GRID;
    let grid = Transform::from_scale(k, k);

    paint_face(&mut pixmap, spec.shape, grid);

    let text = spec.text.trim();
    match (text.is_empty(), font) {
        (true, _) => {}
        (false, Some(font)) => paint_relief_text(&mut pixmap, text, spec.effect, font, k),
        (false, None) => log::warn!("seal: no font loaded, skipping text {text:?}"),
    }

    paint_marks(&mut pixmap, &spec.marks, grid);
    log::debug!(
        "seal: rendered {size}px {} {} with {} marks",
        spec.shape,
        spec.effect,
        spec.marks.len()
    );
    Ok(pixmap)
}

/// Rasterize and encode as PNG bytes.
pub fn render_seal_png(spec: &SealSpec, font: Option<&Font<'_>>) -> RenderResult<Vec<u8>> {
    render_seal(spec, font)?
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

/// Rasterize and encode as a PNG data URI.
pub fn render_seal_data_uri(spec: &SealSpec, font: Option<&Font<'_>>) -> RenderResult<String> {
    Ok(encode_png_data_uri(&render_seal_png(spec, font)?))
}

fn paint_face(pixmap: &mut Pixmap, shape: SealShape, grid: Transform) {
    let mut paint = Paint::default();
    paint.set_color(skia_color(FACE_COLOR));
    paint.anti_alias = true;
    match shape {
        SealShape::Circle => {
            if let Some(circle) = PathBuilder::from_circle(GRID / 2.0, GRID / 2.0, 90.0) {
                pixmap.fill_path(&circle, &paint, FillRule::Winding, grid, None);
            }
        }
        SealShape::Square => {
            if let Some(rect) = Rect::from_xywh(10.0, 10.0, 180.0, 180.0) {
                pixmap.fill_rect(rect, &paint, grid, None);
            }
        }
    }
}

fn paint_marks(pixmap: &mut Pixmap, marks: &[Vec<(f32, f32)>], grid: Transform) {
    let mut paint = Paint::default();
    paint.set_color(skia_color(MARK_COLOR));
    paint.anti_alias = true;
    let stroke = Stroke {
        width: MARK_WIDTH,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    for mark in marks {
        let Some((&(x0, y0), rest)) = mark.split_first() else {
            continue;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        if rest.is_empty() {
            pb.line_to(x0, y0);
        }
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, grid, None);
        }
    }
}

/// Two fill passes, each with its own offset shadow, like a 2D canvas
/// drawing the same text twice with different shadow settings.
fn paint_relief_text(pixmap: &mut Pixmap, text: &str, effect: SealEffect, font: &Font<'_>, k: f32) {
    let (w, h) = (pixmap.width(), pixmap.height());
    let coverage = text_coverage(text, font, TEXT_PX * k, w, h);
    let shadow = box_blur(&coverage, w as usize, h as usize);
    let offset = k.round().max(1.0) as i32;
    let (fill, first, second) = effect.palette();

    for (shadow_color, d) in [(first, -offset), (second, offset)] {
        if let Some(layer) = tinted(&shadow, w, h, shadow_color) {
            pixmap.draw_pixmap(d, d, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
        if let Some(layer) = tinted(&coverage, w, h, fill) {
            pixmap.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
    }
}

/// Glyph coverage for `text` centered horizontally and vertically.
fn text_coverage(text: &str, font: &Font<'_>, px: f32, w: u32, h: u32) -> Vec<f32> {
    let scale = Scale::uniform(px);
    let v = font.v_metrics(scale);
    let advance = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);

    // Middle of the em box sits on the center line.
    let baseline = h as f32 / 2.0 + (v.ascent + v.descent) / 2.0;
    let origin = point(w as f32 / 2.0 - advance / 2.0, baseline);

    let mut coverage = vec![0.0f32; (w * h) as usize];
    for glyph in font.layout(text, scale, origin) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, cov| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                let idx = y as usize * w as usize + x as usize;
                coverage[idx] = (coverage[idx] + cov).min(1.0);
            }
        });
    }
    coverage
}

/// Separable [1 2 1] / 4 blur, about a one-pixel shadow blur.
fn box_blur(src: &[f32], w: usize, h: usize) -> Vec<f32> {
    let sample = |buf: &[f32], x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            0.0
        } else {
            buf[y as usize * w + x as usize]
        }
    };
    let mut horizontal = vec![0.0f32; src.len()];
    for y in 0..h as isize {
        for x in 0..w as isize {
            horizontal[y as usize * w + x as usize] = (sample(src, x - 1, y)
                + 2.0 * sample(src, x, y)
                + sample(src, x + 1, y))
                / 4.0;
        }
    }
    let mut out = vec![0.0f32; src.len()];
    for y in 0..h as isize {
        for x in 0..w as isize {
            out[y as usize * w + x as usize] = (sample(&horizontal, x, y - 1)
                + 2.0 * sample(&horizontal, x, y)
                + sample(&horizontal, x, y + 1))
                / 4.0;
        }
    }
    out
}

/// A pixmap of `color` whose alpha follows `coverage`.
fn tinted(coverage: &[f32], w: u32, h: u32, color: Color) -> Option<Pixmap> {
    let mut layer = Pixmap::new(w, h)?;
    let [r, g, b, _] = color.to_rgba8();
    for (px, &c) in layer.pixels_mut().iter_mut().zip(coverage) {
        let alpha = (color.a * c).clamp(0.0, 1.0);
        *px = ColorU8::from_rgba(r, g, b, (alpha * 255.0).round() as u8).premultiply();
    }
    Some(layer)
}
