//! The work behind each subcommand, kept free of file I/O.

use anyhow::{Context, Result, bail};
use std::fmt::Write as _;
use sumi_core::ObjectKind;
use sumi_editor::StudioConfig;
use sumi_editor::project::ProjectFile;
use sumi_render::{ExportOptions, SealSpec, export_png, load_font, render_seal_png};

/// Render a project file to PNG bytes.
pub fn export(project_json: &str, config: &StudioConfig, multiplier: Option<f32>) -> Result<Vec<u8>> {
    let project = ProjectFile::from_json(project_json).context("invalid project file")?;
    let (scene, _) = project.into_document();
    let options = ExportOptions {
        multiplier: multiplier.unwrap_or(config.export_multiplier),
    };
    log::info!(
        "export: {} objects at {}x",
        scene.len(),
        options.multiplier
    );
    Ok(export_png(&scene, options)?)
}

/// A plain-text summary of a project file.
pub fn describe(project_json: &str) -> Result<String> {
    let project = ProjectFile::from_json(project_json).context("invalid project file")?;
    let version = project.version.clone();
    let saved = project.timestamp.clone();
    let (scene, layers) = project.into_document();

    let strokes = scene
        .objects()
        .filter(|o| matches!(o.kind, ObjectKind::Path { .. }))
        .count();
    let images = scene.len() - strokes;

    let mut out = String::new();
    writeln!(out, "version  {version}")?;
    if !saved.is_empty() {
        writeln!(out, "saved    {saved}")?;
    }
    writeln!(
        out,
        "paper    {} x {}  {}",
        scene.width,
        scene.height,
        scene.background.to_hex()
    )?;
    writeln!(out, "objects  {} ({strokes} strokes, {images} images)", scene.len())?;
    for layer in layers.layers() {
        let hidden = if layer.visible { "" } else { " (hidden)" };
        writeln!(
            out,
            "layer {}  {}{hidden}: {} objects",
            layer.id,
            layer.name,
            layer.objects.len()
        )?;
    }
    Ok(out)
}

/// Render a seal to PNG bytes, loading the font if one is given.
pub fn seal(spec: &SealSpec, font: Option<Vec<u8>>) -> Result<Vec<u8>> {
    let font = font.map(load_font).transpose().context("unreadable font")?;
    if font.is_none() && !spec.text.trim().is_empty() {
        log::warn!("seal: text given without --font, rendering the face only");
    }
    Ok(render_seal_png(spec, font.as_ref())?)
}

/// Parse a freehand mark: space-separated `x,y` points on the 200-unit grid.
pub fn parse_mark(input: &str) -> Result<Vec<(f32, f32)>> {
    let points = input
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("point {pair:?} is not x,y"))?;
            Ok((x.trim().parse()?, y.trim().parse()?))
        })
        .collect::<Result<Vec<(f32, f32)>>>()?;
    if points.len() < 2 {
        bail!("a mark needs at least two points");
    }
    Ok(points)
}
