//! `sumi`: headless tools for Sumi project files.
//!
//! ```text
//! sumi export painting.json painting.png --multiplier 3
//! sumi info painting.json
//! sumi seal 墨 seal.png --font brush.ttf --shape square --effect engrave
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use sumi_editor::StudioConfig;
use sumi_render::{SealEffect, SealShape, SealSpec};

#[derive(Parser, Debug)]
#[command(name = "sumi")]
#[command(about = "Export, inspect and stamp Sumi ink paintings")]
#[command(version)]
struct Cli {
    /// Studio config (JSON). Defaults apply to anything it leaves out.
    #[arg(long, global = true, env = "SUMI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a project file to PNG.
    Export {
        project: PathBuf,
        output: PathBuf,
        /// Resolution multiplier (config default: 2).
        #[arg(long, short)]
        multiplier: Option<f32>,
    },
    /// Summarize a project file.
    Info { project: PathBuf },
    /// Render a seal to PNG.
    Seal {
        text: String,
        output: PathBuf,
        /// TTF/OTF font for the seal text.
        #[arg(long)]
        font: Option<PathBuf>,
        #[arg(long, default_value = "circle")]
        shape: SealShape,
        #[arg(long, default_value = "emboss")]
        effect: SealEffect,
        /// Edge length in pixels (config default: 200).
        #[arg(long)]
        size: Option<u32>,
        /// Freehand red mark as `x,y x,y ...` on the 200-unit grid. Repeatable.
        #[arg(long = "mark", value_parser = parse_mark_arg)]
        marks: Vec<Mark>,
    },
}

/// One `--mark` polyline.
#[derive(Clone, Debug)]
struct Mark(Vec<(f32, f32)>);

fn parse_mark_arg(input: &str) -> std::result::Result<Mark, String> {
    commands::parse_mark(input).map(Mark).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => StudioConfig::from_file(path)?,
        None => StudioConfig::default(),
    };

    match cli.command {
        Command::Export {
            project,
            output,
            multiplier,
        } => {
            let png = commands::export(&read(&project)?, &config, multiplier)?;
            write(&output, &png)?;
        }
        Command::Info { project } => {
            print!("{}", commands::describe(&read(&project)?)?);
        }
        Command::Seal {
            text,
            output,
            font,
            shape,
            effect,
            size,
            marks,
        } => {
            let font = font
                .map(|path| fs::read(&path).with_context(|| format!("cannot read {}", path.display())))
                .transpose()?;
            let spec = SealSpec {
                text,
                shape,
                effect,
                size: size.unwrap_or(config.seal_size),
                marks: marks.into_iter().map(|m| m.0).collect(),
            };
            write(&output, &commands::seal(&spec, font)?)?;
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
