//! Studio error types.

use std::path::PathBuf;
use sumi_core::CoreError;
use sumi_render::RenderError;
use thiserror::Error;

/// Result type for studio commands.
pub type StudioResult<T> = Result<T, StudioError>;

/// Errors surfaced by studio commands. A failing command leaves the studio
/// as it was.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Layer and scene guards (`LastLayer`, `MergeBaseLayer`, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Applying a seal before one was designed.
    #[error("no seal has been designed yet")]
    NoSeal,

    /// Not a CSS color the studio understands.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Unknown tool name from the host page.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Malformed project file.
    #[error("invalid project file: {0}")]
    Project(#[from] serde_json::Error),

    /// Malformed configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
