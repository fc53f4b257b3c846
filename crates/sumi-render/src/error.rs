//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing or encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Zero-sized or oversized target.
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Embedded image could not be decoded.
    #[error("image decoding failed: {0}")]
    Decode(String),

    /// Not a base64 `data:` URI.
    #[error("malformed data URI: {0}")]
    DataUri(String),

    /// Font bytes were not a usable TrueType/OpenType font.
    #[error("font could not be loaded")]
    Font,
}
