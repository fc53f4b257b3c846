//! Rendering for Sumi scenes.
//!
//! Everything rasterizes on the CPU through `tiny-skia`, so the same code
//! paints the live canvas, the PNG export and the seal designer.

pub mod data_uri;
pub mod error;
pub mod export;
pub mod hit;
pub mod paint;
pub mod seal;

pub use error::{RenderError, RenderResult};
pub use export::{ExportOptions, export_png, export_png_data_uri, render_scene};
pub use hit::hit_test;
pub use paint::{Painter, paint_particles};
pub use seal::{SealEffect, SealShape, SealSpec, load_font, render_seal, render_seal_png};
