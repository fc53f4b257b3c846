//! Interaction engine for the Sumi ink-painting studio.
//!
//! [`Studio`] is the command surface a host page (or the CLI) drives:
//! pointer and key events, frame ticks, tool and brush changes, layer
//! commands, seals, history, and project files.

pub mod bleed;
pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod input;
pub mod project;
pub mod seal;
pub mod shortcuts;
pub mod studio;
pub mod tools;

pub use config::StudioConfig;
pub use error::{StudioError, StudioResult};
pub use studio::Studio;
