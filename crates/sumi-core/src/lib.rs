pub mod color;
pub mod document;
pub mod error;
pub mod id;
pub mod layer;
pub mod model;
pub mod particle;
pub mod viewport;

pub use color::Color;
pub use document::{emit_scene, parse_scene};
pub use error::{CoreError, CoreResult};
pub use id::ObjectId;
pub use layer::{Layer, LayerStack};
pub use model::*;
pub use particle::Particle;
pub use viewport::Viewport;
