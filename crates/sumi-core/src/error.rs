//! Error types for scene and layer operations.

use crate::model::LayerId;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the scene host and the layer model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Deleting the sole remaining layer.
    #[error("at least one layer must remain")]
    LastLayer,

    /// Merging the bottom layer, which has nothing below it.
    #[error("the base layer cannot be merged")]
    MergeBaseLayer,

    /// A layer id that is not in the stack.
    #[error("unknown layer {0}")]
    UnknownLayer(LayerId),

    /// Two objects in one document share an id.
    #[error("duplicate object id: {0}")]
    DuplicateObject(String),

    /// Scene serialization/deserialization error.
    #[error("scene serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
