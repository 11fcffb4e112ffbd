//! Error types for the placement engine.

use crate::anchor::AnchorId;
use crate::surface::SurfaceId;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Placement engine error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Anchor transform contained NaN or infinity
    #[error("Invalid pose: non-finite position ({x}, {y}, {z})")]
    InvalidPose {
        /// X component of the rejected position
        x: f32,
        /// Y component of the rejected position
        y: f32,
        /// Z component of the rejected position
        z: f32,
    },

    /// Anchor id not present in the store
    #[error("Anchor not found: {0}")]
    AnchorNotFound(AnchorId),

    /// Surface id not present in the registry
    #[error("Surface not found: {0}")]
    SurfaceNotFound(SurfaceId),

    /// A placement is already in flight
    #[error("Placement already in progress")]
    Busy,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(String),
}
