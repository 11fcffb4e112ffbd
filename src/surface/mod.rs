//! Detected plane surfaces and the registry that tracks them.

mod merge;
mod plane;
mod registry;

pub use merge::{MergeConfig, MergeOutcome, merge_surfaces};
pub use plane::{PlaneExtent, Surface, SurfaceId, SurfaceKind, SurfaceState};
pub use registry::{DetectionConfig, SurfaceQuery, SurfaceRegistry, UpsertOutcome};
