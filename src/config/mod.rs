//! Session configuration loaded from a single YAML file.

mod defaults;
mod session;

pub use session::{CameraSection, DetectionSection, MergeSection, RaycastSection, SessionConfig};
