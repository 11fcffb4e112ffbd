//! Tap-to-place: screen ray deprojection and the placement controller.

mod controller;
mod projection;

pub use controller::{PlacementController, PlacementState};
pub use projection::{CameraIntrinsics, ScreenPoint, screen_ray};
