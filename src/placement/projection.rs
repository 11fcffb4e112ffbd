//! Screen-tap deprojection.
//!
//! Converts a normalized screen coordinate into a world-space ray using
//! a pinhole model. Camera body frame follows the world convention:
//! +X forward, +Y left, +Z up. Screen coordinates are normalized to
//! [0, 1] with the origin at the top-left corner.

use serde::{Deserialize, Serialize};

use crate::core::math::deg_to_rad;
use crate::core::{CameraPose, Point3D, Ray3D};

/// A tap location in normalized screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal coordinate, 0 at the left edge, 1 at the right.
    pub x: f32,
    /// Vertical coordinate, 0 at the top edge, 1 at the bottom.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a screen point from normalized coordinates.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The screen center.
    #[inline]
    pub fn center() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// Pinhole camera parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Vertical field of view (radians).
    /// Default: 60 degrees
    pub fov_y: f32,

    /// Width / height aspect ratio.
    /// Default: 16/9
    pub aspect: f32,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            fov_y: deg_to_rad(60.0),
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraIntrinsics {
    /// Create intrinsics from a vertical field of view in degrees.
    pub fn from_fov_deg(fov_y_deg: f32, aspect: f32) -> Self {
        Self {
            fov_y: deg_to_rad(fov_y_deg),
            aspect,
        }
    }
}

/// Deproject a screen point into a world-space ray.
///
/// The ray starts at the camera position and passes through the tapped
/// point on the image plane.
///
/// # Arguments
/// * `screen` - Normalized tap location
/// * `camera` - Camera pose at tap time
/// * `intrinsics` - Pinhole parameters
pub fn screen_ray(
    screen: ScreenPoint,
    camera: &CameraPose,
    intrinsics: &CameraIntrinsics,
) -> Ray3D {
    // NDC: x right in [-1, 1], y up in [-1, 1]
    let ndc_x = 2.0 * screen.x - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y;

    let half_h = (intrinsics.fov_y / 2.0).tan();
    let half_w = half_h * intrinsics.aspect;

    // Body frame: +X forward, +Y left, +Z up. Screen-right is -Y.
    let direction_body = Point3D::new(1.0, -ndc_x * half_w, ndc_y * half_h);
    let direction = camera.pose.orientation.rotate(direction_body);

    Ray3D::new(camera.pose.position, direction)
}
