//! World-space ray for surface queries.

use serde::{Deserialize, Serialize};

use super::point::Point3D;

/// A half-line from an origin along a unit direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray3D {
    /// Ray origin in world frame.
    pub origin: Point3D,
    /// Unit direction (normalized on construction).
    pub direction: Point3D,
}

impl Ray3D {
    /// Create a new ray. The direction is normalized; a zero direction
    /// is kept as-is and will never intersect anything.
    #[inline]
    pub fn new(origin: Point3D, direction: Point3D) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` (meters along the ray).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point3D {
        self.origin + self.direction * t
    }
}
