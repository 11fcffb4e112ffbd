//! Unit quaternion for 3D orientation.
//!
//! Stored as [w, x, y, z]. The identity quaternion leaves vectors
//! unchanged; for surfaces it represents a horizontal plane whose
//! normal points along world +Z.

use serde::{Deserialize, Serialize};

use super::math::all_finite3;
use super::point::Point3D;

/// Quaternion representation [w, x, y, z].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component
    pub w: f32,
    /// Vector X component
    pub x: f32,
    /// Vector Y component
    pub y: f32,
    /// Vector Z component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create identity quaternion (no rotation).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Create a quaternion from a rotation axis and angle (radians).
    ///
    /// The axis does not need to be unit length. Counter-clockwise
    /// positive when looking down the axis toward the origin.
    pub fn from_axis_angle(axis: Point3D, angle: f32) -> Self {
        let axis = axis.normalize();
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self {
            w: cos,
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
    }

    /// Quaternion norm (length in 4D).
    #[inline]
    pub fn norm(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Return a unit-length copy of this quaternion.
    ///
    /// Degenerate (near-zero) quaternions are returned unchanged.
    #[inline]
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        if norm > 1e-10 {
            Self {
                w: self.w / norm,
                x: self.x / norm,
                y: self.y / norm,
                z: self.z / norm,
            }
        } else {
            *self
        }
    }

    /// Conjugate (inverse for unit quaternions).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// 4D dot product with another quaternion.
    #[inline]
    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Rotate a vector by this quaternion.
    #[inline]
    pub fn rotate(&self, v: Point3D) -> Point3D {
        // v' = v + 2w(q x v) + 2(q x (q x v)) with q the vector part
        let q = Point3D::new(self.x, self.y, self.z);
        let t = q.cross(&v) * 2.0;
        v + t * self.w + q.cross(&t)
    }

    /// Normalized linear interpolation toward another orientation.
    ///
    /// Flips the target onto the same hemisphere first, so the blend
    /// always takes the short way around. Adequate for the small
    /// per-update corrections surface merging produces.
    pub fn nlerp(&self, other: &Quaternion, t: f32) -> Self {
        let other = if self.dot(other) < 0.0 {
            Quaternion {
                w: -other.w,
                x: -other.x,
                y: -other.y,
                z: -other.z,
            }
        } else {
            *other
        };

        Self {
            w: self.w + (other.w - self.w) * t,
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
        .normalized()
    }

    /// Angular distance to another orientation (radians, [0, π]).
    pub fn angle_to(&self, other: &Quaternion) -> f32 {
        let d = self.dot(other).abs().min(1.0);
        2.0 * d.acos()
    }

    /// Local +X axis (forward) expressed in the parent frame.
    #[inline]
    pub fn x_axis(&self) -> Point3D {
        self.rotate(Point3D::UNIT_X)
    }

    /// Local +Y axis (left) expressed in the parent frame.
    #[inline]
    pub fn y_axis(&self) -> Point3D {
        self.rotate(Point3D::UNIT_Y)
    }

    /// Local +Z axis (up / plane normal) expressed in the parent frame.
    #[inline]
    pub fn z_axis(&self) -> Point3D {
        self.rotate(Point3D::UNIT_Z)
    }

    /// Check that all components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && all_finite3(self.x, self.y, self.z)
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    /// Hamilton product (compose rotations: apply `rhs` first, then `self`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}
