//! 3D pose type for camera, surface, and anchor transforms.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use serde::{Deserialize, Serialize};

use super::point::Point3D;
use super::quat::Quaternion;

/// A rigid 3D transform: position and orientation.
///
/// Uses the ROS REP-103 coordinate convention:
/// - Position: (x, y, z) in meters
/// - Orientation: unit quaternion; identity means the local frame is
///   aligned with the world frame (local +Z points up)
///
/// # Composition
///
/// Poses can be composed using the `*` operator (chain transformations):
/// ```
/// use sthira_anchor::core::{Point3D, Pose3D, Quaternion};
///
/// let a = Pose3D::new(
///     Point3D::new(1.0, 0.0, 0.0),
///     Quaternion::from_axis_angle(Point3D::UNIT_Z, std::f32::consts::FRAC_PI_2),
/// );
/// let b = Pose3D::from_position(Point3D::new(1.0, 0.0, 0.0));
/// let combined = a * b; // Apply b in a's frame
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose3D {
    /// Position in meters.
    pub position: Point3D,
    /// Orientation as a unit quaternion.
    pub orientation: Quaternion,
}

impl Pose3D {
    /// Create a new pose.
    #[inline]
    pub fn new(position: Point3D, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create an identity pose (origin, world-aligned).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            position: Point3D::ZERO,
            orientation: Quaternion::identity(),
        }
    }

    /// Create a pose at a position with identity orientation.
    #[inline]
    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            orientation: Quaternion::identity(),
        }
    }

    /// Transform a point from this pose's local frame to the world frame.
    #[inline]
    pub fn transform_point(&self, point: Point3D) -> Point3D {
        self.position + self.orientation.rotate(point)
    }

    /// Transform a point from the world frame to this pose's local frame.
    #[inline]
    pub fn inverse_transform_point(&self, point: Point3D) -> Point3D {
        self.orientation.conjugate().rotate(point - self.position)
    }

    /// Compose this pose with another (chain transformations).
    ///
    /// Returns a new pose representing: apply `other` in `self`'s frame.
    #[inline]
    pub fn compose(&self, other: &Pose3D) -> Self {
        Self {
            position: self.transform_point(other.position),
            orientation: (self.orientation * other.orientation).normalized(),
        }
    }

    /// Compute the inverse of this pose.
    ///
    /// The inverse pose, when composed with the original, yields identity:
    /// `pose.compose(&pose.inverse()) ≈ Pose3D::identity()`
    #[inline]
    pub fn inverse(&self) -> Self {
        let inv_orientation = self.orientation.conjugate();
        Self {
            position: inv_orientation.rotate(-self.position),
            orientation: inv_orientation,
        }
    }

    /// Check that position and orientation are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }
}

impl std::ops::Mul for Pose3D {
    type Output = Self;

    /// Compose two poses (same as `compose`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

/// A camera pose sample from the tracking feed.
///
/// Transient input to placement; the engine never stores it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Camera-to-world transform. Camera frame is REP-103:
    /// +X forward through the lens, +Y left, +Z up.
    pub pose: Pose3D,
    /// Capture timestamp in microseconds since epoch.
    pub timestamp_us: u64,
}

impl CameraPose {
    /// Create a new camera pose sample.
    #[inline]
    pub fn new(pose: Pose3D, timestamp_us: u64) -> Self {
        Self { pose, timestamp_us }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let pose = Pose3D::identity();
        assert_eq!(pose.position, Point3D::ZERO);
        assert_eq!(pose.orientation, Quaternion::identity());
    }

    #[test]
    fn test_transform_point() {
        // At origin, no rotation
        let pose = Pose3D::identity();
        let world = pose.transform_point(Point3D::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-6);

        // At (1, 0, 0), yawed 90 degrees: local forward points left
        let pose = Pose3D::new(
            Point3D::new(1.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Point3D::UNIT_Z, FRAC_PI_2),
        );
        let world = pose.transform_point(Point3D::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_transform_point() {
        let pose = Pose3D::new(
            Point3D::new(1.0, 2.0, 0.5),
            Quaternion::from_axis_angle(Point3D::UNIT_Z, FRAC_PI_2),
        );
        let world = Point3D::new(3.0, 4.0, 1.0);

        let local = pose.inverse_transform_point(world);
        let back = pose.transform_point(local);

        assert_relative_eq!(back.x, world.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, world.z, epsilon = 1e-5);
    }

    #[test]
    fn test_compose() {
        let translate = Pose3D::from_position(Point3D::new(1.0, 0.0, 0.0));
        let rotate = Pose3D::new(
            Point3D::ZERO,
            Quaternion::from_axis_angle(Point3D::UNIT_Z, FRAC_PI_2),
        );

        // Rotate then translate (in rotated frame): ends up at (0, 1, 0)
        let combined = rotate.compose(&translate);
        assert_relative_eq!(combined.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(combined.position.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse() {
        let pose = Pose3D::new(
            Point3D::new(1.0, 2.0, 0.5),
            Quaternion::from_axis_angle(Point3D::new(0.3, 1.0, 0.2), 0.8),
        );
        let identity = pose.compose(&pose.inverse());

        assert_relative_eq!(identity.position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(identity.position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(identity.position.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(
            identity.orientation.angle_to(&Quaternion::identity()),
            0.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_mul_operator() {
        let a = Pose3D::new(
            Point3D::new(1.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Point3D::UNIT_Z, FRAC_PI_2),
        );
        let b = Pose3D::from_position(Point3D::new(1.0, 0.0, 0.0));

        assert_eq!(a.compose(&b), a * b);
    }

    #[test]
    fn test_is_finite() {
        assert!(Pose3D::identity().is_finite());
        let bad = Pose3D::from_position(Point3D::new(f32::NAN, 0.0, 0.0));
        assert!(!bad.is_finite());
    }
}
