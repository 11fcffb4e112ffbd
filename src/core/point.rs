//! 3D point type for world-space geometry.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use super::math::all_finite3;

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters (forward in ROS convention)
    pub x: f32,
    /// Y coordinate in meters (left in ROS convention)
    pub y: f32,
    /// Z coordinate in meters (up in ROS convention)
    pub z: f32,
}

impl Point3D {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero point (origin)
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +X (forward)
    pub const UNIT_X: Point3D = Point3D {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +Y (left)
    pub const UNIT_Y: Point3D = Point3D {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit vector along +Z (up)
    pub const UNIT_Z: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalize(&self) -> Point3D {
        let len = self.length();
        if len > 0.0 {
            Point3D::new(self.x / len, self.y / len, self.z / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &Point3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (as vectors)
    #[inline]
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Check that all components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        all_finite3(self.x, self.y, self.z)
    }
}

impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point3D::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Point3D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}
