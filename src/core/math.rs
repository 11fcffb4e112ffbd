//! Mathematical utilities shared across the engine.
//!
//! All angles are in radians. Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use std::f32::consts::PI;

/// Convert degrees to radians.
///
/// # Example
/// ```
/// use sthira_anchor::core::math::deg_to_rad;
/// use std::f32::consts::PI;
///
/// assert!((deg_to_rad(180.0) - PI).abs() < 1e-6);
/// ```
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Clamp a value to a range.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between two values.
///
/// # Example
/// ```
/// use sthira_anchor::core::math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Square of a value. Useful for avoiding `pow(x, 2)`.
#[inline]
pub fn sq(x: f32) -> f32 {
    x * x
}

/// Check that all three components are finite (no NaN, no infinity).
///
/// # Example
/// ```
/// use sthira_anchor::core::math::all_finite3;
///
/// assert!(all_finite3(1.0, -2.0, 0.0));
/// assert!(!all_finite3(f32::NAN, 0.0, 0.0));
/// assert!(!all_finite3(0.0, f32::INFINITY, 0.0));
/// ```
#[inline]
pub fn all_finite3(x: f32, y: f32, z: f32) -> bool {
    x.is_finite() && y.is_finite() && z.is_finite()
}
