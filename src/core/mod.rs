//! Core types for the placement engine.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`Point3D`]: World-space coordinates
//! - [`Quaternion`]: Orientation (unit quaternion, [w, x, y, z])
//! - [`Pose3D`] and [`CameraPose`]: Rigid transforms and tracked camera samples
//! - [`Ray3D`]: Raycast input

pub mod math;
mod point;
mod pose;
mod quat;
mod ray;

pub use point::Point3D;
pub use pose::{CameraPose, Pose3D};
pub use quat::Quaternion;
pub use ray::Ray3D;
