//! Planar surface types.
//!
//! A surface is a bounded rectangle on an infinite plane: the plane
//! passes through `center.position`, its normal is the local +Z axis of
//! `center.orientation`, and the rectangle spans local X/Y out to the
//! extent half-sizes. With an identity orientation that is a horizontal
//! floor patch.

use serde::{Deserialize, Serialize};

use crate::core::{Point3D, Pose3D, Ray3D};

/// Unique identifier for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl SurfaceId {
    /// Create a new surface ID.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Surface({})", self.0)
    }
}

/// Alignment class of a detected surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Floor or table-like surface, normal near world ±Z.
    Horizontal,
    /// Wall-like surface, normal near the horizontal plane.
    Vertical,
}

impl SurfaceKind {
    /// Kind name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceKind::Horizontal => "horizontal",
            SurfaceKind::Vertical => "vertical",
        }
    }
}

/// Detection confidence of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceState {
    /// Provisional geometry from early detection. Raycasts treat it as
    /// an unbounded plane and only as a fallback.
    Estimated,

    /// Stable geometry with a trusted extent.
    Confirmed,
}

impl SurfaceState {
    /// Is this surface confirmed?
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SurfaceState::Confirmed)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceState::Estimated => "estimated",
            SurfaceState::Confirmed => "confirmed",
        }
    }
}

/// Rectangular extent of a surface in its local frame (meters).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneExtent {
    /// Half-size along local X.
    pub half_x: f32,
    /// Half-size along local Y.
    pub half_y: f32,
}

impl PlaneExtent {
    /// Create from half-sizes.
    #[inline]
    pub fn new(half_x: f32, half_y: f32) -> Self {
        Self { half_x, half_y }
    }

    /// Create from full side lengths.
    #[inline]
    pub fn from_size(size_x: f32, size_y: f32) -> Self {
        Self {
            half_x: size_x / 2.0,
            half_y: size_y / 2.0,
        }
    }

    /// Check whether a local-frame point falls inside the rectangle.
    /// Only local X/Y matter; the caller guarantees the point is on the plane.
    #[inline]
    pub fn contains_local(&self, local: Point3D) -> bool {
        local.x.abs() <= self.half_x && local.y.abs() <= self.half_y
    }

    /// Surface area in square meters.
    #[inline]
    pub fn area(&self) -> f32 {
        4.0 * self.half_x * self.half_y
    }
}

/// A detected planar surface.
///
/// Owned by the registry; merged in place as the perception feed refines
/// its geometry. The id is stable across updates for the lifetime of the
/// surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Stable identity.
    pub id: SurfaceId,
    /// Alignment class. Fixed at first registration.
    pub kind: SurfaceKind,
    /// Detection confidence.
    pub state: SurfaceState,
    /// Plane frame: position on the plane, local +Z is the normal.
    pub center: Pose3D,
    /// Bounded rectangle in the local frame.
    pub extent: PlaneExtent,
    /// Number of perception updates merged into this surface.
    pub observation_count: u32,
    /// Timestamp of the latest merged update (microseconds).
    pub last_update_us: u64,
}

impl Surface {
    /// Create a freshly detected surface (estimated, one observation).
    pub fn new(id: SurfaceId, kind: SurfaceKind, center: Pose3D, extent: PlaneExtent) -> Self {
        Self {
            id,
            kind,
            state: SurfaceState::Estimated,
            center,
            extent,
            observation_count: 1,
            last_update_us: 0,
        }
    }

    /// Create a surface with every field explicit.
    pub fn full(
        id: SurfaceId,
        kind: SurfaceKind,
        state: SurfaceState,
        center: Pose3D,
        extent: PlaneExtent,
        observation_count: u32,
        last_update_us: u64,
    ) -> Self {
        Self {
            id,
            kind,
            state,
            center,
            extent,
            observation_count,
            last_update_us,
        }
    }

    /// World-space plane normal (local +Z).
    #[inline]
    pub fn normal(&self) -> Point3D {
        self.center.orientation.z_axis()
    }

    /// Is this surface confirmed?
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.state.is_confirmed()
    }

    /// Distance along a ray to this surface's infinite plane.
    ///
    /// Returns `None` for rays parallel to the plane. The returned `t`
    /// may be negative (intersection behind the origin); callers bound
    /// it themselves.
    pub fn ray_intersection(&self, ray: &Ray3D) -> Option<f32> {
        let normal = self.normal();
        let denom = ray.direction.dot(&normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.center.position - ray.origin).dot(&normal) / denom;
        Some(t)
    }

    /// Check whether a world-space point on the plane falls inside the extent.
    #[inline]
    pub fn contains(&self, world: Point3D) -> bool {
        let local = self.center.inverse_transform_point(world);
        self.extent.contains_local(local)
    }
}
