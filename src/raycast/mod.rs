//! Raycasting against registered surfaces.
//!
//! Two-pass resolution: confirmed surfaces are tried first and respect
//! their extents; when none is struck, estimated surfaces act as a
//! fallback and are treated as unbounded planes. Within a pass the
//! nearest intersection wins, and a near-tie keeps the earlier
//! registered surface so repeated casts resolve deterministically.

use serde::{Deserialize, Serialize};

use crate::core::{Point3D, Pose3D, Quaternion, Ray3D};
use crate::surface::{Surface, SurfaceId, SurfaceKind};

/// Configuration for raycast queries.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RaycastConfig {
    /// Maximum hit distance (meters).
    /// Default: 100.0m
    pub max_range: f32,

    /// Minimum hit distance (meters). Filters out intersections at or
    /// behind the ray origin.
    /// Default: 0.001m
    pub min_distance: f32,

    /// Distance margin within which two hits count as a tie.
    /// Default: 1e-4m
    pub tie_epsilon: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_range: 100.0,
            min_distance: 0.001,
            tie_epsilon: 1e-4,
        }
    }
}

impl RaycastConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for maximum range.
    pub fn with_max_range(mut self, meters: f32) -> Self {
        self.max_range = meters;
        self
    }

    /// Builder-style setter for minimum distance.
    pub fn with_min_distance(mut self, meters: f32) -> Self {
        self.min_distance = meters;
        self
    }
}

/// Which surfaces a cast may strike.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SurfaceFilter {
    /// Restrict hits to this kind, if set.
    pub kind: Option<SurfaceKind>,

    /// Allow falling back to estimated surfaces when no confirmed
    /// surface is struck.
    /// Default: true
    pub allow_estimated: bool,

    /// Require confirmed hits to fall inside the surface extent.
    /// Estimated surfaces are always treated as unbounded.
    /// Default: true
    pub respect_extent: bool,
}

impl Default for SurfaceFilter {
    fn default() -> Self {
        Self {
            kind: None,
            allow_estimated: true,
            respect_extent: true,
        }
    }
}

impl SurfaceFilter {
    /// Create a filter accepting every surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style kind restriction.
    pub fn with_kind(mut self, kind: SurfaceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Builder-style setter disabling the estimated fallback.
    pub fn confirmed_only(mut self) -> Self {
        self.allow_estimated = false;
        self
    }

    /// Builder-style setter for extent checking.
    pub fn with_respect_extent(mut self, respect: bool) -> Self {
        self.respect_extent = respect;
        self
    }

    /// Whether a surface passes the kind and state gates.
    pub fn matches(&self, surface: &Surface) -> bool {
        if let Some(kind) = self.kind
            && surface.kind != kind
        {
            return false;
        }
        if !self.allow_estimated && !surface.is_confirmed() {
            return false;
        }
        true
    }
}

/// What a raycast struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// A confirmed surface, hit inside its extent (unless disabled).
    Confirmed(SurfaceId),
    /// An estimated surface, hit on its unbounded plane.
    Estimated(SurfaceId),
}

impl HitTarget {
    /// The struck surface's id.
    pub fn surface_id(&self) -> SurfaceId {
        match self {
            HitTarget::Confirmed(id) | HitTarget::Estimated(id) => *id,
        }
    }

    /// Whether the hit landed on a confirmed surface.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, HitTarget::Confirmed(_))
    }
}

/// A resolved raycast intersection.
#[derive(Clone, Copy, Debug)]
pub struct RaycastHit {
    /// World-space intersection point.
    pub point: Point3D,
    /// Distance from the ray origin (meters).
    pub distance: f32,
    /// The struck surface and its confidence.
    pub target: HitTarget,
    /// Orientation of the struck surface's plane frame.
    pub orientation: Quaternion,
}

impl RaycastHit {
    /// The struck surface's id.
    pub fn surface_id(&self) -> SurfaceId {
        self.target.surface_id()
    }

    /// Anchor-ready pose: the hit point with the surface's orientation,
    /// so anchored content sits flush on the plane.
    pub fn pose(&self) -> Pose3D {
        Pose3D::new(self.point, self.orientation)
    }
}

/// Cast a ray against a set of surfaces.
///
/// Confirmed surfaces win over estimated ones even when an estimated
/// plane is closer; the fallback only runs when no confirmed surface is
/// struck.
///
/// # Arguments
/// * `surfaces` - Candidate surfaces in registration order
/// * `ray` - World-space ray, direction normalized
/// * `filter` - Kind/state gates for this cast
/// * `config` - Distance bounds and tie handling
pub fn cast(
    surfaces: &[Surface],
    ray: &Ray3D,
    filter: &SurfaceFilter,
    config: &RaycastConfig,
) -> Option<RaycastHit> {
    let confirmed = closest_hit(
        surfaces.iter().filter(|s| s.is_confirmed() && filter.matches(s)),
        ray,
        filter.respect_extent,
        config,
    );
    if let Some((t, surface)) = confirmed {
        return Some(RaycastHit {
            point: ray.point_at(t),
            distance: t,
            target: HitTarget::Confirmed(surface.id),
            orientation: surface.center.orientation,
        });
    }

    let estimated = closest_hit(
        surfaces.iter().filter(|s| !s.is_confirmed() && filter.matches(s)),
        ray,
        false,
        config,
    );
    estimated.map(|(t, surface)| RaycastHit {
        point: ray.point_at(t),
        distance: t,
        target: HitTarget::Estimated(surface.id),
        orientation: surface.center.orientation,
    })
}

fn closest_hit<'a>(
    surfaces: impl Iterator<Item = &'a Surface>,
    ray: &Ray3D,
    respect_extent: bool,
    config: &RaycastConfig,
) -> Option<(f32, &'a Surface)> {
    let mut best: Option<(f32, &'a Surface)> = None;
    for surface in surfaces {
        if let Some(t) = surface.ray_intersection(ray)
            && t >= config.min_distance
            && t <= config.max_range
            && (!respect_extent || surface.contains(ray.point_at(t)))
            && best.is_none_or(|(best_t, _)| t < best_t - config.tie_epsilon)
        {
            best = Some((t, surface));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pose3D;
    use crate::surface::{PlaneExtent, SurfaceState};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn floor(id: u64, z: f32, half: f32, state: SurfaceState) -> Surface {
        Surface::full(
            SurfaceId::new(id),
            SurfaceKind::Horizontal,
            state,
            Pose3D::from_position(Point3D::new(0.0, 0.0, z)),
            PlaneExtent::new(half, half),
            1,
            0,
        )
    }

    fn wall(id: u64, x: f32) -> Surface {
        Surface::full(
            SurfaceId::new(id),
            SurfaceKind::Vertical,
            SurfaceState::Confirmed,
            Pose3D::new(
                Point3D::new(x, 0.0, 1.0),
                Quaternion::from_axis_angle(Point3D::UNIT_Y, -FRAC_PI_2),
            ),
            PlaneExtent::new(2.0, 2.0),
            1,
            0,
        )
    }

    fn ray_down(x: f32, height: f32) -> Ray3D {
        Ray3D::new(Point3D::new(x, 0.0, height), Point3D::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_hit_confirmed_floor() {
        let surfaces = [floor(1, 0.0, 1.0, SurfaceState::Confirmed)];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(hit.distance, 1.8, epsilon = 1e-5);
        assert_relative_eq!(hit.point.z, 0.0, epsilon = 1e-5);
        assert_eq!(hit.target, HitTarget::Confirmed(SurfaceId::new(1)));
        assert!(hit.target.is_confirmed());
    }

    #[test]
    fn test_miss_parallel_ray() {
        let surfaces = [floor(1, 0.0, 1.0, SurfaceState::Confirmed)];
        let ray = Ray3D::new(Point3D::new(0.0, 0.0, 1.0), Point3D::UNIT_X);

        let hit = cast(
            &surfaces,
            &ray,
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_miss_plane_behind_origin() {
        let surfaces = [floor(1, 0.0, 1.0, SurfaceState::Confirmed)];
        let ray = Ray3D::new(Point3D::new(0.0, 0.0, 1.8), Point3D::new(0.0, 0.0, 1.0));

        let hit = cast(
            &surfaces,
            &ray,
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_nearest_surface_wins() {
        let surfaces = [
            floor(1, 0.0, 5.0, SurfaceState::Confirmed),
            floor(2, 1.0, 5.0, SurfaceState::Confirmed),
        ];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_eq!(hit.surface_id(), SurfaceId::new(2));
        assert_relative_eq!(hit.distance, 0.8, epsilon = 1e-5);
    }

    #[test]
    fn test_tie_keeps_first_registered() {
        // Two coplanar floors; registration order decides
        let surfaces = [
            floor(7, 0.0, 5.0, SurfaceState::Confirmed),
            floor(8, 0.0, 5.0, SurfaceState::Confirmed),
        ];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_eq!(hit.surface_id(), SurfaceId::new(7));
    }

    #[test]
    fn test_confirmed_beats_closer_estimated() {
        let surfaces = [
            floor(1, 0.0, 5.0, SurfaceState::Confirmed),
            floor(2, 1.0, 5.0, SurfaceState::Estimated),
        ];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_eq!(hit.target, HitTarget::Confirmed(SurfaceId::new(1)));
        assert_relative_eq!(hit.distance, 1.8, epsilon = 1e-5);
    }

    #[test]
    fn test_estimated_fallback() {
        let surfaces = [floor(1, 0.0, 0.5, SurfaceState::Estimated)];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_eq!(hit.target, HitTarget::Estimated(SurfaceId::new(1)));
    }

    #[test]
    fn test_confirmed_only_skips_estimated() {
        let surfaces = [floor(1, 0.0, 0.5, SurfaceState::Estimated)];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default().confirmed_only(),
            &RaycastConfig::default(),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_confirmed_respects_extent() {
        let surfaces = [floor(1, 0.0, 0.5, SurfaceState::Confirmed)];

        // 2m off-center, outside the 0.5m half-extent
        let bounded = cast(
            &surfaces,
            &ray_down(2.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        );
        assert!(bounded.is_none());

        let unbounded = cast(
            &surfaces,
            &ray_down(2.0, 1.8),
            &SurfaceFilter::default().with_respect_extent(false),
            &RaycastConfig::default(),
        );
        assert!(unbounded.is_some());
    }

    #[test]
    fn test_estimated_is_unbounded() {
        let surfaces = [floor(1, 0.0, 0.5, SurfaceState::Estimated)];

        let hit = cast(
            &surfaces,
            &ray_down(2.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_relative_eq!(hit.point.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_min_distance_excludes_origin_contact() {
        let surfaces = [floor(1, 0.0, 1.0, SurfaceState::Confirmed)];
        let ray = Ray3D::new(Point3D::ZERO, Point3D::new(0.0, 0.0, -1.0));

        let hit = cast(
            &surfaces,
            &ray,
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_max_range_bounds_hits() {
        let surfaces = [floor(1, -200.0, 500.0, SurfaceState::Confirmed)];

        let hit = cast(
            &surfaces,
            &ray_down(0.0, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_kind_filter() {
        let surfaces = [floor(1, 0.0, 5.0, SurfaceState::Confirmed), wall(2, 3.0)];
        let ray = Ray3D::new(Point3D::new(0.0, 0.0, 1.0), Point3D::UNIT_X);

        let hit = cast(
            &surfaces,
            &ray,
            &SurfaceFilter::default().with_kind(SurfaceKind::Vertical),
            &RaycastConfig::default(),
        )
        .unwrap();

        assert_eq!(hit.surface_id(), SurfaceId::new(2));
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hit_pose_sits_on_surface() {
        let surfaces = [floor(1, 0.0, 1.0, SurfaceState::Confirmed)];

        let hit = cast(
            &surfaces,
            &ray_down(0.3, 1.8),
            &SurfaceFilter::default(),
            &RaycastConfig::default(),
        )
        .unwrap();

        let pose = hit.pose();
        assert_relative_eq!(pose.position.x, 0.3, epsilon = 1e-5);
        assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-5);
        // Floor frame: pose normal points up
        assert_relative_eq!(pose.orientation.z_axis().z, 1.0, epsilon = 1e-5);
    }
}
