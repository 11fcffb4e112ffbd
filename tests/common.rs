//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::f32::consts::FRAC_PI_2;

use sthira_anchor::{
    CameraPose, Material, ObjectDescriptor, PlacementSession, PlaneExtent, Point3D, Pose3D,
    PoseSource, Quaternion, StaticPoseSource, Surface, SurfaceId, SurfaceKind, SurfaceState,
};

/// Confirmed floor patch centered at the origin.
pub fn floor_surface(id: u64, half: f32) -> Surface {
    Surface::full(
        SurfaceId::new(id),
        SurfaceKind::Horizontal,
        SurfaceState::Confirmed,
        Pose3D::identity(),
        PlaneExtent::new(half, half),
        1,
        0,
    )
}

/// Estimated floor patch centered at the origin.
pub fn estimated_floor(id: u64, half: f32) -> Surface {
    Surface::full(
        SurfaceId::new(id),
        SurfaceKind::Horizontal,
        SurfaceState::Estimated,
        Pose3D::identity(),
        PlaneExtent::new(half, half),
        1,
        0,
    )
}

/// Confirmed wall at the given x, normal facing -X.
pub fn vertical_wall(id: u64, x: f32, half: f32) -> Surface {
    Surface::full(
        SurfaceId::new(id),
        SurfaceKind::Vertical,
        SurfaceState::Confirmed,
        Pose3D::new(
            Point3D::new(x, 0.0, 1.0),
            Quaternion::from_axis_angle(Point3D::UNIT_Y, -FRAC_PI_2),
        ),
        PlaneExtent::new(half, half),
        1,
        0,
    )
}

/// Camera at the given height, pitched straight down.
pub fn camera_above(height: f32) -> CameraPose {
    CameraPose::new(
        Pose3D::new(
            Point3D::new(0.0, 0.0, height),
            Quaternion::from_axis_angle(Point3D::UNIT_Y, FRAC_PI_2),
        ),
        0,
    )
}

/// Blue metallic sphere, the stock demo object.
pub fn descriptor() -> ObjectDescriptor {
    ObjectDescriptor::sphere(0.05, Material::metallic([0.0, 0.0, 1.0, 1.0]))
}

/// Session looking down at a confirmed 1x1m floor at the origin.
pub fn session_with_floor() -> PlacementSession {
    let session =
        PlacementSession::with_defaults(Box::new(StaticPoseSource::new(camera_above(1.8))));
    session.on_surface_update(floor_surface(1, 0.5));
    session
}

/// Pose source that replays a fixed sequence, then repeats the last
/// pose.
pub struct ScriptedPoseSource {
    poses: Vec<CameraPose>,
    next: usize,
}

impl ScriptedPoseSource {
    pub fn new(poses: Vec<CameraPose>) -> Self {
        assert!(!poses.is_empty());
        Self { poses, next: 0 }
    }
}

impl PoseSource for ScriptedPoseSource {
    fn current_pose(&mut self) -> CameraPose {
        let pose = self.poses[self.next.min(self.poses.len() - 1)];
        self.next += 1;
        pose
    }
}
