//! # Sthira-Anchor: Plane-Anchored Object Placement
//!
//! A placement engine for AR-style sessions: it tracks planar surfaces
//! reported by a perception feed, raycasts screen taps against them, and
//! pins renderable objects to the struck points as world anchors.
//!
//! ## Features
//!
//! - **Surface Registry**: Stable surface identities with merge-on-update
//!   refinement and removal tombstones
//! - **Two-Pass Raycasting**: Confirmed surfaces win; estimated planes act
//!   as an unbounded fallback so placement works before detection settles
//! - **Tap-to-Place**: Pinhole deprojection of normalized screen taps into
//!   world rays, one placement in flight at a time
//! - **Renderer Agnostic**: Anchors carry mesh and material descriptors;
//!   renderers mirror the store through subscriptions
//!
//! ## Quick Start
//!
//! ```rust
//! use sthira_anchor::{
//!     CameraPose, Material, ObjectDescriptor, PlacementSession, PlaneExtent, Point3D, Pose3D,
//!     Quaternion, ScreenPoint, SessionConfig, StaticPoseSource, Surface, SurfaceId, SurfaceKind,
//!     SurfaceState,
//! };
//! use std::f32::consts::FRAC_PI_2;
//!
//! # fn main() -> sthira_anchor::Result<()> {
//! // Camera 1.8m up, pitched straight down at the floor
//! let camera = CameraPose::new(
//!     Pose3D::new(
//!         Point3D::new(0.0, 0.0, 1.8),
//!         Quaternion::from_axis_angle(Point3D::UNIT_Y, FRAC_PI_2),
//!     ),
//!     0,
//! );
//! let session = PlacementSession::new(
//!     SessionConfig::default(),
//!     Box::new(StaticPoseSource::new(camera)),
//! );
//!
//! // Perception feed reports a confirmed 2x2m floor patch at the origin
//! session.on_surface_update(Surface::full(
//!     SurfaceId::new(1),
//!     SurfaceKind::Horizontal,
//!     SurfaceState::Confirmed,
//!     Pose3D::identity(),
//!     PlaneExtent::new(1.0, 1.0),
//!     1,
//!     0,
//! ));
//!
//! // Tap the screen center: the ray strikes the floor and pins a sphere
//! let anchor = session.tap(ScreenPoint::center(), || {
//!     ObjectDescriptor::sphere(0.05, Material::metallic([0.0, 0.0, 1.0, 1.0]))
//! })?;
//! assert!(anchor.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention:
//! - **X-forward**: Positive X is in front of the camera
//! - **Y-left**: Positive Y is to the left
//! - **Z-up**: Positive Z is upward
//! - A surface with identity orientation is a horizontal plane whose
//!   normal points up (+Z); walls carry a quarter-turn about a
//!   horizontal axis
//!
//! Screen taps are normalized to [0, 1] with the origin at the top-left
//! corner.
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: Fundamental types (Point3D, Quaternion, Pose3D, Ray3D)
//! - [`surface`]: Detected surfaces and the registry tracking them
//! - [`raycast`]: Ray-versus-surface queries with confirmed/estimated passes
//! - [`anchor`]: Placed objects and renderer subscriptions
//! - [`placement`]: Tap deprojection and the placement controller
//! - [`session`]: Facade wiring the feed, placement, and renderers together
//! - [`config`]: YAML session configuration
//! - [`shared`]: Shared-state aliases for the threading layout
//!
//! ## Data Flow
//!
//! ```text
//!   ┌──────────────────┐         ┌──────────────────┐
//!   │ Perception Feed  │         │    Screen Tap    │
//!   │ (SurfaceEvent)   │         │  (ScreenPoint)   │
//!   └────────┬─────────┘         └────────┬─────────┘
//!            │ upsert/remove              │ screen_ray()
//!            ▼                            ▼
//!   ┌──────────────────┐  cast   ┌──────────────────┐
//!   │ SurfaceRegistry  │◄────────│    Placement     │
//!   │ (ids, tombstones)│         │    Controller    │
//!   └──────────────────┘         └────────┬─────────┘
//!                                         │ create_anchor(hit.pose())
//!                                         ▼
//!                                ┌──────────────────┐
//!                                │   AnchorStore    │──► Renderer
//!                                │  (subscriptions) │    callbacks
//!                                └──────────────────┘
//! ```

pub mod anchor;
pub mod config;
pub mod core;
pub mod error;
pub mod placement;
pub mod raycast;
pub mod session;
pub mod shared;
pub mod surface;

// Re-export main types at crate root
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use session::{PlacementSession, PoseSource, StaticPoseSource, SurfaceEvent};

// Re-export geometry types
pub use crate::core::{CameraPose, Point3D, Pose3D, Quaternion, Ray3D};

// Re-export surface tracking types
pub use surface::{
    DetectionConfig, MergeConfig, PlaneExtent, Surface, SurfaceId, SurfaceKind, SurfaceQuery,
    SurfaceRegistry, SurfaceState, UpsertOutcome,
};

// Re-export raycast types
pub use raycast::{HitTarget, RaycastConfig, RaycastHit, SurfaceFilter, cast};

// Re-export anchor types
pub use anchor::{Anchor, AnchorId, AnchorStore, Material, MeshKind, ObjectDescriptor};

// Re-export placement types
pub use placement::{CameraIntrinsics, PlacementController, PlacementState, ScreenPoint, screen_ray};

// Re-export shared-state aliases
pub use shared::{SharedAnchors, SharedSurfaces, shared_anchors, shared_surfaces};
