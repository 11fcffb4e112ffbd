//! Tap-to-place control flow.
//!
//! One placement runs at a time. The controller holds no lock across
//! the whole operation; instead an atomic flag serializes placements so
//! a second tap while one is in flight fails fast with `Error::Busy`
//! rather than queueing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::anchor::{AnchorId, ObjectDescriptor};
use crate::core::CameraPose;
use crate::error::{Error, Result};
use crate::raycast::{RaycastConfig, SurfaceFilter, cast};
use crate::shared::{SharedAnchors, SharedSurfaces};

use super::projection::{CameraIntrinsics, ScreenPoint, screen_ray};

/// Whether a placement is currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementState {
    Idle,
    Placing,
}

impl PlacementState {
    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlacementState::Idle => "idle",
            PlacementState::Placing => "placing",
        }
    }

    /// Is a placement in flight?
    #[inline]
    pub fn is_placing(&self) -> bool {
        matches!(self, PlacementState::Placing)
    }
}

/// Resets the placing flag when the placement scope exits.
///
/// Tied to a guard so an early return or a panicking descriptor factory
/// cannot leave the controller stuck in `Placing`.
struct PlacingGuard<'a>(&'a AtomicBool);

impl Drop for PlacingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Turns screen taps into anchors.
pub struct PlacementController {
    surfaces: SharedSurfaces,
    anchors: SharedAnchors,
    placing: AtomicBool,
    filter: SurfaceFilter,
    raycast: RaycastConfig,
    intrinsics: CameraIntrinsics,
}

impl PlacementController {
    /// Create a controller over shared surface and anchor state.
    pub fn new(
        surfaces: SharedSurfaces,
        anchors: SharedAnchors,
        filter: SurfaceFilter,
        raycast: RaycastConfig,
        intrinsics: CameraIntrinsics,
    ) -> Self {
        Self {
            surfaces,
            anchors,
            placing: AtomicBool::new(false),
            filter,
            raycast,
            intrinsics,
        }
    }

    /// Create a controller with default filter, raycast, and camera
    /// parameters.
    pub fn with_defaults(surfaces: SharedSurfaces, anchors: SharedAnchors) -> Self {
        Self::new(
            surfaces,
            anchors,
            SurfaceFilter::default(),
            RaycastConfig::default(),
            CameraIntrinsics::default(),
        )
    }

    /// Current placement state.
    pub fn state(&self) -> PlacementState {
        if self.placing.load(Ordering::Acquire) {
            PlacementState::Placing
        } else {
            PlacementState::Idle
        }
    }

    /// Place an object where a screen tap strikes a surface.
    ///
    /// The descriptor factory runs only after a surface is struck, so
    /// callers can defer building the object until it is needed.
    /// Returns `Ok(None)` when the tap hits no surface, and
    /// `Err(Error::Busy)` when another placement is already in flight.
    ///
    /// # Arguments
    /// * `screen` - Normalized tap location
    /// * `camera` - Camera pose at tap time
    /// * `object` - Factory for the object to place
    pub fn place_at<F>(
        &self,
        screen: ScreenPoint,
        camera: &CameraPose,
        object: F,
    ) -> Result<Option<AnchorId>>
    where
        F: FnOnce() -> ObjectDescriptor,
    {
        if self
            .placing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            log::debug!("[Place] Tap ignored, placement already in flight");
            return Err(Error::Busy);
        }
        let _guard = PlacingGuard(&self.placing);

        let ray = screen_ray(screen, camera, &self.intrinsics);
        let hit = {
            let registry = self.surfaces.read();
            cast(registry.surfaces(), &ray, &self.filter, &self.raycast)
        };

        let Some(hit) = hit else {
            log::debug!(
                "[Place] Tap ({:.2}, {:.2}) hit no surface",
                screen.x,
                screen.y
            );
            return Ok(None);
        };

        let descriptor = object();
        let id = self.anchors.lock().create_anchor(hit.pose(), descriptor)?;
        log::info!(
            "[Place] Anchored {} on {} at {:.2}m",
            id,
            hit.surface_id(),
            hit.distance
        );
        Ok(Some(id))
    }
}
