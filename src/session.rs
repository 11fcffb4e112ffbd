//! Session facade tying the perception feed, placement, and renderers
//! together.
//!
//! A [`PlacementSession`] owns the shared surface registry and anchor
//! store, a placement controller over both, and a pose source for the
//! tracking camera. The perception feed drives it either directly
//! through [`PlacementSession::on_surface_update`] or through a channel
//! pumped by [`PlacementSession::spawn_feed_pump`].

use std::sync::Arc;
use std::thread;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use crate::anchor::{Anchor, AnchorId, ObjectDescriptor, SubscriptionId};
use crate::config::SessionConfig;
use crate::core::CameraPose;
use crate::error::{Error, Result};
use crate::placement::{PlacementController, PlacementState, ScreenPoint};
use crate::shared::{SharedAnchors, SharedSurfaces, shared_anchors, shared_surfaces};
use crate::surface::{Surface, SurfaceId, SurfaceRegistry, UpsertOutcome};

/// Supplies the camera pose at tap time.
///
/// Implementations wrap whatever tracking system is available; tests
/// and demos use [`StaticPoseSource`].
pub trait PoseSource: Send {
    /// The most recent camera pose.
    fn current_pose(&mut self) -> CameraPose;
}

/// Pose source that always returns the same pose.
pub struct StaticPoseSource {
    pose: CameraPose,
}

impl StaticPoseSource {
    /// Create a pose source pinned to one pose.
    pub fn new(pose: CameraPose) -> Self {
        Self { pose }
    }
}

impl PoseSource for StaticPoseSource {
    fn current_pose(&mut self) -> CameraPose {
        self.pose
    }
}

/// One message from the perception feed.
#[derive(Clone, Debug)]
pub enum SurfaceEvent {
    /// A surface was detected or refined.
    Updated(Surface),
    /// A surface disappeared from tracking.
    Removed(SurfaceId),
}

/// A live placement session.
pub struct PlacementSession {
    surfaces: SharedSurfaces,
    anchors: SharedAnchors,
    controller: PlacementController,
    pose_source: Mutex<Box<dyn PoseSource>>,
    config: SessionConfig,
}

impl PlacementSession {
    /// Create a session from configuration and a pose source.
    pub fn new(config: SessionConfig, pose_source: Box<dyn PoseSource>) -> Self {
        let surfaces = shared_surfaces(SurfaceRegistry::new(
            config.to_detection_config(),
            config.to_merge_config(),
        ));
        let anchors = shared_anchors();
        let controller = PlacementController::new(
            Arc::clone(&surfaces),
            Arc::clone(&anchors),
            config.to_surface_filter(),
            config.to_raycast_config(),
            config.to_intrinsics(),
        );
        Self {
            surfaces,
            anchors,
            controller,
            pose_source: Mutex::new(pose_source),
            config,
        }
    }

    /// Create a session with default configuration.
    pub fn with_defaults(pose_source: Box<dyn PoseSource>) -> Self {
        Self::new(SessionConfig::default(), pose_source)
    }

    /// Apply a surface detection or refinement from the feed.
    pub fn on_surface_update(&self, surface: Surface) -> UpsertOutcome {
        self.surfaces.write().upsert(surface)
    }

    /// Apply a surface removal from the feed.
    pub fn on_surface_removed(&self, id: SurfaceId) {
        self.surfaces.write().remove(id);
    }

    /// Place an object where a tap strikes a surface, using the pose
    /// source for the camera.
    ///
    /// See [`PlacementController::place_at`] for the hit and busy
    /// semantics.
    pub fn tap<F>(&self, screen: ScreenPoint, object: F) -> Result<Option<AnchorId>>
    where
        F: FnOnce() -> ObjectDescriptor,
    {
        let camera = self.pose_source.lock().current_pose();
        self.controller.place_at(screen, &camera, object)
    }

    /// Place an object with an explicit camera pose.
    pub fn place_at<F>(
        &self,
        screen: ScreenPoint,
        camera: &CameraPose,
        object: F,
    ) -> Result<Option<AnchorId>>
    where
        F: FnOnce() -> ObjectDescriptor,
    {
        self.controller.place_at(screen, camera, object)
    }

    /// Current placement state.
    pub fn placement_state(&self) -> PlacementState {
        self.controller.state()
    }

    /// Register renderer callbacks for anchor additions and removals.
    pub fn subscribe_renderer<A, R>(&self, on_add: A, on_remove: R) -> SubscriptionId
    where
        A: Fn(&Anchor) + Send + 'static,
        R: Fn(AnchorId) + Send + 'static,
    {
        self.anchors.lock().subscribe(on_add, on_remove)
    }

    /// Drop a renderer subscription. Returns false if it was not
    /// registered.
    pub fn unsubscribe_renderer(&self, id: SubscriptionId) -> bool {
        self.anchors.lock().unsubscribe(id)
    }

    /// Remove a placed anchor.
    pub fn remove_anchor(&self, id: AnchorId) -> Result<()> {
        self.anchors.lock().remove_anchor(id)
    }

    /// Look up a placed anchor.
    pub fn anchor(&self, id: AnchorId) -> Option<Anchor> {
        self.anchors.lock().get(id).copied()
    }

    /// Look up a tracked surface.
    pub fn surface(&self, id: SurfaceId) -> Result<Surface> {
        self.surfaces
            .read()
            .get(id)
            .copied()
            .ok_or(Error::SurfaceNotFound(id))
    }

    /// Number of tracked surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.read().len()
    }

    /// Number of placed anchors.
    pub fn anchor_count(&self) -> usize {
        self.anchors.lock().len()
    }

    /// Drop all surfaces (including removal tombstones) and anchors,
    /// as on a tracking restart.
    pub fn reset(&self) {
        self.surfaces.write().clear();
        self.anchors.lock().clear();
        log::info!("[Session] Reset");
    }

    /// Shared handle to the surface registry.
    pub fn surfaces(&self) -> SharedSurfaces {
        Arc::clone(&self.surfaces)
    }

    /// Shared handle to the anchor store.
    pub fn anchors(&self) -> SharedAnchors {
        Arc::clone(&self.anchors)
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Spawn a thread that applies feed events until the sender side
    /// disconnects.
    pub fn spawn_feed_pump(
        &self,
        receiver: Receiver<SurfaceEvent>,
    ) -> Result<thread::JoinHandle<()>> {
        let surfaces = Arc::clone(&self.surfaces);
        let handle = thread::Builder::new()
            .name("surface-feed".into())
            .spawn(move || {
                while let Ok(event) = receiver.recv() {
                    match event {
                        SurfaceEvent::Updated(surface) => {
                            surfaces.write().upsert(surface);
                        }
                        SurfaceEvent::Removed(id) => {
                            surfaces.write().remove(id);
                        }
                    }
                }
                log::debug!("[Feed] Surface feed disconnected");
            })?;
        Ok(handle)
    }
}
