//! Shared state between the perception feed, placement, and renderers.
//!
//! The registry takes many concurrent readers (raycasts) against a
//! single writer (the feed), so it sits behind a `RwLock`. The anchor
//! store mutates on every placement and runs subscriber callbacks while
//! locked, so a plain `Mutex` keeps its notification order total.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::anchor::AnchorStore;
use crate::surface::SurfaceRegistry;

/// Surface registry shared across threads.
pub type SharedSurfaces = Arc<RwLock<SurfaceRegistry>>;

/// Anchor store shared across threads.
pub type SharedAnchors = Arc<Mutex<AnchorStore>>;

/// Wrap a registry for sharing across threads.
pub fn shared_surfaces(registry: SurfaceRegistry) -> SharedSurfaces {
    Arc::new(RwLock::new(registry))
}

/// Create an empty shared anchor store.
pub fn shared_anchors() -> SharedAnchors {
    Arc::new(Mutex::new(AnchorStore::new()))
}
