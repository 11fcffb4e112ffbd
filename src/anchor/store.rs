//! World-anchored object store with renderer subscriptions.
//!
//! Anchors are immutable once created: they pin an object descriptor to
//! a world pose. Renderers subscribe to mirror the store into their
//! scene graph instead of polling it.

use serde::{Deserialize, Serialize};

use crate::core::Pose3D;
use crate::error::{Error, Result};

use super::object::ObjectDescriptor;

/// Unique identifier for an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl AnchorId {
    /// Create a new anchor ID.
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

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Anchor({})", self.0)
    }
}

/// Handle for a renderer subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(pub u64);

/// An object pinned to a world pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: AnchorId,
    pub pose: Pose3D,
    pub object: ObjectDescriptor,
}

struct Subscriber {
    id: SubscriptionId,
    on_add: Box<dyn Fn(&Anchor) + Send>,
    on_remove: Box<dyn Fn(AnchorId) + Send>,
}

/// Store of placed anchors.
pub struct AnchorStore {
    anchors: Vec<Anchor>,
    next_id: u64,
    next_subscription: u64,
    subscribers: Vec<Subscriber>,
}

impl AnchorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            anchors: Vec::new(),
            next_id: 1,
            next_subscription: 1,
            subscribers: Vec::new(),
        }
    }

    /// Pin an object to a world pose.
    ///
    /// Rejects non-finite poses so a bad tracking frame cannot park an
    /// object at NaN and poison the render mirror.
    pub fn create_anchor(&mut self, pose: Pose3D, object: ObjectDescriptor) -> Result<AnchorId> {
        if !pose.is_finite() {
            log::warn!(
                "[Anchor] Rejecting non-finite pose ({}, {}, {})",
                pose.position.x,
                pose.position.y,
                pose.position.z
            );
            return Err(Error::InvalidPose {
                x: pose.position.x,
                y: pose.position.y,
                z: pose.position.z,
            });
        }

        let id = AnchorId::new(self.next_id);
        self.next_id += 1;
        let anchor = Anchor { id, pose, object };
        self.anchors.push(anchor);
        log::debug!(
            "[Anchor] Created {} ({}) at ({:.2}, {:.2}, {:.2})",
            id,
            object.mesh.name(),
            pose.position.x,
            pose.position.y,
            pose.position.z
        );

        for subscriber in &self.subscribers {
            (subscriber.on_add)(&anchor);
        }
        Ok(id)
    }

    /// Remove an anchor.
    pub fn remove_anchor(&mut self, id: AnchorId) -> Result<()> {
        let idx = self
            .anchors
            .iter()
            .position(|a| a.id == id)
            .ok_or(Error::AnchorNotFound(id))?;
        self.anchors.remove(idx);
        log::debug!("[Anchor] Removed {}", id);

        for subscriber in &self.subscribers {
            (subscriber.on_remove)(id);
        }
        Ok(())
    }

    /// Look up an anchor by id.
    pub fn get(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    /// Iterate all anchors in creation order.
    pub fn all(&self) -> std::slice::Iter<'_, Anchor> {
        self.anchors.iter()
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the store holds no anchors.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Remove every anchor, notifying subscribers per removal.
    pub fn clear(&mut self) {
        let removed: Vec<AnchorId> = self.anchors.iter().map(|a| a.id).collect();
        self.anchors.clear();
        for id in removed {
            for subscriber in &self.subscribers {
                (subscriber.on_remove)(id);
            }
        }
    }

    /// Register renderer callbacks for anchor additions and removals.
    ///
    /// Callbacks run synchronously on the mutating thread; keep them
    /// short (push into a channel, mark a scene dirty).
    pub fn subscribe<A, R>(&mut self, on_add: A, on_remove: R) -> SubscriptionId
    where
        A: Fn(&Anchor) + Send + 'static,
        R: Fn(AnchorId) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(Subscriber {
            id,
            on_add: Box::new(on_add),
            on_remove: Box::new(on_remove),
        });
        id
    }

    /// Drop a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }
}

impl Default for AnchorStore {
    fn default() -> Self {
        Self::new()
    }
}
