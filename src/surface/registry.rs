//! Surface registry with stable ids, merge-on-update, and tombstones.
//!
//! The registry is the single source of truth for detected surfaces.
//! Updates for a known id are merged into the stored surface rather
//! than replacing it, and removed ids are tombstoned so a stale update
//! arriving after removal cannot resurrect the surface.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::merge::{MergeConfig, merge_surfaces};
use super::plane::{Surface, SurfaceId, SurfaceKind, SurfaceState};

/// Which surface kinds the registry accepts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Accept horizontal surfaces (floors, tables).
    /// Default: true
    pub horizontal: bool,

    /// Accept vertical surfaces (walls).
    /// Default: false
    pub vertical: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: false,
        }
    }
}

impl DetectionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept every surface kind.
    pub fn all() -> Self {
        Self {
            horizontal: true,
            vertical: true,
        }
    }

    /// Builder-style setter for horizontal detection.
    pub fn with_horizontal(mut self, enabled: bool) -> Self {
        self.horizontal = enabled;
        self
    }

    /// Builder-style setter for vertical detection.
    pub fn with_vertical(mut self, enabled: bool) -> Self {
        self.vertical = enabled;
        self
    }

    /// Whether a surface of the given kind is accepted.
    pub fn accepts(&self, kind: SurfaceKind) -> bool {
        match kind {
            SurfaceKind::Horizontal => self.horizontal,
            SurfaceKind::Vertical => self.vertical,
        }
    }
}

/// What an upsert did with the incoming surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First observation of this id; stored as-is.
    Inserted,
    /// Merged into the existing surface with this id.
    Merged,
    /// The id was removed earlier; the update was dropped.
    IgnoredRemoved,
    /// The surface kind is disabled in the detection config.
    IgnoredKind,
}

/// Filter for registry queries. Empty filter matches everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceQuery {
    /// Match only this kind, if set.
    pub kind: Option<SurfaceKind>,
    /// Match only this detection state, if set.
    pub state: Option<SurfaceState>,
    /// Require at least this many observations.
    pub min_observations: u32,
}

impl SurfaceQuery {
    /// Create an empty query matching every surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style kind filter.
    pub fn with_kind(mut self, kind: SurfaceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Builder-style state filter.
    pub fn with_state(mut self, state: SurfaceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Builder-style observation-count floor.
    pub fn with_min_observations(mut self, count: u32) -> Self {
        self.min_observations = count;
        self
    }

    fn matches(&self, surface: &Surface) -> bool {
        if let Some(kind) = self.kind
            && surface.kind != kind
        {
            return false;
        }
        if let Some(state) = self.state
            && surface.state != state
        {
            return false;
        }
        surface.observation_count >= self.min_observations
    }
}

/// Registry of detected surfaces.
pub struct SurfaceRegistry {
    surfaces: Vec<Surface>,
    index: HashMap<SurfaceId, usize>,
    removed: HashSet<SurfaceId>,
    detection: DetectionConfig,
    merge: MergeConfig,
}

impl SurfaceRegistry {
    /// Create a registry with the given configuration.
    pub fn new(detection: DetectionConfig, merge: MergeConfig) -> Self {
        Self {
            surfaces: Vec::new(),
            index: HashMap::new(),
            removed: HashSet::new(),
            detection,
            merge,
        }
    }

    /// Create a registry with default configuration (horizontal only).
    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default(), MergeConfig::default())
    }

    /// Insert a new surface or merge an update into the stored one.
    ///
    /// Updates for tombstoned ids and for kinds disabled in the
    /// detection config are dropped. A kind change on a known id is
    /// logged and ignored; the stored kind wins.
    pub fn upsert(&mut self, surface: Surface) -> UpsertOutcome {
        if self.removed.contains(&surface.id) {
            log::debug!("[Registry] Ignoring update for removed {}", surface.id);
            return UpsertOutcome::IgnoredRemoved;
        }
        if !self.detection.accepts(surface.kind) {
            log::debug!(
                "[Registry] Ignoring {} surface {} (kind disabled)",
                surface.kind.name(),
                surface.id
            );
            return UpsertOutcome::IgnoredKind;
        }

        match self.index.get(&surface.id) {
            Some(&idx) => {
                let existing = &self.surfaces[idx];
                let outcome = merge_surfaces(existing, &surface, &self.merge);
                if outcome.kind_conflict {
                    log::warn!(
                        "[Registry] {} kind change {} -> {} ignored",
                        surface.id,
                        existing.kind.name(),
                        surface.kind.name()
                    );
                }
                if outcome.extended_x || outcome.extended_y {
                    log::debug!(
                        "[Registry] {} extent now {:.2}x{:.2}m",
                        surface.id,
                        outcome.surface.extent.half_x * 2.0,
                        outcome.surface.extent.half_y * 2.0
                    );
                }
                self.surfaces[idx] = outcome.surface;
                UpsertOutcome::Merged
            }
            None => {
                log::debug!(
                    "[Registry] New {} {} surface {}",
                    surface.state.name(),
                    surface.kind.name(),
                    surface.id
                );
                self.index.insert(surface.id, self.surfaces.len());
                self.surfaces.push(surface);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Remove a surface and tombstone its id.
    ///
    /// Removing an unknown id still records the tombstone, so a
    /// removal that races ahead of the first update is honored.
    pub fn remove(&mut self, id: SurfaceId) {
        self.removed.insert(id);
        if let Some(idx) = self.index.remove(&id) {
            self.surfaces.remove(idx);
            self.rebuild_index();
            log::debug!("[Registry] Removed {}", id);
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, surface) in self.surfaces.iter().enumerate() {
            self.index.insert(surface.id, idx);
        }
    }

    /// Look up a surface by id.
    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.index.get(&id).map(|&idx| &self.surfaces[idx])
    }

    /// Whether this id has been removed.
    pub fn is_removed(&self, id: SurfaceId) -> bool {
        self.removed.contains(&id)
    }

    /// All stored surfaces in insertion order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Query surfaces by kind, state, and observation count.
    ///
    /// Returns an owned snapshot so the caller holds no borrow on the
    /// registry while iterating.
    pub fn query(&self, query: &SurfaceQuery) -> std::vec::IntoIter<Surface> {
        self.surfaces
            .iter()
            .filter(|s| query.matches(s))
            .copied()
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Number of stored surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the registry holds no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Drop all surfaces and tombstones, e.g. on session restart.
    pub fn clear(&mut self) {
        self.surfaces.clear();
        self.index.clear();
        self.removed.clear();
        log::debug!("[Registry] Cleared");
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point3D, Pose3D};
    use crate::surface::PlaneExtent;
    use approx::assert_relative_eq;

    fn horizontal(id: u64, z: f32, half: f32) -> Surface {
        Surface::full(
            SurfaceId::new(id),
            SurfaceKind::Horizontal,
            SurfaceState::Estimated,
            Pose3D::from_position(Point3D::new(0.0, 0.0, z)),
            PlaneExtent::new(half, half),
            1,
            0,
        )
    }

    fn vertical(id: u64) -> Surface {
        Surface::full(
            SurfaceId::new(id),
            SurfaceKind::Vertical,
            SurfaceState::Estimated,
            Pose3D::identity(),
            PlaneExtent::new(0.5, 0.5),
            1,
            0,
        )
    }

    #[test]
    fn test_insert_then_get() {
        let mut registry = SurfaceRegistry::with_defaults();

        let outcome = registry.upsert(horizontal(1, 0.0, 0.5));

        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(SurfaceId::new(1)).is_some());
    }

    #[test]
    fn test_update_merges_same_id() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));

        let outcome = registry.upsert(horizontal(1, 0.1, 0.8));

        assert_eq!(outcome, UpsertOutcome::Merged);
        assert_eq!(registry.len(), 1);
        let stored = registry.get(SurfaceId::new(1)).unwrap();
        assert_relative_eq!(stored.center.position.z, 0.02, epsilon = 1e-5);
        assert_relative_eq!(stored.extent.half_x, 0.8, epsilon = 1e-6);
        assert_eq!(stored.observation_count, 2);
    }

    #[test]
    fn test_removed_id_never_resurrects() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));
        registry.remove(SurfaceId::new(1));

        let outcome = registry.upsert(horizontal(1, 0.0, 0.5));

        assert_eq!(outcome, UpsertOutcome::IgnoredRemoved);
        assert!(registry.is_empty());
        assert!(registry.is_removed(SurfaceId::new(1)));
    }

    #[test]
    fn test_remove_unknown_id_is_silent() {
        let mut registry = SurfaceRegistry::with_defaults();

        registry.remove(SurfaceId::new(42));

        // Tombstone recorded even though nothing was stored
        assert_eq!(
            registry.upsert(horizontal(42, 0.0, 0.5)),
            UpsertOutcome::IgnoredRemoved
        );
    }

    #[test]
    fn test_remove_keeps_other_surfaces_addressable() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));
        registry.upsert(horizontal(2, 0.5, 0.5));
        registry.upsert(horizontal(3, 1.0, 0.5));

        registry.remove(SurfaceId::new(2));

        assert_eq!(registry.len(), 2);
        assert!(registry.get(SurfaceId::new(1)).is_some());
        assert!(registry.get(SurfaceId::new(2)).is_none());
        let third = registry.get(SurfaceId::new(3)).unwrap();
        assert_relative_eq!(third.center.position.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_detection_config_gates_kinds() {
        let mut registry = SurfaceRegistry::with_defaults();

        let outcome = registry.upsert(vertical(1));

        assert_eq!(outcome, UpsertOutcome::IgnoredKind);
        assert!(registry.is_empty());

        let mut all = SurfaceRegistry::new(DetectionConfig::all(), MergeConfig::default());
        assert_eq!(all.upsert(vertical(1)), UpsertOutcome::Inserted);
    }

    #[test]
    fn test_kind_change_is_ignored() {
        let mut registry = SurfaceRegistry::new(DetectionConfig::all(), MergeConfig::default());
        registry.upsert(horizontal(1, 0.0, 0.5));

        let mut update = horizontal(1, 0.0, 0.5);
        update.kind = SurfaceKind::Vertical;
        registry.upsert(update);

        assert_eq!(
            registry.get(SurfaceId::new(1)).unwrap().kind,
            SurfaceKind::Horizontal
        );
    }

    #[test]
    fn test_query_filters() {
        let mut registry = SurfaceRegistry::new(DetectionConfig::all(), MergeConfig::default());
        registry.upsert(horizontal(1, 0.0, 0.5));
        registry.upsert(vertical(2));
        let mut confirmed = horizontal(3, 1.0, 0.5);
        confirmed.state = SurfaceState::Confirmed;
        registry.upsert(confirmed);

        let horizontals: Vec<_> = registry
            .query(&SurfaceQuery::new().with_kind(SurfaceKind::Horizontal))
            .collect();
        assert_eq!(horizontals.len(), 2);

        let confirmed: Vec<_> = registry
            .query(&SurfaceQuery::new().with_state(SurfaceState::Confirmed))
            .collect();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, SurfaceId::new(3));
    }

    #[test]
    fn test_query_returns_snapshot() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));

        let snapshot = registry.query(&SurfaceQuery::new());
        registry.remove(SurfaceId::new(1));

        // Snapshot is unaffected by the mutation
        assert_eq!(snapshot.count(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_resets_tombstones() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));
        registry.remove(SurfaceId::new(1));

        registry.clear();

        assert_eq!(
            registry.upsert(horizontal(1, 0.0, 0.5)),
            UpsertOutcome::Inserted
        );
    }

    #[test]
    fn test_min_observations_filter() {
        let mut registry = SurfaceRegistry::with_defaults();
        registry.upsert(horizontal(1, 0.0, 0.5));
        registry.upsert(horizontal(2, 0.5, 0.5));
        registry.upsert(horizontal(2, 0.5, 0.5));
        registry.upsert(horizontal(2, 0.5, 0.5));

        let seasoned: Vec<_> = registry
            .query(&SurfaceQuery::new().with_min_observations(3))
            .collect();

        assert_eq!(seasoned.len(), 1);
        assert_eq!(seasoned[0].id, SurfaceId::new(2));
    }
}
