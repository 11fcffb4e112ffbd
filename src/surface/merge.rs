//! Surface merging for registry updates.
//!
//! Blends an incoming observation into the existing surface, growing
//! the extent and nudging the plane pose while keeping the identity
//! stable.

use serde::{Deserialize, Serialize};

use crate::core::math::lerp;
use crate::core::{Point3D, Pose3D};

use super::plane::Surface;

/// Configuration for surface merging.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Weight given to the existing registry surface (vs. the update).
    /// Higher values make the registry more stable but slower to adapt.
    /// Default: 0.8 (registry surface has 80% weight)
    pub registry_weight: f32,

    /// Whether to grow the extent toward incoming observations.
    /// Default: true
    pub extend_extent: bool,

    /// Maximum extent growth per update and axis (meters).
    /// Default: 0.5m
    pub max_extension: f32,

    /// Minimum growth required to actually extend (meters).
    /// Small extensions are ignored to avoid noise accumulation.
    /// Default: 0.05m
    pub min_extension: f32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            registry_weight: 0.8,
            extend_extent: true,
            max_extension: 0.5,
            min_extension: 0.05,
        }
    }
}

impl MergeConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for registry weight.
    pub fn with_registry_weight(mut self, weight: f32) -> Self {
        self.registry_weight = weight;
        self
    }

    /// Builder-style setter for extent growth.
    pub fn with_extend_extent(mut self, extend: bool) -> Self {
        self.extend_extent = extend;
        self
    }

    /// Builder-style setter for maximum extension.
    pub fn with_max_extension(mut self, meters: f32) -> Self {
        self.max_extension = meters;
        self
    }
}

/// Result of merging a surface update.
#[derive(Clone, Copy, Debug)]
pub struct MergeOutcome {
    /// The merged surface.
    pub surface: Surface,
    /// Whether the extent grew along local X.
    pub extended_x: bool,
    /// Whether the extent grew along local Y.
    pub extended_y: bool,
    /// The update tried to change the surface kind (kept as-is).
    pub kind_conflict: bool,
}

/// Merge an incoming observation into an existing registry surface.
///
/// Identity (`id`, `kind`) comes from the existing surface; detection
/// state and timestamp come from the update; geometry is a weighted
/// blend. The extent only grows, capped per update by
/// `config.max_extension`.
///
/// # Arguments
/// * `existing` - The registry surface
/// * `incoming` - The new observation for the same id
/// * `config` - Merge configuration
pub fn merge_surfaces(
    existing: &Surface,
    incoming: &Surface,
    config: &MergeConfig,
) -> MergeOutcome {
    let update_weight = 1.0 - config.registry_weight;

    let position = Point3D::new(
        lerp(existing.center.position.x, incoming.center.position.x, update_weight),
        lerp(existing.center.position.y, incoming.center.position.y, update_weight),
        lerp(existing.center.position.z, incoming.center.position.z, update_weight),
    );
    let orientation = existing
        .center
        .orientation
        .nlerp(&incoming.center.orientation, update_weight);

    let mut extent = existing.extent;
    let mut extended_x = false;
    let mut extended_y = false;

    if config.extend_extent {
        if incoming.extent.half_x > extent.half_x {
            let growth = (incoming.extent.half_x - extent.half_x).min(config.max_extension);
            if growth >= config.min_extension {
                extent.half_x += growth;
                extended_x = true;
            }
        }
        if incoming.extent.half_y > extent.half_y {
            let growth = (incoming.extent.half_y - extent.half_y).min(config.max_extension);
            if growth >= config.min_extension {
                extent.half_y += growth;
                extended_y = true;
            }
        }
    }

    let merged = Surface {
        id: existing.id,
        kind: existing.kind,
        state: incoming.state,
        center: Pose3D::new(position, orientation),
        extent,
        observation_count: existing.observation_count.saturating_add(1),
        last_update_us: incoming.last_update_us,
    };

    MergeOutcome {
        surface: merged,
        extended_x,
        extended_y,
        kind_conflict: incoming.kind != existing.kind,
    }
}
