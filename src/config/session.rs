//! Session configuration loaded from a single YAML file.
//!
//! Every field has a default, so a partial file (or none at all) yields
//! a working configuration. Sections convert into the component configs
//! consumed by the registry, raycaster, and controller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::placement::CameraIntrinsics;
use crate::raycast::{RaycastConfig, SurfaceFilter};
use crate::surface::{DetectionConfig, MergeConfig};

use super::defaults;

/// Top-level session configuration.
///
/// # Example YAML
/// ```yaml
/// detection:
///   horizontal: true
///   vertical: false
/// raycast:
///   max_range: 10.0
///   allow_estimated: true
/// merge:
///   registry_weight: 0.8
/// camera:
///   fov_y_deg: 60.0
///   aspect: 1.777
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub detection: DetectionSection,

    #[serde(default)]
    pub raycast: RaycastSection,

    #[serde(default)]
    pub merge: MergeSection,

    #[serde(default)]
    pub camera: CameraSection,
}

/// Which surface kinds the session tracks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionSection {
    #[serde(default = "defaults::enabled")]
    pub horizontal: bool,

    #[serde(default)]
    pub vertical: bool,
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self {
            horizontal: defaults::enabled(),
            vertical: false,
        }
    }
}

/// Raycast bounds and fallback behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RaycastSection {
    #[serde(default = "defaults::max_range")]
    pub max_range: f32,

    #[serde(default = "defaults::min_distance")]
    pub min_distance: f32,

    #[serde(default = "defaults::tie_epsilon")]
    pub tie_epsilon: f32,

    #[serde(default = "defaults::enabled")]
    pub allow_estimated: bool,

    #[serde(default = "defaults::enabled")]
    pub respect_extent: bool,
}

impl Default for RaycastSection {
    fn default() -> Self {
        Self {
            max_range: defaults::max_range(),
            min_distance: defaults::min_distance(),
            tie_epsilon: defaults::tie_epsilon(),
            allow_estimated: defaults::enabled(),
            respect_extent: defaults::enabled(),
        }
    }
}

/// Surface merge weights and extent growth.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MergeSection {
    #[serde(default = "defaults::registry_weight")]
    pub registry_weight: f32,

    #[serde(default = "defaults::enabled")]
    pub extend_extent: bool,

    #[serde(default = "defaults::max_extension")]
    pub max_extension: f32,

    #[serde(default = "defaults::min_extension")]
    pub min_extension: f32,
}

impl Default for MergeSection {
    fn default() -> Self {
        Self {
            registry_weight: defaults::registry_weight(),
            extend_extent: defaults::enabled(),
            max_extension: defaults::max_extension(),
            min_extension: defaults::min_extension(),
        }
    }
}

/// Pinhole camera parameters for tap deprojection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraSection {
    #[serde(default = "defaults::fov_y_deg")]
    pub fov_y_deg: f32,

    #[serde(default = "defaults::aspect")]
    pub aspect: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            fov_y_deg: defaults::fov_y_deg(),
            aspect: defaults::aspect(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Detection gates for the surface registry.
    pub fn to_detection_config(&self) -> DetectionConfig {
        DetectionConfig {
            horizontal: self.detection.horizontal,
            vertical: self.detection.vertical,
        }
    }

    /// Merge policy for the surface registry.
    pub fn to_merge_config(&self) -> MergeConfig {
        MergeConfig {
            registry_weight: self.merge.registry_weight,
            extend_extent: self.merge.extend_extent,
            max_extension: self.merge.max_extension,
            min_extension: self.merge.min_extension,
        }
    }

    /// Distance bounds for raycasts.
    pub fn to_raycast_config(&self) -> RaycastConfig {
        RaycastConfig {
            max_range: self.raycast.max_range,
            min_distance: self.raycast.min_distance,
            tie_epsilon: self.raycast.tie_epsilon,
        }
    }

    /// Default surface filter for placements.
    pub fn to_surface_filter(&self) -> SurfaceFilter {
        SurfaceFilter {
            kind: None,
            allow_estimated: self.raycast.allow_estimated,
            respect_extent: self.raycast.respect_extent,
        }
    }

    /// Camera intrinsics for tap deprojection.
    pub fn to_intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics::from_fov_deg(self.camera.fov_y_deg, self.camera.aspect)
    }
}
