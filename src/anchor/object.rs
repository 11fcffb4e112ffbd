//! Renderable object descriptions for anchors.
//!
//! The engine does not render; it hands these descriptors to whatever
//! renderer subscribes to the anchor store.

use serde::{Deserialize, Serialize};

use crate::core::Point3D;

/// Primitive mesh shape of an anchored object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeshKind {
    /// Sphere of the given radius (meters).
    Sphere { radius: f32 },
    /// Axis-aligned box given by half-extents (meters).
    Cuboid { half_extents: Point3D },
    /// Renderer-defined marker with no intrinsic size.
    Marker,
}

impl MeshKind {
    /// Mesh name for logging
    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Sphere { .. } => "sphere",
            MeshKind::Cuboid { .. } => "cuboid",
            MeshKind::Marker => "marker",
        }
    }
}

/// Simple PBR-style material.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color, linear RGBA in [0, 1].
    pub rgba: [f32; 4],
    /// Surface roughness in [0, 1]. 0 is mirror-smooth.
    pub roughness: f32,
    /// Metallic (true) or dielectric (false) response.
    pub metallic: bool,
}

impl Material {
    /// Polished metallic material of the given color.
    pub fn metallic(rgba: [f32; 4]) -> Self {
        Self {
            rgba,
            roughness: 0.0,
            metallic: true,
        }
    }

    /// Matte non-metallic material of the given color.
    pub fn matte(rgba: [f32; 4]) -> Self {
        Self {
            rgba,
            roughness: 1.0,
            metallic: false,
        }
    }
}

/// Everything a renderer needs to draw an anchored object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub mesh: MeshKind,
    pub material: Material,
}

impl ObjectDescriptor {
    /// Sphere descriptor with the given radius and material.
    pub fn sphere(radius: f32, material: Material) -> Self {
        Self {
            mesh: MeshKind::Sphere { radius },
            material,
        }
    }
}
