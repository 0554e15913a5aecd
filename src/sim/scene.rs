//! Collaborator interfaces and box geometry
//!
//! The simulation never renders or resolves collisions itself. It asks a
//! [`Scene`] to create, find and dispose solid boxes and to resolve motion,
//! and reports text to a [`Hud`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle to geometry owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full size centered on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share a face do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Collision ellipsoid radii enclosing a bounding box
#[inline]
pub fn ellipsoid_from_bounds(bounds: &Aabb) -> Vec3 {
    bounds.size() * 0.5
}

/// Description of a solid, collidable box to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidBox {
    /// Unique, deterministic name (e.g. `groundTile3`)
    pub name: String,
    /// Full extents (width, height, depth)
    pub size: Vec3,
    /// Center position
    pub position: Vec3,
    /// Diffuse color, cosmetic only
    pub color: Vec3,
}

impl SolidBox {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }
}

/// Geometry and motion collaborator
pub trait Scene {
    /// Create collidable geometry. Names are unique per live box.
    fn create_solid_box(&mut self, desc: SolidBox) -> MeshHandle;

    /// Look up live geometry by name
    fn find_by_name(&self, name: &str) -> Option<MeshHandle>;

    /// Release geometry. Disposing an unknown or already disposed handle is a no-op.
    fn dispose(&mut self, handle: MeshHandle);

    /// Move a body with the given collision ellipsoid by `delta`, constrained by
    /// solid geometry. The returned position is authoritative.
    fn move_with_collision(&self, position: Vec3, ellipsoid: Vec3, delta: Vec3) -> Vec3;
}

/// Display collaborator (fire-and-forget)
pub trait Hud {
    fn publish_score(&mut self, text: &str);
    fn publish_coins(&mut self, text: &str);
}
