//! Bounding sphere

use crate::bounds::{Aabb, Intersects, Transformable};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::Result;

/// A bounding sphere for coarse overlap and picking tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere through the corners of a box
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center(), aabb.extents().magnitude())
    }

    /// Check if a point lies inside or on the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

impl Intersects for BoundingSphere {
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

impl Transformable for BoundingSphere {
    /// Radius grows by the largest axis scale of `m`
    fn transformed(&self, m: &Mat4) -> Result<Self> {
        let scale = (0..3)
            .map(|row| m.row3(row).magnitude())
            .fold(0.0_f32, f32::max);
        Ok(Self::new(m.transform_coord(&self.center), self.radius * scale))
    }
}
