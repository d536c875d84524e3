//! Axis-aligned bounding box

use crate::bounds::{BoundingSphere, Intersects, Transformable, CORNER_SIGNS};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::Result;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box enclosing every point; `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners in [`CORNER_SIGNS`] order
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.center();
        let extents = self.extents();
        CORNER_SIGNS.map(|s| center + Vec3::new(s[0], s[1], s[2]).component_mul(&extents))
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Point inside the box nearest to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }
}

impl Intersects for Aabb {
    fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

impl Intersects<BoundingSphere> for Aabb {
    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.closest_point(&sphere.center);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }
}

impl Transformable for Aabb {
    /// Axis-aligned box enclosing the transformed corners
    fn transformed(&self, m: &Mat4) -> Result<Self> {
        let corners = self.corners().map(|c| m.transform_coord(&c));
        Ok(corners[1..].iter().fold(Self::new(corners[0], corners[0]), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains_point(&Vec3::zeros()));
        assert!(aabb.contains_point(&Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(&Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_intersects() {
        let aabb1 = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let aabb2 = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let aabb3 = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(7.0, 7.0, 7.0));

        assert!(aabb1.intersects(&aabb2));
        assert!(!aabb1.intersects(&aabb3));
    }

    #[test]
    fn test_aabb_sphere_both_orders() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let touching = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let corner_miss = BoundingSphere::new(Vec3::new(2.0, 2.0, 2.0), 1.0);

        assert!(aabb.intersects(&touching));
        assert!(touching.intersects(&aabb));
        assert!(!aabb.intersects(&corner_miss));
    }

    #[test]
    fn test_from_points() {
        let points = [Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 4.0, 3.0), Vec3::new(0.0, 0.0, -5.0)];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -5.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_transformed_encloses_rotated_box() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(2.0, 1.0, 1.0));
        let m = Mat4::rotation_roll_pitch_yaw(&Vec3::new(0.0, HALF_PI, 0.0))
            * Mat4::translation(&Vec3::new(0.0, 0.0, 10.0));

        let moved = aabb.transformed(&m).unwrap();
        assert_relative_eq!(moved.center(), Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-5);
        assert_relative_eq!(moved.extents(), Vec3::new(1.0, 1.0, 2.0), epsilon = 1e-5);
    }
}
