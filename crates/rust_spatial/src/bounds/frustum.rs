//! View frustum as six planes
//!
//! Planes are extracted with the Gribb-Hartmann method. For the row-vector
//! convention the clip coordinates are `v · M`, so the plane equations come
//! from the matrix *columns*; depth is the `[0, 1]` range. A frustum built
//! from a projection matrix alone lives in view space, one built from
//! `view · projection` lives in world space.

use crate::bounds::{Aabb, BoundingSphere, Intersects, OrientedBox, Transformable};
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::{Result, SpatialError};

/// Plane defined by normal and distance from origin
///
/// Points with a non-negative [`Plane::distance_to_point`] are on the inner side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length)
    pub normal: Vec3,
    /// Signed offset along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane, normalizing normal and distance together
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self::from_coefficients(&Vec4::new(normal.x, normal.y, normal.z, distance))
    }

    /// Plane from `(a, b, c, d)` with `a·x + b·y + c·z + d = 0`
    pub fn from_coefficients(coefficients: &Vec4) -> Self {
        let normal = Vec3::new(coefficients.x, coefficients.y, coefficients.z);
        let length = normal.magnitude();
        if length > 0.0 {
            Self { normal: normal / length, distance: coefficients.w / length }
        } else {
            Self { normal, distance: coefficients.w }
        }
    }

    /// The plane as `(a, b, c, d)`
    pub fn coefficients(&self) -> Vec4 {
        Vec4::new(self.normal.x, self.normal.y, self.normal.z, self.distance)
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// The same plane after points are carried through the matrix whose
    /// inverse is `inverse`
    pub fn transformed_by_inverse(&self, inverse: &Mat4) -> Self {
        Self::from_coefficients(&(inverse * self.coefficients()))
    }
}

/// Index of each plane inside [`Frustum::planes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FrustumPlane {
    Left = 0,
    Right = 1,
    Bottom = 2,
    Top = 3,
    Near = 4,
    Far = 5,
}

/// Frustum for visibility culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a projection or view-projection matrix
    ///
    /// The frustum is expressed in the space `m` maps *from*: view space for a
    /// bare projection, world space for `view · projection`.
    pub fn from_matrix(m: &Mat4) -> Self {
        let x = m.column(0).into_owned();
        let y = m.column(1).into_owned();
        let z = m.column(2).into_owned();
        let w = m.column(3).into_owned();

        Self::new([
            Plane::from_coefficients(&(w + x)),
            Plane::from_coefficients(&(w - x)),
            Plane::from_coefficients(&(w + y)),
            Plane::from_coefficients(&(w - y)),
            Plane::from_coefficients(&z),
            Plane::from_coefficients(&(w - z)),
        ])
    }

    /// A single plane by name
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// Carry the frustum through the matrix whose inverse is `inverse`
    ///
    /// Planes pull back through the inverse, so callers that already hold it
    /// avoid inverting twice.
    pub fn transformed_by_inverse(&self, inverse: &Mat4) -> Self {
        Self::new(self.planes.map(|p| p.transformed_by_inverse(inverse)))
    }

    /// Check if a point is inside the frustum
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes.iter().all(|p| p.distance_to_point(point) >= 0.0)
    }

    /// The eight corners: near face (left-bottom, right-bottom, right-top,
    /// left-top), then the far face in the same order
    ///
    /// `None` when three of the planes do not meet in a single point.
    pub fn corners(&self) -> Option<[Vec3; 8]> {
        use FrustumPlane::{Bottom, Far, Left, Near, Right, Top};

        let ring = [(Left, Bottom), (Right, Bottom), (Right, Top), (Left, Top)];
        let mut corners = [Vec3::zeros(); 8];
        for (depth_index, depth) in [Near, Far].into_iter().enumerate() {
            for (i, (side, height)) in ring.iter().enumerate() {
                corners[depth_index * 4 + i] = intersect_planes(
                    self.plane(depth),
                    self.plane(*side),
                    self.plane(*height),
                )?;
            }
        }
        Some(corners)
    }
}

/// Point shared by three planes, `None` if any two are parallel
fn intersect_planes(a: &Plane, b: &Plane, c: &Plane) -> Option<Vec3> {
    let bc = b.normal.cross(&c.normal);
    let denominator = a.normal.dot(&bc);
    if denominator.abs() <= f32::EPSILON {
        return None;
    }
    let ca = c.normal.cross(&a.normal);
    let ab = a.normal.cross(&b.normal);
    Some(-(bc * a.distance + ca * b.distance + ab * c.distance) / denominator)
}

impl Intersects<Aabb> for Frustum {
    /// Conservative plane test: rejects only boxes fully behind one plane
    fn intersects(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            // Corner furthest along the plane normal
            let mut p = aabb.min;
            if plane.normal.x >= 0.0 { p.x = aabb.max.x; }
            if plane.normal.y >= 0.0 { p.y = aabb.max.y; }
            if plane.normal.z >= 0.0 { p.z = aabb.max.z; }

            if plane.distance_to_point(&p) < 0.0 {
                return false;
            }
        }
        true
    }
}

impl Intersects<OrientedBox> for Frustum {
    /// Conservative plane test, same acceptance rule as the AABB variant
    fn intersects(&self, obb: &OrientedBox) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(&obb.center) >= -obb.projected_radius(&plane.normal))
    }
}

impl Intersects<BoundingSphere> for Frustum {
    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(&sphere.center) >= -sphere.radius)
    }
}

impl Transformable for Frustum {
    fn transformed(&self, m: &Mat4) -> Result<Self> {
        let inverse = m
            .try_inverse()
            .ok_or(SpatialError::SingularMatrix("frustum transform"))?;
        Ok(self.transformed_by_inverse(&inverse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    fn view_frustum() -> Frustum {
        Frustum::from_matrix(&Mat4::perspective_fov_lh(HALF_PI, 1.0, 0.5, 1000.0))
    }

    #[test]
    fn test_planes_of_square_projection() {
        let frustum = view_frustum();

        let near = frustum.plane(FrustumPlane::Near);
        assert_relative_eq!(near.normal, Vec3::z(), epsilon = 1e-6);
        assert_relative_eq!(near.distance, -0.5, epsilon = 1e-5);

        let far = frustum.plane(FrustumPlane::Far);
        assert_relative_eq!(far.normal, -Vec3::z(), epsilon = 1e-6);
        assert_relative_eq!(far.distance, 1000.0, epsilon = 0.5);

        // 90 degree fov: side planes lean 45 degrees
        let left = frustum.plane(FrustumPlane::Left);
        let lean = 0.5_f32.sqrt();
        assert_relative_eq!(left.normal, Vec3::new(lean, 0.0, lean), epsilon = 1e-5);
    }

    #[test]
    fn test_contains_point() {
        let frustum = view_frustum();
        assert!(frustum.contains_point(&Vec3::new(0.0, 0.0, 5.0)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, -5.0)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, 0.25)));
        assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, 2000.0)));
        assert!(!frustum.contains_point(&Vec3::new(6.0, 0.0, 5.0)));
    }

    #[test]
    fn test_box_sphere_and_obb_acceptance() {
        let frustum = view_frustum();
        let ahead = Aabb::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.5, 0.5, 0.5));
        let behind = Aabb::from_center_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.5, 0.5, 0.5));
        let straddling_near = Aabb::from_center_extents(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(frustum.intersects(&ahead));
        assert!(!frustum.intersects(&behind));
        assert!(frustum.intersects(&straddling_near));
        assert!(ahead.intersects(&frustum));

        assert!(frustum.intersects(&BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0)));
        assert!(!frustum.intersects(&BoundingSphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0)));

        let rotated = OrientedBox::from_aabb(
            &Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5)),
            &(Mat4::rotation_roll_pitch_yaw(&Vec3::new(0.4, 0.9, 0.0)) * Mat4::translation(&Vec3::new(-7.0, 0.0, 5.0))),
        );
        assert!(!frustum.intersects(&rotated));
        assert!(!rotated.intersects(&frustum));
    }

    #[test]
    fn test_transformed_follows_camera() {
        // Camera moved to z = 10: a point at z = 5 is now behind it
        let camera_to_world = Mat4::translation(&Vec3::new(0.0, 0.0, 10.0));
        let world = view_frustum().transformed(&camera_to_world).unwrap();

        assert!(!world.contains_point(&Vec3::new(0.0, 0.0, 5.0)));
        assert!(world.contains_point(&Vec3::new(0.0, 0.0, 15.0)));
    }

    #[test]
    fn test_transformed_rejects_singular_matrix() {
        assert!(view_frustum().transformed(&Mat4::zeros()).is_err());
    }

    #[test]
    fn test_corners_of_view_frustum() {
        let corners = view_frustum().corners().unwrap();
        assert_relative_eq!(corners[0], Vec3::new(-0.5, -0.5, 0.5), epsilon = 1e-4);
        assert_relative_eq!(corners[2], Vec3::new(0.5, 0.5, 0.5), epsilon = 1e-4);
        assert_relative_eq!(corners[6], Vec3::new(1000.0, 1000.0, 1000.0), epsilon = 0.5);
    }
}
