//! Oriented bounding box

use crate::bounds::{Aabb, BoundingSphere, Intersects, Transformable, CORNER_SIGNS};
use crate::foundation::math::{Mat3, Mat4, Mat4Ext, Vec3};
use crate::Result;

const PARALLEL_EPSILON: f32 = 1e-6;

/// Box with arbitrary orientation
///
/// `orientation` holds the box's unit local axes as rows, matching the
/// row-vector convention used for every other matrix in the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Center of the box
    pub center: Vec3,
    /// Half-size along each local axis
    pub extents: Vec3,
    /// Rows are the local X, Y and Z axes
    pub orientation: Mat3,
}

impl OrientedBox {
    /// Create a box from its parts
    pub fn new(center: Vec3, extents: Vec3, orientation: Mat3) -> Self {
        Self { center, extents, orientation }
    }

    /// Box covering `aabb` after it is carried through `m`
    ///
    /// Scale in `m` ends up in the extents; the axes stay unit length.
    pub fn from_aabb(aabb: &Aabb, m: &Mat4) -> Self {
        let local_extents = aabb.extents();
        let half_axes = [
            m.row3(0) * local_extents.x,
            m.row3(1) * local_extents.y,
            m.row3(2) * local_extents.z,
        ];
        Self::from_half_axes(m.transform_coord(&aabb.center()), half_axes)
    }

    fn from_half_axes(center: Vec3, half_axes: [Vec3; 3]) -> Self {
        let mut extents = Vec3::zeros();
        let mut orientation = Mat3::identity();
        for (i, half_axis) in half_axes.iter().enumerate() {
            let length = half_axis.magnitude();
            extents[i] = length;
            if length > 0.0 {
                orientation.set_row(i, &(half_axis / length).transpose());
            }
        }
        Self { center, extents, orientation }
    }

    /// Unit local axis `i`
    pub fn axis(&self, i: usize) -> Vec3 {
        self.orientation.row(i).transpose()
    }

    /// The eight corners in [`CORNER_SIGNS`] order
    pub fn corners(&self) -> [Vec3; 8] {
        let axes = [self.axis(0), self.axis(1), self.axis(2)];
        CORNER_SIGNS.map(|s| {
            self.center
                + axes[0] * (s[0] * self.extents.x)
                + axes[1] * (s[1] * self.extents.y)
                + axes[2] * (s[2] * self.extents.z)
        })
    }

    /// Half-length of the box's shadow on a unit axis
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        (0..3).map(|i| self.extents[i] * axis.dot(&self.axis(i)).abs()).sum()
    }

    /// Point inside the box nearest to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        let offset = point - self.center;
        (0..3).fold(self.center, |acc, i| {
            let axis = self.axis(i);
            acc + axis * offset.dot(&axis).clamp(-self.extents[i], self.extents[i])
        })
    }

    /// Check if a point lies inside or on the box
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let offset = point - self.center;
        (0..3).all(|i| offset.dot(&self.axis(i)).abs() <= self.extents[i])
    }
}

impl Intersects for OrientedBox {
    /// Separating-axis test over the 15 candidate axes
    fn intersects(&self, other: &OrientedBox) -> bool {
        let offset = other.center - self.center;
        let mine = [self.axis(0), self.axis(1), self.axis(2)];
        let theirs = [other.axis(0), other.axis(1), other.axis(2)];

        let separated = |axis: &Vec3| {
            offset.dot(axis).abs() > self.projected_radius(axis) + other.projected_radius(axis)
        };

        if mine.iter().chain(theirs.iter()).any(separated) {
            return false;
        }

        for a in &mine {
            for b in &theirs {
                let cross = a.cross(b);
                let length = cross.magnitude();
                // Parallel edges: the face axes already covered this direction
                if length > PARALLEL_EPSILON && separated(&(cross / length)) {
                    return false;
                }
            }
        }
        true
    }
}

impl Intersects<Aabb> for OrientedBox {
    fn intersects(&self, aabb: &Aabb) -> bool {
        self.intersects(&Self::from_aabb(aabb, &Mat4::identity()))
    }
}

impl Intersects<BoundingSphere> for OrientedBox {
    fn intersects(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.closest_point(&sphere.center);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }
}

impl Transformable for OrientedBox {
    fn transformed(&self, m: &Mat4) -> Result<Self> {
        let half_axes = [0, 1, 2].map(|i| m.transform_normal(&(self.axis(i) * self.extents[i])));
        Ok(Self::from_half_axes(m.transform_coord(&self.center), half_axes))
    }
}
