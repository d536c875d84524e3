//! Bounding volumes for visibility and picking queries
//!
//! Coarse value types with two capabilities: intersection against each other
//! ([`Intersects`]) and transformation by a row-vector matrix
//! ([`Transformable`]). None of them own any state beyond their fields.

pub mod aabb;
pub mod frustum;
pub mod obb;
pub mod sphere;

pub use aabb::Aabb;
pub use frustum::{Frustum, FrustumPlane, Plane};
pub use obb::OrientedBox;
pub use sphere::BoundingSphere;

use crate::foundation::math::Mat4;
use crate::Result;

/// Corner sign pattern shared by boxes and frustums
///
/// Corners 0..4 wind around the low-Z face, 4..8 around the high-Z face in
/// the same order, so corner `i` and `i + 4` share an edge.
pub const CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Boolean overlap test between two volumes
pub trait Intersects<Rhs: ?Sized = Self> {
    /// True when the volumes touch or overlap
    fn intersects(&self, other: &Rhs) -> bool;
}

/// Transformation of a volume into another space
pub trait Transformable: Sized {
    /// The same kind of volume, expressed after applying `m`
    fn transformed(&self, m: &Mat4) -> Result<Self>;
}

/// Mirror an [`Intersects`] impl so either operand order works
macro_rules! symmetric_intersects {
    ($a:ty, $b:ty) => {
        impl $crate::bounds::Intersects<$a> for $b {
            fn intersects(&self, other: &$a) -> bool {
                <$a as $crate::bounds::Intersects<$b>>::intersects(other, self)
            }
        }
    };
}

symmetric_intersects!(Aabb, BoundingSphere);
symmetric_intersects!(OrientedBox, Aabb);
symmetric_intersects!(OrientedBox, BoundingSphere);
symmetric_intersects!(Frustum, Aabb);
symmetric_intersects!(Frustum, OrientedBox);
symmetric_intersects!(Frustum, BoundingSphere);
