//! Frustum culling
//!
//! A [`FrustumCuller`] filters placements that share one local bounding box.
//! Anything that can produce a row-vector world matrix is a [`Placement`].

pub mod frustum_culler;

pub use frustum_culler::FrustumCuller;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Mat4;
use crate::transform::{EulerTransform, RelatedTransform};

/// Space the culling test is carried out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullSpace {
    /// Frustum moved to world space, boxes oriented per placement
    #[default]
    World,
    /// Frustum moved into each placement's local space
    Local,
    /// Boxes moved into view space
    View,
}

/// An object position in the world
pub trait Placement {
    /// Local to world matrix, row-vector convention
    fn world_matrix(&self) -> Mat4;
}

impl Placement for Mat4 {
    fn world_matrix(&self) -> Mat4 {
        *self
    }
}

impl Placement for EulerTransform {
    fn world_matrix(&self) -> Mat4 {
        self.local_to_world_matrix()
    }
}

impl Placement for RelatedTransform {
    fn world_matrix(&self) -> Mat4 {
        self.abs_local_to_world_matrix()
    }
}

impl<P: Placement + ?Sized> Placement for &P {
    fn world_matrix(&self) -> Mat4 {
        (**self).world_matrix()
    }
}
