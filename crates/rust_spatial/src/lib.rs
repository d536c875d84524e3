//! # Rust Spatial
//!
//! The spatial-math core of the engine: object poses, hierarchical world
//! transforms, frustum culling and screen-space ray picking.
//!
//! ## Features
//!
//! - **Euler poses**: scale / rotation / position with derived matrices and
//!   numerically guarded Euler decomposition
//! - **World cache**: O(1) absolute transforms refreshed at re-parent events
//! - **Scene graph**: slot-map arena of nodes with non-owning child handles
//! - **Frustum culling**: world-space, per-object local-space and view-space
//!   algorithms that accept identical placement sets
//! - **Picking**: screen point to world ray, ray-vs-volume hit tests
//!
//! ## Conventions
//!
//! All matrices use the row-vector convention: a point is transformed as
//! `v' = v · M1 · M2`, translation lives in row 3 and `m[(row, col)]` is the
//! element at that row and column. View space is left-handed with the camera
//! looking down +Z and depth mapped to `[0, 1]`. Transpose world matrices
//! before handing them to a column-major shader.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_spatial::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let camera = Camera::perspective(Vec3::zeros(), 60.0, 16.0 / 9.0, 0.5, 1000.0);
//!     let culler = FrustumCuller::from_camera(&camera)?;
//!
//!     let mut pose = EulerTransform::new();
//!     pose.set_position(Vec3::new(0.0, 0.0, 5.0));
//!
//!     let cube = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5));
//!     let visible = culler.cull(CullSpace::World, &cube, &[pose]);
//!     assert_eq!(visible, vec![0]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod transform;
pub mod scene;
pub mod bounds;
pub mod culling;
pub mod picking;
pub mod render;
pub mod debug;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Result, SpatialError};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        Result, SpatialError,
        foundation::math::{Vec3, Vec4, Mat3, Mat4, Mat4Ext},
        config::{Config, SpatialConfig},
        transform::{EulerTransform, RelatedTransform, decompose_euler, translation_of},
        scene::{NodeKey, SceneGraph, SceneNode},
        bounds::{Aabb, BoundingSphere, Frustum, Intersects, OrientedBox, Plane, Transformable},
        culling::{CullSpace, FrustumCuller, Placement},
        picking::{CameraView, Ray, RayCast, RayHit, Triangle, Viewport, screen_ray},
        render::Camera,
    };
}
