//! Frustum culling of instanced placements
//!
//! Every placement shares one local bounding box. The three algorithms differ
//! only in which space the box and frustum meet in; each uses the same
//! conservative plane test, so all three accept the same placements.

use crate::bounds::{Aabb, Frustum, Intersects, OrientedBox};
use crate::config::CullingConfig;
use crate::culling::{CullSpace, Placement};
use crate::foundation::math::Mat4;
use crate::picking::CameraView;
use crate::{Result, SpatialError};

/// View-space frustum plus the view matrix needed to move it around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCuller {
    view: Mat4,
    /// Frustum in view space, built from the projection alone
    frustum: Frustum,
}

impl FrustumCuller {
    /// Culler for the given view and projection matrices
    pub fn new(view: &Mat4, proj: &Mat4) -> Self {
        Self { view: *view, frustum: Frustum::from_matrix(proj) }
    }

    /// Culler for a camera's current view and projection
    pub fn from_camera<C: CameraView + ?Sized>(camera: &C) -> Result<Self> {
        let view = camera.view();
        if view.try_inverse().is_none() {
            return Err(SpatialError::SingularMatrix("camera view"));
        }
        Ok(Self::new(&view, &camera.proj()))
    }

    /// The frustum in view space
    pub fn view_frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// The frustum carried into world space
    ///
    /// World to view is `V`, so the planes pull back through `V` itself.
    pub fn world_frustum(&self) -> Frustum {
        self.frustum.transformed_by_inverse(&self.view)
    }

    /// Indices of the visible placements using the chosen algorithm
    pub fn cull<P: Placement>(&self, space: CullSpace, local_bounds: &Aabb, placements: &[P]) -> Vec<usize> {
        match space {
            CullSpace::World => self.cull_world_space(local_bounds, placements),
            CullSpace::Local => self.cull_local_space(local_bounds, placements),
            CullSpace::View => self.cull_view_space(local_bounds, placements),
        }
    }

    /// Indices of the visible placements using the configured algorithm
    pub fn cull_configured<P: Placement>(&self, config: &CullingConfig, local_bounds: &Aabb, placements: &[P]) -> Vec<usize> {
        self.cull(config.space, local_bounds, placements)
    }

    /// World-space frustum against each placement's oriented box
    pub fn cull_world_space<P: Placement>(&self, local_bounds: &Aabb, placements: &[P]) -> Vec<usize> {
        let frustum = self.world_frustum();
        self.collect(placements, |world| {
            frustum.intersects(&OrientedBox::from_aabb(local_bounds, world))
        })
    }

    /// The frustum carried into each placement's local space against the box
    ///
    /// `inverse(inverse(V) · inverse(W))` is `W · V`, so no inversion is
    /// needed and placements with a degenerate scale are still handled.
    pub fn cull_local_space<P: Placement>(&self, local_bounds: &Aabb, placements: &[P]) -> Vec<usize> {
        self.collect(placements, |world| {
            self.frustum
                .transformed_by_inverse(&(world * self.view))
                .intersects(local_bounds)
        })
    }

    /// Each placement's box carried into view space against the raw frustum
    pub fn cull_view_space<P: Placement>(&self, local_bounds: &Aabb, placements: &[P]) -> Vec<usize> {
        self.collect(placements, |world| {
            self.frustum
                .intersects(&OrientedBox::from_aabb(local_bounds, &(world * self.view)))
        })
    }

    /// Visible placements themselves, in input order
    pub fn visible<'a, P: Placement>(&self, space: CullSpace, local_bounds: &Aabb, placements: &'a [P]) -> Vec<&'a P> {
        self.cull(space, local_bounds, placements)
            .into_iter()
            .map(|i| &placements[i])
            .collect()
    }

    /// Single placement test in world space
    pub fn is_visible<P: Placement + ?Sized>(&self, local_bounds: &Aabb, placement: &P) -> bool {
        self.world_frustum()
            .intersects(&OrientedBox::from_aabb(local_bounds, &placement.world_matrix()))
    }

    fn collect<P: Placement>(&self, placements: &[P], mut accept: impl FnMut(&Mat4) -> bool) -> Vec<usize> {
        let visible: Vec<usize> = placements
            .iter()
            .enumerate()
            .filter(|(_, placement)| accept(&placement.world_matrix()))
            .map(|(i, _)| i)
            .collect();

        log::debug!("Frustum culling accepted {} of {} placements", visible.len(), placements.len());
        visible
    }
}
