//! Screen-space picking
//!
//! Turns a pixel into a world-space ray by undoing the viewport transform and
//! unprojecting through the inverse view-projection matrix. The camera is
//! passed in explicitly through [`CameraView`].

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Mat4Ext, RowVector4, Vec2, Vec3};
use crate::picking::Ray;
use crate::{Result, SpatialError};

/// Render-target rectangle and depth range, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge
    pub top_left_x: f32,
    /// Top edge
    pub top_left_y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Depth written for the near plane
    pub min_depth: f32,
    /// Depth written for the far plane
    pub max_depth: f32,
}

impl Viewport {
    /// Full-target viewport with the `[0, 1]` depth range
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            top_left_x: 0.0,
            top_left_y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel to normalized device coordinates; y grows upwards in NDC
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x - self.top_left_x) / self.width * 2.0 - 1.0,
            1.0 - (y - self.top_left_y) / self.height * 2.0,
        )
    }

    /// Normalized device coordinates back to pixels
    pub fn from_ndc(&self, ndc: &Vec2) -> Vec2 {
        Vec2::new(
            self.top_left_x + (ndc.x + 1.0) * 0.5 * self.width,
            self.top_left_y + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// What picking needs to know about a camera
pub trait CameraView {
    /// World to view matrix
    fn view(&self) -> Mat4;

    /// View to clip matrix
    fn proj(&self) -> Mat4;

    /// Target rectangle the camera renders into
    fn viewport(&self) -> Viewport;

    /// Camera position in world space
    fn position(&self) -> Vec3;
}

/// World-space ray from the camera through pixel `(x, y)`
///
/// The pixel is unprojected onto the near plane (depth fixed at the viewport's
/// minimum) and the ray starts at the camera position.
pub fn screen_ray<C: CameraView + ?Sized>(camera: &C, x: f32, y: f32) -> Result<Ray> {
    let ndc = camera.viewport().to_ndc(x, y);
    let inv_view_proj = (camera.view() * camera.proj())
        .try_inverse()
        .ok_or(SpatialError::SingularMatrix("view-projection"))?;

    // Depth at the viewport minimum is NDC depth 0
    let target = inv_view_proj.transform_coord(&Vec3::new(ndc.x, ndc.y, 0.0));
    let origin = camera.position();

    log::trace!("Screen ray through ({x}, {y}) -> ndc ({:.3}, {:.3})", ndc.x, ndc.y);
    Ray::normalized(origin, target - origin)
}

/// Pixel position of a world point, `None` when it lies behind the camera
pub fn project_point<C: CameraView + ?Sized>(camera: &C, point: &Vec3) -> Option<Vec2> {
    let clip = RowVector4::new(point.x, point.y, point.z, 1.0) * (camera.view() * camera.proj());
    if clip[3] <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(clip[0] / clip[3], clip[1] / clip[3]);
    Some(camera.viewport().from_ndc(&ndc))
}
