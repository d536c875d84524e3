//! # Perspective Camera
//!
//! A camera whose orientation is an ordinary [`EulerTransform`], so it can be
//! moved, rotated and aimed with the same operations as any scene object.
//!
//! ## Design Principles
//! - **Pose-driven**: the view matrix is the rigid inverse of the pose
//! - **On-demand matrices**: nothing is cached, every getter recomputes
//! - **Explicit**: callers pass the camera to culling and picking; there is
//!   no global active camera

use crate::bounds::Frustum;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::picking::{CameraView, Viewport};
use crate::transform::EulerTransform;
use crate::Result;

/// 3D perspective camera
///
/// # Coordinate System
/// Left-handed Y-up view space:
/// - X+ = Right
/// - Y+ = Up
/// - Z+ = Forward, the direction the camera looks
///
/// Depth is mapped to `[0, 1]` between the near and far planes.
///
/// # Performance Notes
/// Matrix calculations are performed on-demand rather than cached. For static
/// cameras, consider caching [`Camera::view_projection_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Position and orientation in world space; scale is ignored
    pose: EulerTransform,

    /// Vertical field of view in radians
    pub fov_y: f32,

    /// Aspect ratio (width / height) for projection calculations
    aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Render target rectangle used for picking
    viewport: Viewport,
}

impl Camera {
    /// Create a new perspective camera looking down +Z
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees (converted to radians internally)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use rust_spatial::foundation::math::Vec3;
    /// use rust_spatial::render::Camera;
    ///
    /// let camera = Camera::perspective(
    ///     Vec3::new(0.0, 2.0, -5.0),  // 5 units back, 2 up
    ///     75.0,                        // 75-degree field of view
    ///     16.0 / 9.0,                  // Widescreen aspect ratio
    ///     0.1,                         // Near plane at 10cm
    ///     100.0,                       // Far plane at 100 meters
    /// );
    /// assert_eq!(camera.position(), Vec3::new(0.0, 2.0, -5.0));
    /// ```
    ///
    /// The viewport defaults to 800 pixels wide with a height matching `aspect`.
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let width = 800.0;
        Self {
            pose: EulerTransform::from_position(position),
            fov_y: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            viewport: Viewport::new(width, width / aspect),
        }
    }

    /// The pose the view matrix is derived from
    pub fn pose(&self) -> &EulerTransform {
        &self.pose
    }

    /// Mutable pose, for moving and turning the camera
    pub fn pose_mut(&mut self) -> &mut EulerTransform {
        &mut self.pose
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.pose.position()
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.set_position(position);
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Aim the camera at a point in world space
    ///
    /// Fails without changing the orientation when `target` coincides with the
    /// camera position or `up` is parallel to the view direction.
    pub fn look_at(&mut self, target: &Vec3, up: &Vec3) -> Result<()> {
        self.pose.look_at(target, up)?;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
        Ok(())
    }

    /// Current aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// The viewport keeps its width and takes the matching height, so picking
    /// rays stay consistent with the projection.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.update_aspect(aspect);
        self.viewport.height = self.viewport.width / aspect;
    }

    /// Replace the viewport; the aspect ratio follows its dimensions
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.update_aspect(viewport.aspect_ratio());
        self.viewport = viewport;
    }

    /// Only logs changes larger than 0.01 to keep window resizes quiet.
    fn update_aspect(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Generate view matrix for world-to-camera space transformation
    ///
    /// # Mathematical Implementation
    /// The pose maps camera space to world space as `R · T`, so the view is
    /// its inverse `T(-position) · Rᵀ`. Rotation matrices are orthonormal,
    /// which makes the transpose an exact inverse and keeps this infallible.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::translation(&-self.pose.position()) * self.pose.rotation_matrix().transpose()
    }

    /// Generate perspective projection matrix
    ///
    /// Uses the current aspect ratio. For dynamic viewports, ensure
    /// [`Camera::set_viewport`] or [`Camera::set_aspect_ratio`] is called when
    /// the window dimensions change.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_fov_lh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Generate combined view-projection matrix
    ///
    /// Row-vector order: a world point is transformed as `v · V · P`.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_matrix() * self.projection_matrix()
    }

    /// The camera frustum in world space
    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(&self.view_projection_matrix())
    }
}

impl CameraView for Camera {
    fn view(&self) -> Mat4 {
        self.view_matrix()
    }

    fn proj(&self) -> Mat4 {
        self.projection_matrix()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn position(&self) -> Vec3 {
        self.pose.position()
    }
}

impl Default for Camera {
    /// Camera at `(0, 3, -3)` looking down +Z
    ///
    /// # Default Configuration
    /// - FOV: 45 degrees
    /// - Aspect: 16:9
    /// - Near: 0.1
    /// - Far: 1000.0
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 3.0, -3.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
