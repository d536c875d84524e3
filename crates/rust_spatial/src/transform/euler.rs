//! Euler-angle pose of an object relative to its parent
//!
//! The pose is three vectors and nothing else: scale, rotation (radians,
//! applied intrinsically Z then X then Y) and position. Every matrix is
//! derived from them on demand.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3, DEGENERATE_LENGTH};
use crate::{Result, SpatialError};

/// Recover Euler angles from a rotation(-translation) matrix
///
/// Inverse of [`Mat4Ext::rotation_roll_pitch_yaw`]. Floating-point drift can
/// push `m(2,1)` slightly outside `[-1, 1]`; the cosine term is clamped to
/// zero instead of becoming NaN. Near `|m(2,1)| = 1` (pitch of ±90°) yaw and
/// roll are ill-conditioned; that gimbal-lock case is not handled further.
pub fn decompose_euler(m: &Mat4) -> Vec3 {
    let sin_pitch = -m[(2, 1)];
    let mut cos_pitch = (1.0 - m[(2, 1)] * m[(2, 1)]).sqrt();
    if cos_pitch.is_nan() {
        cos_pitch = 0.0;
    }

    Vec3::new(
        sin_pitch.atan2(cos_pitch),
        m[(2, 0)].atan2(m[(2, 2)]),
        m[(0, 1)].atan2(m[(1, 1)]),
    )
}

/// Translation part of a row-vector matrix
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.row3(3)
}

/// Local (parent-relative) scale, rotation and position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerTransform {
    scale: Vec3,
    rotation: Vec3,
    position: Vec3,
}

impl Default for EulerTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
            position: Vec3::zeros(),
        }
    }
}

impl EulerTransform {
    /// Identity pose
    pub fn new() -> Self {
        Self::default()
    }

    /// Pose with every component given
    pub fn from_parts(scale: Vec3, rotation: Vec3, position: Vec3) -> Self {
        Self { scale, rotation, position }
    }

    /// Pose with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Euler angles in radians (x = pitch, y = yaw, z = roll)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set all scale factors
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Set the X scale factor
    pub fn set_scale_x(&mut self, x: f32) {
        self.scale.x = x;
    }

    /// Set the Y scale factor
    pub fn set_scale_y(&mut self, y: f32) {
        self.scale.y = y;
    }

    /// Set the Z scale factor
    pub fn set_scale_z(&mut self, z: f32) {
        self.scale.z = z;
    }

    /// Set all Euler angles
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Set pitch
    pub fn set_rotation_x(&mut self, x: f32) {
        self.rotation.x = x;
    }

    /// Set yaw
    pub fn set_rotation_y(&mut self, y: f32) {
        self.rotation.y = y;
    }

    /// Set roll
    pub fn set_rotation_z(&mut self, z: f32) {
        self.rotation.z = z;
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the X coordinate
    pub fn set_position_x(&mut self, x: f32) {
        self.position.x = x;
    }

    /// Set the Y coordinate
    pub fn set_position_y(&mut self, y: f32) {
        self.position.y = y;
    }

    /// Set the Z coordinate
    pub fn set_position_z(&mut self, z: f32) {
        self.position.z = z;
    }

    // ------------------------------------------------------------------
    // Derived matrices
    // ------------------------------------------------------------------

    /// Scale matrix
    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::scaling(&self.scale)
    }

    /// Rotation matrix built Z, then X, then Y
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_roll_pitch_yaw(&self.rotation)
    }

    /// Translation matrix
    pub fn position_matrix(&self) -> Mat4 {
        Mat4::translation(&self.position)
    }

    /// Rotation followed by translation
    pub fn rotation_translation_matrix(&self) -> Mat4 {
        self.rotation_matrix() * self.position_matrix()
    }

    /// Local X axis (row 0 of the rotation matrix)
    pub fn right_axis(&self) -> Vec3 {
        self.rotation_matrix().row3(0)
    }

    /// Local Y axis (row 1 of the rotation matrix)
    pub fn up_axis(&self) -> Vec3 {
        self.rotation_matrix().row3(1)
    }

    /// Local Z axis (row 2 of the rotation matrix)
    pub fn forward_axis(&self) -> Vec3 {
        self.rotation_matrix().row3(2)
    }

    /// Scale, then rotate, then translate
    pub fn local_to_world_matrix(&self) -> Mat4 {
        self.scale_matrix() * self.rotation_matrix() * self.position_matrix()
    }

    /// Inverse of [`Self::local_to_world_matrix`]
    ///
    /// Fails when a scale component is zero.
    pub fn world_to_local_matrix(&self) -> Result<Mat4> {
        self.local_to_world_matrix()
            .try_inverse()
            .ok_or(SpatialError::SingularMatrix("local-to-world"))
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Add `delta` to the Euler angles component-wise
    ///
    /// No wrapping is applied; see [`crate::foundation::math::utils::wrap_angle`].
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Rotate about an arbitrary axis, after the current rotation
    pub fn rotate_axis(&mut self, axis: &Vec3, radians: f32) -> Result<()> {
        let m = self.rotation_matrix() * Mat4::rotation_axis(axis, radians)?;
        self.rotation = decompose_euler(&m);
        Ok(())
    }

    /// Orbit about `pivot`, turning the object as it goes
    pub fn rotate_around(&mut self, pivot: &Vec3, axis: &Vec3, radians: f32) -> Result<()> {
        let m = self.rotation_translation_matrix()
            * Mat4::translation(&-pivot)
            * Mat4::rotation_axis(axis, radians)?
            * Mat4::translation(pivot);
        self.rotation = decompose_euler(&m);
        self.position = translation_of(&m);
        Ok(())
    }

    /// Move `magnitude` units along `direction`
    ///
    /// A zero direction is rejected and leaves the position untouched.
    pub fn translate(&mut self, direction: &Vec3, magnitude: f32) -> Result<()> {
        let direction = direction
            .try_normalize(DEGENERATE_LENGTH)
            .ok_or(SpatialError::ZeroVector("translate direction"))?;
        self.position += direction * magnitude;
        Ok(())
    }

    /// Turn to face `target` from the current position
    pub fn look_at(&mut self, target: &Vec3, up: &Vec3) -> Result<()> {
        let view = Mat4::view_look_at_lh(&self.position, target, up)?;
        self.apply_view(&view)
    }

    /// Turn to face along `direction`
    pub fn look_to(&mut self, direction: &Vec3, up: &Vec3) -> Result<()> {
        let view = Mat4::view_look_to_lh(&self.position, direction, up)?;
        self.apply_view(&view)
    }

    fn apply_view(&mut self, view: &Mat4) -> Result<()> {
        let inverse = view
            .try_inverse()
            .ok_or(SpatialError::SingularMatrix("view"))?;
        self.rotation = decompose_euler(&inverse);
        log::trace!("Pose rotation set from view: {:?}", self.rotation);
        Ok(())
    }
}
