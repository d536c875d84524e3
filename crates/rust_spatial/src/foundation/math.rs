//! Math utilities and types
//!
//! Provides the vector/matrix aliases and the row-vector matrix builders the
//! rest of the crate is written against.
//!
//! Every builder here produces matrices for the row-vector convention
//! (`v' = v · M`), so a product `a * b` applies `a` first and `b` second.
//! nalgebra itself is column-vector oriented; builders that reuse its
//! constructors transpose the result.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    RowVector4,
    Rotation3,
    Unit,
};

use crate::{Result, SpatialError};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Lengths below this are treated as zero by the direction-taking builders
pub const DEGENERATE_LENGTH: f32 = 1e-6;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle into `(-PI, PI]`
    ///
    /// `Rotate` accumulates angles without bound; callers that care about
    /// the range (yaw driven by mouse input, for instance) wrap with this.
    pub fn wrap_angle(radians: f32) -> f32 {
        let wrapped = (radians + constants::PI).rem_euclid(constants::TAU) - constants::PI;
        if wrapped <= -constants::PI {
            wrapped + constants::TAU
        } else {
            wrapped
        }
    }
}

/// Extension trait for Mat4 with row-vector builders and point transforms
///
/// Names must not shadow inherent `Matrix4` methods: `Mat4::look_at_lh`
/// would resolve to nalgebra's column-vector builder, not to this trait.
pub trait Mat4Ext {
    /// Non-uniform scale matrix
    fn scaling(scale: &Vec3) -> Mat4;

    /// Translation matrix (offset stored in row 3)
    fn translation(offset: &Vec3) -> Mat4;

    /// Rotation from Euler angles applied intrinsically Z, then X, then Y
    ///
    /// `euler.x` is pitch, `euler.y` is yaw and `euler.z` is roll, in radians.
    fn rotation_roll_pitch_yaw(euler: &Vec3) -> Mat4;

    /// Rotation of `radians` about an arbitrary axis
    fn rotation_axis(axis: &Vec3, radians: f32) -> Result<Mat4>;

    /// Left-handed view matrix looking along `direction` from `eye`
    fn view_look_to_lh(eye: &Vec3, direction: &Vec3, up: &Vec3) -> Result<Mat4>;

    /// Left-handed view matrix looking from `eye` towards `target`
    fn view_look_at_lh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Result<Mat4>;

    /// Left-handed perspective projection with depth mapped to `[0, 1]`
    fn perspective_fov_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Transform a point (w = 1) and divide by the resulting w
    fn transform_coord(&self, point: &Vec3) -> Vec3;

    /// Transform a direction (w = 0); translation is ignored
    fn transform_normal(&self, vector: &Vec3) -> Vec3;

    /// The first three elements of a row
    fn row3(&self, row: usize) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn scaling(scale: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(scale)
    }

    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset).transpose()
    }

    fn rotation_roll_pitch_yaw(euler: &Vec3) -> Mat4 {
        let roll = Rotation3::from_axis_angle(&Vec3::z_axis(), euler.z);
        let pitch = Rotation3::from_axis_angle(&Vec3::x_axis(), euler.x);
        let yaw = Rotation3::from_axis_angle(&Vec3::y_axis(), euler.y);

        // Column-vector product applied right to left, then flipped to rows
        (yaw * pitch * roll).to_homogeneous().transpose()
    }

    fn rotation_axis(axis: &Vec3, radians: f32) -> Result<Mat4> {
        let axis = Unit::try_new(*axis, DEGENERATE_LENGTH)
            .ok_or(SpatialError::ZeroVector("rotation axis"))?;
        Ok(Rotation3::from_axis_angle(&axis, radians).to_homogeneous().transpose())
    }

    fn view_look_to_lh(eye: &Vec3, direction: &Vec3, up: &Vec3) -> Result<Mat4> {
        if direction.norm() <= DEGENERATE_LENGTH {
            return Err(SpatialError::ZeroVector("view direction"));
        }
        let forward = direction.normalize();

        let side = up.cross(&forward);
        if side.norm() <= DEGENERATE_LENGTH {
            return Err(SpatialError::ZeroVector("up vector parallel to view direction"));
        }
        let right = side.normalize();
        let camera_up = forward.cross(&right);

        Ok(Mat4::new(
            right.x, camera_up.x, forward.x, 0.0,
            right.y, camera_up.y, forward.y, 0.0,
            right.z, camera_up.z, forward.z, 0.0,
            -right.dot(eye), -camera_up.dot(eye), -forward.dot(eye), 1.0,
        ))
    }

    fn view_look_at_lh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Result<Mat4> {
        Self::view_look_to_lh(eye, &(target - eye), up)
    }

    fn perspective_fov_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let height = 1.0 / (fov_y * 0.5).tan();
        let width = height / aspect;
        let range = far / (far - near);

        Mat4::new(
            width, 0.0, 0.0, 0.0,
            0.0, height, 0.0, 0.0,
            0.0, 0.0, range, 1.0,
            0.0, 0.0, -range * near, 0.0,
        )
    }

    fn transform_coord(&self, point: &Vec3) -> Vec3 {
        let v = RowVector4::new(point.x, point.y, point.z, 1.0) * self;
        Vec3::new(v[0] / v[3], v[1] / v[3], v[2] / v[3])
    }

    fn transform_normal(&self, vector: &Vec3) -> Vec3 {
        let v = RowVector4::new(vector.x, vector.y, vector.z, 0.0) * self;
        Vec3::new(v[0], v[1], v[2])
    }

    fn row3(&self, row: usize) -> Vec3 {
        Vec3::new(self[(row, 0)], self[(row, 1)], self[(row, 2)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_lives_in_row_three() {
        let m = Mat4::translation(&Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.row3(3), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(m.transform_coord(&Vec3::zeros()), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_row_vector_composition_order() {
        // Scale first, then translate: (1,0,0) -> (2,0,0) -> (2,0,5)
        let m = Mat4::scaling(&Vec3::new(2.0, 2.0, 2.0)) * Mat4::translation(&Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(m.transform_coord(&Vec3::x()), Vec3::new(2.0, 0.0, 5.0));
    }

    #[test]
    fn test_yaw_rotates_forward_towards_right() {
        // Left-handed: +90 degrees of yaw turns +Z into +X
        let m = Mat4::rotation_roll_pitch_yaw(&Vec3::new(0.0, constants::HALF_PI, 0.0));
        assert_relative_eq!(m.transform_normal(&Vec3::z()), Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn test_roll_pitch_yaw_matches_axis_products() {
        let euler = Vec3::new(0.3, -1.1, 0.7);
        let composed = Mat4::rotation_axis(&Vec3::z(), euler.z).unwrap()
            * Mat4::rotation_axis(&Vec3::x(), euler.x).unwrap()
            * Mat4::rotation_axis(&Vec3::y(), euler.y).unwrap();
        assert_relative_eq!(Mat4::rotation_roll_pitch_yaw(&euler), composed, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_axis_rejects_zero_axis() {
        assert!(Mat4::rotation_axis(&Vec3::zeros(), 1.0).is_err());
    }

    #[test]
    fn test_look_to_identity_and_degenerate_inputs() {
        let view = Mat4::view_look_to_lh(&Vec3::zeros(), &Vec3::z(), &Vec3::y()).unwrap();
        assert_relative_eq!(view, Mat4::identity());

        assert!(Mat4::view_look_to_lh(&Vec3::zeros(), &Vec3::zeros(), &Vec3::y()).is_err());
        assert!(Mat4::view_look_to_lh(&Vec3::zeros(), &Vec3::y(), &Vec3::y()).is_err());
    }

    #[test]
    fn test_look_at_puts_target_on_forward_axis() {
        let eye = Vec3::new(4.0, 3.0, -6.0);
        let target = Vec3::new(-1.0, 0.5, 2.0);
        let view = Mat4::view_look_at_lh(&eye, &target, &Vec3::y()).unwrap();

        let in_view = view.transform_coord(&target);
        assert_relative_eq!(in_view, Vec3::new(0.0, 0.0, (target - eye).magnitude()), epsilon = 1e-5);
        assert_relative_eq!(
            view,
            Mat4::view_look_to_lh(&eye, &(target - eye), &Vec3::y()).unwrap(),
            epsilon = 1e-6
        );
        assert!(Mat4::view_look_at_lh(&eye, &eye, &Vec3::y()).is_err());
    }

    #[test]
    fn test_builders_resolve_to_row_vector_versions() {
        // Each call goes through `Mat4::name`, where an inherent nalgebra
        // method of the same name would win over the trait.
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let scale: Mat4 = Mat4::scaling(&offset);
        let translation: Mat4 = Mat4::translation(&offset);
        let rotation: Mat4 = Mat4::rotation_roll_pitch_yaw(&offset);
        let axis: Result<Mat4> = Mat4::rotation_axis(&Vec3::y(), 0.5);
        let look_to: Result<Mat4> = Mat4::view_look_to_lh(&offset, &Vec3::z(), &Vec3::y());
        let look_at: Result<Mat4> = Mat4::view_look_at_lh(&offset, &Vec3::zeros(), &Vec3::y());
        let proj: Mat4 = Mat4::perspective_fov_lh(1.0, 1.0, 0.5, 10.0);

        assert_eq!(scale[(1, 1)], 2.0);
        assert_eq!(translation.row3(3), offset);
        assert_relative_eq!(rotation.row3(0).magnitude(), 1.0, epsilon = 1e-6);
        assert!(axis.is_ok() && look_to.is_ok() && look_at.is_ok());
        assert_eq!(proj[(2, 3)], 1.0);
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_unit_depth() {
        let proj = Mat4::perspective_fov_lh(constants::HALF_PI, 1.0, 0.5, 1000.0);
        assert_relative_eq!(proj.transform_coord(&Vec3::new(0.0, 0.0, 0.5)).z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(proj.transform_coord(&Vec3::new(0.0, 0.0, 1000.0)).z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(utils::wrap_angle(constants::TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(-constants::PI), constants::PI, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(-0.25), -0.25);
    }
}
