//! Math utilities and types
//!
//! Plain value-type numerics for the camera and mesh code. Matrices are used
//! with column vectors (`clip = projection * view * world`); the engine is
//! left-handed with +Z pointing away from the viewer in camera space.

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with the left-handed constructions the camera needs
pub trait Mat4Ext {
    /// Rotation of `angle` radians about the world X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Rotation of `angle` radians about the world Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Rotation of `angle` radians about the world Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Rotation of `angle` radians about an arbitrary axis.
    ///
    /// The axis does not need to be unit length.
    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4;

    /// Rotation applying roll (Z), then pitch (X), then yaw (Y), all in radians
    fn rotation_roll_pitch_yaw(pitch: f32, yaw: f32, roll: f32) -> Mat4;

    /// Left-handed perspective projection with depth mapped to `[0, 1]`
    fn perspective_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Left-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// View matrix built directly from an orthonormal basis and a position
    fn view_from_basis(position: Vec3, right: Vec3, up: Vec3, look: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Unit::new_normalize(axis), angle)
    }

    fn rotation_roll_pitch_yaw(pitch: f32, yaw: f32, roll: f32) -> Mat4 {
        Self::rotation_y(yaw) * Self::rotation_x(pitch) * Self::rotation_z(roll)
    }

    fn perspective_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [a⁻¹/tan(φ/2)    0              0                    0           ]
        //     [0               1/tan(φ/2)     0                    0           ]
        //     [0               0              f/(f-n)              -nf/(f-n)   ]
        //     [0               0              1                    0           ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let look = (target - eye).normalize();
        let right = up.cross(&look).normalize();
        let camera_up = look.cross(&right);

        Self::view_from_basis(eye, right, camera_up, look)
    }

    fn view_from_basis(position: Vec3, right: Vec3, up: Vec3, look: Vec3) -> Mat4 {
        Mat4::new(
            right.x, right.y, right.z, -position.dot(&right),
            up.x,    up.y,    up.z,    -position.dot(&up),
            look.x,  look.y,  look.z,  -position.dot(&look),
            0.0,     0.0,     0.0,     1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_rotation_y_turns_forward_toward_right() {
        // Left-handed: a positive yaw swings +Z toward +X
        let rotated = Mat4::rotation_y(constants::HALF_PI).transform_vector(&Vec3::z());
        assert_relative_eq!(rotated, Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_roll_pitch_yaw_order() {
        let pitch = 0.3;
        let yaw = -1.1;
        let roll = 0.7;
        let combined = Mat4::rotation_roll_pitch_yaw(pitch, yaw, roll);
        let v = Vec3::new(0.2, -0.5, 1.0);

        let stepwise = Mat4::rotation_y(yaw).transform_vector(
            &Mat4::rotation_x(pitch).transform_vector(&Mat4::rotation_z(roll).transform_vector(&v)),
        );
        assert_relative_eq!(combined.transform_vector(&v), stepwise, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_axis_normalizes_axis() {
        let a = Mat4::rotation_axis(Vec3::new(0.0, 5.0, 0.0), 0.4);
        let b = Mat4::rotation_y(0.4);
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_depth_range() {
        let near = 1.0;
        let far = 100.0;
        let proj = Mat4::perspective_lh(constants::QUARTER_PI, 1.5, near, far);

        let on_near = proj * Vec4::new(0.0, 0.0, near, 1.0);
        let on_far = proj * Vec4::new(0.0, 0.0, far, 1.0);
        assert_relative_eq!(on_near.z / on_near.w, 0.0, epsilon = EPSILON);
        assert_relative_eq!(on_far.z / on_far.w, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_maps_target_onto_positive_z() {
        let eye = Vec3::new(1.0, 2.0, -3.0);
        let target = Vec3::new(4.0, 2.0, 1.0);
        let view = Mat4::look_at(eye, target, Vec3::y());

        let p = view.transform_point(&Point3::from(target));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, (target - eye).norm(), epsilon = 1e-5);
    }

    #[test]
    fn test_view_from_identity_basis_is_translation() {
        let position = Vec3::new(3.0, -1.0, 2.0);
        let view = Mat4::view_from_basis(position, Vec3::x(), Vec3::y(), Vec3::z());
        assert_relative_eq!(view, Mat4::new_translation(&-position), epsilon = EPSILON);
    }

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::rad_to_deg(constants::HALF_PI), 90.0, epsilon = 1e-4);
    }
}
