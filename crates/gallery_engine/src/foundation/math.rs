//! Math utilities and types
//!
//! Provides the fundamental math types for 3D rendering and game logic.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
};

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

/// Extension trait for Mat4 with the camera and model helpers the renderer needs
pub trait Mat4Ext {
    /// Create an OpenGL perspective projection matrix (clip depth in [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation to `position` followed by a uniform `scale` about the origin
    ///
    /// Equivalent to `translate(identity, position) * scale(scale)`.
    fn translation_scale(position: &Vec3, scale: f32) -> Mat4;

    /// Column-major array layout expected by `glUniformMatrix4fv`
    fn to_cols_array(&self) -> [f32; 16];
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn translation_scale(position: &Vec3, scale: f32) -> Mat4 {
        Mat4::new_translation(position) * Mat4::new_scaling(scale)
    }

    fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        // nalgebra stores matrices column-major already
        out.copy_from_slice(self.as_slice());
        out
    }
}
