//! # First-person camera
//!
//! Turns raw mouse and keyboard state into projection and view matrices.
//!
//! ## Controls
//! - Mouse: look around (the cursor is re-centred every update)
//! - Up / W: move forward along the aim direction
//! - Down / S: move backward
//! - Right / D, Left / A: strafe

use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use crate::input::KeyCode;
use crate::window::WindowBackend;

/// Camera/input-to-matrix contract used by the game loop
pub trait CameraController {
    /// Read raw input, update the camera and recompute its matrices
    fn compute_matrices_from_input(&mut self, input: &mut dyn WindowBackend, delta_time: f32);

    /// Projection matrix computed by the last update
    fn projection_matrix(&self) -> Mat4;

    /// View matrix computed by the last update
    fn view_matrix(&self) -> Mat4;

    /// Player (eye) position in world space
    fn position(&self) -> Vec3;

    /// Unit aim direction in world space
    fn direction(&self) -> Vec3;
}

/// Tunables for [`FpsCamera`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsCameraConfig {
    /// Starting eye position
    pub position: [f32; 3],
    /// Starting yaw in radians (π looks down -Z)
    pub horizontal_angle: f32,
    /// Starting pitch in radians
    pub vertical_angle: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Radians of rotation per pixel of mouse movement
    pub mouse_speed: f32,
    /// Projection aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for FpsCameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            horizontal_angle: constants::PI,
            vertical_angle: 0.0,
            fov_degrees: 45.0,
            speed: 3.0,
            mouse_speed: 0.005,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Mouse-look camera with keyboard movement
///
/// Orientation is stored as yaw (`horizontal_angle`) and pitch
/// (`vertical_angle`); the aim direction is derived from both on every update.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    config: FpsCameraConfig,
    position: Vec3,
    horizontal_angle: f32,
    vertical_angle: f32,
    direction: Vec3,
    projection: Mat4,
    view: Mat4,
}

impl FpsCamera {
    /// Create a camera at the configured pose with matrices already valid
    pub fn new(config: FpsCameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::from(config.position),
            horizontal_angle: config.horizontal_angle,
            vertical_angle: config.vertical_angle,
            direction: Vec3::zeros(),
            projection: Mat4::identity(),
            view: Mat4::identity(),
            config,
        };
        camera.rebuild_matrices();
        camera
    }

    /// Direction for the given yaw and pitch
    fn aim_direction(horizontal: f32, vertical: f32) -> Vec3 {
        Vec3::new(
            vertical.cos() * horizontal.sin(),
            vertical.sin(),
            vertical.cos() * horizontal.cos(),
        )
    }

    /// Horizontal right vector for the given yaw
    fn right_vector(horizontal: f32) -> Vec3 {
        let angle = horizontal - constants::HALF_PI;
        Vec3::new(angle.sin(), 0.0, angle.cos())
    }

    fn rebuild_matrices(&mut self) {
        self.direction = Self::aim_direction(self.horizontal_angle, self.vertical_angle);
        let right = Self::right_vector(self.horizontal_angle);
        let up = right.cross(&self.direction);

        self.projection = Mat4::perspective(
            utils::deg_to_rad(self.config.fov_degrees),
            self.config.aspect,
            self.config.near,
            self.config.far,
        );
        self.view = Mat4::look_at(self.position, self.position + self.direction, up);
    }
}

impl CameraController for FpsCamera {
    fn compute_matrices_from_input(&mut self, input: &mut dyn WindowBackend, delta_time: f32) {
        let (width, height) = input.get_size();
        let center_x = f64::from(width) / 2.0;
        let center_y = f64::from(height) / 2.0;

        let (cursor_x, cursor_y) = input.cursor_position();
        input.set_cursor_position(center_x, center_y);

        self.horizontal_angle += self.config.mouse_speed * (center_x - cursor_x) as f32;
        self.vertical_angle += self.config.mouse_speed * (center_y - cursor_y) as f32;

        let direction = Self::aim_direction(self.horizontal_angle, self.vertical_angle);
        let right = Self::right_vector(self.horizontal_angle);
        let step = delta_time * self.config.speed;

        if input.is_key_pressed(KeyCode::Up) || input.is_key_pressed(KeyCode::W) {
            self.position += direction * step;
        }
        if input.is_key_pressed(KeyCode::Down) || input.is_key_pressed(KeyCode::S) {
            self.position -= direction * step;
        }
        if input.is_key_pressed(KeyCode::Right) || input.is_key_pressed(KeyCode::D) {
            self.position += right * step;
        }
        if input.is_key_pressed(KeyCode::Left) || input.is_key_pressed(KeyCode::A) {
            self.position -= right * step;
        }

        self.rebuild_matrices();
        log::trace!("Camera at {:?} aiming {:?}", self.position, self.direction);
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Vec3 {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    struct StillWindow {
        cursor: (f64, f64),
        keys: HashSet<KeyCode>,
    }

    impl StillWindow {
        fn centered() -> Self {
            Self { cursor: (512.0, 384.0), keys: HashSet::new() }
        }
    }

    impl WindowBackend for StillWindow {
        fn should_close(&self) -> bool { false }
        fn set_should_close(&mut self, _should_close: bool) {}
        fn poll_events(&mut self) {}
        fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys.contains(&key) }
        fn is_mouse_button_pressed(&self, _button: MouseButton) -> bool { false }
        fn cursor_position(&self) -> (f64, f64) { self.cursor }
        fn set_cursor_position(&mut self, x: f64, y: f64) { self.cursor = (x, y); }
        fn get_size(&self) -> (u32, u32) { (1024, 768) }
        fn swap_buffers(&mut self) {}
    }

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let camera = FpsCamera::new(FpsCameraConfig::default());
        assert_relative_eq!(camera.direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_direction_is_unit_length_after_mouse_motion() {
        let mut camera = FpsCamera::new(FpsCameraConfig::default());
        let mut window = StillWindow::centered();
        window.cursor = (400.0, 300.0);

        camera.compute_matrices_from_input(&mut window, 0.016);

        assert_relative_eq!(camera.direction().norm(), 1.0, epsilon = 1e-6);
        assert_eq!(window.cursor, (512.0, 384.0), "cursor is re-centred");
    }

    #[test]
    fn test_forward_key_moves_along_aim() {
        let mut camera = FpsCamera::new(FpsCameraConfig::default());
        let mut window = StillWindow::centered();
        window.keys.insert(KeyCode::W);

        camera.compute_matrices_from_input(&mut window, 1.0);

        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_strafe_right_moves_along_positive_x_when_facing_negative_z() {
        let mut camera = FpsCamera::new(FpsCameraConfig::default());
        let mut window = StillWindow::centered();
        window.keys.insert(KeyCode::Right);

        camera.compute_matrices_from_input(&mut window, 1.0);

        assert_relative_eq!(camera.position(), Vec3::new(3.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_view_matrix_puts_aim_point_in_front() {
        let camera = FpsCamera::new(FpsCameraConfig::default());
        let ahead = camera.position() + camera.direction() * 10.0;
        let in_view = camera.view_matrix().transform_point(&ahead.into());
        assert_relative_eq!(in_view.z, -10.0, epsilon = 1e-4);
    }
}
