//! Window management using GLFW
//!
//! Creates the window together with its OpenGL context and loads the GL
//! function pointers, so a [`GlfwWindow`] must exist before any
//! [`GlBackend`](crate::render::GlBackend) is created.

use glfw::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{KeyCode, MouseButton};
use crate::window::backend::WindowBackend;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its OpenGL context could not be created
    #[error("Window creation failed ({width}x{height} \"{title}\")")]
    CreationFailed {
        /// Requested title
        title: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// MSAA sample count (0 disables multisampling)
    pub samples: u32,

    /// VSync setting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Fireball Gallery".to_string(),
            width: 1024,
            height: 768,
            samples: 4,
            vsync: true,
        }
    }
}

/// GLFW window wrapper with proper resource management
///
/// GLFW is terminated when the wrapped `Glfw` handle is dropped.
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Create the window, make its context current and load OpenGL
    ///
    /// The cursor is captured (hidden, unbounded movement) and parked at the
    /// window centre so the first camera update sees no mouse delta.
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        if config.samples > 0 {
            glfw.window_hint(glfw::WindowHint::Samples(Some(config.samples)));
        }

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| WindowError::CreationFailed {
                title: config.title.clone(),
                width: config.width,
                height: config.height,
            })?;

        window.make_current();
        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        let interval = if config.vsync { glfw::SwapInterval::Sync(1) } else { glfw::SwapInterval::None };
        glfw.set_swap_interval(interval);

        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_sticky_keys(true);
        window.set_cursor_mode(glfw::CursorMode::Disabled);

        glfw.poll_events();
        window.set_cursor_pos(f64::from(config.width) / 2.0, f64::from(config.height) / 2.0);

        log::info!("Created {}x{} window \"{}\" with OpenGL 3.3 core context", config.width, config.height, config.title);

        Ok(Self { glfw, window, events })
    }

    /// Framebuffer size in pixels (differs from the window size on HiDPI screens)
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0).unsigned_abs(), height.max(0).unsigned_abs())
    }

    fn glfw_key(key: KeyCode) -> glfw::Key {
        match key {
            KeyCode::W => glfw::Key::W,
            KeyCode::A => glfw::Key::A,
            KeyCode::S => glfw::Key::S,
            KeyCode::D => glfw::Key::D,
            KeyCode::Space => glfw::Key::Space,
            KeyCode::Escape => glfw::Key::Escape,
            KeyCode::Up => glfw::Key::Up,
            KeyCode::Down => glfw::Key::Down,
            KeyCode::Left => glfw::Key::Left,
            KeyCode::Right => glfw::Key::Right,
        }
    }

    fn glfw_button(button: MouseButton) -> glfw::MouseButton {
        match button {
            MouseButton::Left => glfw::MouseButton::Button1,
            MouseButton::Right => glfw::MouseButton::Button2,
            MouseButton::Middle => glfw::MouseButton::Button3,
        }
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Close => self.window.set_should_close(true),
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    log::debug!("Framebuffer resized to {}x{}", width, height);
                    // SAFETY: the context created in `new` is current on this thread
                    unsafe { gl::Viewport(0, 0, width, height) };
                }
                _ => {}
            }
        }
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.window.get_key(Self::glfw_key(key)) == glfw::Action::Press
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.window.get_mouse_button(Self::glfw_button(button)) == glfw::Action::Press
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.window.set_cursor_pos(x, y);
    }

    fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0).unsigned_abs(), height.max(0).unsigned_abs())
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_gallery_window() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (1024, 768));
        assert!(config.vsync);
    }

    #[test]
    fn test_every_key_has_a_glfw_mapping() {
        let keys = [
            KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D, KeyCode::Space,
            KeyCode::Escape, KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right,
        ];
        let mapped: std::collections::HashSet<_> = keys.iter().map(|k| GlfwWindow::glfw_key(*k) as i32).collect();
        assert_eq!(mapped.len(), keys.len());
    }
}
