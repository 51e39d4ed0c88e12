//! Backend-agnostic window and raw input trait
//!
//! This is the "context/window provider" the game loop depends on: window
//! lifetime, a should-close query, raw key/mouse/cursor state and the frame
//! presentation call.

use crate::input::{KeyCode, MouseButton};

/// Window backend contract used by the game loop and the camera
///
/// Input queries report the state observed by the most recent
/// [`poll_events`](WindowBackend::poll_events) call.
///
/// # Thread Safety
/// No `Send` bound: GLFW windows must stay on the main thread.
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// Returns true once the user has requested the window to close or the
    /// application has flagged it through [`set_should_close`](WindowBackend::set_should_close).
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events
    fn poll_events(&mut self);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: KeyCode) -> bool;

    /// Whether `button` is currently held down
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Cursor position in window coordinates (pixels, top-left origin)
    fn cursor_position(&self) -> (f64, f64);

    /// Move the cursor to a window position
    fn set_cursor_position(&mut self, x: f64, y: f64);

    /// Client area size in screen coordinates
    fn get_size(&self) -> (u32, u32);

    /// Present the back buffer
    ///
    /// With vsync enabled this blocks until the next vertical blank.
    fn swap_buffers(&mut self);
}
