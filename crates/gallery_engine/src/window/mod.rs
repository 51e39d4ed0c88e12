//! Window management subsystem
//!
//! Gameplay code talks to the platform window only through the
//! [`WindowBackend`] trait; [`GlfwWindow`] is the GLFW implementation that
//! also owns the OpenGL context.
//!
//! # Module Organization
//!
//! - **`backend`**: the trait the game loop is written against
//! - **`glfw_window`**: GLFW window with an OpenGL 3.3 core context

pub mod backend;
pub mod glfw_window;

pub use backend::WindowBackend;
pub use glfw_window::{GlfwWindow, WindowConfig, WindowError, WindowResult};
