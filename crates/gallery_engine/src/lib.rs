//! # Gallery Engine
//!
//! The platform layer underneath the fireball gallery: a GLFW window with an
//! OpenGL context, a small OpenGL render backend, a mouse-look camera, and
//! loaders for shaders, textures and Wavefront OBJ meshes.
//!
//! ## Features
//!
//! - **Windowing**: GLFW window and raw input queries behind [`window::WindowBackend`]
//! - **Rendering**: textured, MVP-transformed triangle meshes behind [`render::RenderBackend`]
//! - **Camera**: first-person controller behind [`render::camera::CameraController`]
//! - **Assets**: OBJ meshes, PNG textures and GLSL programs from fixed paths
//! - **Configuration**: TOML/RON configuration files through [`config::Config`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gallery_engine::foundation::logging::{self, LevelFilter};
//! use gallery_engine::render::camera::{CameraController, FpsCamera, FpsCameraConfig};
//! use gallery_engine::render::{GlBackend, RenderBackend};
//! use gallery_engine::window::{GlfwWindow, WindowBackend, WindowConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     logging::init_with_default(LevelFilter::Info);
//!
//!     let mut window = GlfwWindow::new(&WindowConfig::default())?;
//!     let mut backend = GlBackend::new(&window);
//!     let mut camera = FpsCamera::new(FpsCameraConfig::default());
//!
//!     while !window.should_close() {
//!         backend.clear([0.0, 0.0, 0.4, 0.0]);
//!         camera.compute_matrices_from_input(&mut window, 1.0 / 60.0);
//!         window.swap_buffers();
//!         window.poll_events();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod window;
pub mod render;
pub mod assets;
