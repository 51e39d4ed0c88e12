//! Rendering subsystem
//!
//! The game draws every object the same way: bind a shader program, upload
//! one MVP matrix, bind one texture and draw a non-indexed triangle list.
//! [`RenderBackend`] captures exactly that surface; [`GlBackend`] implements
//! it on OpenGL 3.3.

pub mod backend;
pub mod camera;
pub mod gl_backend;

pub use backend::{MeshBuffers, ProgramHandle, RenderBackend, RenderResult, TextureHandle, UniformLocation};
pub use gl_backend::GlBackend;

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shader stage failed to compile
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompilation {
        /// Stage name ("vertex" or "fragment")
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// The program failed to link
    #[error("Shader linking failed: {0}")]
    ShaderLink(String),

    /// A uniform name cannot be passed to the driver
    #[error("Invalid uniform name: {0:?}")]
    InvalidUniformName(String),

    /// Texture data does not match its declared dimensions
    #[error("Texture upload failed: {0}")]
    TextureUpload(String),

    /// Mesh data cannot be uploaded
    #[error("Mesh upload failed: {0}")]
    MeshUpload(String),
}
