//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement and
//! the opaque handles they hand out. Handles are plain ids; only the backend
//! that created a handle knows what it refers to.

use crate::assets::{ImageData, MeshData};
use crate::foundation::math::Mat4;
use crate::render::RenderError;

/// Result type for backend operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Location of a uniform inside a program (`-1` means "not active")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Handle to a 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// GPU-resident, non-indexed triangle mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshBuffers {
    /// Buffer of `vec3` positions
    pub vertex_buffer: u32,
    /// Buffer of `vec2` texture coordinates
    pub uv_buffer: u32,
    /// Number of vertices to draw
    pub vertex_count: u32,
}

/// Main rendering backend trait
///
/// Everything here runs on the thread that owns the graphics context.
pub trait RenderBackend {
    /// Compile and link a program from GLSL sources
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> RenderResult<ProgramHandle>;

    /// Look up a uniform by name
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> RenderResult<UniformLocation>;

    /// Upload RGBA8 pixels as a 2D texture
    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle>;

    /// Upload a triangle mesh (positions and uvs)
    fn upload_mesh(&mut self, mesh: &MeshData) -> RenderResult<MeshBuffers>;

    /// Clear color and depth for a new frame
    fn clear(&mut self, color: [f32; 4]);

    /// Make `program` the active program
    fn use_program(&mut self, program: ProgramHandle);

    /// Upload a 4x4 matrix to a uniform of the active program
    fn set_matrix(&mut self, location: UniformLocation, matrix: &Mat4);

    /// Draw `mesh` sampling `texture` through the sampler uniform `sampler`
    fn draw_textured(&mut self, texture: TextureHandle, sampler: UniformLocation, mesh: &MeshBuffers);

    /// Free a mesh's buffers
    fn release_mesh(&mut self, mesh: MeshBuffers);

    /// Free a texture
    fn release_texture(&mut self, texture: TextureHandle);

    /// Free a program
    fn release_program(&mut self, program: ProgramHandle);
}
