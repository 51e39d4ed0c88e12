//! Asset loading
//!
//! The three loader entry points the game needs: GLSL programs, textures and
//! Wavefront OBJ meshes. Paths are used as given; there is no search path or
//! caching layer.

pub mod image_loader;
pub mod obj_loader;

pub use image_loader::ImageData;
pub use obj_loader::{MeshData, ObjLoader};

use std::path::Path;

use thiserror::Error;

use crate::render::{ProgramHandle, RenderBackend, RenderError, TextureHandle};

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset file does not exist
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed OBJ content
    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        /// File being parsed
        path: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Image could not be decoded
    #[error("Failed to load image: {0}")]
    Image(String),

    /// Mesh file parsed but contains no triangles
    #[error("Mesh has no faces: {0}")]
    EmptyMesh(String),

    /// The loaded data was rejected by the render backend
    #[error(transparent)]
    Render(#[from] RenderError),
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
        _ => AssetError::Io(e),
    })
}

/// Read both shader stages from disk and build a program from them
pub fn load_shader_program<B, P>(backend: &mut B, vertex_path: P, fragment_path: P) -> Result<ProgramHandle, AssetError>
where
    B: RenderBackend + ?Sized,
    P: AsRef<Path>,
{
    let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());
    let vertex_src = read_source(vertex_path)?;
    let fragment_src = read_source(fragment_path)?;

    let program = backend.create_program(&vertex_src, &fragment_src)?;
    log::info!(
        "Loaded shader program {} from {} + {}",
        program.0,
        vertex_path.display(),
        fragment_path.display()
    );
    Ok(program)
}

/// Decode an image file and upload it as a texture
pub fn load_texture<B, P>(backend: &mut B, path: P) -> Result<TextureHandle, AssetError>
where
    B: RenderBackend + ?Sized,
    P: AsRef<Path>,
{
    let image = ImageData::from_file(path)?;
    Ok(backend.create_texture(&image)?)
}

/// Parse an OBJ file into flat per-vertex arrays
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<MeshData, AssetError> {
    ObjLoader::load_obj(path)
}
