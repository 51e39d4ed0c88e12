//! Renderable objects
//!
//! A renderable bundles one shader program, its two uniforms, one texture and
//! one uploaded mesh. The gallery needs exactly four of them; their asset
//! files live at fixed paths below the resource directory.

use std::path::Path;

use gallery_engine::assets::{load_mesh, load_shader_program, load_texture};
use gallery_engine::render::{MeshBuffers, ProgramHandle, RenderBackend, TextureHandle, UniformLocation};

use crate::entities::{Target, TargetVariant};
use crate::error::GameResult;

const VERTEX_SHADER: &str = "shaders/transform.vert";
const FRAGMENT_SHADER: &str = "shaders/texture.frag";
const MVP_UNIFORM: &str = "MVP";
const SAMPLER_UNIFORM: &str = "myTextureSampler";

/// The four things the gallery draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// Fireball projectile
    Fireball,
    /// Target with an even sequence number
    TargetPrimary,
    /// Target with an odd sequence number
    TargetAlternate,
    /// Screen-space crosshair
    Crosshair,
}

impl Visual {
    /// Every visual, in storage order
    pub const ALL: [Self; 4] = [Self::Fireball, Self::TargetPrimary, Self::TargetAlternate, Self::Crosshair];

    /// Visual used to draw `target`
    pub fn for_target(target: &Target) -> Self {
        match target.variant() {
            TargetVariant::Primary => Self::TargetPrimary,
            TargetVariant::Alternate => Self::TargetAlternate,
        }
    }

    /// Mesh and texture paths, relative to the resource directory
    pub fn asset_paths(self) -> (&'static str, &'static str) {
        match self {
            Self::Fireball => ("meshes/fireball.obj", "textures/fireball.png"),
            Self::TargetPrimary => ("meshes/target.obj", "textures/target_a.png"),
            Self::TargetAlternate => ("meshes/target.obj", "textures/target_b.png"),
            Self::Crosshair => ("meshes/crosshair.obj", "textures/crosshair.png"),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// GPU state needed to draw one kind of object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderableObject {
    /// Shader program
    pub program: ProgramHandle,
    /// Location of the `MVP` matrix uniform
    pub mvp_location: UniformLocation,
    /// Location of the texture sampler uniform
    pub sampler_location: UniformLocation,
    /// Texture sampled by the fragment shader
    pub texture: TextureHandle,
    /// Uploaded vertex and uv buffers
    pub mesh: MeshBuffers,
}

impl RenderableObject {
    /// Load the program, texture and mesh for `visual` from `resource_dir`
    ///
    /// Anything already created is released again if a later step fails.
    pub fn load<B>(backend: &mut B, resource_dir: &Path, visual: Visual) -> GameResult<Self>
    where
        B: RenderBackend + ?Sized,
    {
        let (mesh_path, texture_path) = visual.asset_paths();

        let mesh_data = load_mesh(resource_dir.join(mesh_path))?;
        let program = load_shader_program(backend, resource_dir.join(VERTEX_SHADER), resource_dir.join(FRAGMENT_SHADER))?;

        let uniforms = backend.uniform_location(program, MVP_UNIFORM).and_then(|mvp| {
            backend
                .uniform_location(program, SAMPLER_UNIFORM)
                .map(|sampler| (mvp, sampler))
        });
        let (mvp_location, sampler_location) = match uniforms {
            Ok(locations) => locations,
            Err(e) => {
                backend.release_program(program);
                return Err(e.into());
            }
        };

        let texture = match load_texture(backend, resource_dir.join(texture_path)) {
            Ok(texture) => texture,
            Err(e) => {
                backend.release_program(program);
                return Err(e.into());
            }
        };

        let mesh = match backend.upload_mesh(&mesh_data) {
            Ok(mesh) => mesh,
            Err(e) => {
                backend.release_texture(texture);
                backend.release_program(program);
                return Err(e.into());
            }
        };

        log::info!("Loaded {:?} ({} vertices)", visual, mesh.vertex_count);
        Ok(Self { program, mvp_location, sampler_location, texture, mesh })
    }

    /// Draw with whatever matrix is currently uploaded
    pub fn draw<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.draw_textured(self.texture, self.sampler_location, &self.mesh);
    }

    /// Free the GPU objects
    pub fn release<B: RenderBackend + ?Sized>(self, backend: &mut B) {
        backend.release_mesh(self.mesh);
        backend.release_texture(self.texture);
        backend.release_program(self.program);
    }
}

/// The full set of renderables, one per [`Visual`]
#[derive(Debug)]
pub struct Renderables {
    objects: Vec<RenderableObject>,
}

impl Renderables {
    /// Load every visual; on failure nothing stays allocated
    pub fn load<B>(backend: &mut B, resource_dir: &Path) -> GameResult<Self>
    where
        B: RenderBackend + ?Sized,
    {
        let mut objects = Vec::with_capacity(Visual::ALL.len());
        for visual in Visual::ALL {
            match RenderableObject::load(backend, resource_dir, visual) {
                Ok(object) => objects.push(object),
                Err(e) => {
                    log::error!("Failed to load {:?} from {}: {}", visual, resource_dir.display(), e);
                    Self { objects }.release_all(backend);
                    return Err(e);
                }
            }
        }
        Ok(Self { objects })
    }

    /// Wrap already-created objects, given in [`Visual::ALL`] order
    pub fn from_objects(objects: [RenderableObject; 4]) -> Self {
        Self { objects: objects.to_vec() }
    }

    /// Renderable for `visual`
    pub fn get(&self, visual: Visual) -> &RenderableObject {
        &self.objects[visual.index()]
    }

    /// Release everything
    pub fn release_all<B: RenderBackend + ?Sized>(self, backend: &mut B) {
        let count = self.objects.len();
        for object in self.objects {
            object.release(backend);
        }
        log::info!("Released {} renderable objects", count);
    }
}
