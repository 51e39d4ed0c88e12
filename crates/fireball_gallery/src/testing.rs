//! Test doubles for the engine collaborators

use std::cell::Cell;
use std::collections::HashSet;

use gallery_engine::assets::{ImageData, MeshData};
use gallery_engine::foundation::math::{Mat4, Vec3};
use gallery_engine::foundation::time::Clock;
use gallery_engine::input::{KeyCode, MouseButton};
use gallery_engine::render::camera::CameraController;
use gallery_engine::render::{
    MeshBuffers, ProgramHandle, RenderBackend, RenderError, RenderResult, TextureHandle, UniformLocation,
};
use gallery_engine::window::WindowBackend;

use crate::renderable::{RenderableObject, Renderables};

/// Input seen during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub fire: bool,
    pub escape: bool,
    pub close: bool,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn fire() -> Self {
        Self { fire: true, ..Self::default() }
    }

    pub fn escape() -> Self {
        Self { escape: true, ..Self::default() }
    }
}

/// Window that replays a fixed input script, one entry per `poll_events`
///
/// Once the script runs out the window reports a close request.
#[derive(Debug, Default)]
pub struct ScriptedWindow {
    script: Vec<FrameInput>,
    polls: usize,
    pub swaps: usize,
}

impl ScriptedWindow {
    pub fn new(script: Vec<FrameInput>) -> Self {
        Self { script, ..Self::default() }
    }

    fn current(&self) -> Option<FrameInput> {
        self.polls.checked_sub(1).and_then(|i| self.script.get(i).copied())
    }
}

impl WindowBackend for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.current().map_or(self.polls > 0, |frame| frame.close)
    }

    fn set_should_close(&mut self, _should_close: bool) {}

    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        key == KeyCode::Escape && self.current().is_some_and(|frame| frame.escape)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        button == MouseButton::Left && self.current().is_some_and(|frame| frame.fire)
    }

    fn cursor_position(&self) -> (f64, f64) {
        (512.0, 384.0)
    }

    fn set_cursor_position(&mut self, _x: f64, _y: f64) {}

    fn get_size(&self) -> (u32, u32) {
        (1024, 768)
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }
}

/// Camera that never moves
#[derive(Debug, Clone)]
pub struct FixedCamera {
    pub position: Vec3,
    pub direction: Vec3,
    pub updates: usize,
}

impl FixedCamera {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self { position, direction, updates: 0 }
    }
}

impl CameraController for FixedCamera {
    fn compute_matrices_from_input(&mut self, _input: &mut dyn WindowBackend, _delta_time: f32) {
        self.updates += 1;
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::identity()
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::identity()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// Clock that moves forward by `step` seconds every time it is read
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<f64>,
    step: f64,
}

impl ManualClock {
    pub fn stepping(step: f64) -> Self {
        Self { now: Cell::new(0.0), step }
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Backend that hands out sequential ids and records every call
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u32,
    pub programs_created: usize,
    pub textures_created: usize,
    pub meshes_created: usize,
    pub fail_program_after: Option<usize>,
    pub clears: usize,
    pub bound_programs: Vec<ProgramHandle>,
    pub matrices: Vec<(UniformLocation, Mat4)>,
    pub draws: Vec<TextureHandle>,
    live_programs: HashSet<u32>,
    live_textures: HashSet<u32>,
    live_meshes: HashSet<u32>,
    pub released_programs: Vec<ProgramHandle>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn everything_released(&self) -> bool {
        self.live_programs.is_empty() && self.live_textures.is_empty() && self.live_meshes.is_empty()
    }
}

impl RenderBackend for RecordingBackend {
    fn create_program(&mut self, _vertex_src: &str, _fragment_src: &str) -> RenderResult<ProgramHandle> {
        if self.fail_program_after == Some(self.programs_created) {
            return Err(RenderError::ShaderLink("scripted failure".to_string()));
        }
        let id = self.next();
        self.programs_created += 1;
        self.live_programs.insert(id);
        Ok(ProgramHandle(id))
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> RenderResult<UniformLocation> {
        let offset = if name == "MVP" { 0 } else { 1 };
        Ok(UniformLocation(i32::try_from(program.0).unwrap_or(0) * 10 + offset))
    }

    fn create_texture(&mut self, _image: &ImageData) -> RenderResult<TextureHandle> {
        let id = self.next();
        self.textures_created += 1;
        self.live_textures.insert(id);
        Ok(TextureHandle(id))
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> RenderResult<MeshBuffers> {
        let id = self.next();
        self.meshes_created += 1;
        self.live_meshes.insert(id);
        Ok(MeshBuffers {
            vertex_buffer: id,
            uv_buffer: id,
            vertex_count: u32::try_from(mesh.vertex_count()).unwrap_or(u32::MAX),
        })
    }

    fn clear(&mut self, _color: [f32; 4]) {
        self.clears += 1;
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.bound_programs.push(program);
    }

    fn set_matrix(&mut self, location: UniformLocation, matrix: &Mat4) {
        self.matrices.push((location, *matrix));
    }

    fn draw_textured(&mut self, texture: TextureHandle, _sampler: UniformLocation, _mesh: &MeshBuffers) {
        self.draws.push(texture);
    }

    fn release_mesh(&mut self, mesh: MeshBuffers) {
        self.live_meshes.remove(&mesh.vertex_buffer);
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.live_textures.remove(&texture.0);
    }

    fn release_program(&mut self, program: ProgramHandle) {
        self.live_programs.remove(&program.0);
        self.released_programs.push(program);
    }
}

/// Renderable with made-up handles derived from `id`
pub fn dummy_renderable(id: u32) -> RenderableObject {
    RenderableObject {
        program: ProgramHandle(id),
        mvp_location: UniformLocation(i32::try_from(id).unwrap_or(0) * 10),
        sampler_location: UniformLocation(i32::try_from(id).unwrap_or(0) * 10 + 1),
        texture: TextureHandle(100 + id),
        mesh: MeshBuffers { vertex_buffer: 200 + id, uv_buffer: 300 + id, vertex_count: 36 },
    }
}

/// A full renderable set created on `backend`, without touching the disk
pub fn recorded_renderables(backend: &mut RecordingBackend) -> Renderables {
    let mut make = || {
        let program = backend.create_program("", "").unwrap();
        let texture = backend.create_texture(&ImageData::solid_color(1, 1, [255; 4])).unwrap();
        let mesh = backend.upload_mesh(&MeshData::default()).unwrap();
        RenderableObject {
            program,
            mvp_location: UniformLocation(i32::try_from(program.0).unwrap() * 10),
            sampler_location: UniformLocation(i32::try_from(program.0).unwrap() * 10 + 1),
            texture,
            mesh,
        }
    };
    Renderables::from_objects([make(), make(), make(), make()])
}
