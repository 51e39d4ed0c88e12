//! OpenGL 3.3 render backend
//!
//! Every draw uses attribute 0 for positions (`vec3`) and attribute 1 for
//! texture coordinates (`vec2`), read from separate tightly packed buffers.

use std::ffi::CString;
use std::ptr;

use crate::assets::{ImageData, MeshData};
use crate::foundation::math::{Mat4, Mat4Ext};
use crate::render::backend::{MeshBuffers, ProgramHandle, RenderBackend, RenderResult, TextureHandle, UniformLocation};
use crate::render::RenderError;
use crate::window::GlfwWindow;

const POSITION_ATTRIBUTE: u32 = 0;
const UV_ATTRIBUTE: u32 = 1;

/// OpenGL implementation of [`RenderBackend`]
///
/// Owns the single vertex array object that all draws go through. The GL
/// context of the window passed to [`GlBackend::new`] must stay current for
/// the lifetime of the backend.
pub struct GlBackend {
    vao: u32,
}

impl GlBackend {
    /// Set up global GL state for the window's context
    ///
    /// Enables depth testing (`LESS`), back-face culling and multisampling,
    /// sizes the viewport to the framebuffer and creates the shared VAO.
    pub fn new(window: &GlfwWindow) -> Self {
        let (width, height) = window.get_framebuffer_size();
        let mut vao = 0;

        // SAFETY: `GlfwWindow::new` made its context current and loaded GL
        unsafe {
            gl::Viewport(0, 0, to_gl_size(width), to_gl_size(height));
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LESS);
            gl::Enable(gl::CULL_FACE);
            gl::Enable(gl::MULTISAMPLE);

            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
        }

        log::info!("OpenGL backend ready ({}x{} framebuffer)", width, height);
        Self { vao }
    }

    fn compile_shader(source: &str, kind: gl::types::GLenum, stage: &'static str) -> RenderResult<u32> {
        let c_source = CString::new(source).map_err(|_| RenderError::ShaderCompilation {
            stage,
            log: "source contains an interior NUL byte".to_string(),
        })?;

        // SAFETY: plain GL object calls on the current context
        unsafe {
            let shader = gl::CreateShader(kind);
            gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut success = 0;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
            if success != i32::from(gl::TRUE) {
                let mut len = 0;
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
                let mut buffer = vec![0u8; usize::try_from(len).unwrap_or(0)];
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buffer.as_mut_ptr().cast());
                gl::DeleteShader(shader);
                return Err(RenderError::ShaderCompilation { stage, log: info_log_to_string(&buffer) });
            }
            Ok(shader)
        }
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        // SAFETY: the VAO was created by this backend on the current context
        unsafe { gl::DeleteVertexArrays(1, &self.vao) };
    }
}

impl RenderBackend for GlBackend {
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> RenderResult<ProgramHandle> {
        let vertex_shader = Self::compile_shader(vertex_src, gl::VERTEX_SHADER, "vertex")?;
        let fragment_shader = match Self::compile_shader(fragment_src, gl::FRAGMENT_SHADER, "fragment") {
            Ok(shader) => shader,
            Err(e) => {
                // SAFETY: shader created just above
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e);
            }
        };

        // SAFETY: plain GL object calls on the current context
        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex_shader);
            gl::AttachShader(program, fragment_shader);
            gl::LinkProgram(program);

            gl::DetachShader(program, vertex_shader);
            gl::DetachShader(program, fragment_shader);
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);

            let mut success = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != i32::from(gl::TRUE) {
                let mut len = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let mut buffer = vec![0u8; usize::try_from(len).unwrap_or(0)];
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer.as_mut_ptr().cast());
                gl::DeleteProgram(program);
                return Err(RenderError::ShaderLink(info_log_to_string(&buffer)));
            }

            Ok(ProgramHandle(program))
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> RenderResult<UniformLocation> {
        let c_name = CString::new(name).map_err(|_| RenderError::InvalidUniformName(name.to_string()))?;
        // SAFETY: `c_name` is NUL-terminated and outlives the call
        let location = unsafe { gl::GetUniformLocation(program.0, c_name.as_ptr()) };
        if location < 0 {
            log::warn!("Uniform {:?} is not active in program {}", name, program.0);
        }
        Ok(UniformLocation(location))
    }

    fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.data.len() != expected {
            return Err(RenderError::TextureUpload(format!(
                "{}x{} RGBA image needs {} bytes, got {}",
                image.width, image.height, expected, image.data.len()
            )));
        }

        let mut texture = 0;
        // SAFETY: `image.data` holds exactly width * height RGBA8 pixels
        unsafe {
            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                to_gl_size(image.width),
                to_gl_size(image.height),
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.data.as_ptr().cast(),
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as i32);
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        Ok(TextureHandle(texture))
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> RenderResult<MeshBuffers> {
        if mesh.vertices.len() != mesh.uvs.len() {
            return Err(RenderError::MeshUpload(format!(
                "{} positions but {} uvs",
                mesh.vertices.len(),
                mesh.uvs.len()
            )));
        }
        let vertex_count = u32::try_from(mesh.vertex_count())
            .map_err(|_| RenderError::MeshUpload("too many vertices".to_string()))?;

        let mut buffers = [0u32; 2];
        // SAFETY: both slices are Pod and stay alive for the duration of the upload
        unsafe {
            gl::GenBuffers(2, buffers.as_mut_ptr());
            upload_array_buffer(buffers[0], bytemuck::cast_slice(&mesh.vertices));
            upload_array_buffer(buffers[1], bytemuck::cast_slice(&mesh.uvs));
        }

        Ok(MeshBuffers {
            vertex_buffer: buffers[0],
            uv_buffer: buffers[1],
            vertex_count,
        })
    }

    fn clear(&mut self, color: [f32; 4]) {
        // SAFETY: plain state calls on the current context
        unsafe {
            gl::ClearColor(color[0], color[1], color[2], color[3]);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        // SAFETY: plain state call on the current context
        unsafe { gl::UseProgram(program.0) };
    }

    fn set_matrix(&mut self, location: UniformLocation, matrix: &Mat4) {
        let columns = matrix.to_cols_array();
        // SAFETY: `columns` holds 16 floats for the single matrix uploaded
        unsafe { gl::UniformMatrix4fv(location.0, 1, gl::FALSE, columns.as_ptr()) };
    }

    fn draw_textured(&mut self, texture: TextureHandle, sampler: UniformLocation, mesh: &MeshBuffers) {
        // SAFETY: buffers and texture were created by this backend
        unsafe {
            gl::BindVertexArray(self.vao);

            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, texture.0);
            gl::Uniform1i(sampler.0, 0);

            gl::EnableVertexAttribArray(POSITION_ATTRIBUTE);
            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vertex_buffer);
            gl::VertexAttribPointer(POSITION_ATTRIBUTE, 3, gl::FLOAT, gl::FALSE, 0, ptr::null());

            gl::EnableVertexAttribArray(UV_ATTRIBUTE);
            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.uv_buffer);
            gl::VertexAttribPointer(UV_ATTRIBUTE, 2, gl::FLOAT, gl::FALSE, 0, ptr::null());

            gl::DrawArrays(gl::TRIANGLES, 0, i32::try_from(mesh.vertex_count).unwrap_or(i32::MAX));

            gl::DisableVertexAttribArray(POSITION_ATTRIBUTE);
            gl::DisableVertexAttribArray(UV_ATTRIBUTE);
        }
    }

    fn release_mesh(&mut self, mesh: MeshBuffers) {
        let buffers = [mesh.vertex_buffer, mesh.uv_buffer];
        // SAFETY: both buffers were created by `upload_mesh`
        unsafe { gl::DeleteBuffers(2, buffers.as_ptr()) };
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        // SAFETY: texture was created by `create_texture`
        unsafe { gl::DeleteTextures(1, &texture.0) };
    }

    fn release_program(&mut self, program: ProgramHandle) {
        // SAFETY: program was created by `create_program`
        unsafe { gl::DeleteProgram(program.0) };
    }
}

/// Fill `buffer` with `bytes` as static array data
///
/// # Safety
/// Requires a current GL context and a buffer name generated on it.
unsafe fn upload_array_buffer(buffer: u32, bytes: &[u8]) {
    gl::BindBuffer(gl::ARRAY_BUFFER, buffer);
    gl::BufferData(
        gl::ARRAY_BUFFER,
        isize::try_from(bytes.len()).unwrap_or(isize::MAX),
        bytes.as_ptr().cast(),
        gl::STATIC_DRAW,
    );
}

fn to_gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn info_log_to_string(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).trim_end().to_string()
}
