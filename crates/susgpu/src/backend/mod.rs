//! Immediate-mode backend context.
//!
//! [`Backend`] is the only way this crate talks to the graphics API. Every call
//! mutates one global, stateful context; the crate never assumes any state
//! survives between calls except what it re-applies itself.
//!
//! Implementations:
//! - [`GlBackend`]: OpenGL / WebGL through `glow` (feature `gl`)
//! - [`TraceBackend`]: in-memory fake that records calls, used by tests and tooling

#[cfg(feature = "gl")]
mod conv;
#[cfg(feature = "gl")]
mod gl;
mod trace;

#[cfg(feature = "gl")]
pub use gl::GlBackend;
pub use trace::{Call, TraceBackend, TraceId, TraceUniformLocation};

use std::fmt;

use crate::Color;

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Binding point for buffer objects.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    Vertex,
    /// Element indices (`ELEMENT_ARRAY_BUFFER`).
    Index,
}

/// Expected update frequency of a buffer's contents.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BufferUsageHint {
    Stream,
    #[default]
    Static,
    Dynamic,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveTopology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Winding order that counts as front-facing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FrontFace {
    Cw,
    #[default]
    Ccw,
}

/// Faces removed by culling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

/// Element type of an index buffer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum IndexFormat {
    #[default]
    Uint16,
    Uint32,
}

impl IndexFormat {
    /// Size of one index in bytes.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Sampling parameter applied to the currently bound 2D texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureParameter {
    WrapS(TextureWrap),
    WrapT(TextureWrap),
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
}

/// A single immediate-mode rendering context.
///
/// The method set mirrors the GL calls this crate needs. Allocators and name
/// lookups return `None` where the underlying API would hand back a null
/// handle or a negative location; callers turn those into typed errors.
///
/// All methods take `&self`: the context is shared by `Device`, `Queue` and
/// every owned handle through one `Rc`, and implementations that keep
/// bookkeeping use interior mutability.
pub trait Backend: fmt::Debug {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── shaders / programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Allocates `size` bytes of uninitialized storage for the bound buffer.
    fn buffer_data_size(&self, target: BufferTarget, size: usize, usage: BufferUsageHint);
    /// Overwrites bytes of the bound buffer starting at `offset`.
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    // ── vertex input ──────────────────────────────────────────────────────

    fn enable_vertex_attrib_array(&self, index: u32);
    fn disable_vertex_attrib_array(&self, index: u32);
    /// Points attribute `index` at `components` floats inside the bound vertex buffer.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: u32, stride: u32, offset: u32);
    fn vertex_attrib_divisor(&self, index: u32, divisor: u32);

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_1_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_2_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_3_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_matrix_2_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);
    fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]);

    // ── rasterizer / draw ─────────────────────────────────────────────────

    fn clear_color(&self, color: Color);
    fn clear_color_buffer(&self);
    fn front_face(&self, winding: FrontFace);
    /// Enables culling of `face`, or disables culling entirely for `None`.
    fn set_cull_face(&self, face: Option<Face>);
    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    );
    fn viewport(&self, x: i32, y: i32, width: u32, height: u32);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Option<Self::Texture>;
    fn bind_texture_2d(&self, texture: Option<Self::Texture>);
    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn generate_mipmap_2d(&self);
    fn tex_parameter_2d(&self, parameter: TextureParameter);
    fn delete_texture(&self, texture: Self::Texture);
}
