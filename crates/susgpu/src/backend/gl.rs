use std::fmt;

use glow::HasContext;

use super::conv;
use super::{
    Backend, BufferTarget, BufferUsageHint, Face, FrontFace, IndexFormat, PrimitiveTopology,
    ShaderStage, TextureParameter,
};
use crate::Color;

/// OpenGL (ES) / WebGL backend built on `glow`.
///
/// The wrapped context must be current on the calling thread for the whole
/// lifetime of this value and of every resource created through it. `glow`
/// makes every call `unsafe` for exactly that reason; this type upholds it by
/// never leaving the thread (it is neither `Send` nor `Sync` once shared via `Rc`).
pub struct GlBackend {
    gl: glow::Context,
}

impl GlBackend {
    /// Wraps a context the caller has already made current.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Returns the underlying `glow` context.
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl fmt::Debug for GlBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlBackend").finish_non_exhaustive()
    }
}

fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn gl_offset(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Backend for GlBackend {
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Texture = <glow::Context as HasContext>::Texture;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader> {
        unsafe { self.gl.create_shader(conv::map_shader_stage(stage)) }
            .map_err(|err| log::warn!("glCreateShader({stage}) failed: {err}"))
            .ok()
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Option<Self::Program> {
        unsafe { self.gl.create_program() }
            .map_err(|err| log::warn!("glCreateProgram failed: {err}"))
            .ok()
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_buffer(&self) -> Option<Self::Buffer> {
        unsafe { self.gl.create_buffer() }
            .map_err(|err| log::warn!("glCreateBuffer failed: {err}"))
            .ok()
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(conv::map_buffer_target(target), buffer) }
    }

    fn buffer_data_size(&self, target: BufferTarget, size: usize, usage: BufferUsageHint) {
        unsafe {
            self.gl.buffer_data_size(
                conv::map_buffer_target(target),
                gl_offset(size),
                conv::map_usage_hint(usage),
            )
        }
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_sub_data_u8_slice(conv::map_buffer_target(target), gl_offset(offset), data)
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: u32, stride: u32, offset: u32) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                gl_size(components),
                glow::FLOAT,
                false,
                gl_size(stride),
                gl_size(offset),
            )
        }
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        unsafe { self.gl.vertex_attrib_divisor(index, divisor) }
    }

    fn uniform_1_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_1_f32_slice(Some(location), data) }
    }

    fn uniform_2_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_2_f32_slice(Some(location), data) }
    }

    fn uniform_3_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_3_f32_slice(Some(location), data) }
    }

    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_4_f32_slice(Some(location), data) }
    }

    fn uniform_matrix_2_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_matrix_2_f32_slice(Some(location), false, data) }
    }

    fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_matrix_3_f32_slice(Some(location), false, data) }
    }

    fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, data: &[f32]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, data) }
    }

    fn clear_color(&self, color: Color) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn front_face(&self, winding: FrontFace) {
        unsafe { self.gl.front_face(conv::map_front_face(winding)) }
    }

    fn set_cull_face(&self, face: Option<Face>) {
        unsafe {
            match face {
                Some(face) => {
                    self.gl.enable(glow::CULL_FACE);
                    self.gl.cull_face(conv::map_face(face));
                }
                None => self.gl.disable(glow::CULL_FACE),
            }
        }
    }

    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    ) {
        unsafe {
            self.gl.draw_elements(
                conv::map_topology(topology),
                gl_size(count),
                conv::map_index_format(format),
                gl_size(offset),
            )
        }
    }

    fn viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { self.gl.viewport(x, y, gl_size(width), gl_size(height)) }
    }

    fn create_texture(&self) -> Option<Self::Texture> {
        unsafe { self.gl.create_texture() }
            .map_err(|err| log::warn!("glCreateTexture failed: {err}"))
            .ok()
    }

    fn bind_texture_2d(&self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                gl_size(width),
                gl_size(height),
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn generate_mipmap_2d(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn tex_parameter_2d(&self, parameter: TextureParameter) {
        let (pname, value) = conv::map_texture_parameter(parameter);
        unsafe { self.gl.tex_parameter_i32(glow::TEXTURE_2D, pname, value) }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }
}
