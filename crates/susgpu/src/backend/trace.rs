use std::cell::RefCell;
use std::collections::HashMap;

use super::{
    Backend, BufferTarget, BufferUsageHint, Face, FrontFace, IndexFormat, PrimitiveTopology,
    ShaderStage, TextureParameter,
};
use crate::Color;
use crate::resource::UniformType;

/// Object name handed out by [`TraceBackend`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TraceId(pub u32);

/// Uniform location handed out by [`TraceBackend`]; only valid for `program`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TraceUniformLocation {
    pub program: TraceId,
    pub location: u32,
}

/// A state-changing call recorded by [`TraceBackend`].
///
/// Queries (status, info logs, location lookups) are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader { shader: TraceId, stage: ShaderStage },
    ShaderSource(TraceId),
    CompileShader(TraceId),
    DeleteShader(TraceId),
    CreateProgram(TraceId),
    AttachShader { program: TraceId, shader: TraceId },
    LinkProgram(TraceId),
    UseProgram(Option<TraceId>),
    DeleteProgram(TraceId),

    CreateBuffer(TraceId),
    BindBuffer { target: BufferTarget, buffer: Option<TraceId> },
    BufferDataSize { target: BufferTarget, size: usize, usage: BufferUsageHint },
    BufferSubData { target: BufferTarget, offset: usize, len: usize },
    DeleteBuffer(TraceId),

    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, components: u32, stride: u32, offset: u32 },
    VertexAttribDivisor { index: u32, divisor: u32 },

    Uniform { location: TraceUniformLocation, ty: UniformType, data: Vec<f32> },

    ClearColor(Color),
    Clear,
    FrontFace(FrontFace),
    CullFace(Option<Face>),
    DrawElements { topology: PrimitiveTopology, count: u32, format: IndexFormat, offset: u32 },
    Viewport { x: i32, y: i32, width: u32, height: u32 },

    CreateTexture(TraceId),
    BindTexture(Option<TraceId>),
    TexImage2d { width: u32, height: u32, len: usize },
    GenerateMipmap,
    TexParameter(TextureParameter),
    DeleteTexture(TraceId),
}

#[derive(Debug)]
struct ShaderRecord {
    stage: ShaderStage,
    source: String,
    compiled: Option<Result<(), String>>,
}

/// Names a linked program exposes, in location order.
#[derive(Debug, Default)]
struct ProgramInterface {
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
struct ProgramRecord {
    shaders: Vec<TraceId>,
    linked: Option<Result<ProgramInterface, String>>,
}

#[derive(Debug, Default)]
struct TraceState {
    next_id: u32,
    calls: Vec<Call>,
    fail_allocations: bool,

    shaders: HashMap<TraceId, ShaderRecord>,
    programs: HashMap<TraceId, ProgramRecord>,
    buffers: HashMap<TraceId, Vec<u8>>,
    textures: HashMap<TraceId, (u32, u32)>,

    bound_vertex: Option<TraceId>,
    bound_index: Option<TraceId>,
    bound_texture: Option<TraceId>,
}

impl TraceState {
    fn allocate(&mut self) -> Option<TraceId> {
        if self.fail_allocations {
            return None;
        }
        self.next_id += 1;
        Some(TraceId(self.next_id))
    }

    fn bound(&self, target: BufferTarget) -> Option<TraceId> {
        match target {
            BufferTarget::Vertex => self.bound_vertex,
            BufferTarget::Index => self.bound_index,
        }
    }

    fn interface(&self, program: TraceId) -> Option<&ProgramInterface> {
        match self.programs.get(&program)?.linked.as_ref()? {
            Ok(interface) => Some(interface),
            Err(_) => None,
        }
    }
}

/// In-memory [`Backend`] that records calls instead of drawing.
///
/// Beyond recording, it emulates enough of a GL implementation for the
/// retained layer to be exercised without a GPU:
/// - buffer objects keep their bytes, so uploads can be inspected
/// - shader compilation fails for empty sources and `#error` directives
/// - linking fails when the fragment stage reads a varying the vertex stage
///   never declares
/// - `attribute`, `uniform` and `varying` declarations are extracted from the
///   sources at link time; locations follow declaration order
/// - allocations can be made to fail with [`set_fail_allocations`](Self::set_fail_allocations)
#[derive(Debug, Default)]
pub struct TraceBackend {
    state: RefCell<TraceState>,
}

impl TraceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every call recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Returns and forgets every call recorded so far.
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Makes every subsequent `create_*` call return `None` while `fail` is set.
    pub fn set_fail_allocations(&self, fail: bool) {
        self.state.borrow_mut().fail_allocations = fail;
    }

    /// Returns the current bytes of a live buffer object.
    pub fn buffer_contents(&self, buffer: TraceId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn record_uniform(&self, location: &TraceUniformLocation, ty: UniformType, data: &[f32]) {
        self.record(Call::Uniform { location: *location, ty, data: data.to_vec() });
    }
}

/// Strips `//` comments, then collects names declared with `qualifier`.
///
/// Handles `qualifier [precision] type name[N];` declarations only, which
/// covers the GLSL ES 1.00 style the crate targets.
fn declared_names(source: &str, qualifier: &str) -> Vec<String> {
    let cleaned = source
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    let mut names: Vec<String> = Vec::new();
    for statement in cleaned.split([';', '{', '}']) {
        let tokens: Vec<&str> = statement.split_whitespace().collect();
        if tokens.len() < 3 || tokens[0] != qualifier {
            continue;
        }
        let Some(&last) = tokens.last() else { continue };
        let name = last.split('[').next().unwrap_or(last);
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
    }
    names
}

fn compile(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("ERROR: 0:0: '' : empty shader source".to_owned());
    }
    for (number, line) in source.lines().enumerate() {
        if let Some(message) = line.trim_start().strip_prefix("#error") {
            return Err(format!("ERROR: 0:{}: '#error' : {}", number + 1, message.trim()));
        }
    }
    Ok(())
}

fn link(vertex: &str, fragment: &str) -> Result<ProgramInterface, String> {
    let written = declared_names(vertex, "varying");
    if let Some(missing) = declared_names(fragment, "varying")
        .into_iter()
        .find(|name| !written.contains(name))
    {
        return Err(format!(
            "error: fragment varying '{missing}' is not declared by the vertex shader"
        ));
    }

    let mut uniforms = declared_names(vertex, "uniform");
    for name in declared_names(fragment, "uniform") {
        if !uniforms.contains(&name) {
            uniforms.push(name);
        }
    }

    Ok(ProgramInterface { attributes: declared_names(vertex, "attribute"), uniforms })
}

impl Backend for TraceBackend {
    type Shader = TraceId;
    type Program = TraceId;
    type Buffer = TraceId;
    type Texture = TraceId;
    type UniformLocation = TraceUniformLocation;

    // ── shaders / programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Option<TraceId> {
        let mut state = self.state.borrow_mut();
        let shader = state.allocate()?;
        state
            .shaders
            .insert(shader, ShaderRecord { stage, source: String::new(), compiled: None });
        state.calls.push(Call::CreateShader { shader, stage });
        Some(shader)
    }

    fn shader_source(&self, shader: TraceId, source: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.shaders.get_mut(&shader) {
            record.source = source.to_owned();
            record.compiled = None;
        }
        state.calls.push(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: TraceId) {
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.shaders.get_mut(&shader) {
            record.compiled = Some(compile(&record.source));
        }
        state.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: TraceId) -> bool {
        matches!(
            self.state.borrow().shaders.get(&shader).and_then(|s| s.compiled.as_ref()),
            Some(Ok(()))
        )
    }

    fn shader_info_log(&self, shader: TraceId) -> String {
        match self.state.borrow().shaders.get(&shader).and_then(|s| s.compiled.as_ref()) {
            Some(Err(log)) => log.clone(),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: TraceId) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Option<TraceId> {
        let mut state = self.state.borrow_mut();
        let program = state.allocate()?;
        state.programs.insert(program, ProgramRecord::default());
        state.calls.push(Call::CreateProgram(program));
        Some(program)
    }

    fn attach_shader(&self, program: TraceId, shader: TraceId) {
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.programs.get_mut(&program) {
            record.shaders.push(shader);
        }
        state.calls.push(Call::AttachShader { program, shader });
    }

    fn link_program(&self, program: TraceId) {
        let mut state = self.state.borrow_mut();
        let attached = state
            .programs
            .get(&program)
            .map(|record| record.shaders.clone())
            .unwrap_or_default();

        let source_of = |stage: ShaderStage| {
            attached.iter().find_map(|id| {
                let shader = state.shaders.get(id)?;
                (shader.stage == stage && matches!(shader.compiled, Some(Ok(()))))
                    .then(|| shader.source.clone())
            })
        };

        let result = match (source_of(ShaderStage::Vertex), source_of(ShaderStage::Fragment)) {
            (Some(vertex), Some(fragment)) => link(&vertex, &fragment),
            _ => Err("error: program requires a compiled vertex and fragment shader".to_owned()),
        };

        if let Some(record) = state.programs.get_mut(&program) {
            record.linked = Some(result);
        }
        state.calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: TraceId) -> bool {
        self.state.borrow().interface(program).is_some()
    }

    fn program_info_log(&self, program: TraceId) -> String {
        match self.state.borrow().programs.get(&program).and_then(|p| p.linked.as_ref()) {
            Some(Err(log)) => log.clone(),
            _ => String::new(),
        }
    }

    fn use_program(&self, program: Option<TraceId>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: TraceId) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.calls.push(Call::DeleteProgram(program));
    }

    fn attrib_location(&self, program: TraceId, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let index = state.interface(program)?.attributes.iter().position(|a| a == name)?;
        u32::try_from(index).ok()
    }

    fn uniform_location(&self, program: TraceId, name: &str) -> Option<TraceUniformLocation> {
        let state = self.state.borrow();
        let index = state.interface(program)?.uniforms.iter().position(|u| u == name)?;
        Some(TraceUniformLocation { program, location: u32::try_from(index).ok()? })
    }

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Option<TraceId> {
        let mut state = self.state.borrow_mut();
        let buffer = state.allocate()?;
        state.buffers.insert(buffer, Vec::new());
        state.calls.push(Call::CreateBuffer(buffer));
        Some(buffer)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<TraceId>) {
        let mut state = self.state.borrow_mut();
        match target {
            BufferTarget::Vertex => state.bound_vertex = buffer,
            BufferTarget::Index => state.bound_index = buffer,
        }
        state.calls.push(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_size(&self, target: BufferTarget, size: usize, usage: BufferUsageHint) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.bound(target) {
            if let Some(bytes) = state.buffers.get_mut(&id) {
                *bytes = vec![0; size];
            }
        }
        state.calls.push(Call::BufferDataSize { target, size, usage });
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.bound(target) {
            if let Some(bytes) = state.buffers.get_mut(&id) {
                match bytes.get_mut(offset..offset + data.len()) {
                    Some(dst) => dst.copy_from_slice(data),
                    // GL rejects the whole upload with INVALID_VALUE.
                    None => log::warn!(
                        "buffer_sub_data: {} bytes at offset {offset} overflow buffer {id:?} ({} bytes)",
                        data.len(),
                        bytes.len()
                    ),
                }
            }
        }
        state.calls.push(Call::BufferSubData { target, offset, len: data.len() });
    }

    fn delete_buffer(&self, buffer: TraceId) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        if state.bound_vertex == Some(buffer) {
            state.bound_vertex = None;
        }
        if state.bound_index == Some(buffer) {
            state.bound_index = None;
        }
        state.calls.push(Call::DeleteBuffer(buffer));
    }

    // ── vertex input ──────────────────────────────────────────────────────

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::DisableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: u32, stride: u32, offset: u32) {
        self.record(Call::VertexAttribPointer { index, components, stride, offset });
    }

    fn vertex_attrib_divisor(&self, index: u32, divisor: u32) {
        self.record(Call::VertexAttribDivisor { index, divisor });
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_1_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Float32, data);
    }

    fn uniform_2_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Vector2, data);
    }

    fn uniform_3_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Vector3, data);
    }

    fn uniform_4_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Vector4, data);
    }

    fn uniform_matrix_2_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Matrix2, data);
    }

    fn uniform_matrix_3_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Matrix3, data);
    }

    fn uniform_matrix_4_f32_slice(&self, location: &TraceUniformLocation, data: &[f32]) {
        self.record_uniform(location, UniformType::Matrix4, data);
    }

    // ── rasterizer / draw ─────────────────────────────────────────────────

    fn clear_color(&self, color: Color) {
        self.record(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn front_face(&self, winding: FrontFace) {
        self.record(Call::FrontFace(winding));
    }

    fn set_cull_face(&self, face: Option<Face>) {
        self.record(Call::CullFace(face));
    }

    fn draw_elements(
        &self,
        topology: PrimitiveTopology,
        count: u32,
        format: IndexFormat,
        offset: u32,
    ) {
        self.record(Call::DrawElements { topology, count, format, offset });
    }

    fn viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        self.record(Call::Viewport { x, y, width, height });
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Option<TraceId> {
        let mut state = self.state.borrow_mut();
        let texture = state.allocate()?;
        state.textures.insert(texture, (0, 0));
        state.calls.push(Call::CreateTexture(texture));
        Some(texture)
    }

    fn bind_texture_2d(&self, texture: Option<TraceId>) {
        let mut state = self.state.borrow_mut();
        state.bound_texture = texture;
        state.calls.push(Call::BindTexture(texture));
    }

    fn tex_image_2d_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.bound_texture {
            if let Some(size) = state.textures.get_mut(&id) {
                *size = (width, height);
            }
        }
        state.calls.push(Call::TexImage2d { width, height, len: pixels.len() });
    }

    fn generate_mipmap_2d(&self) {
        self.record(Call::GenerateMipmap);
    }

    fn tex_parameter_2d(&self, parameter: TextureParameter) {
        self.record(Call::TexParameter(parameter));
    }

    fn delete_texture(&self, texture: TraceId) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture);
        if state.bound_texture == Some(texture) {
            state.bound_texture = None;
        }
        state.calls.push(Call::DeleteTexture(texture));
    }
}
