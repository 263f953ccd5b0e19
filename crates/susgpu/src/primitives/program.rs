use crate::backend::{Backend, ShaderStage};
use crate::error::{Error, ResourceKind, Result};

/// Compiles `vertex` and `fragment` and links them into a program.
///
/// On failure every object created along the way is deleted and the backend's
/// info log is returned in the error. On success the individual shaders are
/// deleted; the program keeps them alive for as long as it needs them.
pub fn create_program<B: Backend>(backend: &B, vertex: &str, fragment: &str) -> Result<B::Program> {
    let vertex_shader = compile_shader(backend, ShaderStage::Vertex, vertex)?;
    let fragment_shader = match compile_shader(backend, ShaderStage::Fragment, fragment) {
        Ok(shader) => shader,
        Err(err) => {
            backend.delete_shader(vertex_shader);
            return Err(err);
        }
    };

    let result = link_program(backend, vertex_shader, fragment_shader);

    backend.delete_shader(vertex_shader);
    backend.delete_shader(fragment_shader);

    result
}

fn compile_shader<B: Backend>(backend: &B, stage: ShaderStage, source: &str) -> Result<B::Shader> {
    let shader = backend
        .create_shader(stage)
        .ok_or(Error::Allocation(ResourceKind::Shader))?;

    backend.shader_source(shader, source);
    backend.compile_shader(shader);

    if !backend.shader_compile_status(shader) {
        let log = backend.shader_info_log(shader);
        backend.delete_shader(shader);
        return Err(Error::ShaderCompilation { stage, log });
    }

    Ok(shader)
}

fn link_program<B: Backend>(
    backend: &B,
    vertex_shader: B::Shader,
    fragment_shader: B::Shader,
) -> Result<B::Program> {
    let program = backend
        .create_program()
        .ok_or(Error::Allocation(ResourceKind::Program))?;

    backend.attach_shader(program, vertex_shader);
    backend.attach_shader(program, fragment_shader);
    backend.link_program(program);

    if !backend.program_link_status(program) {
        let log = backend.program_info_log(program);
        backend.delete_program(program);
        return Err(Error::ProgramLink { log });
    }

    Ok(program)
}
