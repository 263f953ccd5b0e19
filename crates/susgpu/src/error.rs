use std::fmt;

use thiserror::Error;

use crate::backend::ShaderStage;
use crate::command::OperationKind;
use crate::resource::{BufferKind, UniformType};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Backend object kinds that can fail to allocate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Shader,
    Program,
    Buffer,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shader => "shader",
            Self::Program => "program",
            Self::Buffer => "buffer",
            Self::Texture => "texture",
        })
    }
}

/// Errors raised while creating resources, writing buffers, or replaying commands.
///
/// None of these are retried. A failure during `Queue::submit` aborts the
/// submission and leaves backend state wherever the failing operation left it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompilation { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {log}")]
    ProgramLink { log: String },

    #[error("backend could not allocate a {0}")]
    Allocation(ResourceKind),

    #[error("{operation} requires a pipeline to be set")]
    NoPipeline { operation: OperationKind },

    #[error("the current program does not have a(n) '{name}' attribute")]
    MissingAttribute { name: String },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error("expected a {expected} buffer, got a {actual} buffer")]
    BufferKind { expected: BufferKind, actual: BufferKind },

    #[error("write of {len} bytes exceeds buffer size of {size} bytes")]
    BufferOverrun { len: usize, size: usize },

    #[error("write of {len} bytes is not a whole number of {element}-byte elements")]
    Misaligned { len: usize, element: usize },

    #[error("draw reads {count} indices but the index buffer holds {capacity}")]
    IndexOutOfRange { count: u32, capacity: u32 },

    #[error("expected {expected} bytes of RGBA8 pixel data, got {actual}")]
    TextureData { expected: usize, actual: usize },
}

/// Mismatches between bind groups, layouts, and the current program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("bind group has {entries} entries but its layout declares {layout}")]
    EntryCountMismatch { layout: usize, entries: usize },

    #[error("bind group entry {index} must be a uniform buffer, got a {actual} buffer")]
    NotUniformBuffer { index: usize, actual: BufferKind },

    #[error("pipeline layout has no bind group layout for group {group}")]
    MissingBindGroupLayout { group: usize },

    #[error("bind group {group} layout does not match the pipeline's layout for that group")]
    LayoutMismatch { group: usize },

    #[error("the current program does not have a(n) '{name}' uniform")]
    MissingUniform { name: String },

    #[error("uniform '{name}' of type {ty:?} cannot be uploaded from {len} floats")]
    UniformSize { name: String, ty: UniformType, len: usize },

    #[error("pipeline declares no vertex buffer layout for slot {slot}")]
    MissingVertexLayout { slot: usize },
}
