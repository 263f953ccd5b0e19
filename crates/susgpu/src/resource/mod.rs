//! Resource descriptors and handles.
//!
//! Every resource is created by [`crate::Device`] and is immutable afterwards,
//! except for buffer contents (see [`Buffer`]). Handles are reference-counted
//! and cheap to clone; recording a command clones the handles it references.
//!
//! Raw backend objects (programs, buffers, textures) are owned by scoped
//! owners in `handle` and deleted when the last handle drops.

mod binding;
mod buffer;
mod handle;
mod pipeline;
mod shader;
mod texture;
mod vertex;

pub use binding::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingResource, UniformType,
};
pub use buffer::{Buffer, BufferDescriptor, BufferInitDescriptor, BufferKind, BufferUsage};
pub use pipeline::{
    PipelineLayout, PipelineLayoutDescriptor, RenderPipeline, RenderPipelineDescriptor,
};
pub use shader::{ShaderModule, ShaderModuleDescriptor, ShaderSource};
pub use texture::{Texture, TextureDescriptor};
pub use vertex::{AttributeType, VertexAttribute, VertexBufferLayout, VertexStepMode};

pub(crate) use buffer::BufferStorage;
pub(crate) use handle::{OwnedBuffer, OwnedProgram, OwnedTexture};
