//! susgpu crate.
//!
//! A small retained-mode layer in the shape of `Device` / `Queue` /
//! `CommandEncoder`. Callers describe resources once, record render passes into
//! immutable command buffers, and the queue replays those buffers against a
//! single immediate-mode backend context (OpenGL / WebGL through `glow`, or the
//! in-memory [`backend::TraceBackend`]).
//!
//! Phases are one-directional:
//! - `Device` creates resources (backend work only through [`primitives`])
//! - `CommandEncoder` / `RenderPass` record operations referencing them
//! - `Queue::submit` replays operations, resolving names against the current program

pub mod backend;
pub mod command;
pub mod device;
pub mod logging;
pub mod primitives;
pub mod queue;
pub mod resource;

mod color;
mod error;

pub use color::Color;
pub use error::{BindingError, Error, ResourceKind, Result};

pub use backend::{
    Backend, BufferUsageHint, Face, FrontFace, IndexFormat, PrimitiveTopology, ShaderStage,
};
pub use command::{
    CommandBuffer, CommandEncoder, CommandEncoderDescriptor, LoadOp, OperationKind, RenderOperation,
    RenderPass, RenderPassColorAttachment, RenderPassDescriptor,
};
pub use device::{
    Adapter, Device, DeviceDescriptor, Instance, RequestAdapterOptions, Surface,
    SurfaceConfiguration,
};
pub use queue::Queue;
pub use resource::{
    AttributeType, BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout,
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource, Buffer, BufferDescriptor,
    BufferInitDescriptor, BufferKind, BufferUsage, PipelineLayout, PipelineLayoutDescriptor,
    RenderPipeline, RenderPipelineDescriptor, ShaderModule, ShaderModuleDescriptor, ShaderSource,
    Texture, TextureDescriptor, UniformType, VertexAttribute, VertexBufferLayout, VertexStepMode,
};
