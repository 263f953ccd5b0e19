use std::fmt;

use crate::Color;
use crate::backend::Backend;
use crate::resource::{BindGroup, Buffer, RenderPipeline};

/// Discriminant of a [`RenderOperation`], used in errors and logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ClearColor,
    SetPipeline,
    SetBindGroup,
    SetVertexBuffer,
    SetIndexBuffer,
    DrawIndexed,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ClearColor => "clear_color",
            Self::SetPipeline => "set_pipeline",
            Self::SetBindGroup => "set_bind_group",
            Self::SetVertexBuffer => "set_vertex_buffer",
            Self::SetIndexBuffer => "set_index_buffer",
            Self::DrawIndexed => "draw_indexed",
        })
    }
}

/// One recorded step. Resources are held by handle, so a command buffer keeps
/// everything it references alive.
#[derive(Debug)]
pub enum RenderOperation<B: Backend> {
    ClearColor(Color),
    SetPipeline(RenderPipeline<B>),
    /// Group index is the position in the list.
    SetBindGroup(Vec<BindGroup<B>>),
    /// Slot index is the position in the list.
    SetVertexBuffer(Vec<Buffer<B>>),
    SetIndexBuffer(Buffer<B>),
    DrawIndexed { triangles: u32 },
}

impl<B: Backend> RenderOperation<B> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::ClearColor(_) => OperationKind::ClearColor,
            Self::SetPipeline(_) => OperationKind::SetPipeline,
            Self::SetBindGroup(_) => OperationKind::SetBindGroup,
            Self::SetVertexBuffer(_) => OperationKind::SetVertexBuffer,
            Self::SetIndexBuffer(_) => OperationKind::SetIndexBuffer,
            Self::DrawIndexed { .. } => OperationKind::DrawIndexed,
        }
    }
}

impl<B: Backend> Clone for RenderOperation<B> {
    fn clone(&self) -> Self {
        match self {
            Self::ClearColor(color) => Self::ClearColor(*color),
            Self::SetPipeline(pipeline) => Self::SetPipeline(pipeline.clone()),
            Self::SetBindGroup(groups) => Self::SetBindGroup(groups.clone()),
            Self::SetVertexBuffer(buffers) => Self::SetVertexBuffer(buffers.clone()),
            Self::SetIndexBuffer(buffer) => Self::SetIndexBuffer(buffer.clone()),
            Self::DrawIndexed { triangles } => Self::DrawIndexed { triangles: *triangles },
        }
    }
}
