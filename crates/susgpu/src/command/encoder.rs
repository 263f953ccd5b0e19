use std::rc::Rc;

use super::RenderOperation;
use crate::Color;
use crate::backend::Backend;
use crate::resource::{BindGroup, Buffer, RenderPipeline};

#[derive(Debug, Clone, Default)]
pub struct CommandEncoderDescriptor<'a> {
    pub label: Option<&'a str>,
}

/// What happens to the color attachment when a pass begins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LoadOp<V> {
    Clear(V),
    Load,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderPassColorAttachment {
    pub ops: LoadOp<Color>,
}

#[derive(Debug, Clone)]
pub struct RenderPassDescriptor<'a> {
    pub label: Option<&'a str>,
    pub color_attachment: RenderPassColorAttachment,
}

/// Records operations until [`finish`](Self::finish) consumes it.
#[derive(Debug)]
pub struct CommandEncoder<B: Backend> {
    label: Option<String>,
    operations: Vec<RenderOperation<B>>,
}

impl<B: Backend> CommandEncoder<B> {
    pub(crate) fn new(descriptor: &CommandEncoderDescriptor<'_>) -> Self {
        Self { label: descriptor.label.map(str::to_owned), operations: Vec::new() }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Starts a pass. A `Clear` load op is recorded immediately.
    pub fn begin_render_pass(&mut self, descriptor: &RenderPassDescriptor<'_>) -> RenderPass<'_, B> {
        if let LoadOp::Clear(color) = descriptor.color_attachment.ops {
            self.operations.push(RenderOperation::ClearColor(color));
        }
        RenderPass { label: descriptor.label.map(str::to_owned), encoder: self }
    }

    pub fn finish(self) -> CommandBuffer<B> {
        log::debug!(
            "finished encoder {:?} with {} operations",
            self.label.as_deref().unwrap_or("<unlabeled>"),
            self.operations.len()
        );
        CommandBuffer { operations: Rc::from(self.operations) }
    }
}

/// Appends operations to the encoder it borrows, in call order.
#[derive(Debug)]
pub struct RenderPass<'e, B: Backend> {
    label: Option<String>,
    encoder: &'e mut CommandEncoder<B>,
}

impl<B: Backend> RenderPass<'_, B> {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn push(&mut self, operation: RenderOperation<B>) -> &mut Self {
        self.encoder.operations.push(operation);
        self
    }

    pub fn set_pipeline(&mut self, pipeline: &RenderPipeline<B>) -> &mut Self {
        self.push(RenderOperation::SetPipeline(pipeline.clone()))
    }

    /// Binds `groups[i]` as bind group `i`.
    pub fn set_bind_group(&mut self, groups: &[BindGroup<B>]) -> &mut Self {
        self.push(RenderOperation::SetBindGroup(groups.to_vec()))
    }

    /// Binds `buffers[i]` to vertex buffer slot `i`.
    pub fn set_vertex_buffer(&mut self, buffers: &[Buffer<B>]) -> &mut Self {
        self.push(RenderOperation::SetVertexBuffer(buffers.to_vec()))
    }

    pub fn set_index_buffer(&mut self, buffer: &Buffer<B>) -> &mut Self {
        self.push(RenderOperation::SetIndexBuffer(buffer.clone()))
    }

    /// Draws `triangles * 3` indices from the bound index buffer.
    pub fn draw_indexed(&mut self, triangles: u32) -> &mut Self {
        self.push(RenderOperation::DrawIndexed { triangles })
    }
}

/// Immutable, replayable list of operations.
#[derive(Debug)]
pub struct CommandBuffer<B: Backend> {
    operations: Rc<[RenderOperation<B>]>,
}

impl<B: Backend> Clone for CommandBuffer<B> {
    fn clone(&self) -> Self {
        Self { operations: Rc::clone(&self.operations) }
    }
}

impl<B: Backend> CommandBuffer<B> {
    pub fn operations(&self) -> &[RenderOperation<B>] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
