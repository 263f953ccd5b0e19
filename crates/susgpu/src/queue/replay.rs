use crate::backend::{Backend, BufferTarget, IndexFormat};
use crate::command::{OperationKind, RenderOperation};
use crate::error::{BindingError, Error, Result};
use crate::resource::{
    BindGroup, Buffer, BufferKind, BufferStorage, RenderPipeline, UniformType,
};
use crate::Color;

/// Index buffer remembered between `SetIndexBuffer` and `DrawIndexed`.
#[derive(Debug, Copy, Clone)]
struct BoundIndex {
    format: IndexFormat,
    capacity: u32,
}

/// State carried across the operations of one `Queue::submit`.
///
/// Starts with no pipeline, no index buffer and no enabled attribute arrays;
/// nothing survives into the next submission.
#[derive(Debug)]
pub(crate) struct Replay<'q, B: Backend> {
    backend: &'q B,
    pipeline: Option<RenderPipeline<B>>,
    index: Option<BoundIndex>,
    /// Attribute locations enabled by the last `SetVertexBuffer`.
    enabled: Vec<u32>,
}

impl<'q, B: Backend> Replay<'q, B> {
    pub(crate) fn new(backend: &'q B) -> Self {
        Self { backend, pipeline: None, index: None, enabled: Vec::new() }
    }

    pub(crate) fn execute(&mut self, operation: &RenderOperation<B>) -> Result<()> {
        log::trace!("replaying {}", operation.kind());

        match operation {
            RenderOperation::ClearColor(color) => self.clear(*color),
            RenderOperation::SetPipeline(pipeline) => self.set_pipeline(pipeline),
            RenderOperation::SetBindGroup(groups) => self.set_bind_groups(groups)?,
            RenderOperation::SetVertexBuffer(buffers) => self.set_vertex_buffers(buffers)?,
            RenderOperation::SetIndexBuffer(buffer) => self.set_index_buffer(buffer)?,
            RenderOperation::DrawIndexed { triangles } => self.draw_indexed(*triangles)?,
        }
        Ok(())
    }

    fn pipeline(&self, operation: OperationKind) -> Result<&RenderPipeline<B>> {
        self.pipeline.as_ref().ok_or(Error::NoPipeline { operation })
    }

    // ── operations ────────────────────────────────────────────────────────

    fn clear(&self, color: Color) {
        self.backend.clear_color(color);
        self.backend.clear_color_buffer();
    }

    /// Makes the program current and resets every piece of rasterizer state a
    /// pipeline declares, so nothing leaks from the previous pipeline.
    fn set_pipeline(&mut self, pipeline: &RenderPipeline<B>) {
        self.backend.use_program(Some(pipeline.module().raw()));
        self.backend.front_face(pipeline.front_face());
        self.backend.set_cull_face(pipeline.cull_mode());
        self.pipeline = Some(pipeline.clone());
    }

    fn set_bind_groups(&self, groups: &[BindGroup<B>]) -> Result<()> {
        let pipeline = self.pipeline(OperationKind::SetBindGroup)?;
        let layouts = pipeline.layout().bind_group_layouts();

        for (group_index, group) in groups.iter().enumerate() {
            let expected = layouts
                .get(group_index)
                .ok_or(BindingError::MissingBindGroupLayout { group: group_index })?;
            if !group.layout().is_congruent(expected) {
                return Err(BindingError::LayoutMismatch { group: group_index }.into());
            }

            for (entry_index, (entry, buffer)) in group.bindings().enumerate() {
                let location = pipeline
                    .uniform_location(self.backend, &entry.name)
                    .ok_or_else(|| BindingError::MissingUniform { name: entry.name.clone() })?;

                let contents = match buffer.storage() {
                    BufferStorage::Uniform(contents) => contents.borrow(),
                    BufferStorage::Vertex(_) | BufferStorage::Index(..) => {
                        return Err(BindingError::NotUniformBuffer {
                            index: entry_index,
                            actual: buffer.kind(),
                        }
                        .into());
                    }
                };

                let len = contents.len();
                if len == 0 || len % entry.ty.components() != 0 {
                    return Err(BindingError::UniformSize {
                        name: entry.name.clone(),
                        ty: entry.ty,
                        len,
                    }
                    .into());
                }

                upload_uniform(self.backend, &location, entry.ty, &contents);
            }
        }
        Ok(())
    }

    /// Binds every slot, then disables arrays the previous `SetVertexBuffer`
    /// enabled that the current pipeline no longer reads.
    fn set_vertex_buffers(&mut self, buffers: &[Buffer<B>]) -> Result<()> {
        let pipeline = self.pipeline(OperationKind::SetVertexBuffer)?.clone();
        let mut enabled = Vec::new();

        for (slot, buffer) in buffers.iter().enumerate() {
            let layout = pipeline
                .vertex_buffers()
                .get(slot)
                .ok_or(BindingError::MissingVertexLayout { slot })?;

            let raw = match buffer.storage() {
                BufferStorage::Vertex(owned) => owned.raw(),
                BufferStorage::Index(..) | BufferStorage::Uniform(_) => {
                    return Err(Error::BufferKind {
                        expected: BufferKind::Vertex,
                        actual: buffer.kind(),
                    });
                }
            };
            self.backend.bind_buffer(BufferTarget::Vertex, Some(raw));

            for attribute in layout.attributes() {
                let location = pipeline
                    .attribute_location(self.backend, attribute.name())
                    .ok_or_else(|| Error::MissingAttribute { name: attribute.name().to_owned() })?;

                self.backend.enable_vertex_attrib_array(location);
                self.backend.vertex_attrib_pointer_f32(
                    location,
                    attribute.ty().components(),
                    layout.stride(),
                    attribute.offset(),
                );
                self.backend.vertex_attrib_divisor(location, layout.step_mode().divisor());
                enabled.push(location);
            }
        }

        for &stale in self.enabled.iter().filter(|&location| !enabled.contains(location)) {
            self.backend.disable_vertex_attrib_array(stale);
        }
        self.enabled = enabled;
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: &Buffer<B>) -> Result<()> {
        self.pipeline(OperationKind::SetIndexBuffer)?;

        let BufferStorage::Index(owned, format) = buffer.storage() else {
            return Err(Error::BufferKind { expected: BufferKind::Index, actual: buffer.kind() });
        };
        self.backend.bind_buffer(BufferTarget::Index, Some(owned.raw()));
        self.index = Some(BoundIndex {
            format: *format,
            capacity: buffer.index_capacity().unwrap_or(0),
        });
        Ok(())
    }

    fn draw_indexed(&self, triangles: u32) -> Result<()> {
        let pipeline = self.pipeline(OperationKind::DrawIndexed)?;
        let count = triangles.checked_mul(3).unwrap_or(u32::MAX);

        let format = match self.index {
            Some(index) if count > index.capacity => {
                return Err(Error::IndexOutOfRange { count, capacity: index.capacity });
            }
            Some(index) => index.format,
            None => {
                log::debug!("draw_indexed without an index buffer set; drawing {count} u16 indices");
                IndexFormat::Uint16
            }
        };

        self.backend.draw_elements(pipeline.topology(), count, format, 0);
        Ok(())
    }
}

fn upload_uniform<B: Backend>(
    backend: &B,
    location: &B::UniformLocation,
    ty: UniformType,
    data: &[f32],
) {
    match ty {
        UniformType::Float32 => backend.uniform_1_f32_slice(location, data),
        UniformType::Vector2 => backend.uniform_2_f32_slice(location, data),
        UniformType::Vector3 => backend.uniform_3_f32_slice(location, data),
        UniformType::Vector4 => backend.uniform_4_f32_slice(location, data),
        UniformType::Matrix2 => backend.uniform_matrix_2_f32_slice(location, data),
        UniformType::Matrix3 => backend.uniform_matrix_3_f32_slice(location, data),
        UniformType::Matrix4 => backend.uniform_matrix_4_f32_slice(location, data),
    }
}
