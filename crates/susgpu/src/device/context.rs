use std::rc::Rc;

use super::DeviceDescriptor;
use crate::backend::{Backend, BufferUsageHint};
use crate::command::{CommandEncoder, CommandEncoderDescriptor};
use crate::error::{BindingError, Result};
use crate::primitives;
use crate::resource::{
    BindGroup, BindGroupDescriptor, BindGroupLayout, BindGroupLayoutDescriptor, BindingResource,
    Buffer, BufferDescriptor, BufferInitDescriptor, BufferKind, OwnedProgram, OwnedTexture,
    PipelineLayout, PipelineLayoutDescriptor, RenderPipeline, RenderPipelineDescriptor,
    ShaderModule, ShaderModuleDescriptor, Texture, TextureDescriptor,
};

/// Factory for resources living on one backend.
///
/// Only shader modules, vertex/index buffers and textures touch the backend
/// at creation. Everything else is plain descriptor bookkeeping; names are
/// resolved when a command buffer is replayed.
#[derive(Debug)]
pub struct Device<B: Backend> {
    backend: Rc<B>,
    label: Option<String>,
    buffer_usage_hint: BufferUsageHint,
    cache_locations: bool,
}

impl<B: Backend> Device<B> {
    pub fn new(backend: Rc<B>, descriptor: &DeviceDescriptor) -> Self {
        let DeviceDescriptor { label, buffer_usage_hint, cache_locations } = descriptor.clone();
        log::debug!(
            "creating device {:?} (buffer usage {buffer_usage_hint:?}, location cache {cache_locations})",
            label.as_deref().unwrap_or("<unlabeled>")
        );
        Self { backend, label, buffer_usage_hint, cache_locations }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Shared backend handle.
    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }

    /// Compiles and links the vertex/fragment pair into a program.
    pub fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModule<B>> {
        let raw = primitives::create_program(
            &*self.backend,
            descriptor.source.vertex,
            descriptor.source.fragment,
        )?;
        log::debug!("created shader module {:?} -> {raw:?}", descriptor.label);
        Ok(ShaderModule::new(descriptor.label, OwnedProgram::new(Rc::clone(&self.backend), raw)))
    }

    pub fn create_bind_group_layout(
        &self,
        descriptor: &BindGroupLayoutDescriptor<'_>,
    ) -> BindGroupLayout {
        BindGroupLayout::new(descriptor)
    }

    /// Pairs uniform buffers with a layout.
    ///
    /// Fails when the entry count differs from the layout's or an entry is not
    /// a uniform buffer.
    pub fn create_bind_group(&self, descriptor: &BindGroupDescriptor<'_, B>) -> Result<BindGroup<B>> {
        let layout = descriptor.layout.entries().len();
        let entries = descriptor.entries.len();
        if layout != entries {
            return Err(BindingError::EntryCountMismatch { layout, entries }.into());
        }

        for (index, entry) in descriptor.entries.iter().enumerate() {
            let BindingResource::Buffer(buffer) = &entry.resource;
            let actual = buffer.kind();
            if actual != BufferKind::Uniform {
                return Err(BindingError::NotUniformBuffer { index, actual }.into());
            }
        }

        Ok(BindGroup::new(
            descriptor.label,
            descriptor.layout.clone(),
            descriptor.entries.to_vec(),
        ))
    }

    /// Allocates `size` bytes. Uniform buffers start as `size / 4` zeroes.
    pub fn create_buffer(&self, descriptor: &BufferDescriptor<'_>) -> Result<Buffer<B>> {
        let buffer = Buffer::create(&self.backend, descriptor, self.buffer_usage_hint)?;
        log::debug!(
            "created {} buffer {:?} ({} bytes)",
            buffer.kind(),
            descriptor.label,
            descriptor.size
        );
        Ok(buffer)
    }

    /// Allocates a buffer sized to `contents` and writes them, exactly as
    /// `Queue::write_buffer` would.
    pub fn create_buffer_init(&self, descriptor: &BufferInitDescriptor<'_>) -> Result<Buffer<B>> {
        let buffer = self.create_buffer(&BufferDescriptor {
            label: descriptor.label,
            size: descriptor.contents.len(),
            usage: descriptor.usage,
        })?;
        buffer.write(descriptor.contents)?;
        Ok(buffer)
    }

    pub fn create_pipeline_layout(&self, descriptor: &PipelineLayoutDescriptor<'_>) -> PipelineLayout {
        PipelineLayout::new(descriptor)
    }

    pub fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor<'_, B>,
    ) -> RenderPipeline<B> {
        RenderPipeline::new(descriptor, self.cache_locations)
    }

    pub fn create_command_encoder(
        &self,
        descriptor: &CommandEncoderDescriptor<'_>,
    ) -> CommandEncoder<B> {
        CommandEncoder::new(descriptor)
    }

    /// Creates a texture from tightly packed RGBA8 `pixels`.
    pub fn create_texture(
        &self,
        descriptor: &TextureDescriptor<'_>,
        pixels: &[u8],
    ) -> Result<Texture<B>> {
        let raw =
            primitives::create_texture(&*self.backend, descriptor.width, descriptor.height, pixels)?;
        log::debug!(
            "created texture {:?} ({}x{})",
            descriptor.label,
            descriptor.width,
            descriptor.height
        );
        Ok(Texture::new(
            descriptor.label,
            descriptor.width,
            descriptor.height,
            OwnedTexture::new(Rc::clone(&self.backend), raw),
        ))
    }

    pub fn create_texture_from_image(
        &self,
        label: Option<&str>,
        image: &image::RgbaImage,
    ) -> Result<Texture<B>> {
        self.create_texture(
            &TextureDescriptor { label, width: image.width(), height: image.height() },
            image.as_raw(),
        )
    }
}
