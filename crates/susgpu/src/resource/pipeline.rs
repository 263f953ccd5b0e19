use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{BindGroupLayout, ShaderModule, VertexBufferLayout};
use crate::backend::{Backend, Face, FrontFace, PrimitiveTopology};

#[derive(Debug, Clone, Default)]
pub struct PipelineLayoutDescriptor<'a> {
    pub label: Option<&'a str>,
    /// Group `i` of a pipeline using this layout is shaped by `bind_group_layouts[i]`.
    pub bind_group_layouts: &'a [BindGroupLayout],
}

#[derive(Debug, Clone)]
pub struct PipelineLayout {
    label: Option<Rc<str>>,
    bind_group_layouts: Rc<[BindGroupLayout]>,
}

impl PipelineLayout {
    pub(crate) fn new(descriptor: &PipelineLayoutDescriptor<'_>) -> Self {
        Self {
            label: descriptor.label.map(Rc::from),
            bind_group_layouts: Rc::from(descriptor.bind_group_layouts),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn bind_group_layouts(&self) -> &[BindGroupLayout] {
        &self.bind_group_layouts
    }
}

#[derive(Debug)]
pub struct RenderPipelineDescriptor<'a, B: Backend> {
    pub label: Option<&'a str>,
    pub layout: &'a PipelineLayout,
    pub module: &'a ShaderModule<B>,
    /// Slot `i` of `set_vertex_buffer` is read with `buffers[i]`.
    pub buffers: &'a [VertexBufferLayout],
    pub topology: PrimitiveTopology,
    pub front_face: FrontFace,
    /// `None` disables culling.
    pub cull_mode: Option<Face>,
}

/// Name → location lookups resolved against this pipeline's program.
///
/// Misses are cached too; a linked program's interface never changes.
#[derive(Debug)]
struct LocationCache<B: Backend> {
    attributes: HashMap<String, Option<u32>>,
    uniforms: HashMap<String, Option<B::UniformLocation>>,
}

#[derive(Debug)]
struct RenderPipelineInner<B: Backend> {
    label: Option<String>,
    layout: PipelineLayout,
    module: ShaderModule<B>,
    buffers: Vec<VertexBufferLayout>,
    topology: PrimitiveTopology,
    front_face: FrontFace,
    cull_mode: Option<Face>,
    cache: Option<RefCell<LocationCache<B>>>,
}

/// Immutable bundle of program, vertex layouts, and rasterizer state.
#[derive(Debug)]
pub struct RenderPipeline<B: Backend> {
    inner: Rc<RenderPipelineInner<B>>,
}

impl<B: Backend> Clone for RenderPipeline<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: Backend> RenderPipeline<B> {
    pub(crate) fn new(descriptor: &RenderPipelineDescriptor<'_, B>, cache_locations: bool) -> Self {
        let cache = cache_locations.then(|| {
            RefCell::new(LocationCache { attributes: HashMap::new(), uniforms: HashMap::new() })
        });

        Self {
            inner: Rc::new(RenderPipelineInner {
                label: descriptor.label.map(str::to_owned),
                layout: descriptor.layout.clone(),
                module: descriptor.module.clone(),
                buffers: descriptor.buffers.to_vec(),
                topology: descriptor.topology,
                front_face: descriptor.front_face,
                cull_mode: descriptor.cull_mode,
                cache,
            }),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn layout(&self) -> &PipelineLayout {
        &self.inner.layout
    }

    pub fn module(&self) -> &ShaderModule<B> {
        &self.inner.module
    }

    pub fn vertex_buffers(&self) -> &[VertexBufferLayout] {
        &self.inner.buffers
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.inner.topology
    }

    pub fn front_face(&self) -> FrontFace {
        self.inner.front_face
    }

    pub fn cull_mode(&self) -> Option<Face> {
        self.inner.cull_mode
    }

    pub(crate) fn attribute_location(&self, backend: &B, name: &str) -> Option<u32> {
        let program = self.inner.module.raw();
        let Some(cache) = &self.inner.cache else {
            return backend.attrib_location(program, name);
        };

        if let Some(location) = cache.borrow().attributes.get(name) {
            return *location;
        }
        let location = backend.attrib_location(program, name);
        cache.borrow_mut().attributes.insert(name.to_owned(), location);
        location
    }

    pub(crate) fn uniform_location(&self, backend: &B, name: &str) -> Option<B::UniformLocation> {
        let program = self.inner.module.raw();
        let Some(cache) = &self.inner.cache else {
            return backend.uniform_location(program, name);
        };

        if let Some(location) = cache.borrow().uniforms.get(name) {
            return location.clone();
        }
        let location = backend.uniform_location(program, name);
        cache.borrow_mut().uniforms.insert(name.to_owned(), location.clone());
        location
    }
}
