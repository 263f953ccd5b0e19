//! Scoped owners of raw backend objects.
//!
//! Each owner keeps the backend alive and deletes its object exactly once, on
//! drop. Resource handles wrap these in an `Rc`, so the delete happens when the
//! last clone (including clones held by recorded command buffers) goes away.

use std::rc::Rc;

use crate::backend::Backend;

#[derive(Debug)]
pub(crate) struct OwnedProgram<B: Backend> {
    backend: Rc<B>,
    raw: B::Program,
}

impl<B: Backend> OwnedProgram<B> {
    pub(crate) fn new(backend: Rc<B>, raw: B::Program) -> Self {
        Self { backend, raw }
    }

    #[inline]
    pub(crate) fn raw(&self) -> B::Program {
        self.raw
    }
}

impl<B: Backend> Drop for OwnedProgram<B> {
    fn drop(&mut self) {
        log::trace!("releasing program {:?}", self.raw);
        self.backend.delete_program(self.raw);
    }
}

#[derive(Debug)]
pub(crate) struct OwnedBuffer<B: Backend> {
    backend: Rc<B>,
    raw: B::Buffer,
}

impl<B: Backend> OwnedBuffer<B> {
    pub(crate) fn new(backend: Rc<B>, raw: B::Buffer) -> Self {
        Self { backend, raw }
    }

    #[inline]
    pub(crate) fn raw(&self) -> B::Buffer {
        self.raw
    }

    #[inline]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend> Drop for OwnedBuffer<B> {
    fn drop(&mut self) {
        log::trace!("releasing buffer {:?}", self.raw);
        self.backend.delete_buffer(self.raw);
    }
}

#[derive(Debug)]
pub(crate) struct OwnedTexture<B: Backend> {
    backend: Rc<B>,
    raw: B::Texture,
}

impl<B: Backend> OwnedTexture<B> {
    pub(crate) fn new(backend: Rc<B>, raw: B::Texture) -> Self {
        Self { backend, raw }
    }

    #[inline]
    pub(crate) fn raw(&self) -> B::Texture {
        self.raw
    }
}

impl<B: Backend> Drop for OwnedTexture<B> {
    fn drop(&mut self) {
        log::trace!("releasing texture {:?}", self.raw);
        self.backend.delete_texture(self.raw);
    }
}
