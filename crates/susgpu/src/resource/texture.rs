use std::rc::Rc;

use super::OwnedTexture;
use crate::backend::Backend;

#[derive(Debug, Copy, Clone)]
pub struct TextureDescriptor<'a> {
    pub label: Option<&'a str>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
struct TextureInner<B: Backend> {
    label: Option<String>,
    width: u32,
    height: u32,
    texture: OwnedTexture<B>,
}

/// A 2D RGBA8 texture. It cannot be bound through a bind group; it exists so
/// callers holding a backend can sample it themselves.
#[derive(Debug)]
pub struct Texture<B: Backend> {
    inner: Rc<TextureInner<B>>,
}

impl<B: Backend> Clone for Texture<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: Backend> Texture<B> {
    pub(crate) fn new(label: Option<&str>, width: u32, height: u32, texture: OwnedTexture<B>) -> Self {
        Self {
            inner: Rc::new(TextureInner {
                label: label.map(str::to_owned),
                width,
                height,
                texture,
            }),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.inner.width
    }

    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn raw(&self) -> B::Texture {
        self.inner.texture.raw()
    }
}
