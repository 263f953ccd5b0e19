use std::rc::Rc;

use super::OwnedProgram;
use crate::backend::Backend;

/// Vertex and fragment source text. Treated as opaque by this crate.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSource<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

#[derive(Debug, Copy, Clone)]
pub struct ShaderModuleDescriptor<'a> {
    pub label: Option<&'a str>,
    pub source: ShaderSource<'a>,
}

#[derive(Debug)]
struct ShaderModuleInner<B: Backend> {
    label: Option<String>,
    program: OwnedProgram<B>,
}

/// A linked program. The backend program is deleted with the last handle.
#[derive(Debug)]
pub struct ShaderModule<B: Backend> {
    inner: Rc<ShaderModuleInner<B>>,
}

impl<B: Backend> Clone for ShaderModule<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: Backend> ShaderModule<B> {
    pub(crate) fn new(label: Option<&str>, program: OwnedProgram<B>) -> Self {
        Self {
            inner: Rc::new(ShaderModuleInner { label: label.map(str::to_owned), program }),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    #[inline]
    pub fn raw(&self) -> B::Program {
        self.inner.program.raw()
    }
}
