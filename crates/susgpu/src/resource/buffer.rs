use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{BindingResource, OwnedBuffer};
use crate::backend::{Backend, BufferTarget, BufferUsageHint, IndexFormat};
use crate::error::{Error, Result};
use crate::primitives;

/// What a buffer holds, fixed at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
    Uniform,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Index => "index",
            Self::Uniform => "uniform",
        })
    }
}

/// Declared use of a buffer. Index buffers also declare their element width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    Vertex,
    Index(IndexFormat),
    Uniform,
}

impl BufferUsage {
    #[inline]
    pub const fn kind(self) -> BufferKind {
        match self {
            Self::Vertex => BufferKind::Vertex,
            Self::Index(_) => BufferKind::Index,
            Self::Uniform => BufferKind::Uniform,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    pub label: Option<&'a str>,
    /// Size in bytes.
    pub size: usize,
    pub usage: BufferUsage,
}

#[derive(Debug, Clone)]
pub struct BufferInitDescriptor<'a> {
    pub label: Option<&'a str>,
    pub usage: BufferUsage,
    pub contents: &'a [u8],
}

/// Backing storage, one variant per [`BufferKind`].
#[derive(Debug)]
pub(crate) enum BufferStorage<B: Backend> {
    Vertex(OwnedBuffer<B>),
    Index(OwnedBuffer<B>, IndexFormat),
    /// The backend has no uniform buffer objects; contents live on the CPU
    /// and are uploaded to the current program whenever the group is bound.
    Uniform(RefCell<Vec<f32>>),
}

#[derive(Debug)]
struct BufferInner<B: Backend> {
    label: Option<String>,
    size: usize,
    storage: BufferStorage<B>,
}

/// Shared handle to a vertex, index, or uniform buffer.
///
/// The descriptor is immutable. Contents change only through
/// `Queue::write_buffer` (or the initial write of `Device::create_buffer_init`),
/// and every clone observes the change.
#[derive(Debug)]
pub struct Buffer<B: Backend> {
    inner: Rc<BufferInner<B>>,
}

impl<B: Backend> Clone for Buffer<B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<B: Backend> Buffer<B> {
    pub(crate) fn create(
        backend: &Rc<B>,
        descriptor: &BufferDescriptor<'_>,
        hint: BufferUsageHint,
    ) -> Result<Self> {
        let size = descriptor.size;
        let storage = match descriptor.usage {
            BufferUsage::Vertex => {
                let raw = primitives::allocate_buffer(&**backend, BufferTarget::Vertex, size, hint)?;
                BufferStorage::Vertex(OwnedBuffer::new(Rc::clone(backend), raw))
            }
            BufferUsage::Index(format) => {
                let raw = primitives::allocate_buffer(&**backend, BufferTarget::Index, size, hint)?;
                BufferStorage::Index(OwnedBuffer::new(Rc::clone(backend), raw), format)
            }
            BufferUsage::Uniform => {
                if size % 4 != 0 {
                    return Err(Error::Misaligned { len: size, element: 4 });
                }
                BufferStorage::Uniform(RefCell::new(vec![0.0; size / 4]))
            }
        };

        Ok(Self {
            inner: Rc::new(BufferInner {
                label: descriptor.label.map(str::to_owned),
                size,
                storage,
            }),
        })
    }

    /// Replaces the buffer's contents from offset 0.
    ///
    /// Vertex and index data is uploaded to the backend object and may not
    /// exceed the allocation; index data must be a whole number of elements.
    /// Uniform contents are replaced by `data` reinterpreted as `f32`s.
    pub(crate) fn write(&self, data: &[u8]) -> Result<()> {
        match &self.inner.storage {
            BufferStorage::Vertex(owned) => {
                self.check_fits(data)?;
                primitives::set_buffer_data(owned.backend(), BufferTarget::Vertex, owned.raw(), data);
            }
            BufferStorage::Index(owned, format) => {
                self.check_fits(data)?;
                let element = format.byte_size();
                if data.len() % element != 0 {
                    return Err(Error::Misaligned { len: data.len(), element });
                }
                primitives::set_buffer_data(owned.backend(), BufferTarget::Index, owned.raw(), data);
            }
            BufferStorage::Uniform(contents) => {
                if data.len() % 4 != 0 {
                    return Err(Error::Misaligned { len: data.len(), element: 4 });
                }
                *contents.borrow_mut() =
                    data.chunks_exact(4).map(bytemuck::pod_read_unaligned::<f32>).collect();
            }
        }
        Ok(())
    }

    fn check_fits(&self, data: &[u8]) -> Result<()> {
        if data.len() > self.inner.size {
            return Err(Error::BufferOverrun { len: data.len(), size: self.inner.size });
        }
        Ok(())
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn kind(&self) -> BufferKind {
        self.usage().kind()
    }

    pub fn usage(&self) -> BufferUsage {
        match &self.inner.storage {
            BufferStorage::Vertex(_) => BufferUsage::Vertex,
            BufferStorage::Index(_, format) => BufferUsage::Index(*format),
            BufferStorage::Uniform(_) => BufferUsage::Uniform,
        }
    }

    /// Size in bytes. For uniform buffers this follows the last write.
    pub fn size(&self) -> usize {
        match &self.inner.storage {
            BufferStorage::Vertex(_) | BufferStorage::Index(..) => self.inner.size,
            BufferStorage::Uniform(contents) => contents.borrow().len() * 4,
        }
    }

    /// Number of indices the buffer can hold, for index buffers.
    pub fn index_capacity(&self) -> Option<u32> {
        match &self.inner.storage {
            BufferStorage::Index(_, format) => {
                Some(u32::try_from(self.inner.size / format.byte_size()).unwrap_or(u32::MAX))
            }
            BufferStorage::Vertex(_) | BufferStorage::Uniform(_) => None,
        }
    }

    /// Backend buffer object, for vertex and index buffers.
    pub fn raw(&self) -> Option<B::Buffer> {
        match &self.inner.storage {
            BufferStorage::Vertex(owned) | BufferStorage::Index(owned, _) => Some(owned.raw()),
            BufferStorage::Uniform(_) => None,
        }
    }

    /// Snapshot of a uniform buffer's contents.
    pub fn uniform_contents(&self) -> Option<Vec<f32>> {
        match &self.inner.storage {
            BufferStorage::Uniform(contents) => Some(contents.borrow().clone()),
            BufferStorage::Vertex(_) | BufferStorage::Index(..) => None,
        }
    }

    /// Binding resource covering the whole buffer.
    pub fn as_entire_binding(&self) -> BindingResource<B> {
        BindingResource::Buffer(self.clone())
    }

    #[inline]
    pub(crate) fn storage(&self) -> &BufferStorage<B> {
        &self.inner.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, TraceBackend};

    fn buffer(backend: &Rc<TraceBackend>, size: usize, usage: BufferUsage) -> Buffer<TraceBackend> {
        Buffer::create(
            backend,
            &BufferDescriptor { label: Some("test"), size, usage },
            BufferUsageHint::Dynamic,
        )
        .unwrap()
    }

    #[test]
    fn uniform_buffer_starts_zeroed() {
        let backend = Rc::new(TraceBackend::new());
        let uniform = buffer(&backend, 16, BufferUsage::Uniform);

        assert_eq!(uniform.kind(), BufferKind::Uniform);
        assert_eq!(uniform.uniform_contents(), Some(vec![0.0; 4]));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn uniform_size_must_be_whole_floats() {
        let backend = Rc::new(TraceBackend::new());
        let err = Buffer::create(
            &backend,
            &BufferDescriptor { label: None, size: 6, usage: BufferUsage::Uniform },
            BufferUsageHint::Static,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Misaligned { len: 6, element: 4 }));
    }

    #[test]
    fn uniform_write_replaces_contents() {
        let backend = Rc::new(TraceBackend::new());
        let uniform = buffer(&backend, 8, BufferUsage::Uniform);
        let clone = uniform.clone();

        uniform.write(bytemuck::cast_slice(&[1.5f32, -2.0, 4.0])).unwrap();

        assert_eq!(clone.uniform_contents(), Some(vec![1.5, -2.0, 4.0]));
        assert_eq!(clone.size(), 12);
    }

    #[test]
    fn vertex_write_uploads_and_checks_size() {
        let backend = Rc::new(TraceBackend::new());
        let vertices = buffer(&backend, 8, BufferUsage::Vertex);
        backend.clear_calls();

        vertices.write(&[1, 2, 3, 4]).unwrap();
        assert_eq!(
            backend.calls()[1],
            Call::BufferSubData { target: BufferTarget::Vertex, offset: 0, len: 4 }
        );

        let err = vertices.write(&[0; 9]).unwrap_err();
        assert!(matches!(err, Error::BufferOverrun { len: 9, size: 8 }));
    }

    #[test]
    fn index_write_must_be_whole_elements() {
        let backend = Rc::new(TraceBackend::new());
        let indices = buffer(&backend, 12, BufferUsage::Index(IndexFormat::Uint32));

        assert_eq!(indices.index_capacity(), Some(3));
        let err = indices.write(&[0; 6]).unwrap_err();
        assert!(matches!(err, Error::Misaligned { len: 6, element: 4 }));
    }

    #[test]
    fn last_handle_releases_backend_buffer() {
        let backend = Rc::new(TraceBackend::new());
        let vertices = buffer(&backend, 4, BufferUsage::Vertex);
        let clone = vertices.clone();

        drop(vertices);
        assert_eq!(backend.live_buffers(), 1);
        drop(clone);
        assert_eq!(backend.live_buffers(), 0);
        assert_eq!(
            backend.calls().iter().filter(|c| matches!(c, Call::DeleteBuffer(_))).count(),
            1
        );
    }
}
