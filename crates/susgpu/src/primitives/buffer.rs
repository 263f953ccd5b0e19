use crate::backend::{Backend, BufferTarget, BufferUsageHint};
use crate::error::{Error, ResourceKind, Result};

/// Largest buffer the backend can address; GL takes sizes as `GLsizeiptr`
/// and offsets as `GLintptr`, both 32-bit on WebGL.
pub const MAX_BUFFER_SIZE: usize = i32::MAX as usize;

/// Creates a buffer object and allocates `size` bytes of storage for `target`.
///
/// The buffer is left bound to `target`. Sizes above [`MAX_BUFFER_SIZE`] fail
/// with [`Error::Allocation`] before the backend is touched.
pub fn allocate_buffer<B: Backend>(
    backend: &B,
    target: BufferTarget,
    size: usize,
    usage: BufferUsageHint,
) -> Result<B::Buffer> {
    if size > MAX_BUFFER_SIZE {
        log::warn!("refusing to allocate a {size}-byte buffer (max {MAX_BUFFER_SIZE})");
        return Err(Error::Allocation(ResourceKind::Buffer));
    }

    let buffer = backend
        .create_buffer()
        .ok_or(Error::Allocation(ResourceKind::Buffer))?;

    backend.bind_buffer(target, Some(buffer));
    backend.buffer_data_size(target, size, usage);

    Ok(buffer)
}

/// Binds `buffer` to `target` and overwrites its contents from offset 0.
pub fn set_buffer_data<B: Backend>(backend: &B, target: BufferTarget, buffer: B::Buffer, data: &[u8]) {
    backend.bind_buffer(target, Some(buffer));
    backend.buffer_sub_data(target, 0, data);
}

/// Allocates a buffer sized to `contents` and uploads them.
pub fn create_buffer_init<B: Backend>(
    backend: &B,
    target: BufferTarget,
    contents: &[u8],
    usage: BufferUsageHint,
) -> Result<B::Buffer> {
    let buffer = allocate_buffer(backend, target, contents.len(), usage)?;
    set_buffer_data(backend, target, buffer, contents);
    Ok(buffer)
}
