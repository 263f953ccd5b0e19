use std::rc::Rc;

use super::{Device, DeviceDescriptor};
use crate::backend::Backend;
use crate::queue::Queue;

/// Entry point for bring-up. Holds no state; it exists so callers follow the
/// same instance → surface → adapter → device sequence on every backend.
#[derive(Debug, Default)]
pub struct Instance {
    _private: (),
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a backend context and wraps it in a surface.
    pub fn create_surface<B: Backend>(&self, backend: B) -> Surface<B> {
        Surface { backend: Rc::new(backend), config: None }
    }

    /// Returns an adapter driving the surface's backend.
    pub fn request_adapter<B: Backend>(&self, options: &RequestAdapterOptions<'_, B>) -> Adapter<B> {
        Adapter { backend: Rc::clone(&options.compatible_surface.backend) }
    }
}

#[derive(Debug)]
pub struct RequestAdapterOptions<'a, B: Backend> {
    pub compatible_surface: &'a Surface<B>,
}

/// Drawable size of a surface in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SurfaceConfiguration {
    pub width: u32,
    pub height: u32,
}

/// Render target backed by the backend's default framebuffer.
#[derive(Debug)]
pub struct Surface<B: Backend> {
    backend: Rc<B>,
    config: Option<SurfaceConfiguration>,
}

impl<B: Backend> Surface<B> {
    /// Records the size and points the viewport at the full surface.
    ///
    /// A zero-sized configuration (e.g. a minimized window) is stored but does
    /// not touch the backend.
    pub fn configure(&mut self, device: &Device<B>, config: &SurfaceConfiguration) {
        self.config = Some(*config);

        if config.width == 0 || config.height == 0 {
            log::debug!("surface configured with zero size {}x{}", config.width, config.height);
            return;
        }

        device.backend().viewport(0, 0, config.width, config.height);
    }

    pub fn configuration(&self) -> Option<&SurfaceConfiguration> {
        self.config.as_ref()
    }

    pub fn backend(&self) -> &Rc<B> {
        &self.backend
    }
}

#[derive(Debug)]
pub struct Adapter<B: Backend> {
    backend: Rc<B>,
}

impl<B: Backend> Adapter<B> {
    /// Creates a device and queue sharing this adapter's backend.
    pub fn request_device(&self, descriptor: &DeviceDescriptor) -> (Device<B>, Queue<B>) {
        let device = Device::new(Rc::clone(&self.backend), descriptor);
        let queue = Queue::new(Rc::clone(&self.backend));
        (device, queue)
    }
}
