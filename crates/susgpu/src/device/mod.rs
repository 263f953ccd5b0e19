//! Device creation and resource registry.
//!
//! This module is responsible for:
//! - wrapping a backend into a surface and handing out a `Device` / `Queue` pair
//! - configuring the surface viewport
//! - turning descriptors into resource handles

mod context;
mod init;
mod surface;

pub use context::Device;
pub use init::DeviceDescriptor;
pub use surface::{Adapter, Instance, RequestAdapterOptions, Surface, SurfaceConfiguration};
