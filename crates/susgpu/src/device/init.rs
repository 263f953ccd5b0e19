use crate::backend::BufferUsageHint;

/// Initialization parameters for a [`Device`](super::Device).
///
/// Keep this structure small. Add configuration flags only when a concrete
/// backend requirement exists.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    /// Used in log output only.
    pub label: Option<String>,

    /// Usage hint passed to the backend when vertex and index buffers are
    /// allocated.
    ///
    /// `Static` suits geometry uploaded once; scenes rewriting buffers every
    /// frame should pick `Dynamic`.
    pub buffer_usage_hint: BufferUsageHint,

    /// Cache attribute and uniform locations per pipeline.
    ///
    /// When disabled every replayed bind re-queries the backend by name.
    pub cache_locations: bool,
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self {
            label: None,
            buffer_usage_hint: BufferUsageHint::Static,
            cache_locations: true,
        }
    }
}
