//! Command recording.
//!
//! A [`CommandEncoder`] collects [`RenderOperation`]s through [`RenderPass`]
//! builders and is consumed by [`CommandEncoder::finish`] into an immutable
//! [`CommandBuffer`]. Nothing here touches the backend or validates anything;
//! all checks happen when the queue replays the buffer.

mod encoder;
mod op;

pub use encoder::{
    CommandBuffer, CommandEncoder, CommandEncoderDescriptor, LoadOp, RenderPass,
    RenderPassColorAttachment, RenderPassDescriptor,
};
pub use op::{OperationKind, RenderOperation};
