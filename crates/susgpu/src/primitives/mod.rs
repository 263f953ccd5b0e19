//! Backend primitives.
//!
//! Stateless helpers that translate "compile a program", "allocate a buffer",
//! "upload bytes" and "create a texture" into backend calls. They keep no
//! state and never retry; failures come back as [`crate::Error`] immediately.
//!
//! Raw handles returned here are unowned. `Device` wraps them in scoped owners.

mod buffer;
mod program;
mod texture;

pub use buffer::{MAX_BUFFER_SIZE, allocate_buffer, create_buffer_init, set_buffer_data};
pub use program::create_program;
pub use texture::{create_texture, create_texture_from_image, is_power_of_two};
