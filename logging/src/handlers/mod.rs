//! Built-in handlers.

mod memory;
mod null;
mod stream;

pub use memory::MemoryHandler;
pub use null::NullHandler;
pub use stream::{StreamHandler, StreamTarget};

pub(crate) use memory::memory_handler_from_args;
pub(crate) use null::null_handler_from_args;
pub(crate) use stream::{file_handler_from_args, stream_handler_from_args};

pub(crate) fn default_bubble() -> bool {
  true
}
