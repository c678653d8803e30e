//! Built-in processors.

mod psr;
mod tag;

pub use psr::PsrProcessor;
pub use tag::TagProcessor;

pub(crate) use psr::psr_processor_from_options;
pub(crate) use tag::tag_processor_from_options;
