// src/config/mod.rs
// Logger configuration: the typed tree and how it is read from a locator.

pub mod level;
pub mod raw;
pub mod resolver;

pub use raw::{
  Descriptor, FormatterEntry, HandlerDescriptor, HandlerEntry, HandlerOptions, LoggerConfig,
  Options, ProcessorEntry,
};
pub use resolver::{resolve_logger_config, CONFIG_KEY, CONFIG_SERVICE_ALIASES};
