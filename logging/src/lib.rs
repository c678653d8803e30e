//! `fibre_logger_factory` - configuration-driven logger assembly.
//!
//! A [`LoggerFactory`] builds a named [`Logger`] from declarative configuration
//! held by a service locator (a `fibre_ioc::Container`). Handlers, formatters and
//! processors may be referenced by name; a name is resolved against the locator
//! first and against a registry of component factories second.
//!
//! ```
//! use fibre_ioc::Container;
//! use fibre_logger_factory::LoggerFactory;
//! use serde_json::json;
//!
//! let container = Container::new();
//! container.add_instance_with_name("config", json!({
//!   "logger": {
//!     "app": {
//!       "handlers": [
//!         { "name": "MemoryHandler", "options": { "level": "info" } }
//!       ],
//!       "processors": [{ "name": "PsrProcessor" }]
//!     }
//!   }
//! }));
//!
//! let logger = LoggerFactory::new("app").invoke(&container).unwrap();
//! assert_eq!(logger.handlers().len(), 1);
//! assert_eq!(logger.processors().len(), 1);
//! ```

pub mod assembler;
pub mod builder;
pub mod component;
pub mod config;
pub mod error;
pub mod factory;
pub mod formatters;
pub mod handlers;
pub mod logger;
pub mod model;
pub mod processors;
pub mod registration;
pub mod registry;

// Re-export key public types for easier use by library consumers.
pub use assembler::ComponentAssembler;
pub use builder::{component_types, DescriptorLoggerBuilder, HandlerArgs, LoggerBuilder, TypeRegistry};
pub use component::{Component, Formatter, Handler, Processor};
pub use config::{LoggerConfig, CONFIG_KEY, CONFIG_SERVICE_ALIASES};
pub use error::{ComponentError, ComponentKind, Error, FormatError, Result};
pub use factory::{LoggerFactory, DEFAULT_LOGGER_NAME};
pub use logger::Logger;
pub use model::{LogRecord, LogValue};
pub use registration::ComponentRegistration;
pub use registry::{factories, ComponentFactory, FactoryRegistry};
