//! Turning an assembled `LoggerConfig` into a `Logger`.
//!
//! Descriptor entries name a component *type*; the [`TypeRegistry`] maps those
//! names to constructors taking the descriptor's options. Instance entries are
//! used as they are.

use crate::component::{Formatter, Handler, Processor};
use crate::config::level::level_or_all;
use crate::config::raw::{
  Descriptor, FormatterEntry, HandlerDescriptor, HandlerEntry, LoggerConfig, Options,
  ProcessorEntry,
};
use crate::error::{ComponentError, ComponentKind};
use crate::formatters::{
  html_formatter_from_options, json_formatter_from_options, pattern_formatter_from_options,
};
use crate::handlers::{
  file_handler_from_args, memory_handler_from_args, null_handler_from_args,
  stream_handler_from_args,
};
use crate::logger::Logger;
use crate::processors::{psr_processor_from_options, tag_processor_from_options};
use dashmap::DashMap;
use log::LevelFilter;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Builds a logger from a configuration whose named entries are already resolved.
pub trait LoggerBuilder: Send + Sync {
  fn build(&self, config: LoggerConfig) -> Result<Logger, ComponentError>;
}

/// What a handler constructor receives: its own options and the formatter, if the
/// descriptor configured one.
pub struct HandlerArgs {
  pub options: Options,
  pub formatter: Option<Arc<dyn Formatter>>,
}

type HandlerConstructor =
  Arc<dyn Fn(&str, HandlerArgs) -> Result<Arc<dyn Handler>, ComponentError> + Send + Sync>;
type FormatterConstructor =
  Arc<dyn Fn(&str, Options) -> Result<Arc<dyn Formatter>, ComponentError> + Send + Sync>;
type ProcessorConstructor =
  Arc<dyn Fn(&str, Options) -> Result<Arc<dyn Processor>, ComponentError> + Send + Sync>;

/// Maps component type names to constructors, one map per component kind.
#[derive(Default)]
pub struct TypeRegistry {
  handlers: DashMap<String, HandlerConstructor>,
  formatters: DashMap<String, FormatterConstructor>,
  processors: DashMap<String, ProcessorConstructor>,
}

impl TypeRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry knowing the built-in handlers, formatters and processors.
  pub fn with_builtins() -> Self {
    let registry = Self::new();
    registry.register_handler("NullHandler", null_handler_from_args);
    registry.register_handler("StreamHandler", stream_handler_from_args);
    registry.register_handler("FileHandler", file_handler_from_args);
    registry.register_handler("MemoryHandler", memory_handler_from_args);
    registry.register_formatter("PatternFormatter", pattern_formatter_from_options);
    registry.register_formatter("JsonFormatter", json_formatter_from_options);
    registry.register_formatter("HtmlFormatter", html_formatter_from_options);
    registry.register_processor("PsrProcessor", psr_processor_from_options);
    registry.register_processor("TagProcessor", tag_processor_from_options);
    registry
  }

  pub fn register_handler<F>(&self, type_name: &str, constructor: F)
  where
    F: Fn(&str, HandlerArgs) -> Result<Arc<dyn Handler>, ComponentError> + Send + Sync + 'static,
  {
    self.handlers.insert(type_name.to_owned(), Arc::new(constructor));
  }

  pub fn register_formatter<F>(&self, type_name: &str, constructor: F)
  where
    F: Fn(&str, Options) -> Result<Arc<dyn Formatter>, ComponentError> + Send + Sync + 'static,
  {
    self.formatters.insert(type_name.to_owned(), Arc::new(constructor));
  }

  pub fn register_processor<F>(&self, type_name: &str, constructor: F)
  where
    F: Fn(&str, Options) -> Result<Arc<dyn Processor>, ComponentError> + Send + Sync + 'static,
  {
    self.processors.insert(type_name.to_owned(), Arc::new(constructor));
  }

  pub fn build_handler(&self, type_name: &str, args: HandlerArgs) -> Result<Arc<dyn Handler>, ComponentError> {
    // Clone the constructor out so no map guard is held while it runs.
    let constructor = self
      .handlers
      .get(type_name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| unknown(ComponentKind::Handler, type_name))?;
    constructor(type_name, args)
  }

  pub fn build_formatter(&self, type_name: &str, options: Options) -> Result<Arc<dyn Formatter>, ComponentError> {
    let constructor = self
      .formatters
      .get(type_name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| unknown(ComponentKind::Formatter, type_name))?;
    constructor(type_name, options)
  }

  pub fn build_processor(&self, type_name: &str, options: Options) -> Result<Arc<dyn Processor>, ComponentError> {
    let constructor = self
      .processors
      .get(type_name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| unknown(ComponentKind::Processor, type_name))?;
    constructor(type_name, options)
  }
}

fn unknown(kind: ComponentKind, name: &str) -> ComponentError {
  ComponentError::UnknownType {
    kind,
    name: name.to_string(),
  }
}

static GLOBAL_TYPES: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::with_builtins()));

/// The process-wide component-type registry, pre-loaded with the built-ins.
pub fn component_types() -> Arc<TypeRegistry> {
  GLOBAL_TYPES.clone()
}

/// Deserializes a descriptor's options into a constructor's typed options.
pub(crate) fn options_from<T: DeserializeOwned>(
  kind: ComponentKind,
  name: &str,
  options: Options,
) -> Result<T, ComponentError> {
  serde_json::from_value(serde_json::Value::Object(options)).map_err(|e| {
    ComponentError::InvalidOptions {
      kind,
      name: name.to_string(),
      message: e.to_string(),
    }
  })
}

/// Reads a handler's optional `level` option.
pub(crate) fn handler_level(name: &str, level: Option<&str>) -> Result<LevelFilter, ComponentError> {
  level_or_all(level).map_err(|message| ComponentError::InvalidOptions {
    kind: ComponentKind::Handler,
    name: name.to_string(),
    message,
  })
}

/// The default builder: instances are kept, descriptors go through a `TypeRegistry`.
pub struct DescriptorLoggerBuilder {
  types: Arc<TypeRegistry>,
}

impl Default for DescriptorLoggerBuilder {
  fn default() -> Self {
    Self::new(component_types())
  }
}

impl DescriptorLoggerBuilder {
  pub fn new(types: Arc<TypeRegistry>) -> Self {
    Self { types }
  }

  fn formatter(&self, entry: FormatterEntry) -> Result<Arc<dyn Formatter>, ComponentError> {
    match entry {
      FormatterEntry::Instance(formatter) => Ok(formatter),
      FormatterEntry::Descriptor(Descriptor { name, options }) => {
        self.types.build_formatter(&name, options)
      }
      FormatterEntry::Name(name) => Err(ComponentError::Unresolved {
        kind: ComponentKind::Formatter,
        name,
      }),
    }
  }

  fn handler(&self, entry: HandlerEntry) -> Result<Arc<dyn Handler>, ComponentError> {
    match entry {
      HandlerEntry::Instance(handler) => Ok(handler),
      HandlerEntry::Descriptor(HandlerDescriptor { name, options }) => {
        let formatter = options.formatter.map(|entry| self.formatter(entry)).transpose()?;
        self.types.build_handler(
          &name,
          HandlerArgs {
            options: options.rest,
            formatter,
          },
        )
      }
      HandlerEntry::Name(name) => Err(ComponentError::Unresolved {
        kind: ComponentKind::Handler,
        name,
      }),
    }
  }

  fn processor(&self, entry: ProcessorEntry) -> Result<Arc<dyn Processor>, ComponentError> {
    match entry {
      ProcessorEntry::Instance(processor) => Ok(processor),
      ProcessorEntry::Descriptor(Descriptor { name, options }) => {
        self.types.build_processor(&name, options)
      }
      ProcessorEntry::Name(name) => Err(ComponentError::Unresolved {
        kind: ComponentKind::Processor,
        name,
      }),
    }
  }
}

impl LoggerBuilder for DescriptorLoggerBuilder {
  fn build(&self, config: LoggerConfig) -> Result<Logger, ComponentError> {
    debug!(
      logger = %config.name,
      handlers = config.handlers.len(),
      processors = config.processors.len(),
      "Building logger"
    );

    let mut logger = Logger::new(config.name);
    for entry in config.handlers {
      logger.push_handler(self.handler(entry)?);
    }
    for entry in config.processors {
      logger.push_processor(self.processor(entry)?);
    }
    Ok(logger)
  }
}
