//! The invocation surface: produce a configured `Logger` from a service locator.

use crate::assembler::ComponentAssembler;
use crate::builder::{DescriptorLoggerBuilder, LoggerBuilder, TypeRegistry};
use crate::config::resolve_logger_config;
use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::registry::{factories, FactoryRegistry};
use fibre_ioc::{Container, ServiceLocator};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Logger name used by `LoggerFactory::default()`.
pub const DEFAULT_LOGGER_NAME: &str = "default";

type BuilderSource = Box<dyn Fn() -> Arc<dyn LoggerBuilder> + Send + Sync>;

/// Creates the logger named at construction time.
///
/// Each invocation reads `logger.<name>` from the locator's configuration service,
/// resolves the named components it references, and hands the result to a
/// [`LoggerBuilder`]. The builder is created on first use and then reused.
pub struct LoggerFactory {
  name: String,
  factories: Arc<FactoryRegistry>,
  builder_source: BuilderSource,
  builder: OnceCell<Arc<dyn LoggerBuilder>>,
}

impl fmt::Debug for LoggerFactory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoggerFactory")
      .field("name", &self.name)
      .field("builder_ready", &self.builder.get().is_some())
      .finish()
  }
}

impl Default for LoggerFactory {
  fn default() -> Self {
    Self::new(DEFAULT_LOGGER_NAME)
  }
}

impl LoggerFactory {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      factories: factories(),
      builder_source: Box::new(|| -> Arc<dyn LoggerBuilder> {
        Arc::new(DescriptorLoggerBuilder::default())
      }),
      builder: OnceCell::new(),
    }
  }

  /// Uses `factories` instead of the process-wide factory registry.
  pub fn with_factories(mut self, factories: Arc<FactoryRegistry>) -> Self {
    self.factories = factories;
    self
  }

  /// Builds descriptor entries with `types` instead of the process-wide registry.
  pub fn with_types(self, types: Arc<TypeRegistry>) -> Self {
    self.with_builder_fn(move || Arc::new(DescriptorLoggerBuilder::new(types.clone())))
  }

  /// Uses a ready-made builder.
  pub fn with_builder(self, builder: Arc<dyn LoggerBuilder>) -> Self {
    self.with_builder_fn(move || builder.clone())
  }

  /// Creates the builder with `source` on first use.
  pub fn with_builder_fn<F>(mut self, source: F) -> Self
  where
    F: Fn() -> Arc<dyn LoggerBuilder> + Send + Sync + 'static,
  {
    self.builder_source = Box::new(source);
    self.builder = OnceCell::new();
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Produces the logger from the configuration and components in `locator`.
  pub fn invoke(&self, locator: &dyn ServiceLocator) -> Result<Logger> {
    debug!(logger = %self.name, "Creating logger");

    let config = resolve_logger_config(locator, &self.name)?;
    let config = ComponentAssembler::new(locator, &self.factories)
      .assemble(config)
      .map_err(Error::component_not_resolved)?;

    let logger_name = config.name.clone();
    self
      .builder()
      .build(config)
      .map_err(|source| Error::Build {
        logger: logger_name,
        source,
      })
  }

  /// Dynamic form: `name` selects the logger, `arguments[0]` must be the locator,
  /// a `fibre_ioc::Container`, an `Arc<Container>` or an `Arc<dyn ServiceLocator>`.
  pub fn call(name: &str, arguments: &[&dyn Any]) -> Result<Logger> {
    let invalid = || Error::InvalidInvocation {
      method: "LoggerFactory::call",
      expected: "fibre_ioc::ServiceLocator",
    };

    let first = *arguments.first().ok_or_else(invalid)?;
    let factory = LoggerFactory::new(name);

    if let Some(container) = first.downcast_ref::<Container>() {
      return factory.invoke(container);
    }
    if let Some(container) = first.downcast_ref::<Arc<Container>>() {
      return factory.invoke(container.as_ref());
    }
    if let Some(locator) = first.downcast_ref::<Arc<dyn ServiceLocator>>() {
      return factory.invoke(locator.as_ref());
    }
    Err(invalid())
  }

  fn builder(&self) -> &Arc<dyn LoggerBuilder> {
    self.builder.get_or_init(|| (self.builder_source)())
  }
}
