//! Replaces named handler, formatter and processor entries with resolved instances.

use crate::component::{mismatch, Component, Formatter, Handler, Processor};
use crate::config::raw::{FormatterEntry, HandlerEntry, LoggerConfig, ProcessorEntry};
use crate::error::{ComponentError, ComponentKind};
use crate::registry::FactoryRegistry;
use fibre_ioc::ServiceLocator;
use std::sync::Arc;
use tracing::trace;

/// Resolves component names against a locator first and a factory registry second.
pub struct ComponentAssembler<'a> {
  locator: &'a dyn ServiceLocator,
  factories: &'a FactoryRegistry,
}

impl<'a> ComponentAssembler<'a> {
  pub fn new(locator: &'a dyn ServiceLocator, factories: &'a FactoryRegistry) -> Self {
    Self { locator, factories }
  }

  /// Resolves every named handler, nested handler formatter and named processor.
  ///
  /// Lists keep their length and order. Descriptor and instance entries pass
  /// through for the logger builder, except for a named `options.formatter`.
  pub fn assemble(&self, config: LoggerConfig) -> Result<LoggerConfig, ComponentError> {
    let LoggerConfig {
      name,
      handlers,
      processors,
    } = config;

    let handlers = handlers
      .into_iter()
      .map(|entry| self.prepare_handler(entry))
      .collect::<Result<Vec<_>, _>>()?;
    let processors = processors
      .into_iter()
      .map(|entry| self.prepare_processor(entry))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(LoggerConfig {
      name,
      handlers,
      processors,
    })
  }

  fn prepare_handler(&self, entry: HandlerEntry) -> Result<HandlerEntry, ComponentError> {
    match entry {
      HandlerEntry::Name(name) => Ok(HandlerEntry::Instance(self.resolve_handler(&name)?)),
      HandlerEntry::Descriptor(mut descriptor) => {
        if let Some(FormatterEntry::Name(formatter)) = &descriptor.options.formatter {
          let resolved = self.resolve_formatter(formatter)?;
          descriptor.options.formatter = Some(FormatterEntry::Instance(resolved));
        }
        Ok(HandlerEntry::Descriptor(descriptor))
      }
      instance @ HandlerEntry::Instance(_) => Ok(instance),
    }
  }

  fn prepare_processor(&self, entry: ProcessorEntry) -> Result<ProcessorEntry, ComponentError> {
    match entry {
      ProcessorEntry::Name(name) => Ok(ProcessorEntry::Instance(self.resolve_processor(&name)?)),
      other => Ok(other),
    }
  }

  pub fn resolve_handler(&self, name: &str) -> Result<Arc<dyn Handler>, ComponentError> {
    self.resolve_required(name, ComponentKind::Handler)?.into_handler(name)
  }

  pub fn resolve_formatter(&self, name: &str) -> Result<Arc<dyn Formatter>, ComponentError> {
    self.resolve_required(name, ComponentKind::Formatter)?.into_formatter(name)
  }

  pub fn resolve_processor(&self, name: &str) -> Result<Arc<dyn Processor>, ComponentError> {
    self.resolve_required(name, ComponentKind::Processor)?.into_processor(name)
  }

  fn resolve_required(&self, name: &str, kind: ComponentKind) -> Result<Component, ComponentError> {
    self
      .resolve_named(name, kind)?
      .ok_or_else(|| ComponentError::NotFound {
        kind,
        name: name.to_string(),
      })
  }

  /// Looks `name` up in the locator, then in the factory registry.
  ///
  /// Returns `Ok(None)` when neither knows the name. A locator service that is not
  /// a logger component is reported against `expected`.
  pub fn resolve_named(
    &self,
    name: &str,
    expected: ComponentKind,
  ) -> Result<Option<Component>, ComponentError> {
    if self.locator.has(name) {
      trace!(component = name, "Resolving component from the locator");
      let service = self.locator.service(name).ok_or_else(|| ComponentError::NotFound {
        kind: expected,
        name: name.to_string(),
      })?;
      return Component::from_service(&service)
        .map(Some)
        .ok_or_else(|| mismatch(name, expected, None));
    }

    if let Some(factory) = self.factories.instantiate(name) {
      trace!(component = name, "Resolving component through its factory");
      return factory.make(self.locator).map(Some);
    }

    Ok(None)
  }
}
