//! The three component capabilities a logger is wired from, and the resolved
//! `Component` value the resolution procedure hands around.

use crate::error::{ComponentError, ComponentKind, FormatError};
use crate::model::LogRecord;
use fibre_ioc::Service;
use std::fmt;
use std::sync::Arc;

/// Receives records from a logger and delivers them somewhere.
pub trait Handler: Send + Sync {
  /// Whether this handler wants records of the given record's level.
  fn is_handling(&self, record: &LogRecord) -> bool;

  /// Handles the record. Returns `true` if the record must not bubble up to the
  /// handlers after this one.
  fn handle(&self, record: &LogRecord) -> bool;

  /// The formatter the handler renders records with, if it uses one.
  fn formatter(&self) -> Option<Arc<dyn Formatter>> {
    None
  }

  fn flush(&self) {}
}

/// Renders a record into text.
pub trait Formatter: Send + Sync {
  fn format(&self, record: &LogRecord) -> Result<String, FormatError>;
}

/// Transforms a record before it reaches the handlers.
pub trait Processor: Send + Sync {
  fn process(&self, record: LogRecord) -> LogRecord;
}

impl<F> Processor for F
where
  F: Fn(LogRecord) -> LogRecord + Send + Sync,
{
  fn process(&self, record: LogRecord) -> LogRecord {
    self(record)
  }
}

/// A resolved logger component together with its capability.
#[derive(Clone)]
pub enum Component {
  Handler(Arc<dyn Handler>),
  Formatter(Arc<dyn Formatter>),
  Processor(Arc<dyn Processor>),
}

impl fmt::Debug for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Component::{:?}", self.kind())
  }
}

impl Component {
  pub fn kind(&self) -> ComponentKind {
    match self {
      Component::Handler(_) => ComponentKind::Handler,
      Component::Formatter(_) => ComponentKind::Formatter,
      Component::Processor(_) => ComponentKind::Processor,
    }
  }

  /// Classifies a locator service. Returns `None` for services that hold no
  /// `Arc<dyn Handler>`, `Arc<dyn Formatter>` or `Arc<dyn Processor>`.
  pub fn from_service(service: &Service) -> Option<Self> {
    if let Some(handler) = service.downcast_ref::<Arc<dyn Handler>>() {
      return Some(Component::Handler(handler.clone()));
    }
    if let Some(formatter) = service.downcast_ref::<Arc<dyn Formatter>>() {
      return Some(Component::Formatter(formatter.clone()));
    }
    service
      .downcast_ref::<Arc<dyn Processor>>()
      .map(|processor| Component::Processor(processor.clone()))
  }

  pub fn into_handler(self, name: &str) -> Result<Arc<dyn Handler>, ComponentError> {
    match self {
      Component::Handler(handler) => Ok(handler),
      other => Err(mismatch(name, ComponentKind::Handler, Some(other.kind()))),
    }
  }

  pub fn into_formatter(self, name: &str) -> Result<Arc<dyn Formatter>, ComponentError> {
    match self {
      Component::Formatter(formatter) => Ok(formatter),
      other => Err(mismatch(name, ComponentKind::Formatter, Some(other.kind()))),
    }
  }

  pub fn into_processor(self, name: &str) -> Result<Arc<dyn Processor>, ComponentError> {
    match self {
      Component::Processor(processor) => Ok(processor),
      other => Err(mismatch(name, ComponentKind::Processor, Some(other.kind()))),
    }
  }
}

pub(crate) fn mismatch(
  name: &str,
  expected: ComponentKind,
  found: Option<ComponentKind>,
) -> ComponentError {
  ComponentError::CapabilityMismatch {
    name: name.to_string(),
    expected,
    found,
  }
}
