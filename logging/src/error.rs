use std::fmt;
use thiserror::Error;

/// The kind of logger component a configuration entry must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
  Handler,
  Formatter,
  Processor,
}

impl fmt::Display for ComponentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ComponentKind::Handler => f.write_str("handler"),
      ComponentKind::Formatter => f.write_str("formatter"),
      ComponentKind::Processor => f.write_str("processor"),
    }
  }
}

/// Why a single handler, formatter or processor could not be produced.
#[derive(Debug, Error)]
pub enum ComponentError {
  #[error("{kind} '{name}' is neither a registered service nor a known component factory")]
  NotFound { kind: ComponentKind, name: String },

  #[error("'{name}' resolved to {}, but a {expected} is required", found_description(.found))]
  CapabilityMismatch {
    name: String,
    expected: ComponentKind,
    found: Option<ComponentKind>,
  },

  #[error("Factory '{name}' failed: {reason}")]
  FactoryFailed { name: String, reason: String },

  #[error("Unknown {kind} type '{name}'")]
  UnknownType { kind: ComponentKind, name: String },

  #[error("Invalid options for {kind} '{name}': {message}")]
  InvalidOptions {
    kind: ComponentKind,
    name: String,
    message: String,
  },

  #[error("{kind} '{name}' was not resolved before logger construction")]
  Unresolved { kind: ComponentKind, name: String },

  #[error("I/O failure while setting up {kind} '{name}': {source}")]
  Io {
    kind: ComponentKind,
    name: String,
    #[source]
    source: std::io::Error,
  },
}

fn found_description(found: &Option<ComponentKind>) -> String {
  match found {
    Some(kind) => format!("a {}", kind),
    None => "a service that is not a logger component".to_string(),
  }
}

/// Raised by formatters that cannot render a record.
#[derive(Debug, Error)]
#[error("Failed to format log record: {0}")]
pub struct FormatError(pub String);

/// The main error type for the `fibre_logger_factory` library.
#[derive(Debug, Error)]
pub enum Error {
  #[error("The first argument for {method} method must be of type {expected}")]
  InvalidInvocation {
    method: &'static str,
    expected: &'static str,
  },

  #[error("Logger component could not be resolved: {0}")]
  ComponentNotResolved(#[source] ComponentError),

  #[error("Failed to parse configuration for logger '{logger}': {message}")]
  ConfigParse { logger: String, message: String },

  #[error("Failed to build logger '{logger}': {source}")]
  Build {
    logger: String,
    #[source]
    source: ComponentError,
  },
}

impl Error {
  /// Wraps any resolution failure into the single error kind callers handle.
  pub fn component_not_resolved(cause: ComponentError) -> Self {
    Error::ComponentNotResolved(cause)
  }
}

/// A specialized `Result` type for `fibre_logger_factory` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
