//! The logger produced by a `LoggerFactory`.

use crate::component::{Handler, Processor};
use crate::model::{LogRecord, LogValue};
use log::{Level, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// A named channel with an ordered handler stack and an ordered processor chain.
///
/// A record that no handler wants is dropped before any processor runs. Otherwise
/// processors transform it in order, then handlers receive it in order until one
/// of them stops bubbling.
pub struct Logger {
  name: String,
  handlers: Vec<Arc<dyn Handler>>,
  processors: Vec<Arc<dyn Processor>>,
}

impl fmt::Debug for Logger {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Logger")
      .field("name", &self.name)
      .field("handlers", &self.handlers.len())
      .field("processors", &self.processors.len())
      .finish()
  }
}

impl Logger {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      handlers: Vec::new(),
      processors: Vec::new(),
    }
  }

  pub fn push_handler(&mut self, handler: Arc<dyn Handler>) {
    self.handlers.push(handler);
  }

  pub fn push_processor(&mut self, processor: Arc<dyn Processor>) {
    self.processors.push(processor);
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn handlers(&self) -> &[Arc<dyn Handler>] {
    &self.handlers
  }

  pub fn processors(&self) -> &[Arc<dyn Processor>] {
    &self.processors
  }

  /// Logs a message with the logger name as target. Returns whether any handler
  /// accepted the record.
  pub fn log(&self, level: Level, message: impl Into<String>) -> bool {
    self.log_record(LogRecord::new(level, self.name.as_str(), self.name.as_str(), message))
  }

  /// Like [`Logger::log`], with structured fields.
  pub fn log_with<I, K, V>(&self, level: Level, message: impl Into<String>, fields: I) -> bool
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<LogValue>,
  {
    let mut record = LogRecord::new(level, self.name.as_str(), self.name.as_str(), message);
    for (key, value) in fields {
      record.fields.insert(key.into(), value.into());
    }
    self.log_record(record)
  }

  /// Runs a prepared record through processors and handlers.
  pub fn log_record(&self, record: LogRecord) -> bool {
    if !self.handlers.iter().any(|handler| handler.is_handling(&record)) {
      return false;
    }

    let record = self
      .processors
      .iter()
      .fold(record, |record, processor| processor.process(record));

    for handler in &self.handlers {
      if !handler.is_handling(&record) {
        continue;
      }
      if handler.handle(&record) {
        break;
      }
    }
    true
  }

  pub fn error(&self, message: impl Into<String>) -> bool {
    self.log(Level::Error, message)
  }

  pub fn warn(&self, message: impl Into<String>) -> bool {
    self.log(Level::Warn, message)
  }

  pub fn info(&self, message: impl Into<String>) -> bool {
    self.log(Level::Info, message)
  }

  pub fn debug(&self, message: impl Into<String>) -> bool {
    self.log(Level::Debug, message)
  }

  pub fn trace(&self, message: impl Into<String>) -> bool {
    self.log(Level::Trace, message)
  }

  pub fn flush(&self) {
    for handler in &self.handlers {
      handler.flush();
    }
  }
}

impl log::Log for Logger {
  fn enabled(&self, metadata: &Metadata<'_>) -> bool {
    let candidate = LogRecord::new(metadata.level(), "", metadata.target(), "");
    self.handlers.iter().any(|handler| handler.is_handling(&candidate))
  }

  fn log(&self, record: &Record<'_>) {
    let mut log_record = LogRecord::new(
      record.level(),
      self.name.as_str(),
      record.target(),
      record.args().to_string(),
    );

    if let Some(path) = record.module_path() {
      log_record.fields.insert("module_path".to_string(), LogValue::String(path.to_string()));
    }
    if let Some(file) = record.file() {
      log_record.fields.insert("file".to_string(), LogValue::String(file.to_string()));
    }
    if let Some(line) = record.line() {
      log_record.fields.insert("line".to_string(), LogValue::Int(line.into()));
    }

    self.log_record(log_record);
  }

  fn flush(&self) {
    Logger::flush(self);
  }
}
