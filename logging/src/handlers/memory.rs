use super::default_bubble;
use crate::builder::{handler_level, options_from, HandlerArgs};
use crate::component::{Formatter, Handler};
use crate::error::{ComponentError, ComponentKind};
use crate::formatters::PatternFormatter;
use crate::model::LogRecord;
use log::LevelFilter;
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemoryHandlerOptions {
  #[serde(default)]
  level: Option<String>,
  #[serde(default = "default_bubble")]
  bubble: bool,
}

/// Keeps every handled record, and its formatted form, in memory.
pub struct MemoryHandler {
  level: LevelFilter,
  bubble: bool,
  formatter: Arc<dyn Formatter>,
  records: Mutex<Vec<LogRecord>>,
  lines: Mutex<Vec<String>>,
}

impl MemoryHandler {
  pub fn new(level: LevelFilter) -> Self {
    Self::with_formatter(level, Arc::new(PatternFormatter::default()))
  }

  pub fn with_formatter(level: LevelFilter, formatter: Arc<dyn Formatter>) -> Self {
    Self {
      level,
      bubble: true,
      formatter,
      records: Mutex::new(Vec::new()),
      lines: Mutex::new(Vec::new()),
    }
  }

  pub fn with_bubble(mut self, bubble: bool) -> Self {
    self.bubble = bubble;
    self
  }

  pub fn records(&self) -> Vec<LogRecord> {
    self.records.lock().clone()
  }

  pub fn lines(&self) -> Vec<String> {
    self.lines.lock().clone()
  }

  pub fn clear(&self) {
    self.records.lock().clear();
    self.lines.lock().clear();
  }
}

impl Handler for MemoryHandler {
  fn is_handling(&self, record: &LogRecord) -> bool {
    record.level <= self.level
  }

  fn handle(&self, record: &LogRecord) -> bool {
    if !self.is_handling(record) {
      return false;
    }

    match self.formatter.format(record) {
      Ok(line) => self.lines.lock().push(line),
      Err(e) => error!(channel = %record.channel, error = %e, "Failed to format log record"),
    }
    self.records.lock().push(record.clone());

    !self.bubble
  }

  fn formatter(&self) -> Option<Arc<dyn Formatter>> {
    Some(self.formatter.clone())
  }
}

pub(crate) fn memory_handler_from_args(
  name: &str,
  args: HandlerArgs,
) -> Result<Arc<dyn Handler>, ComponentError> {
  let options: MemoryHandlerOptions = options_from(ComponentKind::Handler, name, args.options)?;
  let level = handler_level(name, options.level.as_deref())?;
  let handler = match args.formatter {
    Some(formatter) => MemoryHandler::with_formatter(level, formatter),
    None => MemoryHandler::new(level),
  };
  Ok(Arc::new(handler.with_bubble(options.bubble)))
}
