use crate::builder::{handler_level, options_from, HandlerArgs};
use crate::component::Handler;
use crate::error::{ComponentError, ComponentKind};
use crate::model::LogRecord;
use log::LevelFilter;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NullHandlerOptions {
  #[serde(default)]
  level: Option<String>,
}

/// Swallows every record at or above its level and stops the chain there.
#[derive(Debug)]
pub struct NullHandler {
  level: LevelFilter,
}

impl NullHandler {
  pub fn new(level: LevelFilter) -> Self {
    Self { level }
  }
}

impl Handler for NullHandler {
  fn is_handling(&self, record: &LogRecord) -> bool {
    record.level <= self.level
  }

  fn handle(&self, record: &LogRecord) -> bool {
    self.is_handling(record)
  }
}

pub(crate) fn null_handler_from_args(
  name: &str,
  args: HandlerArgs,
) -> Result<Arc<dyn Handler>, ComponentError> {
  let options: NullHandlerOptions = options_from(ComponentKind::Handler, name, args.options)?;
  let level = handler_level(name, options.level.as_deref())?;
  Ok(Arc::new(NullHandler::new(level)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use log::Level;

  #[test]
  fn swallows_only_records_at_its_level() {
    let handler = NullHandler::new(LevelFilter::Warn);
    let info = LogRecord::new(Level::Info, "app", "t", "chatty");
    let error = LogRecord::new(Level::Error, "app", "t", "boom");

    assert!(!handler.is_handling(&info));
    assert!(!handler.handle(&info));
    assert!(handler.handle(&error));
  }
}
