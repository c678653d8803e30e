use super::default_bubble;
use crate::builder::{handler_level, options_from, HandlerArgs};
use crate::component::{Formatter, Handler};
use crate::error::{ComponentError, ComponentKind};
use crate::formatters::PatternFormatter;
use crate::model::LogRecord;
use log::LevelFilter;
use parking_lot::Mutex;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

/// Which standard stream a `StreamHandler` writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
  #[default]
  Stdout,
  Stderr,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StreamHandlerOptions {
  #[serde(default)]
  level: Option<String>,
  #[serde(default = "default_bubble")]
  bubble: bool,
  #[serde(default)]
  stream: StreamTarget,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileHandlerOptions {
  path: PathBuf,
  #[serde(default)]
  level: Option<String>,
  #[serde(default = "default_bubble")]
  bubble: bool,
}

/// Formats records and writes them to any `Write` destination.
pub struct StreamHandler {
  level: LevelFilter,
  bubble: bool,
  formatter: Arc<dyn Formatter>,
  writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamHandler {
  pub fn new(
    writer: Box<dyn Write + Send>,
    level: LevelFilter,
    formatter: Arc<dyn Formatter>,
  ) -> Self {
    Self {
      level,
      bubble: true,
      formatter,
      writer: Mutex::new(writer),
    }
  }

  pub fn for_target(target: StreamTarget, level: LevelFilter, formatter: Arc<dyn Formatter>) -> Self {
    let writer: Box<dyn Write + Send> = match target {
      StreamTarget::Stdout => Box::new(io::stdout()),
      StreamTarget::Stderr => Box::new(io::stderr()),
    };
    Self::new(writer, level, formatter)
  }

  /// Opens `path` for appending, creating missing parent directories.
  pub fn file(path: &Path, level: LevelFilter, formatter: Arc<dyn Formatter>) -> io::Result<Self> {
    if let Some(parent_dir) = path.parent() {
      if !parent_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(parent_dir)?;
      }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Self::new(Box::new(file), level, formatter))
  }

  /// Whether records handled here continue to the next handler.
  pub fn with_bubble(mut self, bubble: bool) -> Self {
    self.bubble = bubble;
    self
  }
}

impl Handler for StreamHandler {
  fn is_handling(&self, record: &LogRecord) -> bool {
    record.level <= self.level
  }

  fn handle(&self, record: &LogRecord) -> bool {
    if !self.is_handling(record) {
      return false;
    }

    match self.formatter.format(record) {
      Ok(line) => {
        let mut writer = self.writer.lock();
        if let Err(e) = writer.write_all(line.as_bytes()) {
          error!(channel = %record.channel, error = %e, "Failed to write log record");
        }
      }
      Err(e) => error!(channel = %record.channel, error = %e, "Failed to format log record"),
    }

    !self.bubble
  }

  fn formatter(&self) -> Option<Arc<dyn Formatter>> {
    Some(self.formatter.clone())
  }

  fn flush(&self) {
    if let Err(e) = self.writer.lock().flush() {
      error!(error = %e, "Failed to flush log stream");
    }
  }
}

fn formatter_or_default(formatter: Option<Arc<dyn Formatter>>) -> Arc<dyn Formatter> {
  formatter.unwrap_or_else(|| Arc::new(PatternFormatter::default()))
}

pub(crate) fn stream_handler_from_args(
  name: &str,
  args: HandlerArgs,
) -> Result<Arc<dyn Handler>, ComponentError> {
  let options: StreamHandlerOptions = options_from(ComponentKind::Handler, name, args.options)?;
  let level = handler_level(name, options.level.as_deref())?;
  let handler = StreamHandler::for_target(options.stream, level, formatter_or_default(args.formatter))
    .with_bubble(options.bubble);
  Ok(Arc::new(handler))
}

pub(crate) fn file_handler_from_args(
  name: &str,
  args: HandlerArgs,
) -> Result<Arc<dyn Handler>, ComponentError> {
  let options: FileHandlerOptions = options_from(ComponentKind::Handler, name, args.options)?;
  if options.path.as_os_str().is_empty() {
    return Err(ComponentError::InvalidOptions {
      kind: ComponentKind::Handler,
      name: name.to_string(),
      message: "File handler path cannot be empty.".to_string(),
    });
  }
  let level = handler_level(name, options.level.as_deref())?;
  let handler = StreamHandler::file(&options.path, level, formatter_or_default(args.formatter))
    .map_err(|source| ComponentError::Io {
      kind: ComponentKind::Handler,
      name: name.to_string(),
      source,
    })?
    .with_bubble(options.bubble);
  Ok(Arc::new(handler))
}

#[cfg(test)]
mod tests {
  use super::*;
  use log::Level;
  use serde_json::json;

  #[derive(Clone, Default)]
  struct SharedBuf(Arc<Mutex<Vec<u8>>>);

  impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  fn message_only() -> Arc<dyn Formatter> {
    Arc::new(PatternFormatter::new("%p %m%n"))
  }

  #[test]
  fn writes_formatted_records_at_or_above_level() {
    let buf = SharedBuf::default();
    let handler = StreamHandler::new(Box::new(buf.clone()), LevelFilter::Info, message_only());

    assert!(!handler.handle(&LogRecord::new(Level::Debug, "app", "t", "hidden")));
    assert!(!handler.handle(&LogRecord::new(Level::Warn, "app", "t", "shown")));

    assert_eq!(String::from_utf8(buf.0.lock().clone()).unwrap(), "WARN shown\n");
  }

  #[test]
  fn non_bubbling_handler_stops_the_chain() {
    let handler = StreamHandler::new(Box::new(io::sink()), LevelFilter::Trace, message_only())
      .with_bubble(false);
    assert!(handler.handle(&LogRecord::new(Level::Info, "app", "t", "x")));
  }

  #[test]
  fn file_handler_creates_directories_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("app.log");

    for message in ["first", "second"] {
      let handler = file_handler_from_args(
        "FileHandler",
        HandlerArgs {
          options: json!({ "path": path, "level": "info" }).as_object().unwrap().clone(),
          formatter: Some(message_only()),
        },
      )
      .unwrap();
      handler.handle(&LogRecord::new(Level::Info, "app", "t", message));
      handler.flush();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "INFO first\nINFO second\n");
  }

  #[test]
  fn rejects_unknown_stream_options() {
    let err = stream_handler_from_args(
      "StreamHandler",
      HandlerArgs {
        options: json!({ "colour": true }).as_object().unwrap().clone(),
        formatter: None,
      },
    )
    .err()
    .unwrap();
    assert!(matches!(err, ComponentError::InvalidOptions { .. }));
  }
}
