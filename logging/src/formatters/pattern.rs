use super::util;
use crate::builder::options_from;
use crate::component::Formatter;
use crate::config::Options;
use crate::error::{ComponentError, ComponentKind, FormatError};
use crate::model::LogRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;

/// Pattern used when a pattern formatter is configured without one.
pub const DEFAULT_PATTERN: &str = "[%d] %c.%p: %m%n";

// A main capture group for specifiers, and an alternative for `%%`.
static PATTERN_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?P<specifier>%(?P<padding>-?\d+)?(?P<converter>[a-zA-Z]))|(?P<escaped>%%)")
    .expect("Pattern regex should be valid")
});

/// Represents a single piece of a parsed logging pattern.
#[derive(Debug)]
enum Segment {
  Literal(String),
  Specifier(PatternSpecifier),
}

/// The internal representation of a conversion specifier like `%-5p`.
#[derive(Debug)]
struct PatternSpecifier {
  converter: char,
  padding: Option<i32>,
}

/// Renders records through a log4j-style pattern.
///
/// | specifier | output |
/// |---|---|
/// | `%d` | timestamp (RFC 3339, milliseconds) |
/// | `%p` / `%l` | level |
/// | `%c` | channel (logger name) |
/// | `%t` | target |
/// | `%m` | message |
/// | `%X` | fields and extra, as `key=value` pairs |
/// | `%n` | newline |
/// | `%%` | a literal `%` |
///
/// A numeric padding (`%5p`, `%-5p`) pads the value to the right or left.
/// Every formatted record ends with a newline.
#[derive(Debug)]
pub struct PatternFormatter {
  segments: Vec<Segment>,
}

impl Default for PatternFormatter {
  fn default() -> Self {
    Self::new(DEFAULT_PATTERN)
  }
}

impl PatternFormatter {
  pub fn new(pattern_string: &str) -> Self {
    let segments = Self::parse(pattern_string);
    Self { segments }
  }

  fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in PATTERN_REGEX.captures_iter(pattern) {
      let Some(mat) = caps.get(0) else { continue };

      if mat.start() > last_end {
        segments.push(Segment::Literal(pattern[last_end..mat.start()].to_string()));
      }

      if let Some(converter) = caps
        .name("converter")
        .and_then(|m| m.as_str().chars().next())
      {
        let padding = caps.name("padding").and_then(|m| m.as_str().parse().ok());
        segments.push(Segment::Specifier(PatternSpecifier { converter, padding }));
      } else if caps.name("escaped").is_some() {
        segments.push(Segment::Literal("%".to_string()));
      }

      last_end = mat.end();
    }

    if last_end < pattern.len() {
      segments.push(Segment::Literal(pattern[last_end..].to_string()));
    }

    segments
  }

  fn render(spec: &PatternSpecifier, record: &LogRecord) -> String {
    let mut value = String::new();
    match spec.converter {
      'd' => util::write_timestamp(&mut value, &record.timestamp),
      'p' | 'l' => {
        let _ = write!(value, "{}", record.level);
      }
      'c' => value.push_str(&record.channel),
      't' => value.push_str(&record.target),
      'm' => value.push_str(&record.message),
      'X' => {
        let pairs: Vec<String> = record
          .fields
          .iter()
          .chain(record.extra.iter())
          .map(|(key, val)| format!("{}={}", key, val))
          .collect();
        value.push_str(&pairs.join(" "));
      }
      'n' => value.push('\n'),
      _ => {}
    }
    value
  }
}

impl Formatter for PatternFormatter {
  fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
    let mut output = String::with_capacity(256);

    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => output.push_str(text),
        Segment::Specifier(spec) => {
          let value = Self::render(spec, record);
          let written = match spec.padding {
            Some(width) if width < 0 => write!(output, "{:<w$}", value, w = width.unsigned_abs() as usize),
            Some(width) => write!(output, "{:>w$}", value, w = width as usize),
            None => write!(output, "{}", value),
          };
          written.map_err(|e| FormatError(e.to_string()))?;
        }
      }
    }

    if !output.ends_with('\n') {
      output.push('\n');
    }

    Ok(output)
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternFormatterOptions {
  #[serde(default)]
  pattern: Option<String>,
}

pub(crate) fn pattern_formatter_from_options(
  name: &str,
  options: Options,
) -> Result<Arc<dyn Formatter>, ComponentError> {
  let options: PatternFormatterOptions = options_from(ComponentKind::Formatter, name, options)?;
  let pattern = options.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
  Ok(Arc::new(PatternFormatter::new(pattern)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use log::Level;

  fn create_test_record() -> LogRecord {
    LogRecord::new(Level::Info, "app", "test_target", "This is a test message.")
  }

  #[test]
  fn format_with_default_pattern() {
    let formatter = PatternFormatter::default();
    let formatted = formatter.format(&create_test_record()).unwrap();
    assert!(formatted.ends_with("] app.INFO: This is a test message.\n"));
  }

  #[test]
  fn parse_handles_literals_and_specifiers() {
    let formatter = PatternFormatter::new("LITERAL %p AND %m");
    assert_eq!(formatter.segments.len(), 4);
    assert!(matches!(&formatter.segments[0], Segment::Literal(s) if s == "LITERAL "));
    assert!(matches!(&formatter.segments[1], Segment::Specifier(spec) if spec.converter == 'p'));
    assert!(matches!(&formatter.segments[2], Segment::Literal(s) if s == " AND "));
    assert!(matches!(&formatter.segments[3], Segment::Specifier(spec) if spec.converter == 'm'));
  }

  #[test]
  fn format_handles_escaped_percent() {
    let formatter = PatternFormatter::new("%%LITERAL %p");
    let formatted = formatter.format(&create_test_record()).unwrap();
    assert_eq!(formatted.trim(), "%LITERAL INFO");
  }

  #[test]
  fn format_applies_padding() {
    let formatter = PatternFormatter::new("[%-5p][%5p] %t");
    let formatted = formatter.format(&create_test_record()).unwrap();
    assert_eq!(formatted, "[INFO ][ INFO] test_target\n");
  }

  #[test]
  fn format_lists_fields() {
    let formatter = PatternFormatter::new("%m {%X}");
    let record = create_test_record().with_field("user", "ada").with_field("id", 7);
    assert_eq!(
      formatter.format(&record).unwrap(),
      "This is a test message. {id=7 user=ada}\n"
    );
  }
}
