use super::util;
use crate::builder::options_from;
use crate::component::Formatter;
use crate::config::Options;
use crate::error::{ComponentError, ComponentKind, FormatError};
use crate::model::{LogRecord, LogValue};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Renders each record as one JSON object followed by a newline.
#[derive(Debug, Default)]
pub struct JsonFormatter {
  /// If true, fields are added to the top-level object instead of being nested
  /// under a "fields" key.
  flatten_fields: bool,
}

impl JsonFormatter {
  pub fn new(flatten_fields: bool) -> Self {
    Self { flatten_fields }
  }
}

fn to_object(values: &BTreeMap<String, LogValue>) -> Value {
  Value::Object(
    values
      .iter()
      .map(|(key, value)| (key.clone(), value.to_json()))
      .collect(),
  )
}

impl Formatter for JsonFormatter {
  fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
    // BTreeMap keeps the top-level key order stable.
    let mut json_map = BTreeMap::new();

    let mut ts_buf = String::new();
    util::write_timestamp(&mut ts_buf, &record.timestamp);
    json_map.insert("timestamp".to_string(), Value::String(ts_buf));
    json_map.insert("level".to_string(), Value::String(record.level.to_string()));
    json_map.insert("channel".to_string(), Value::String(record.channel.clone()));
    json_map.insert("target".to_string(), Value::String(record.target.clone()));
    json_map.insert("message".to_string(), Value::String(record.message.clone()));

    if self.flatten_fields {
      for (key, value) in &record.fields {
        json_map.entry(key.clone()).or_insert_with(|| value.to_json());
      }
    } else if !record.fields.is_empty() {
      json_map.insert("fields".to_string(), to_object(&record.fields));
    }

    if !record.extra.is_empty() {
      json_map.insert("extra".to_string(), to_object(&record.extra));
    }

    let json_string = serde_json::to_string(&json_map)
      .map_err(|e| FormatError(format!("JSON serialization failed: {}", e)))?;

    Ok(format!("{}\n", json_string))
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonFormatterOptions {
  #[serde(default)]
  flatten_fields: bool,
}

pub(crate) fn json_formatter_from_options(
  name: &str,
  options: Options,
) -> Result<Arc<dyn Formatter>, ComponentError> {
  let options: JsonFormatterOptions = options_from(ComponentKind::Formatter, name, options)?;
  Ok(Arc::new(JsonFormatter::new(options.flatten_fields)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use log::Level;

  #[test]
  fn format_basic_json_record() {
    let formatter = JsonFormatter::default();
    let record = LogRecord::new(Level::Info, "app", "my_target", "Hello, JSON world!")
      .with_field("key1", "value1")
      .with_field("key2", 123);

    let formatted = formatter.format(&record).unwrap();
    let value: Value = serde_json::from_str(formatted.trim_end()).unwrap();

    assert_eq!(value["level"], "INFO");
    assert_eq!(value["channel"], "app");
    assert_eq!(value["target"], "my_target");
    assert_eq!(value["message"], "Hello, JSON world!");
    assert_eq!(value["fields"]["key1"], "value1");
    assert_eq!(value["fields"]["key2"], 123);
    assert!(value.get("extra").is_none());
    assert!(formatted.ends_with('\n'));
  }

  #[test]
  fn flattened_fields_do_not_override_core_keys() {
    let formatter = JsonFormatter::new(true);
    let record = LogRecord::new(Level::Warn, "app", "t", "original")
      .with_field("message", "shadow")
      .with_field("user", "ada");

    let value: Value = serde_json::from_str(formatter.format(&record).unwrap().trim_end()).unwrap();

    assert_eq!(value["message"], "original");
    assert_eq!(value["user"], "ada");
    assert!(value.get("fields").is_none());
  }
}
