use chrono::{DateTime, Utc};
use log::Level;
use std::collections::BTreeMap;
use std::fmt;

/// Represents a loggable value, part of a `LogRecord`'s fields.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
  String(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  Debug(String),
}

impl fmt::Display for LogValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogValue::String(s) | LogValue::Debug(s) => f.write_str(s),
      LogValue::Int(i) => write!(f, "{}", i),
      LogValue::Float(x) => write!(f, "{}", x),
      LogValue::Bool(b) => write!(f, "{}", b),
    }
  }
}

impl From<&str> for LogValue {
  fn from(value: &str) -> Self {
    LogValue::String(value.to_string())
  }
}

impl From<String> for LogValue {
  fn from(value: String) -> Self {
    LogValue::String(value)
  }
}

impl From<i64> for LogValue {
  fn from(value: i64) -> Self {
    LogValue::Int(value)
  }
}

impl From<i32> for LogValue {
  fn from(value: i32) -> Self {
    LogValue::Int(value.into())
  }
}

impl From<u32> for LogValue {
  fn from(value: u32) -> Self {
    LogValue::Int(value.into())
  }
}

impl From<f64> for LogValue {
  fn from(value: f64) -> Self {
    LogValue::Float(value)
  }
}

impl From<bool> for LogValue {
  fn from(value: bool) -> Self {
    LogValue::Bool(value)
  }
}

impl From<&serde_json::Value> for LogValue {
  fn from(value: &serde_json::Value) -> Self {
    match value {
      serde_json::Value::String(s) => LogValue::String(s.clone()),
      serde_json::Value::Bool(b) => LogValue::Bool(*b),
      serde_json::Value::Number(n) => match n.as_i64() {
        Some(i) => LogValue::Int(i),
        None => LogValue::Float(n.as_f64().unwrap_or(f64::NAN)),
      },
      other => LogValue::Debug(other.to_string()),
    }
  }
}

impl LogValue {
  /// Converts the value for JSON output.
  pub fn to_json(&self) -> serde_json::Value {
    use serde_json::Value;
    match self {
      LogValue::String(s) | LogValue::Debug(s) => Value::String(s.clone()),
      LogValue::Int(i) => Value::Number((*i).into()),
      LogValue::Float(f) => serde_json::Number::from_f64(*f)
        .map(Value::Number)
        .unwrap_or(Value::Null),
      LogValue::Bool(b) => Value::Bool(*b),
    }
  }
}

/// A single log entry as it travels through processors and handlers.
#[derive(Debug, Clone)]
pub struct LogRecord {
  /// When the record was created.
  pub timestamp: DateTime<Utc>,
  /// The severity level of the record.
  pub level: Level,
  /// Name of the logger that produced the record.
  pub channel: String,
  /// The target of the record (module path or a custom target string).
  pub target: String,
  /// The log message.
  pub message: String,
  /// Caller-supplied structured data.
  pub fields: BTreeMap<String, LogValue>,
  /// Data added by processors.
  pub extra: BTreeMap<String, LogValue>,
}

impl LogRecord {
  /// Creates a new `LogRecord` with empty fields, stamped with the current time.
  pub fn new<S1, S2, S3>(level: Level, channel: S1, target: S2, message: S3) -> Self
  where
    S1: Into<String>,
    S2: Into<String>,
    S3: Into<String>,
  {
    LogRecord {
      timestamp: Utc::now(),
      level,
      channel: channel.into(),
      target: target.into(),
      message: message.into(),
      fields: BTreeMap::new(),
      extra: BTreeMap::new(),
    }
  }

  /// Adds a field, replacing any previous value under the same key.
  pub fn with_field(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
    self.fields.insert(key.into(), value.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_values_convert_to_log_values() {
    assert_eq!(LogValue::from(&serde_json::json!("x")), LogValue::String("x".into()));
    assert_eq!(LogValue::from(&serde_json::json!(3)), LogValue::Int(3));
    assert_eq!(LogValue::from(&serde_json::json!(1.5)), LogValue::Float(1.5));
    assert_eq!(
      LogValue::from(&serde_json::json!([1, 2])),
      LogValue::Debug("[1,2]".into())
    );
  }

  #[test]
  fn with_field_overwrites() {
    let record = LogRecord::new(Level::Info, "app", "app::db", "connected")
      .with_field("attempt", 1)
      .with_field("attempt", 2);
    assert_eq!(record.fields.get("attempt"), Some(&LogValue::Int(2)));
  }
}
