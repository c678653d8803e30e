use crate::builder::options_from;
use crate::component::Processor;
use crate::config::Options;
use crate::error::{ComponentError, ComponentKind};
use crate::model::LogRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;

static PLACEHOLDER_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("Placeholder regex should be valid"));

/// Replaces `{key}` placeholders in the message with the record's field values.
///
/// Placeholders without a matching field are left as they are.
#[derive(Debug, Default)]
pub struct PsrProcessor {
  remove_used_fields: bool,
}

impl PsrProcessor {
  pub fn new(remove_used_fields: bool) -> Self {
    Self { remove_used_fields }
  }
}

impl Processor for PsrProcessor {
  fn process(&self, mut record: LogRecord) -> LogRecord {
    if !record.message.contains('{') {
      return record;
    }

    let mut used = BTreeSet::new();
    let message = PLACEHOLDER_REGEX.replace_all(&record.message, |caps: &Captures<'_>| {
      let key = &caps[1];
      match record.fields.get(key) {
        Some(value) => {
          used.insert(key.to_string());
          value.to_string()
        }
        None => caps[0].to_string(),
      }
    });
    record.message = message.into_owned();

    if self.remove_used_fields {
      for key in &used {
        record.fields.remove(key);
      }
    }
    record
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PsrProcessorOptions {
  #[serde(default)]
  remove_used_fields: bool,
}

pub(crate) fn psr_processor_from_options(
  name: &str,
  options: Options,
) -> Result<Arc<dyn Processor>, ComponentError> {
  let options: PsrProcessorOptions = options_from(ComponentKind::Processor, name, options)?;
  Ok(Arc::new(PsrProcessor::new(options.remove_used_fields)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::LogValue;
  use log::Level;

  fn record() -> LogRecord {
    LogRecord::new(Level::Info, "app", "t", "User {user} logged in from {ip} ({missing})")
      .with_field("user", "ada")
      .with_field("ip", "10.0.0.1")
      .with_field("attempt", 2)
  }

  #[test]
  fn interpolates_known_placeholders() {
    let processed = PsrProcessor::default().process(record());
    assert_eq!(processed.message, "User ada logged in from 10.0.0.1 ({missing})");
    assert_eq!(processed.fields.len(), 3);
  }

  #[test]
  fn can_drop_interpolated_fields() {
    let processed = PsrProcessor::new(true).process(record());
    assert_eq!(processed.fields.len(), 1);
    assert_eq!(processed.fields.get("attempt"), Some(&LogValue::Int(2)));
  }
}
