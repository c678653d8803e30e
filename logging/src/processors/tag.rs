use crate::builder::options_from;
use crate::component::Processor;
use crate::config::Options;
use crate::error::{ComponentError, ComponentKind};
use crate::model::{LogRecord, LogValue};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Adds a fixed set of tags to the `extra` map of every record.
#[derive(Debug, Default)]
pub struct TagProcessor {
  tags: BTreeMap<String, LogValue>,
}

impl TagProcessor {
  pub fn new(tags: BTreeMap<String, LogValue>) -> Self {
    Self { tags }
  }

  pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
    self.tags.insert(key.into(), value.into());
    self
  }
}

impl Processor for TagProcessor {
  fn process(&self, mut record: LogRecord) -> LogRecord {
    for (key, value) in &self.tags {
      record.extra.insert(key.clone(), value.clone());
    }
    record
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagProcessorOptions {
  #[serde(default)]
  tags: Options,
}

pub(crate) fn tag_processor_from_options(
  name: &str,
  options: Options,
) -> Result<Arc<dyn Processor>, ComponentError> {
  let options: TagProcessorOptions = options_from(ComponentKind::Processor, name, options)?;
  let tags = options
    .tags
    .iter()
    .map(|(key, value)| (key.clone(), LogValue::from(value)))
    .collect();
  Ok(Arc::new(TagProcessor::new(tags)))
}
