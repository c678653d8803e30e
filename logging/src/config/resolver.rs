//! Reads the configuration of one logger from the locator's configuration service.

use crate::config::raw::LoggerConfig;
use crate::error::{Error, Result};
use fibre_ioc::ServiceLocator;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Top-level configuration key holding all logger configurations.
pub const CONFIG_KEY: &str = "logger";

/// Names the configuration service may be registered under, in lookup order.
pub const CONFIG_SERVICE_ALIASES: [&str; 2] = ["config", "Config"];

// Keys a logger configuration mapping is read from; others are ignored.
const LOGGER_KEYS: [&str; 3] = ["name", "handlers", "processors"];

/// Produces the configuration of `logger_name`.
///
/// The configuration service is the first of [`CONFIG_SERVICE_ALIASES`] present in
/// the locator and must be a `serde_json::Value`. The mapping found at
/// `logger.<logger_name>` is shallow-merged over
/// `{ name: <logger_name>, handlers: [], processors: [] }`. A logger that is not
/// configured at all yields that default, not an error. Null values keep their
/// default and unknown keys are ignored with a warning.
pub fn resolve_logger_config(
  locator: &dyn ServiceLocator,
  logger_name: &str,
) -> Result<LoggerConfig> {
  let mut merged = Map::new();
  merged.insert("name".to_string(), Value::String(logger_name.to_string()));
  merged.insert("handlers".to_string(), Value::Array(Vec::new()));
  merged.insert("processors".to_string(), Value::Array(Vec::new()));

  if let Some(overrides) = configured_logger(locator, logger_name) {
    // Shallow: a configured key replaces the default wholesale. A key left empty
    // (`handlers:` with no items) is null and keeps its default.
    for (key, value) in overrides {
      if value.is_null() {
        continue;
      }
      if !LOGGER_KEYS.contains(&key.as_str()) {
        warn!(logger = logger_name, key = %key, "Ignoring unknown logger configuration key");
        continue;
      }
      merged.insert(key, value);
    }
  } else {
    debug!(logger = logger_name, "No configuration for logger, using defaults");
  }

  serde_json::from_value(Value::Object(merged)).map_err(|e| Error::ConfigParse {
    logger: logger_name.to_string(),
    message: e.to_string(),
  })
}

fn configured_logger(locator: &dyn ServiceLocator, logger_name: &str) -> Option<Map<String, Value>> {
  let alias = CONFIG_SERVICE_ALIASES
    .iter()
    .find(|alias| locator.has(alias))?;

  let config = match locator.get_as::<Value>(alias) {
    Some(config) => config,
    None => {
      warn!(
        service = *alias,
        "Configuration service is not a serde_json::Value, treating configuration as empty"
      );
      return None;
    }
  };

  match config.get(CONFIG_KEY).and_then(|loggers| loggers.get(logger_name)) {
    Some(Value::Object(logger)) => Some(logger.clone()),
    _ => None,
  }
}
