use log::LevelFilter;
use std::str::FromStr;

/// Parses a level threshold, case-insensitively. Accepts TRACE, DEBUG, INFO, WARN,
/// ERROR and OFF.
pub fn parse_level_filter(level_str: &str) -> Result<LevelFilter, String> {
  LevelFilter::from_str(level_str.trim()).map_err(|_| {
    format!(
      "Invalid log level string '{}'. Expected TRACE, DEBUG, INFO, WARN, ERROR, or OFF.",
      level_str
    )
  })
}

/// Resolves an optional `level` option; absent means "everything".
pub(crate) fn level_or_all(level: Option<&str>) -> Result<LevelFilter, String> {
  match level {
    Some(level) => parse_level_filter(level),
    None => Ok(LevelFilter::Trace),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_level_filter_valid_levels() {
    assert_eq!(parse_level_filter("TRACE").unwrap(), LevelFilter::Trace);
    assert_eq!(parse_level_filter("debug").unwrap(), LevelFilter::Debug);
    assert_eq!(parse_level_filter("InFo").unwrap(), LevelFilter::Info);
    assert_eq!(parse_level_filter("warn").unwrap(), LevelFilter::Warn);
    assert_eq!(parse_level_filter("ERROR").unwrap(), LevelFilter::Error);
  }

  #[test]
  fn parse_level_filter_off_level() {
    assert_eq!(parse_level_filter("off").unwrap(), LevelFilter::Off);
    assert_eq!(parse_level_filter("OFF").unwrap(), LevelFilter::Off);
  }

  #[test]
  fn parse_level_filter_invalid_level() {
    let message = parse_level_filter("INVALID_LEVEL").unwrap_err();
    assert!(message.contains("Invalid log level string 'INVALID_LEVEL'"));
  }

  #[test]
  fn missing_level_means_everything() {
    assert_eq!(level_or_all(None).unwrap(), LevelFilter::Trace);
  }
}
