// Utility functions for formatters.

use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Formats a timestamp into a string buffer as RFC 3339 with milliseconds,
/// e.g. `2023-10-26T14:30:05.123Z`.
pub fn write_timestamp(buf: &mut String, timestamp: &DateTime<Utc>) {
  let _ = write!(
    buf,
    "{}",
    timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
  );
}
