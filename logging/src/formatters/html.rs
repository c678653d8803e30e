use super::util;
use crate::builder::options_from;
use crate::component::Formatter;
use crate::config::Options;
use crate::error::{ComponentError, ComponentKind, FormatError};
use crate::model::LogRecord;
use serde::Deserialize;
use std::fmt::Write;
use std::sync::Arc;

/// Renders a record as an HTML table, suitable for mail bodies.
#[derive(Debug, Default)]
pub struct HtmlFormatter;

impl HtmlFormatter {
  pub fn new() -> Self {
    HtmlFormatter
  }
}

fn escape(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      other => escaped.push(other),
    }
  }
  escaped
}

fn row(out: &mut String, header: &str, value: &str) -> std::fmt::Result {
  write!(
    out,
    "<tr><th style=\"text-align: left\">{}</th><td>{}</td></tr>",
    escape(header),
    escape(value)
  )
}

impl Formatter for HtmlFormatter {
  fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
    let mut out = String::with_capacity(512);
    let mut timestamp = String::new();
    util::write_timestamp(&mut timestamp, &record.timestamp);

    let rendered = (|| -> std::fmt::Result {
      write!(out, "<h1>{}</h1>", escape(&record.level.to_string()))?;
      out.push_str("<table cellspacing=\"1\" width=\"100%\">");
      row(&mut out, "Message", &record.message)?;
      row(&mut out, "Time", &timestamp)?;
      row(&mut out, "Channel", &record.channel)?;
      row(&mut out, "Target", &record.target)?;
      for (key, value) in record.fields.iter().chain(record.extra.iter()) {
        row(&mut out, key, &value.to_string())?;
      }
      out.push_str("</table>\n");
      Ok(())
    })();

    rendered.map_err(|e| FormatError(e.to_string()))?;
    Ok(out)
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HtmlFormatterOptions {}

pub(crate) fn html_formatter_from_options(
  name: &str,
  options: Options,
) -> Result<Arc<dyn Formatter>, ComponentError> {
  let _: HtmlFormatterOptions = options_from(ComponentKind::Formatter, name, options)?;
  Ok(Arc::new(HtmlFormatter::new()))
}
