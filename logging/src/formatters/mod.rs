// Built-in formatters turning `LogRecord`s into text.

mod html;
mod json;
mod pattern;
pub(crate) mod util;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use pattern::{PatternFormatter, DEFAULT_PATTERN};

pub(crate) use html::html_formatter_from_options;
pub(crate) use json::json_formatter_from_options;
pub(crate) use pattern::pattern_formatter_from_options;
