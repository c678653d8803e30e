#![allow(dead_code)]

use fibre_ioc::{Container, ServiceLocator};
use fibre_logger_factory::config::level::parse_level_filter;
use fibre_logger_factory::formatters::HtmlFormatter;
use fibre_logger_factory::handlers::NullHandler;
use fibre_logger_factory::{
  component_types, factories, Component, ComponentError, ComponentFactory, ComponentKind,
  ComponentRegistration, Formatter, Handler, HandlerArgs, LogRecord, LogValue, Processor,
};
use dashmap::DashMap;
use log::LevelFilter;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::Deserialize;
use std::sync::Arc;

pub const CONFIG_YAML: &str = r#"
logger:
  logger1:
    name: logger1
    handlers:
      - name: MailHandler
        options:
          to: test@example.com
          subject: Test
          from: noreply@example.com
          level: error
          formatter:
            name: HtmlFormatter
    processors:
      - name: PsrProcessor
  logger2:
    name: logger2
    handlers:
      - DefaultLoggerHandler
      - name: MailHandler
        options:
          to: test@example.com
          subject: Test
          from: noreply@example.com
          level: error
          formatter: HtmlLoggerFormatter
    processors:
      - ProcessorFactoryAsset
  invalid_handler_logger:
    name: invalid_handler_logger
    handlers:
      - NonExistingHandler
  invalid_formatter_logger:
    name: invalid_handler_logger
    handlers:
      - name: NullHandler
        options:
          formatter: NonExistingFormatter
  invalid_processor_logger:
    name: invalid_processor_logger
    handlers:
      - name: NullHandler
    processors:
      - NonExistingProcessor
"#;

pub fn yaml_config(yaml: &str) -> serde_json::Value {
  serde_yaml::from_str(yaml).expect("fixture YAML should parse")
}

static MAILBOXES: Lazy<DashMap<String, Arc<Mutex<Vec<String>>>>> = Lazy::new(DashMap::new);

/// Everything delivered to `address` by any `MailHandler`, in delivery order.
pub fn mailbox(address: &str) -> Arc<Mutex<Vec<String>>> {
  MAILBOXES
    .entry(address.to_string())
    .or_insert_with(|| Arc::new(Mutex::new(Vec::new())))
    .clone()
}

/// A mail handler stand-in: delivers rendered bodies to the recipient's mailbox.
pub struct MailHandler {
  pub to: String,
  pub subject: String,
  pub from: String,
  level: LevelFilter,
  formatter: Arc<dyn Formatter>,
  outbox: Arc<Mutex<Vec<String>>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MailHandlerOptions {
  to: String,
  subject: String,
  from: String,
  #[serde(default)]
  level: Option<String>,
}

impl Handler for MailHandler {
  fn is_handling(&self, record: &LogRecord) -> bool {
    record.level <= self.level
  }

  fn handle(&self, record: &LogRecord) -> bool {
    if let Ok(body) = self.formatter.format(record) {
      self.outbox.lock().push(body);
    }
    false
  }

  fn formatter(&self) -> Option<Arc<dyn Formatter>> {
    Some(self.formatter.clone())
  }
}

fn mail_handler(name: &str, args: HandlerArgs) -> Result<Arc<dyn Handler>, ComponentError> {
  let invalid = |message: String| ComponentError::InvalidOptions {
    kind: ComponentKind::Handler,
    name: name.to_string(),
    message,
  };
  let options: MailHandlerOptions =
    serde_json::from_value(serde_json::Value::Object(args.options)).map_err(|e| invalid(e.to_string()))?;
  let level = match options.level.as_deref() {
    Some(level) => parse_level_filter(level).map_err(invalid)?,
    None => LevelFilter::Trace,
  };

  let outbox = mailbox(&options.to);
  Ok(Arc::new(MailHandler {
    to: options.to,
    subject: options.subject,
    from: options.from,
    level,
    formatter: args.formatter.unwrap_or_else(|| Arc::new(HtmlFormatter::new())),
    outbox,
  }))
}

/// Hands out the processor registered as `MemoryUsageLoggerProcessor`.
#[derive(Default)]
pub struct ProcessorFactoryAsset;

impl ComponentFactory for ProcessorFactoryAsset {
  fn make(&self, locator: &dyn ServiceLocator) -> Result<Component, ComponentError> {
    locator
      .get_as::<dyn Processor>("MemoryUsageLoggerProcessor")
      .map(Component::Processor)
      .ok_or_else(|| ComponentError::FactoryFailed {
        name: "ProcessorFactoryAsset".to_string(),
        reason: "MemoryUsageLoggerProcessor is not registered".to_string(),
      })
  }
}

/// Registers the fixture component types and factories in the process-wide
/// registries. Safe to call repeatedly.
pub fn register_fixture_types() {
  component_types().register_handler("MailHandler", mail_handler);
  factories().register::<ProcessorFactoryAsset>("ProcessorFactoryAsset");
}

pub struct Fixture {
  pub container: Container,
  pub default_handler: Arc<dyn Handler>,
  pub html_formatter: Arc<dyn Formatter>,
  pub memory_processor: Arc<dyn Processor>,
}

impl Fixture {
  pub fn new() -> Self {
    register_fixture_types();

    let default_handler: Arc<dyn Handler> = Arc::new(NullHandler::new(LevelFilter::Trace));
    let html_formatter: Arc<dyn Formatter> = Arc::new(HtmlFormatter::new());
    let memory_processor: Arc<dyn Processor> = Arc::new(|mut record: LogRecord| {
      record.extra.insert("memory_usage".to_string(), LogValue::from("2 MB"));
      record
    });

    let container = Container::new();
    container.add_instance_with_name("Config", yaml_config(CONFIG_YAML));
    container.add_handler("DefaultLoggerHandler", default_handler.clone());
    container.add_formatter("HtmlLoggerFormatter", html_formatter.clone());
    container.add_processor("MemoryUsageLoggerProcessor", memory_processor.clone());

    Self {
      container,
      default_handler,
      html_formatter,
      memory_processor,
    }
  }
}
