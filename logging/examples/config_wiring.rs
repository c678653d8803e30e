// Wires a logger from YAML configuration, a container-registered handler and a
// component factory, then routes `log` macros through it.

use fibre_ioc::{Container, ServiceLocator};
use fibre_logger_factory::formatters::PatternFormatter;
use fibre_logger_factory::handlers::{StreamHandler, StreamTarget};
use fibre_logger_factory::processors::TagProcessor;
use fibre_logger_factory::{
  factories, Component, ComponentError, ComponentRegistration, LoggerFactory,
};
use log::LevelFilter;
use std::sync::Arc;

const CONFIG: &str = r#"
logger:
  app:
    handlers:
      - Console
      - name: FileHandler
        options:
          path: target/demo-logs/app.log
          level: warn
          formatter:
            name: JsonFormatter
    processors:
      - name: PsrProcessor
        options:
          remove_used_fields: true
      - HostTagger
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let container = Container::new();
  container.add_instance_with_name("config", serde_yaml::from_str::<serde_json::Value>(CONFIG)?);
  container.add_instance_with_name("hostname", String::from("demo-host"));
  container.add_handler(
    "Console",
    Arc::new(StreamHandler::for_target(
      StreamTarget::Stderr,
      LevelFilter::Debug,
      Arc::new(PatternFormatter::new("%d %-5p [%c] %m %X%n")),
    )),
  );

  // Built on demand from whatever the container holds.
  factories().register_fn("HostTagger", |locator: &dyn ServiceLocator| {
    let host = locator
      .get_as::<String>("hostname")
      .ok_or_else(|| ComponentError::FactoryFailed {
        name: "HostTagger".to_string(),
        reason: "no hostname registered".to_string(),
      })?;
    Ok(Component::Processor(Arc::new(
      TagProcessor::default().with_tag("host", host.as_str()),
    )))
  });

  let logger = LoggerFactory::new("app").invoke(&container)?;
  log::set_boxed_logger(Box::new(logger))?;
  log::set_max_level(LevelFilter::Trace);

  log::debug!("starting up");
  log::warn!("cache miss rate above threshold");
  log::trace!("not shown anywhere");
  log::logger().flush();

  Ok(())
}
