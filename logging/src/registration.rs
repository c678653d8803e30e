//! Registering pre-built components in a `fibre_ioc::Container` so that configuration
//! can refer to them by name.

use crate::component::{Formatter, Handler, Processor};
use fibre_ioc::Container;
use std::sync::Arc;

/// Adds named logger components to a container.
///
/// Components must be registered as trait objects to be recognized during
/// resolution; these helpers take care of that.
pub trait ComponentRegistration {
  fn add_handler(&self, name: &str, handler: Arc<dyn Handler>);
  fn add_formatter(&self, name: &str, formatter: Arc<dyn Formatter>);
  fn add_processor(&self, name: &str, processor: Arc<dyn Processor>);
}

impl ComponentRegistration for Container {
  fn add_handler(&self, name: &str, handler: Arc<dyn Handler>) {
    self.add_shared_with_name::<dyn Handler>(name, handler);
  }

  fn add_formatter(&self, name: &str, formatter: Arc<dyn Formatter>) {
    self.add_shared_with_name::<dyn Formatter>(name, formatter);
  }

  fn add_processor(&self, name: &str, processor: Arc<dyn Processor>) {
    self.add_shared_with_name::<dyn Processor>(name, processor);
  }
}
