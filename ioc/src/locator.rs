//! The lookup capability that consumers of a container depend on.

use crate::core::Service;
use std::any::Any;
use std::sync::Arc;

/// A registry answering presence and lookup queries by name.
///
/// `Container` is the implementation shipped with this crate, but anything that can
/// hand out [`Service`] values by name can stand in for it (a test double, an
/// adapter over another container, ...).
pub trait ServiceLocator {
  /// Returns `true` if a service is registered under `name`.
  fn has(&self, name: &str) -> bool;

  /// Returns the service registered under `name`, if any.
  fn service(&self, name: &str) -> Option<Service>;
}

impl<'a> dyn ServiceLocator + 'a {
  /// Resolves `name` and downcasts it to `T`.
  pub fn get_as<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
    let service = self.service(name)?;
    service.downcast_ref::<Arc<T>>().cloned()
  }
}

impl<L: ServiceLocator + ?Sized> ServiceLocator for Arc<L> {
  fn has(&self, name: &str) -> bool {
    (**self).has(name)
  }

  fn service(&self, name: &str) -> Option<Service> {
    (**self).service(name)
  }
}
