//! Core, non-public data structures for the IoC container.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

/// A type-erased service as stored in and handed out by a container.
///
/// The erased value is always an `Arc<T>` (where `T` may be a trait object such as
/// `dyn Handler`), so a typed view is recovered with `downcast_ref::<Arc<T>>()`.
pub type Service = Arc<dyn Any + Send + Sync>;

thread_local! {
  // Names of the services currently being resolved on this thread.
  static RESOLVING_STACK: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// An RAII guard to detect and prevent circular dependencies.
///
/// When created, it adds a service name to the thread-local resolution stack.
/// If the name is already present, a factory is (indirectly) resolving itself and
/// the guard panics. When the guard is dropped, the name is removed again.
pub(crate) struct ResolutionGuard {
  name: String,
}

impl ResolutionGuard {
  pub(crate) fn new(name: &str) -> Self {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if !stack.insert(name.to_owned()) {
        panic!(
          "Circular dependency detected while resolving service: '{}'",
          name
        );
      }
    });
    Self {
      name: name.to_owned(),
    }
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.name);
    });
  }
}

/// Builds the registration key for a service.
///
/// Unnamed registrations are keyed on the type name so that `get::<T>(None)`
/// finds them again.
pub(crate) fn service_key<T: ?Sized + Any>(name: Option<&str>) -> String {
  match name {
    Some(n) => n.to_owned(),
    None => std::any::type_name::<T>().to_owned(),
  }
}

type ServiceFactory = Box<dyn Fn() -> Service + Send + Sync>;

pub(crate) enum Provider {
  Singleton {
    cell: once_cell::sync::OnceCell<Service>,
    factory: ServiceFactory,
  },
  Transient {
    factory: ServiceFactory,
  },
}

impl Provider {
  pub(crate) fn instance(service: Service) -> Self {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::with_value(service),
      factory: Box::new(|| panic!("Pre-initialized singleton factory should not be called")),
    }
  }

  pub(crate) fn singleton(factory: impl Fn() -> Service + Send + Sync + 'static) -> Self {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::new(),
      factory: Box::new(factory),
    }
  }

  pub(crate) fn transient(factory: impl Fn() -> Service + Send + Sync + 'static) -> Self {
    Provider::Transient {
      factory: Box::new(factory),
    }
  }

  /// Produces the service, initializing a singleton on first use.
  pub(crate) fn provide(&self) -> Service {
    match self {
      Provider::Singleton { cell, factory } => cell.get_or_init(factory).clone(),
      Provider::Transient { factory } => factory(),
    }
  }
}
