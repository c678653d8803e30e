//! Named component factories: the second resolution strategy after the locator.
//!
//! A factory is constructed with no arguments and then invoked with the locator,
//! so a component name may refer to a factory type instead of a finished instance.

use crate::component::Component;
use crate::error::ComponentError;
use dashmap::DashMap;
use fibre_ioc::ServiceLocator;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Produces a component, pulling whatever it needs from the locator.
pub trait ComponentFactory {
  fn make(&self, locator: &dyn ServiceLocator) -> Result<Component, ComponentError>;
}

impl<F> ComponentFactory for F
where
  F: Fn(&dyn ServiceLocator) -> Result<Component, ComponentError>,
{
  fn make(&self, locator: &dyn ServiceLocator) -> Result<Component, ComponentError> {
    self(locator)
  }
}

type FactoryConstructor = Box<dyn Fn() -> Box<dyn ComponentFactory> + Send + Sync>;

/// Maps component names to factory constructors.
///
/// Registration works through `&self`, so a shared registry can be extended at any
/// point, in the same way services are added to a `fibre_ioc::Container`.
#[derive(Default)]
pub struct FactoryRegistry {
  constructors: DashMap<String, FactoryConstructor>,
}

impl FactoryRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a factory type under `name`; it is built with `Default` on each use.
  pub fn register<F: ComponentFactory + Default + 'static>(&self, name: &str) {
    self.register_with(name, || Box::new(F::default()) as Box<dyn ComponentFactory>);
  }

  /// Registers a closure as the factory for `name`.
  pub fn register_fn<F>(&self, name: &str, factory: F)
  where
    F: Fn(&dyn ServiceLocator) -> Result<Component, ComponentError> + Send + Sync + 'static,
  {
    let factory = Arc::new(factory);
    self.register_with(name, move || {
      Box::new(SharedFactory(factory.clone())) as Box<dyn ComponentFactory>
    });
  }

  /// Registers an arbitrary zero-argument factory constructor.
  pub fn register_with(
    &self,
    name: &str,
    constructor: impl Fn() -> Box<dyn ComponentFactory> + Send + Sync + 'static,
  ) {
    self.constructors.insert(name.to_owned(), Box::new(constructor));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.constructors.contains_key(name)
  }

  /// Builds a fresh factory object for `name`, or `None` if the name is unknown.
  pub fn instantiate(&self, name: &str) -> Option<Box<dyn ComponentFactory>> {
    let constructor = self.constructors.get(name)?;
    Some((constructor.value())())
  }
}

struct SharedFactory<F>(Arc<F>);

impl<F> ComponentFactory for SharedFactory<F>
where
  F: Fn(&dyn ServiceLocator) -> Result<Component, ComponentError>,
{
  fn make(&self, locator: &dyn ServiceLocator) -> Result<Component, ComponentError> {
    (self.0)(locator)
  }
}

static GLOBAL_FACTORIES: Lazy<Arc<FactoryRegistry>> = Lazy::new(|| Arc::new(FactoryRegistry::new()));

/// The process-wide factory registry used by factories that were not given one.
pub fn factories() -> Arc<FactoryRegistry> {
  GLOBAL_FACTORIES.clone()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ComponentKind;
  use crate::handlers::NullHandler;
  use fibre_ioc::Container;
  use log::LevelFilter;
  use std::sync::atomic::{AtomicUsize, Ordering};

  static BUILT: AtomicUsize = AtomicUsize::new(0);

  struct CountingFactory;

  impl Default for CountingFactory {
    fn default() -> Self {
      BUILT.fetch_add(1, Ordering::SeqCst);
      CountingFactory
    }
  }

  impl ComponentFactory for CountingFactory {
    fn make(&self, _locator: &dyn ServiceLocator) -> Result<Component, ComponentError> {
      Ok(Component::Handler(Arc::new(NullHandler::new(LevelFilter::Trace))))
    }
  }

  #[test]
  fn each_instantiation_builds_a_new_factory_object() {
    let registry = FactoryRegistry::new();
    registry.register::<CountingFactory>("Counting");

    let before = BUILT.load(Ordering::SeqCst);
    let first = registry.instantiate("Counting").unwrap();
    let _second = registry.instantiate("Counting").unwrap();
    assert_eq!(BUILT.load(Ordering::SeqCst), before + 2);

    let component = first.make(&Container::new()).unwrap();
    assert_eq!(component.kind(), ComponentKind::Handler);
  }

  #[test]
  fn closures_can_be_registered() {
    let registry = FactoryRegistry::new();
    registry.register_fn("FromLocator", |locator| {
      if locator.has("flag") {
        Ok(Component::Handler(Arc::new(NullHandler::new(LevelFilter::Off))))
      } else {
        Err(ComponentError::FactoryFailed {
          name: "FromLocator".to_string(),
          reason: "flag missing".to_string(),
        })
      }
    });

    let container = Container::new();
    let factory = registry.instantiate("FromLocator").unwrap();
    assert!(factory.make(&container).is_err());
    container.add_instance_with_name("flag", true);
    assert!(factory.make(&container).is_ok());
  }

  #[test]
  fn unknown_names_are_absent() {
    let registry = FactoryRegistry::new();
    assert!(!registry.contains("Nope"));
    assert!(registry.instantiate("Nope").is_none());
  }
}
