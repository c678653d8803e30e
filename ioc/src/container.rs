//! The main `Container` struct and its associated methods.

use crate::core::{service_key, Provider, ResolutionGuard, Service};
use crate::locator::ServiceLocator;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// This struct holds the registrations for all services, keyed by name. It is
/// thread-safe and allows for dynamic registration and resolution of services.
/// Registering a second service under an existing name replaces the first one.
#[derive(Default)]
pub struct Container {
  providers: DashMap<String, Provider>,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert(&self, key: String, provider: Provider) {
    self.providers.insert(key, provider);
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_shared_internal(service_key::<T>(None), Arc::new(instance));
  }
  pub fn add_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.add_shared_internal(service_key::<T>(Some(name)), Arc::new(instance));
  }

  /// Registers an already shared value, which may be a trait object.
  ///
  /// Resolving `name` as `T` hands out clones of `instance` itself, so callers can
  /// compare what they get back with `Arc::ptr_eq`.
  pub fn add_shared_with_name<T: ?Sized + Any + Send + Sync>(&self, name: &str, instance: Arc<T>) {
    self.add_shared_internal(service_key::<T>(Some(name)), instance);
  }

  fn add_shared_internal<T: ?Sized + Any + Send + Sync>(&self, key: String, instance: Arc<T>) {
    self.insert(key, Provider::instance(Arc::new(instance)));
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<T>(None),
      Provider::singleton(move || Arc::new(Arc::new(factory())) as Service),
    );
  }
  pub fn add_singleton_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<T>(Some(name)),
      Provider::singleton(move || Arc::new(Arc::new(factory())) as Service),
    );
  }

  // --- Transient Registration ---
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<T>(None),
      Provider::transient(move || Arc::new(Arc::new(factory())) as Service),
    );
  }
  pub fn add_transient_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<T>(Some(name)),
      Provider::transient(move || Arc::new(Arc::new(factory())) as Service),
    );
  }

  // --- Trait Registration ---
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<I>(None),
      Provider::singleton(move || Arc::new(factory()) as Service),
    );
  }
  pub fn add_singleton_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.insert(
      service_key::<I>(Some(name)),
      Provider::singleton(move || Arc::new(factory()) as Service),
    );
  }

  // --- Resolution ---

  /// Returns `true` if anything is registered under `name`.
  pub fn has(&self, name: &str) -> bool {
    self.providers.contains_key(name)
  }

  /// Resolves the type-erased service registered under `name`.
  ///
  /// # Panics
  ///
  /// Panics if resolving the service ends up resolving itself again.
  pub fn service(&self, name: &str) -> Option<Service> {
    // The guard's destructor pops the name when this function returns.
    let _guard = ResolutionGuard::new(name);

    let provider_ref = self.providers.get(name)?;
    Some(provider_ref.value().provide())
  }

  /// Resolves a service from the container.
  ///
  /// Returns `None` when nothing is registered under the key, or when the
  /// registered service is not a `T`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: Option<&str>) -> Option<Arc<T>> {
    let service = self.service(&service_key::<T>(name))?;
    service.downcast_ref::<Arc<T>>().cloned()
  }
}

impl ServiceLocator for Container {
  fn has(&self, name: &str) -> bool {
    Container::has(self, name)
  }

  fn service(&self, name: &str) -> Option<Service> {
    Container::service(self, name)
  }
}
