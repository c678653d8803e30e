//! Public macros for ergonomic service resolution.

/// Resolves a service from the global container.
///
/// This macro is the primary way to get dependencies. It panics if the
/// requested service is not registered, ensuring that all required
/// dependencies are present at runtime.
///
/// # Panics
///
/// This macro will panic if the service cannot be resolved. For a non-panicking
/// version, use [`maybe_resolve!`] or `global().get(...)` directly.
///
/// # Examples
///
/// ```
/// use fibre_ioc::{global, resolve};
///
/// global().add_singleton_with_name("doc_message", || String::from("hello"));
///
/// let message = resolve!(String, "doc_message");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use fibre_ioc::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_singleton_trait::<dyn Greeter>(|| Arc::new(EnglishGreeter));
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  ($($args:tt)+) => {
    $crate::resolve_from!($crate::global(), $($args)+)
  };
}

/// Resolves a service from the given container, panicking if it is missing.
#[macro_export]
macro_rules! resolve_from {
  // We use `:ident` to capture the trait's name and build `dyn Trait` ourselves.
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .get::<dyn $trait_ident>(None)
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required trait service: {}",
          std::any::type_name::<dyn $trait_ident>()
        )
      })
  };

  ($container:expr, trait $trait_ident:ident, $name:expr) => {
    $container
      .get::<dyn $trait_ident>(Some($name))
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required trait service with name '{}': {}",
          $name,
          std::any::type_name::<dyn $trait_ident>()
        )
      })
  };

  ($container:expr, $type:ty) => {
    $container
      .get::<$type>(None)
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required service: {}",
          std::any::type_name::<$type>()
        )
      })
  };

  ($container:expr, $type:ty, $name:expr) => {
    $container
      .get::<$type>(Some($name))
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required service with name '{}': {}",
          $name,
          std::any::type_name::<$type>()
        )
      })
  };
}

/// Resolves a service from the global container, returning an `Option`.
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident) => {
    $crate::global().get::<dyn $trait_ident>(None)
  };
  (trait $trait_ident:ident, $name:expr) => {
    $crate::global().get::<dyn $trait_ident>(Some($name))
  };
  ($type:ty) => {
    $crate::global().get::<$type>(None)
  };
  ($type:ty, $name:expr) => {
    $crate::global().get::<$type>(Some($name))
  };
}
