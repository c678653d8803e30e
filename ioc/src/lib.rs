//! # Fibre IoC
//!
//! A flexible, thread-safe, and dynamic Inversion of Control (IoC) container for Rust.
//!
//! Services are registered under names and can be registered at any point during the
//! application's lifecycle. Consumers that only need to look things up depend on the
//! [`ServiceLocator`] trait rather than on [`Container`] itself.
//!
//! ## Core Concepts
//!
//! - **Container**: The central registry for all your services, keyed by name.
//!   Unnamed registrations are keyed by their type name.
//! - **Global Container**: A static, globally-available container, accessible via `global()`.
//! - **Service Locator**: The `has` / `service` capability a container exposes to its consumers.
//! - **Resolution**: Services are resolved using the `resolve!` macro, which panics
//!   if a dependency is missing, or with `get` / `maybe_resolve!`, which return `Option`.
//! - **Traits**: Services can be registered against a trait and resolved as a trait object.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_ioc::{global, resolve};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         self.message.clone()
//!     }
//! }
//!
//! global().add_singleton_with_name("greeting_message", || String::from("Hello, World!"));
//!
//! // The factory can itself resolve other dependencies.
//! global().add_singleton_trait_with_name::<dyn Greeter>("greeter", || {
//!     let message = resolve!(String, "greeting_message");
//!     Arc::new(EnglishGreeter { message: (*message).clone() })
//! });
//!
//! let greeter_service = resolve!(trait Greeter, "greeter");
//! assert_eq!(greeter_service.greet(), "Hello, World!");
//! ```

mod container;
mod core;
mod global;
mod locator;
mod macros;

pub use crate::core::Service;
pub use container::Container;
pub use global::global;
pub use locator::ServiceLocator;
