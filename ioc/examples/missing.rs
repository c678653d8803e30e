use fibre_ioc::{global, maybe_resolve, resolve};
use std::panic;

struct UnregisteredService;

fn main() {
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  println!("\nNow, asking the container without panicking...");
  assert!(!global().has("UnregisteredService"));

  match maybe_resolve!(UnregisteredService) {
    Some(_) => panic!("Should not have found the service!"),
    None => println!("Correctly received `None` for the missing service."),
  }
}
