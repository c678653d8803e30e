use fibre_ioc::{global, resolve, ServiceLocator};
use std::sync::Arc;

trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  // One lazily built, one pre-built and shared.
  global().add_singleton_trait_with_name::<dyn MessageSender>("email", || Arc::new(EmailSender));
  let sms: Arc<dyn MessageSender> = Arc::new(SmsSender);
  global().add_shared_with_name::<dyn MessageSender>("sms", sms.clone());

  let email_notifier = resolve!(trait MessageSender, "email");
  let locator: &dyn ServiceLocator = global();
  let sms_notifier = locator
    .get_as::<dyn MessageSender>("sms")
    .expect("sms sender was registered above");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(Arc::ptr_eq(&sms, &sms_notifier));
}
