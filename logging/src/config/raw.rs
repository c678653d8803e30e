// Structs mapping the `logger.<name>` configuration tree.
//
// Entries read from configuration data are either a plain string (`Name`) or a
// mapping (`Descriptor`). `Instance` entries only come from code and always pass
// through resolution untouched.

use crate::component::{Formatter, Handler, Processor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// Free-form construction options of a descriptor.
pub type Options = serde_json::Map<String, serde_json::Value>;

// --- Logger Config ---
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
  pub name: String,
  #[serde(default)]
  pub handlers: Vec<HandlerEntry>,
  #[serde(default)]
  pub processors: Vec<ProcessorEntry>,
}

impl LoggerConfig {
  /// A configuration with no handlers and no processors.
  pub fn empty(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      handlers: Vec::new(),
      processors: Vec::new(),
    }
  }
}

// --- Descriptors ---

/// A `{ name, options }` mapping naming a component type and its options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
  pub name: String,
  #[serde(default)]
  pub options: Options,
}

impl Descriptor {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      options: Options::new(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerDescriptor {
  pub name: String,
  #[serde(default)]
  pub options: HandlerOptions,
}

/// Handler options: the `formatter` entry is split out because it may have to be
/// resolved, everything else is handed to the handler type as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandlerOptions {
  #[serde(default)]
  pub formatter: Option<FormatterEntry>,
  #[serde(flatten)]
  pub rest: Options,
}

// --- Entries ---

#[derive(Clone)]
pub enum HandlerEntry {
  Name(String),
  Descriptor(HandlerDescriptor),
  Instance(Arc<dyn Handler>),
}

#[derive(Clone)]
pub enum FormatterEntry {
  Name(String),
  Descriptor(Descriptor),
  Instance(Arc<dyn Formatter>),
}

#[derive(Clone)]
pub enum ProcessorEntry {
  Name(String),
  Descriptor(Descriptor),
  Instance(Arc<dyn Processor>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRaw<D> {
  Name(String),
  Descriptor(D),
}

impl<'de> Deserialize<'de> for HandlerEntry {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match EntryRaw::<HandlerDescriptor>::deserialize(deserializer)? {
      EntryRaw::Name(name) => HandlerEntry::Name(name),
      EntryRaw::Descriptor(descriptor) => HandlerEntry::Descriptor(descriptor),
    })
  }
}

impl<'de> Deserialize<'de> for FormatterEntry {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match EntryRaw::<Descriptor>::deserialize(deserializer)? {
      EntryRaw::Name(name) => FormatterEntry::Name(name),
      EntryRaw::Descriptor(descriptor) => FormatterEntry::Descriptor(descriptor),
    })
  }
}

impl<'de> Deserialize<'de> for ProcessorEntry {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match EntryRaw::<Descriptor>::deserialize(deserializer)? {
      EntryRaw::Name(name) => ProcessorEntry::Name(name),
      EntryRaw::Descriptor(descriptor) => ProcessorEntry::Descriptor(descriptor),
    })
  }
}

impl fmt::Debug for HandlerEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HandlerEntry::Name(name) => f.debug_tuple("Name").field(name).finish(),
      HandlerEntry::Descriptor(d) => f.debug_tuple("Descriptor").field(d).finish(),
      HandlerEntry::Instance(_) => f.write_str("Instance(..)"),
    }
  }
}

impl fmt::Debug for FormatterEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FormatterEntry::Name(name) => f.debug_tuple("Name").field(name).finish(),
      FormatterEntry::Descriptor(d) => f.debug_tuple("Descriptor").field(d).finish(),
      FormatterEntry::Instance(_) => f.write_str("Instance(..)"),
    }
  }
}

impl fmt::Debug for ProcessorEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProcessorEntry::Name(name) => f.debug_tuple("Name").field(name).finish(),
      ProcessorEntry::Descriptor(d) => f.debug_tuple("Descriptor").field(d).finish(),
      ProcessorEntry::Instance(_) => f.write_str("Instance(..)"),
    }
  }
}
