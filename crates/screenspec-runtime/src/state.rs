use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field values keyed by binding key.
pub type Values = BTreeMap<String, String>;

/// Field error messages keyed by binding key.
pub type Errors = BTreeMap<String, String>;

/// Mutable interpreter state. Owned by a session, passed by value through the
/// rule engine and committed back as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
  pub active_screen: String,
  pub values: Values,
  pub errors: Errors,
}

impl RuntimeState {
  pub fn new(active_screen: impl Into<String>) -> Self {
    Self {
      active_screen: active_screen.into(),
      values: Values::new(),
      errors: Errors::new(),
    }
  }

  /// Current value for a binding key; missing keys read as empty.
  pub fn value(&self, key: &str) -> &str {
    self.values.get(key).map(String::as_str).unwrap_or("")
  }

  /// Record `error` for `key`, or clear the key's error when `None`.
  pub fn set_error(&mut self, key: &str, error: Option<String>) {
    match error {
      Some(message) => {
        self.errors.insert(key.to_string(), message);
      }
      None => {
        self.errors.remove(key);
      }
    }
  }
}
