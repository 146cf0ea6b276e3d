use serde::{Deserialize, Serialize};

/// A named edge between two screens, selected by event name and source screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
  pub id: String,
  pub event: String,
  pub from: String,
  pub to: String,
  /// Presentation hint for hosts with a navigation stack.
  #[serde(default)]
  pub clear_stack: bool,
}
