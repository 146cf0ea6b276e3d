use thiserror::Error;

/// Errors that can occur during specification resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// Two screens share an id.
  #[error("duplicate screen id: {screen_id}")]
  DuplicateScreenId { screen_id: String },

  /// Two components on the same screen share an id.
  #[error("duplicate component id '{component_id}' on screen '{screen_id}'")]
  DuplicateComponentId {
    screen_id: String,
    component_id: String,
  },

  /// Transition references a screen that does not exist.
  #[error("invalid transition '{transition_id}': screen '{screen_id}' does not exist")]
  InvalidTransition {
    transition_id: String,
    screen_id: String,
  },

  /// Screen-scoped rule references a screen that does not exist.
  #[error("invalid rule '{rule_id}': screen '{screen_id}' does not exist")]
  InvalidRuleScreen { rule_id: String, screen_id: String },

  /// Screen-scoped rule without a `screen_id`.
  #[error("rule '{rule_id}' is screen-scoped but names no screen")]
  MissingRuleScreen { rule_id: String },

  /// Document has no screens and no configured initial screen.
  #[error("specification has no initial screen")]
  NoInitialScreen,

  /// Configured initial screen does not exist.
  #[error("initial screen not found: {0}")]
  InitialScreenNotFound(String),
}
