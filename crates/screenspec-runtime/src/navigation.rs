//! Screen navigation.

use screenspec_model::Specification;
use tracing::{info, warn};

use crate::state::RuntimeState;

/// Destination screen for `event_name` leaving `from`, if any transition
/// matches.
pub fn resolve_transition<'a>(
  spec: &'a Specification,
  event_name: &str,
  from: &str,
) -> Option<&'a str> {
  spec
    .transition_for(event_name, from)
    .map(|t| t.to.as_str())
}

/// Navigate `state` for `event_name` leaving `from`.
///
/// On a match the destination becomes the active screen and all field errors
/// are cleared; values are kept. Without a match nothing changes. Returns
/// whether a navigation happened.
pub fn navigate(
  spec: &Specification,
  state: &mut RuntimeState,
  event_name: &str,
  from: &str,
) -> bool {
  match resolve_transition(spec, event_name, from) {
    Some(to) => {
      info!(event = %event_name, from = %from, to = %to, "navigating");
      state.active_screen = to.to_string();
      state.errors.clear();
      true
    }
    None => {
      warn!(event = %event_name, from = %from, "no transition for event");
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use screenspec_config::{Layout, Screen, Transition};

  fn spec() -> Specification {
    let screen = |id: &str| Screen {
      id: id.to_string(),
      title: None,
      description: None,
      layout: Layout::default(),
      components: Vec::new(),
    };
    Specification::new(
      None,
      "login".to_string(),
      vec![screen("login"), screen("home")],
      Vec::new(),
      vec![Transition {
        id: "t1".to_string(),
        event: "login.ok".to_string(),
        from: "login".to_string(),
        to: "home".to_string(),
        clear_stack: true,
      }],
    )
  }

  fn state_with_error() -> RuntimeState {
    let mut state = RuntimeState::new("login");
    state
      .values
      .insert("user.email".to_string(), "a@b.com".to_string());
    state
      .errors
      .insert("user.password".to_string(), "bad".to_string());
    state
  }

  #[test]
  fn test_navigate_commits_and_clears_errors() {
    let spec = spec();
    let mut state = state_with_error();

    assert!(navigate(&spec, &mut state, "login.ok", "login"));
    assert_eq!(state.active_screen, "home");
    assert!(state.errors.is_empty());
    assert_eq!(state.value("user.email"), "a@b.com");
  }

  #[test]
  fn test_unmatched_navigation_keeps_errors() {
    let spec = spec();
    let mut state = state_with_error();

    assert!(!navigate(&spec, &mut state, "logout", "login"));
    assert_eq!(state, state_with_error());
  }

  #[test]
  fn test_resolve_transition_checks_source() {
    let spec = spec();
    assert_eq!(resolve_transition(&spec, "login.ok", "login"), Some("home"));
    assert_eq!(resolve_transition(&spec, "login.ok", "home"), None);
  }
}
