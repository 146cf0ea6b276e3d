use std::collections::HashMap;

use screenspec_config::{DocumentMeta, Screen, Transition};
use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::rule::Rule;

/// A locked specification ready for interpretation.
///
/// Built by the resolver, which guarantees screen ids are unique and that
/// every transition and screen-scoped rule references an existing screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specification {
  pub meta: Option<DocumentMeta>,
  pub initial_screen: String,
  pub screens: Vec<Screen>,
  pub rules: Vec<Rule>,
  pub transitions: Vec<Transition>,
  #[serde(skip)]
  screen_index: HashMap<String, usize>,
}

impl Specification {
  pub fn new(
    meta: Option<DocumentMeta>,
    initial_screen: String,
    screens: Vec<Screen>,
    rules: Vec<Rule>,
    transitions: Vec<Transition>,
  ) -> Self {
    let screen_index = screens
      .iter()
      .enumerate()
      .map(|(i, s)| (s.id.clone(), i))
      .collect();

    Self {
      meta,
      initial_screen,
      screens,
      rules,
      transitions,
      screen_index,
    }
  }

  /// Look up a screen by ID.
  ///
  /// A missing screen is unrecoverable for the caller: there is nothing to
  /// render.
  pub fn find_screen(&self, screen_id: &str) -> Result<&Screen, SpecError> {
    self
      .screen_index
      .get(screen_id)
      .and_then(|&i| self.screens.get(i))
      // Deserialized specifications have an empty index.
      .or_else(|| self.screens.iter().find(|s| s.id == screen_id))
      .ok_or_else(|| SpecError::ScreenNotFound(screen_id.to_string()))
  }

  /// Rules reacting to `event_name` on `screen_id`, in declaration order.
  pub fn rules_for_event<'a>(
    &'a self,
    screen_id: &'a str,
    event_name: &'a str,
  ) -> impl Iterator<Item = &'a Rule> + 'a {
    self
      .rules
      .iter()
      .filter(move |rule| rule.matches(screen_id, event_name))
  }

  /// First transition, in declaration order, for `event_name` leaving `from`.
  pub fn transition_for(&self, event_name: &str, from: &str) -> Option<&Transition> {
    self
      .transitions
      .iter()
      .find(|t| t.event == event_name && t.from == from)
  }
}

// The screen index is derived from `screens` and is empty after
// deserialization, so it takes no part in equality.
impl PartialEq for Specification {
  fn eq(&self, other: &Self) -> bool {
    self.meta == other.meta
      && self.initial_screen == other.initial_screen
      && self.screens == other.screens
      && self.rules == other.rules
      && self.transitions == other.transitions
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rule::RuleScope;
  use screenspec_config::Layout;

  fn screen(id: &str) -> Screen {
    Screen {
      id: id.to_string(),
      title: None,
      description: None,
      layout: Layout::default(),
      components: Vec::new(),
    }
  }

  fn rule(id: &str, scope: RuleScope, on_event: &str) -> Rule {
    Rule {
      id: id.to_string(),
      scope,
      on_event: on_event.to_string(),
      when: Vec::new(),
      steps: Vec::new(),
    }
  }

  fn transition(id: &str, event: &str, from: &str, to: &str) -> Transition {
    Transition {
      id: id.to_string(),
      event: event.to_string(),
      from: from.to_string(),
      to: to.to_string(),
      clear_stack: false,
    }
  }

  fn test_spec() -> Specification {
    Specification::new(
      None,
      "login".to_string(),
      vec![screen("login"), screen("home")],
      vec![
        rule("global_submit", RuleScope::Global, "submit.click"),
        rule(
          "home_submit",
          RuleScope::Screen("home".to_string()),
          "submit.click",
        ),
        rule("login_other", RuleScope::Screen("login".to_string()), "back.click"),
        rule(
          "login_submit",
          RuleScope::Screen("login".to_string()),
          "submit.click",
        ),
      ],
      vec![
        transition("t1", "login.ok", "login", "home"),
        transition("t2", "login.ok", "login", "login"),
        transition("t3", "logout", "home", "login"),
      ],
    )
  }

  #[test]
  fn test_find_screen() {
    let spec = test_spec();
    assert_eq!(spec.find_screen("home").unwrap().id, "home");
  }

  #[test]
  fn test_find_screen_missing() {
    let spec = test_spec();
    let err = spec.find_screen("settings").unwrap_err();
    assert!(matches!(err, SpecError::ScreenNotFound(id) if id == "settings"));
  }

  #[test]
  fn test_rules_for_event_filters_scope_and_event_in_order() {
    let spec = test_spec();
    let ids: Vec<&str> = spec
      .rules_for_event("login", "submit.click")
      .map(|r| r.id.as_str())
      .collect();

    assert_eq!(ids, vec!["global_submit", "login_submit"]);
  }

  #[test]
  fn test_rules_for_event_none() {
    let spec = test_spec();
    assert_eq!(spec.rules_for_event("login", "missing.click").count(), 0);
  }

  #[test]
  fn test_transition_for_takes_first_match() {
    let spec = test_spec();
    let t = spec.transition_for("login.ok", "login").unwrap();
    assert_eq!(t.id, "t1");
    assert!(spec.transition_for("login.ok", "home").is_none());
  }

  #[test]
  fn test_find_screen_after_roundtrip() {
    let spec = test_spec();
    let json = serde_json::to_string(&spec).unwrap();
    let restored: Specification = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.find_screen("home").unwrap().id, "home");
    assert_eq!(restored, spec);
  }
}
