use std::collections::HashSet;

use screenspec_config::{RuleDef, ScopeKind, Screen, SpecificationDocument, Transition};
use screenspec_model::{Rule, RuleScope, Specification};
use tracing::{debug, warn};

use crate::error::ResolveError;

/// Resolver transforms a SpecificationDocument into a locked Specification.
pub trait Resolver {
  /// Resolve a specification document.
  ///
  /// This process:
  /// 1. Validates screen and component id uniqueness
  /// 2. Validates transition and rule screen references
  /// 3. Normalizes rule scopes and picks the initial screen
  fn resolve(&self, doc: SpecificationDocument) -> Result<Specification, ResolveError>;
}

/// Standard resolver implementation.
#[derive(Debug, Clone, Default)]
pub struct StandardResolver {
  initial_screen: Option<String>,
}

impl StandardResolver {
  pub fn new() -> Self {
    Self::default()
  }

  /// Override the document's initial screen.
  pub fn with_initial_screen(initial_screen: impl Into<String>) -> Self {
    Self {
      initial_screen: Some(initial_screen.into()),
    }
  }

  /// Collect screen ids, rejecting duplicates at either level.
  fn collect_screen_ids(screens: &[Screen]) -> Result<HashSet<String>, ResolveError> {
    let mut screen_ids = HashSet::new();
    for screen in screens {
      if !screen_ids.insert(screen.id.clone()) {
        return Err(ResolveError::DuplicateScreenId {
          screen_id: screen.id.clone(),
        });
      }

      let mut component_ids = HashSet::new();
      for component in &screen.components {
        if !component_ids.insert(component.id.as_str()) {
          return Err(ResolveError::DuplicateComponentId {
            screen_id: screen.id.clone(),
            component_id: component.id.clone(),
          });
        }
      }
    }
    Ok(screen_ids)
  }

  /// Validate that all transitions reference existing screens.
  fn validate_transitions(
    screen_ids: &HashSet<String>,
    transitions: &[Transition],
  ) -> Result<(), ResolveError> {
    for transition in transitions {
      for screen_id in [&transition.from, &transition.to] {
        if !screen_ids.contains(screen_id) {
          return Err(ResolveError::InvalidTransition {
            transition_id: transition.id.clone(),
            screen_id: screen_id.clone(),
          });
        }
      }
    }
    Ok(())
  }

  /// Resolve a single rule definition into a locked rule.
  fn resolve_rule(screen_ids: &HashSet<String>, def: RuleDef) -> Result<Rule, ResolveError> {
    let scope = match def.scope {
      None | Some(ScopeKind::Global) => {
        if let Some(screen_id) = &def.screen_id {
          warn!(
            rule_id = %def.id,
            screen_id = %screen_id,
            "screen_id ignored on global rule"
          );
        }
        RuleScope::Global
      }
      Some(ScopeKind::Screen) => {
        let screen_id = def.screen_id.ok_or_else(|| ResolveError::MissingRuleScreen {
          rule_id: def.id.clone(),
        })?;
        if !screen_ids.contains(&screen_id) {
          return Err(ResolveError::InvalidRuleScreen {
            rule_id: def.id,
            screen_id,
          });
        }
        RuleScope::Screen(screen_id)
      }
    };

    Ok(Rule {
      id: def.id,
      scope,
      on_event: def.on_event,
      when: def.when,
      steps: def.steps,
    })
  }
}

impl Resolver for StandardResolver {
  fn resolve(&self, doc: SpecificationDocument) -> Result<Specification, ResolveError> {
    let screen_ids = Self::collect_screen_ids(&doc.screens)?;

    let initial_screen = self
      .initial_screen
      .as_deref()
      .or_else(|| doc.initial_screen_id())
      .ok_or(ResolveError::NoInitialScreen)?
      .to_string();
    if !screen_ids.contains(&initial_screen) {
      return Err(ResolveError::InitialScreenNotFound(initial_screen));
    }

    Self::validate_transitions(&screen_ids, &doc.transitions)?;

    let rules = doc
      .rules
      .into_iter()
      .map(|def| Self::resolve_rule(&screen_ids, def))
      .collect::<Result<Vec<_>, _>>()?;

    debug!(
      screens = doc.screens.len(),
      rules = rules.len(),
      transitions = doc.transitions.len(),
      initial_screen = %initial_screen,
      "specification resolved"
    );

    Ok(Specification::new(
      doc.meta,
      initial_screen,
      doc.screens,
      rules,
      doc.transitions,
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn doc(value: serde_json::Value) -> SpecificationDocument {
    serde_json::from_value(value).unwrap()
  }

  fn two_screens() -> serde_json::Value {
    json!([
      { "id": "login", "components": [] },
      { "id": "home", "components": [] }
    ])
  }

  #[test]
  fn test_resolve_simple_specification() {
    let resolver = StandardResolver::new();
    let spec = resolver
      .resolve(doc(json!({
        "screens": two_screens(),
        "rules": [
          { "id": "r1", "on_event": "a.click" },
          { "id": "r2", "scope": "global", "on_event": "b.click" },
          { "id": "r3", "scope": "screen", "screen_id": "home", "on_event": "c.click" }
        ],
        "transitions": [{ "id": "t1", "event": "login.ok", "from": "login", "to": "home" }]
      })))
      .unwrap();

    assert_eq!(spec.initial_screen, "login");
    assert_eq!(spec.rules[0].scope, RuleScope::Global);
    assert_eq!(spec.rules[1].scope, RuleScope::Global);
    assert_eq!(spec.rules[2].scope, RuleScope::Screen("home".to_string()));
    assert_eq!(spec.find_screen("home").unwrap().id, "home");
  }

  #[test]
  fn test_duplicate_screen_id() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": [{ "id": "login" }, { "id": "login" }]
    })));

    assert!(matches!(
      result,
      Err(ResolveError::DuplicateScreenId { screen_id }) if screen_id == "login"
    ));
  }

  #[test]
  fn test_duplicate_component_id() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": [{
        "id": "login",
        "components": [
          { "id": "email", "type": "text_field" },
          { "id": "email", "type": "text" }
        ]
      }]
    })));

    assert!(matches!(
      result,
      Err(ResolveError::DuplicateComponentId { component_id, .. }) if component_id == "email"
    ));
  }

  #[test]
  fn test_same_component_id_on_different_screens() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": [
        { "id": "login", "components": [{ "id": "title", "type": "text" }] },
        { "id": "home", "components": [{ "id": "title", "type": "text" }] }
      ]
    })));

    assert!(result.is_ok());
  }

  #[test]
  fn test_transition_to_unknown_screen() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": two_screens(),
      "transitions": [{ "id": "t1", "event": "go", "from": "login", "to": "settings" }]
    })));

    assert!(matches!(
      result,
      Err(ResolveError::InvalidTransition { transition_id, screen_id })
        if transition_id == "t1" && screen_id == "settings"
    ));
  }

  #[test]
  fn test_rule_bound_to_unknown_screen() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": two_screens(),
      "rules": [{ "id": "r1", "scope": "screen", "screen_id": "settings", "on_event": "x" }]
    })));

    assert!(matches!(
      result,
      Err(ResolveError::InvalidRuleScreen { rule_id, .. }) if rule_id == "r1"
    ));
  }

  #[test]
  fn test_screen_rule_without_screen_id() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": two_screens(),
      "rules": [{ "id": "r1", "scope": "screen", "on_event": "x" }]
    })));

    assert!(matches!(result, Err(ResolveError::MissingRuleScreen { .. })));
  }

  #[test]
  fn test_no_screens() {
    let result = StandardResolver::new().resolve(doc(json!({ "screens": [] })));
    assert!(matches!(result, Err(ResolveError::NoInitialScreen)));
  }

  #[test]
  fn test_login_screen_must_exist() {
    let result = StandardResolver::new().resolve(doc(json!({
      "screens": two_screens(),
      "operational_rules": { "access": { "login_screen": "welcome" } }
    })));

    assert!(matches!(
      result,
      Err(ResolveError::InitialScreenNotFound(id)) if id == "welcome"
    ));
  }

  #[test]
  fn test_initial_screen_override() {
    let spec = StandardResolver::with_initial_screen("home")
      .resolve(doc(json!({ "screens": two_screens() })))
      .unwrap();

    assert_eq!(spec.initial_screen, "home");
  }
}
