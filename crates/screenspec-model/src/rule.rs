use screenspec_config::{Condition, Step};
use serde::{Deserialize, Serialize};

/// Where a rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "screen_id", rename_all = "snake_case")]
pub enum RuleScope {
  Global,
  Screen(String),
}

/// A locked rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
  pub id: String,
  pub scope: RuleScope,
  pub on_event: String,
  /// Guard conditions, all of which must hold. Empty means always.
  pub when: Vec<Condition>,
  pub steps: Vec<Step>,
}

impl Rule {
  /// Check whether this rule reacts to `event_name` on `screen_id`.
  pub fn matches(&self, screen_id: &str, event_name: &str) -> bool {
    let scope_ok = match &self.scope {
      RuleScope::Global => true,
      RuleScope::Screen(bound) => bound == screen_id,
    };
    scope_ok && self.on_event == event_name
  }
}
