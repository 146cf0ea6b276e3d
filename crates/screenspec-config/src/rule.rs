use serde::{Deserialize, Serialize};

/// A rule as authored: reacts to `on_event`, gated by `when`, runs `steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
  pub id: String,
  /// Absent means global.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scope: Option<ScopeKind>,
  /// Screen the rule is bound to when `scope` is `screen`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub screen_id: Option<String>,
  pub on_event: String,
  #[serde(default)]
  pub when: Vec<Condition>,
  #[serde(default)]
  pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
  Global,
  Screen,
}

/// A guard condition over a single bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
  pub field: String,
  pub comparator: Comparator,
  /// Comparison operand. Unused by the built-in comparators.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
  IsNotEmpty,
  IsEmpty,
  /// Any comparator this version does not implement.
  #[serde(untagged)]
  Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
  ValidateFields(ValidateFieldsStep),
  StartOperation(StartOperationStep),
  /// A step type this version does not execute.
  #[serde(other)]
  Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateFieldsStep {
  /// Binding keys of the fields to validate, in order.
  pub fields: Vec<String>,
  #[serde(default)]
  pub show_errors: Option<bool>,
  #[serde(default)]
  pub stop_on_error: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartOperationStep {
  pub operation: String,
  #[serde(default)]
  pub params: serde_json::Map<String, serde_json::Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub success_event: Option<String>,
  /// Reserved. No execution path consumes it.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error_event: Option<String>,
}
