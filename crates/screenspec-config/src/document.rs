use serde::{Deserialize, Serialize};

use crate::rule::RuleDef;
use crate::screen::Screen;
use crate::transition::Transition;

/// Root of a specification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationDocument {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meta: Option<DocumentMeta>,
  pub screens: Vec<Screen>,
  #[serde(default)]
  pub rules: Vec<RuleDef>,
  #[serde(default)]
  pub transitions: Vec<Transition>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub operational_rules: Option<OperationalRules>,
}

impl SpecificationDocument {
  /// The screen a session starts on.
  ///
  /// This is the configured login screen when present, otherwise the first
  /// declared screen.
  pub fn initial_screen_id(&self) -> Option<&str> {
    self
      .operational_rules
      .as_ref()
      .and_then(|r| r.access.as_ref())
      .and_then(|a| a.login_screen.as_deref())
      .or_else(|| self.screens.first().map(|s| s.id.as_str()))
  }
}

/// Bundle metadata. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
  pub dsl_version: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bundle_version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_engine_version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub app_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalRules {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub access: Option<AccessRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRules {
  /// Screen shown when a session starts.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub login_screen: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unauthorized_screen: Option<String>,
}
