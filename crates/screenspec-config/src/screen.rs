use serde::{Deserialize, Serialize};

use crate::component::Component;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub layout: Layout,
  #[serde(default)]
  pub components: Vec<Component>,
}

impl Screen {
  /// Get a component by ID.
  pub fn component(&self, component_id: &str) -> Option<&Component> {
    self.components.iter().find(|c| c.id == component_id)
  }
}

/// Layout hints for a screen. Opaque to the interpreter; passed through to
/// the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
  #[serde(rename = "type", default)]
  pub orientation: Orientation,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub padding: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub spacing: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub horizontal_alignment: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
  #[default]
  Vertical,
  Horizontal,
  /// Layout kinds the interpreter does not know, passed through verbatim.
  #[serde(untagged)]
  Other(String),
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_layout_defaults_to_vertical() {
    let screen: Screen = serde_json::from_value(json!({ "id": "home" })).unwrap();
    assert_eq!(screen.layout.orientation, Orientation::Vertical);
    assert!(screen.components.is_empty());
  }

  #[test]
  fn test_unknown_layout_type_passes_through() {
    let screen: Screen = serde_json::from_value(json!({
      "id": "dashboard",
      "layout": { "type": "grid", "spacing": "small" }
    }))
    .unwrap();

    assert_eq!(
      screen.layout.orientation,
      Orientation::Other("grid".to_string())
    );
    assert_eq!(screen.layout.spacing.as_deref(), Some("small"));

    let value = serde_json::to_value(&screen.layout).unwrap();
    assert_eq!(value["type"], "grid");
  }
}
