use serde::{Deserialize, Serialize};

/// A component on a screen.
///
/// The `type` tag selects the [`ComponentKind`]; any tag this version does not
/// know deserializes to [`ComponentKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
  pub id: String,
  #[serde(flatten)]
  pub kind: ComponentKind,
}

impl Component {
  /// Key used to read and write this component's value in the value store.
  ///
  /// A text field's `data_model` when present, otherwise the component id.
  pub fn binding_key(&self) -> &str {
    match &self.kind {
      ComponentKind::TextField(field) => field.data_model.as_deref().unwrap_or(&self.id),
      _ => &self.id,
    }
  }

  pub fn as_text_field(&self) -> Option<&TextFieldSpec> {
    match &self.kind {
      ComponentKind::TextField(field) => Some(field),
      _ => None,
    }
  }

  pub fn as_image(&self) -> Option<&ImageSpec> {
    match &self.kind {
      ComponentKind::Image(image) => Some(image),
      _ => None,
    }
  }

  pub fn is_button(&self) -> bool {
    matches!(self.kind, ComponentKind::Button(_))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
  Image(ImageSpec),
  TextField(TextFieldSpec),
  Button(ButtonSpec),
  Text(TextSpec),
  Spacer(SpacerSpec),
  Table(TableSpec),
  /// A component type this interpreter does not know how to render.
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSpec {
  /// Inline `data:` payload, a `.b64.txt` asset path, or raw base64 content.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fit_mode: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFieldSpec {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub placeholder: Option<String>,
  /// Binding key into the value store.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data_model: Option<String>,
  pub data_type: DataType,
  pub required: bool,
  pub validations: Validations,
}

/// Data type hint for a text field. Drives type-specific validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
  Email,
  Password,
  #[default]
  #[serde(rename = "string")]
  Text,
  /// Any other hint, kept verbatim. No format check applies.
  #[serde(untagged)]
  Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Validations {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSpec {
  pub text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub width: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSpec {
  /// Template text; `{{ key }}` tokens are replaced with bound values.
  pub text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text_variant: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub align: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacerSpec {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSpec {
  pub columns: Vec<TableColumn>,
  pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
  pub id: String,
  #[serde(default)]
  pub title: String,
}
