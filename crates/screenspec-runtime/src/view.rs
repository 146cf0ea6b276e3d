//! Render-ready snapshots.
//!
//! A [`Snapshot`] is everything a rendering layer needs to paint the active
//! screen: ordered component views with interpolated text, resolved image
//! payloads and each field's value and error.

use screenspec_config::{Component, ComponentKind, DataType, Layout, Screen, TableColumn};
use serde::{Deserialize, Serialize};

use crate::asset::AssetRegistry;
use crate::state::{Errors, RuntimeState, Values};
use crate::template::interpolate;

/// Spacer height when the document does not set one.
const DEFAULT_SPACER_HEIGHT: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub screen_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  pub layout: Layout,
  pub components: Vec<ComponentView>,
  pub values: Values,
  pub errors: Errors,
}

impl Snapshot {
  pub(crate) fn build(screen: &Screen, state: &RuntimeState, assets: &AssetRegistry) -> Self {
    Self {
      screen_id: screen.id.clone(),
      title: screen.title.clone(),
      layout: screen.layout.clone(),
      components: screen
        .components
        .iter()
        .map(|c| ComponentView::build(c, state, assets))
        .collect(),
      values: state.values.clone(),
      errors: state.errors.clone(),
    }
  }

  /// Get a component view by ID.
  pub fn component(&self, component_id: &str) -> Option<&ComponentView> {
    self.components.iter().find(|c| c.id() == component_id)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentView {
  Image {
    id: String,
    /// Displayable payload; empty when the image could not be resolved.
    src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fit_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
  },
  TextField {
    id: String,
    binding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Mask input (password fields).
    secure: bool,
  },
  Button {
    id: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<String>,
  },
  Text {
    id: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    align: Option<String>,
  },
  Spacer {
    id: String,
    height: u32,
  },
  Table {
    id: String,
    columns: Vec<TableColumn>,
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
  },
  Unsupported {
    id: String,
  },
}

impl ComponentView {
  fn build(component: &Component, state: &RuntimeState, assets: &AssetRegistry) -> Self {
    let id = component.id.clone();
    match &component.kind {
      ComponentKind::Image(image) => ComponentView::Image {
        id,
        src: assets.resolve_image(image),
        fit_mode: image.fit_mode.clone(),
        size: image.size.clone(),
      },
      ComponentKind::TextField(field) => {
        let binding = component.binding_key();
        ComponentView::TextField {
          binding: binding.to_string(),
          label: field.label.clone(),
          placeholder: field.placeholder.clone(),
          value: state.value(binding).to_string(),
          error: state.errors.get(binding).cloned(),
          secure: field.data_type == DataType::Password,
          id,
        }
      }
      ComponentKind::Button(button) => ComponentView::Button {
        id,
        text: button.text.clone(),
        icon: button.icon.clone(),
        style: button.style.clone(),
        width: button.width.clone(),
      },
      ComponentKind::Text(text) => ComponentView::Text {
        id,
        text: interpolate(&text.text, &state.values),
        text_variant: text.text_variant.clone(),
        align: text.align.clone(),
      },
      ComponentKind::Spacer(spacer) => ComponentView::Spacer {
        id,
        height: spacer.height.unwrap_or(DEFAULT_SPACER_HEIGHT),
      },
      ComponentKind::Table(table) => ComponentView::Table {
        id,
        columns: table.columns.clone(),
        rows: table.rows.clone(),
      },
      ComponentKind::Unknown => ComponentView::Unsupported { id },
    }
  }

  pub fn id(&self) -> &str {
    match self {
      ComponentView::Image { id, .. }
      | ComponentView::TextField { id, .. }
      | ComponentView::Button { id, .. }
      | ComponentView::Text { id, .. }
      | ComponentView::Spacer { id, .. }
      | ComponentView::Table { id, .. }
      | ComponentView::Unsupported { id } => id,
    }
  }
}
