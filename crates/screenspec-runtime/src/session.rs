//! Interpreter sessions.
//!
//! A [`Session`] owns the runtime state for one user working through a
//! specification. It is driven by exactly two notifications, a field edit
//! and an action, plus the id-based [`Request`] surface hosts use to forward
//! view events.

use std::sync::Arc;

use screenspec_config::{Component, Screen};
use screenspec_model::Specification;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::asset::AssetRegistry;
use crate::dispatch::{NoopDispatcher, OperationDispatcher};
use crate::engine::RuleEngine;
use crate::error::RuntimeError;
use crate::state::RuntimeState;
use crate::validate::validate_field;
use crate::view::Snapshot;

/// Configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
  /// Screen to start on instead of the specification's initial screen.
  pub initial_screen: Option<String>,
}

/// A view event forwarded by a host, addressed by ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
  /// Return the current snapshot.
  View,
  InputChange {
    screen_id: String,
    field_id: String,
    value: String,
  },
  ButtonClick {
    screen_id: String,
    button_id: String,
  },
}

/// One interpreter session over a shared specification.
pub struct Session {
  id: String,
  spec: Arc<Specification>,
  assets: Arc<AssetRegistry>,
  dispatcher: Arc<dyn OperationDispatcher>,
  state: RuntimeState,
}

impl Session {
  /// Start a session on the configured initial screen.
  ///
  /// Fails if that screen does not exist.
  pub fn new(
    spec: Arc<Specification>,
    assets: Arc<AssetRegistry>,
    config: SessionConfig,
  ) -> Result<Self, RuntimeError> {
    let initial_screen = config
      .initial_screen
      .unwrap_or_else(|| spec.initial_screen.clone());
    spec.find_screen(&initial_screen)?;

    let id = uuid::Uuid::new_v4().to_string();
    info!(session_id = %id, screen_id = %initial_screen, "session_started");

    Ok(Self {
      id,
      spec,
      assets,
      dispatcher: Arc::new(NoopDispatcher),
      state: RuntimeState::new(initial_screen),
    })
  }

  /// Route `start_operation` steps to `dispatcher`.
  pub fn with_dispatcher(mut self, dispatcher: Arc<dyn OperationDispatcher>) -> Self {
    self.dispatcher = dispatcher;
    self
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn state(&self) -> &RuntimeState {
    &self.state
  }

  pub fn specification(&self) -> &Specification {
    &self.spec
  }

  /// Look up a screen of the session's specification.
  pub fn find_screen(&self, screen_id: &str) -> Result<&Screen, RuntimeError> {
    Ok(self.spec.find_screen(screen_id)?)
  }

  pub fn active_screen(&self) -> Result<&Screen, RuntimeError> {
    self.find_screen(&self.state.active_screen)
  }

  /// A field was edited: store the value and re-validate that field alone.
  #[instrument(
    name = "session_field_change",
    skip(self, component, raw_value),
    fields(session_id = %self.id, component_id = %component.id)
  )]
  pub fn on_field_change(&mut self, component: &Component, raw_value: &str) {
    let Some(field) = component.as_text_field() else {
      warn!("field change on a component that is not a text field, ignoring");
      return;
    };

    let key = component.binding_key();
    self
      .state
      .values
      .insert(key.to_string(), raw_value.to_string());
    self.state.set_error(key, validate_field(field, raw_value));
  }

  /// An action component was triggered: run the `<id>.click` rule chain on
  /// the active screen and commit the result.
  #[instrument(
    name = "session_action",
    skip(self, component),
    fields(
      session_id = %self.id,
      screen_id = %self.state.active_screen,
      component_id = %component.id,
    )
  )]
  pub fn on_action_triggered(&mut self, component: &Component) -> Result<(), RuntimeError> {
    let event_name = format!("{}.click", component.id);

    let outcome =
      RuleEngine::new(&self.spec, self.dispatcher.as_ref()).handle_event(&self.state, &event_name)?;

    if outcome.navigated {
      info!(to = %outcome.state.active_screen, "screen changed");
    }
    self.state = outcome.state;
    Ok(())
  }

  /// Render-ready view of the active screen.
  pub fn snapshot(&self) -> Result<Snapshot, RuntimeError> {
    let screen = self.active_screen()?;
    Ok(Snapshot::build(screen, &self.state, &self.assets))
  }

  /// Apply a host request and return the resulting snapshot.
  ///
  /// The addressed screen must exist. Requests for a screen that is no
  /// longer active, or for a component of the wrong kind, are logged and
  /// leave the state untouched.
  #[instrument(name = "session_request", skip(self, request), fields(session_id = %self.id))]
  pub fn handle(&mut self, request: Request) -> Result<Snapshot, RuntimeError> {
    let spec = Arc::clone(&self.spec);

    match request {
      Request::View => {}
      Request::InputChange {
        screen_id,
        field_id,
        value,
      } => {
        if let Some(component) = self.request_target(&spec, &screen_id, &field_id)? {
          self.on_field_change(component, &value);
        }
      }
      Request::ButtonClick {
        screen_id,
        button_id,
      } => {
        if let Some(component) = self.request_target(&spec, &screen_id, &button_id)? {
          if component.is_button() {
            self.on_action_triggered(component)?;
          } else {
            warn!(component_id = %button_id, "click on a component that is not a button, ignoring");
          }
        }
      }
    }

    self.snapshot()
  }

  /// Component a request addresses, if it can be applied to the current
  /// state.
  fn request_target<'s>(
    &self,
    spec: &'s Specification,
    screen_id: &str,
    component_id: &str,
  ) -> Result<Option<&'s Component>, RuntimeError> {
    let screen = spec.find_screen(screen_id)?;

    if screen.id != self.state.active_screen {
      warn!(
        screen_id = %screen_id,
        active_screen = %self.state.active_screen,
        "request for inactive screen, ignoring"
      );
      return Ok(None);
    }

    let component = screen.component(component_id);
    if component.is_none() {
      warn!(screen_id = %screen_id, component_id = %component_id, "component not found, ignoring");
    }
    Ok(component)
  }
}
