//! Rule engine.
//!
//! The [`RuleEngine`] runs the rule chain for one event on the active screen:
//!
//! 1. Select rules that are global or bound to the active screen and react to
//!    the event, in declaration order.
//! 2. For each rule whose guards all hold, run its steps in order.
//! 3. A failing `validate_fields` step with `stop_on_error` stops this rule
//!    *and every remaining rule* for the event.
//!
//! The engine works on a copy of the [`RuntimeState`] and hands it back in the
//! [`EventOutcome`]; committing it is the caller's job.

use screenspec_config::{Screen, StartOperationStep, Step, TextFieldSpec, ValidateFieldsStep};
use screenspec_model::{Rule, Specification};
use tracing::{debug, warn};

use crate::condition::evaluate_all;
use crate::dispatch::{OperationDispatcher, OperationRequest};
use crate::error::RuntimeError;
use crate::navigation::navigate;
use crate::state::RuntimeState;
use crate::validate::validate_field;

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
  /// Working state after every executed step.
  pub state: RuntimeState,
  /// Number of rules that matched the event (before guards).
  pub matched_rules: usize,
  /// Whether a step navigated to another screen.
  pub navigated: bool,
  /// Whether a failed validation aborted the rule chain.
  pub halted: bool,
}

/// How a rule's step sequence ended.
enum RuleFlow {
  Completed,
  /// Abort every remaining rule for this event.
  HaltAll,
}

/// Runs rule chains against a locked specification.
pub struct RuleEngine<'a> {
  spec: &'a Specification,
  dispatcher: &'a dyn OperationDispatcher,
}

impl<'a> RuleEngine<'a> {
  pub fn new(spec: &'a Specification, dispatcher: &'a dyn OperationDispatcher) -> Self {
    Self { spec, dispatcher }
  }

  /// Handle `event_name` on the state's active screen.
  ///
  /// Fails only when the active screen does not exist.
  pub fn handle_event(
    &self,
    state: &RuntimeState,
    event_name: &str,
  ) -> Result<EventOutcome, RuntimeError> {
    let screen = self.spec.find_screen(&state.active_screen)?;
    let rules: Vec<&Rule> = self.spec.rules_for_event(&screen.id, event_name).collect();

    if rules.is_empty() {
      warn!(event = %event_name, screen_id = %screen.id, "no rules for event");
      return Ok(EventOutcome {
        state: state.clone(),
        matched_rules: 0,
        navigated: false,
        halted: false,
      });
    }

    let mut working = state.clone();
    let mut navigated = false;
    let mut halted = false;

    for rule in &rules {
      if !evaluate_all(&rule.when, &working.values) {
        debug!(rule_id = %rule.id, "guard not satisfied, skipping rule");
        continue;
      }

      let flow = self.run_steps(rule, screen, &mut working, &mut navigated);
      if let RuleFlow::HaltAll = flow {
        debug!(rule_id = %rule.id, event = %event_name, "validation failed, halting rule chain");
        halted = true;
        break;
      }
    }

    Ok(EventOutcome {
      state: working,
      matched_rules: rules.len(),
      navigated,
      halted,
    })
  }

  /// Run a rule's steps in order against `screen`, the screen that was active
  /// when the event arrived.
  fn run_steps(
    &self,
    rule: &Rule,
    screen: &Screen,
    working: &mut RuntimeState,
    navigated: &mut bool,
  ) -> RuleFlow {
    for step in &rule.steps {
      match step {
        Step::ValidateFields(step) => {
          let has_errors = validate_fields(step, screen, working);
          if has_errors && step.stop_on_error {
            return RuleFlow::HaltAll;
          }
        }
        Step::StartOperation(step) => {
          if self.start_operation(rule, step, screen, working) {
            *navigated = true;
          }
        }
        Step::Unsupported => {
          warn!(rule_id = %rule.id, "unsupported step type, skipping");
        }
      }
    }
    RuleFlow::Completed
  }

  /// Dispatch the operation and follow its success event.
  fn start_operation(
    &self,
    rule: &Rule,
    step: &StartOperationStep,
    screen: &Screen,
    working: &mut RuntimeState,
  ) -> bool {
    debug!(rule_id = %rule.id, operation = %step.operation, "starting operation");

    self.dispatcher.dispatch(OperationRequest {
      screen_id: screen.id.clone(),
      rule_id: rule.id.clone(),
      operation: step.operation.clone(),
      params: step.params.clone(),
      success_event: step.success_event.clone(),
      error_event: step.error_event.clone(),
    });

    match &step.success_event {
      Some(event) => navigate(self.spec, working, event, &screen.id),
      None => false,
    }
  }
}

/// Validate the listed fields, recording or clearing each field's error.
/// Returns whether any field failed.
fn validate_fields(step: &ValidateFieldsStep, screen: &Screen, working: &mut RuntimeState) -> bool {
  let mut has_errors = false;

  for key in &step.fields {
    let Some(field) = find_text_field(screen, key) else {
      warn!(field = %key, screen_id = %screen.id, "no text field bound to key, skipping");
      continue;
    };

    let error = validate_field(field, working.value(key));
    has_errors |= error.is_some();
    working.set_error(key, error);
  }

  has_errors
}

/// The text field on `screen` whose binding key is `key`.
fn find_text_field<'s>(screen: &'s Screen, key: &str) -> Option<&'s TextFieldSpec> {
  screen
    .components
    .iter()
    .filter(|c| c.binding_key() == key)
    .find_map(|c| c.as_text_field())
}
