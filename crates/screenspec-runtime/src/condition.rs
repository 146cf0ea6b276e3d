//! Guard condition evaluation.

use screenspec_config::{Comparator, Condition};
use tracing::warn;

use crate::state::Values;

/// Evaluate a single guard condition against the current values.
///
/// Comparators this version does not implement evaluate to `true` so that
/// documents written for newer interpreters keep working.
pub fn evaluate_condition(condition: &Condition, values: &Values) -> bool {
  let current = values
    .get(&condition.field)
    .map(String::as_str)
    .unwrap_or("");

  match &condition.comparator {
    Comparator::IsNotEmpty => !current.trim().is_empty(),
    Comparator::IsEmpty => current.trim().is_empty(),
    Comparator::Other(name) => {
      warn!(
        comparator = %name,
        field = %condition.field,
        "unsupported comparator, treating condition as true"
      );
      true
    }
  }
}

/// Evaluate guard conditions with AND semantics, stopping at the first
/// failure. An empty list holds.
pub fn evaluate_all(conditions: &[Condition], values: &Values) -> bool {
  conditions.iter().all(|c| evaluate_condition(c, values))
}
