//! Field validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! required, minimum length, email format, password length.

use std::sync::LazyLock;

use regex::Regex;
use screenspec_config::{DataType, TextFieldSpec};

/// Minimum length for `password` fields.
const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("invalid email regex"));

/// Validate a raw value against a text field's constraints.
///
/// Returns the user-facing error message for the first failing check.
pub fn validate_field(field: &TextFieldSpec, value: &str) -> Option<String> {
  if field.required && value.trim().is_empty() {
    return Some("Este campo es requerido".to_string());
  }

  let length = value.chars().count();

  if let Some(min_length) = field.validations.min_length
    && !value.is_empty()
    && length < min_length
  {
    return Some(format!("Debe tener al menos {} caracteres", min_length));
  }

  match field.data_type {
    DataType::Email if !value.is_empty() && !EMAIL_REGEX.is_match(value) => {
      Some("Correo electrónico inválido".to_string())
    }
    DataType::Password if !value.is_empty() && length < PASSWORD_MIN_LENGTH => Some(format!(
      "La contraseña debe tener al menos {} caracteres",
      PASSWORD_MIN_LENGTH
    )),
    _ => None,
  }
}
