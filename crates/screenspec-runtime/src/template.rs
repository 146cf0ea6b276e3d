//! Text interpolation.
//!
//! Replaces `{{ key }}` tokens with bound values. Keys are looked up verbatim
//! (`{{ user.email }}` reads the `user.email` binding), there are no filters
//! or expressions, and unbound keys render as the empty string.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::state::Values;

static TOKEN_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{\{\s*([^}]+)\s*\}\}").expect("invalid template token regex"));

/// Render `template` against `values`.
pub fn interpolate(template: &str, values: &Values) -> String {
  TOKEN_REGEX
    .replace_all(template, |caps: &Captures| {
      let key = caps[1].trim();
      values.get(key).cloned().unwrap_or_default()
    })
    .into_owned()
}
