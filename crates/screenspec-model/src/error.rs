use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
  /// The requested screen is not part of the specification.
  #[error("screen not found: {0}")]
  ScreenNotFound(String),
}
