//! Runtime error types.

use std::path::PathBuf;

use screenspec_model::SpecError;

/// Errors that abort a runtime operation.
///
/// Everything else the interpreter runs into (unmatched events, unknown
/// steps or comparators, missing assets) is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// A screen lookup failed.
  #[error(transparent)]
  Spec(#[from] SpecError),

  /// Failed to read an asset from disk.
  #[error("failed to load asset '{}': {source}", path.display())]
  AssetLoad {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
