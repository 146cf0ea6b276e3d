//! Image asset resolution.
//!
//! Image components reference their picture in one of three ways:
//! - an inline `data:` payload, used as is
//! - a `*.b64.txt` file shipped with the bundle, looked up in the
//!   [`AssetRegistry`]
//! - raw base64 content, wrapped into a PNG payload
//!
//! The registry is loaded eagerly when the bundle is opened so resolution
//! never touches the filesystem.

use std::collections::HashMap;
use std::path::Path;

use screenspec_config::ImageSpec;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::RuntimeError;

/// Suffix of base64 text assets.
const BASE64_SUFFIX: &str = ".b64.txt";

/// Prefix of an already displayable inline payload.
const DATA_URI_PREFIX: &str = "data:";

/// Header prepended to base64 image content.
const PNG_PAYLOAD_HEADER: &str = "data:image/png;base64,";

/// Conventional asset directory inside a bundle.
const IMAGES_DIR: &str = "images_base64";

/// Directories, relative to the bundle root, searched for a referenced asset.
const CANDIDATE_DIRS: &[&str] = &["", "images_base64/"];

/// Static registry of base64 text assets, keyed by path relative to the
/// bundle root using `/` separators (e.g. `images_base64/logo.b64.txt`).
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
  assets: HashMap<String, String>,
}

impl AssetRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a registry from `(path, content)` pairs.
  pub fn from_entries<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      assets: entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }

  /// Eagerly load every `*.b64.txt` file below `root`.
  pub async fn load_dir(root: impl AsRef<Path>) -> Result<Self, RuntimeError> {
    let root = root.as_ref();
    let mut registry = Self::new();

    if !fs::try_exists(root).await.unwrap_or(false) {
      debug!(root = %root.display(), "asset directory missing, registry empty");
      return Ok(registry);
    }

    registry.load_from(root, root, true).await?;
    debug!(root = %root.display(), assets = registry.len(), "assets loaded");
    Ok(registry)
  }

  /// Load only the locations image references resolve against: the
  /// `*.b64.txt` files directly in `root` and everything below
  /// `root/images_base64/`.
  ///
  /// Used when `root` is not a dedicated bundle directory, so unrelated
  /// subdirectories are never walked.
  pub async fn load_candidates(root: impl AsRef<Path>) -> Result<Self, RuntimeError> {
    let root = root.as_ref();
    let mut registry = Self::new();

    if !fs::try_exists(root).await.unwrap_or(false) {
      debug!(root = %root.display(), "asset directory missing, registry empty");
      return Ok(registry);
    }

    registry.load_from(root, root, false).await?;

    let images_dir = root.join(IMAGES_DIR);
    if fs::try_exists(&images_dir).await.unwrap_or(false) {
      registry.load_from(root, &images_dir, true).await?;
    }

    debug!(root = %root.display(), assets = registry.len(), "candidate assets loaded");
    Ok(registry)
  }

  async fn load_from(
    &mut self,
    root: &Path,
    dir: &Path,
    recursive: bool,
  ) -> Result<(), RuntimeError> {
    let io_err = |path: &Path| {
      let path = path.to_path_buf();
      move |source: std::io::Error| RuntimeError::AssetLoad { path, source }
    };

    let mut entries = fs::read_dir(dir).await.map_err(io_err(dir))?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err(dir))? {
      let path = entry.path();
      let file_type = entry.file_type().await.map_err(io_err(&path))?;

      if file_type.is_dir() {
        if recursive {
          Box::pin(self.load_from(root, &path, true)).await?;
        }
        continue;
      }

      let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        continue;
      };
      if !name.ends_with(BASE64_SUFFIX) {
        continue;
      }

      let Some(key) = relative_key(root, &path) else {
        continue;
      };
      let content = fs::read_to_string(&path).await.map_err(io_err(&path))?;
      self.assets.insert(key, content);
    }

    Ok(())
  }

  pub fn insert(&mut self, key: impl Into<String>, content: impl Into<String>) {
    self.assets.insert(key.into(), content.into());
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.assets.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.assets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  /// Resolve an image component to a displayable payload.
  ///
  /// Returns an empty string when there is nothing to show; the rendering
  /// layer displays that as an absent image.
  pub fn resolve_image(&self, image: &ImageSpec) -> String {
    let Some(file) = image.file.as_deref().filter(|f| !f.is_empty()) else {
      return String::new();
    };

    if file.starts_with(DATA_URI_PREFIX) {
      return file.to_string();
    }

    if file.ends_with(BASE64_SUFFIX) {
      let file = file.strip_prefix("./").unwrap_or(file);
      let found = CANDIDATE_DIRS
        .iter()
        .filter_map(|dir| self.get(&format!("{}{}", dir, file)))
        .find(|content| !content.trim().is_empty());

      return match found {
        Some(content) => format!("{}{}", PNG_PAYLOAD_HEADER, content.trim()),
        None => {
          warn!(file = %file, "base64 asset not found");
          String::new()
        }
      };
    }

    format!("{}{}", PNG_PAYLOAD_HEADER, file)
  }
}

/// Registry key for `path` under `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
  let relative = path.strip_prefix(root).ok()?;
  let parts: Option<Vec<&str>> = relative.iter().map(|p| p.to_str()).collect();
  Some(parts?.join("/"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn image(file: Option<&str>) -> ImageSpec {
    ImageSpec {
      file: file.map(str::to_string),
      ..Default::default()
    }
  }

  #[test]
  fn test_data_uri_passes_through() {
    let registry = AssetRegistry::new();
    let uri = "data:image/jpeg;base64,AAAA";
    assert_eq!(registry.resolve_image(&image(Some(uri))), uri);
  }

  #[test]
  fn test_base64_file_in_images_dir() {
    let registry =
      AssetRegistry::from_entries([("images_base64/logo.b64.txt", "iVBORw0KGgo=\n")]);
    assert_eq!(
      registry.resolve_image(&image(Some("logo.b64.txt"))),
      "data:image/png;base64,iVBORw0KGgo="
    );
  }

  #[test]
  fn test_base64_file_at_root_wins() {
    let registry = AssetRegistry::from_entries([
      ("logo.b64.txt", "ROOT"),
      ("images_base64/logo.b64.txt", "NESTED"),
    ]);
    assert_eq!(
      registry.resolve_image(&image(Some("./logo.b64.txt"))),
      "data:image/png;base64,ROOT"
    );
  }

  #[test]
  fn test_missing_base64_file_resolves_empty() {
    let registry = AssetRegistry::new();
    assert_eq!(registry.resolve_image(&image(Some("missing.b64.txt"))), "");
  }

  #[test]
  fn test_raw_base64_is_wrapped() {
    let registry = AssetRegistry::new();
    assert_eq!(
      registry.resolve_image(&image(Some("R0lGODlh"))),
      "data:image/png;base64,R0lGODlh"
    );
  }

  #[test]
  fn test_no_file_resolves_empty() {
    assert_eq!(AssetRegistry::new().resolve_image(&image(None)), "");
  }

  #[test]
  fn test_empty_file_reference_resolves_empty() {
    assert_eq!(AssetRegistry::new().resolve_image(&image(Some(""))), "");
  }

  #[test]
  fn test_empty_asset_content_resolves_empty() {
    let registry = AssetRegistry::from_entries([("images_base64/empty.b64.txt", "")]);
    assert_eq!(registry.resolve_image(&image(Some("empty.b64.txt"))), "");
  }

  #[test]
  fn test_empty_asset_falls_through_to_next_candidate() {
    let registry = AssetRegistry::from_entries([
      ("logo.b64.txt", "\n"),
      ("images_base64/logo.b64.txt", "NESTED"),
    ]);
    assert_eq!(
      registry.resolve_image(&image(Some("logo.b64.txt"))),
      "data:image/png;base64,NESTED"
    );
  }
}
