//! Bundle loading.
//!
//! A bundle is a directory holding `bundle.json` and its base64 image assets
//! (usually under `images_base64/`), or a bare document file whose assets
//! live next to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use screenspec_config::SpecificationDocument;
use screenspec_model::Specification;
use screenspec_resolver::{Resolver, StandardResolver};
use screenspec_runtime::AssetRegistry;
use tracing::info;

/// Document file name inside a bundle directory.
const DOCUMENT_FILE: &str = "bundle.json";

/// A loaded and resolved bundle.
pub struct Bundle {
  pub spec: Arc<Specification>,
  pub assets: Arc<AssetRegistry>,
}

/// Locate a bundle given on the command line.
///
/// Paths that do not exist as given are looked up under
/// `<data_dir>/bundles/`.
pub fn locate(bundle: &Path, data_dir: &Path) -> PathBuf {
  if bundle.exists() || bundle.is_absolute() {
    bundle.to_path_buf()
  } else {
    data_dir.join("bundles").join(bundle)
  }
}

/// Directory holding the assets of a bare document file.
///
/// A relative file name has an empty parent, which means the current
/// directory.
fn asset_root(document_path: &Path) -> PathBuf {
  document_path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or(Path::new("."))
    .to_path_buf()
}

/// Read, parse and resolve a bundle, eagerly loading its assets.
///
/// A bundle directory is scanned in full. For a bare document file only the
/// asset locations next to it are read.
pub async fn load(path: &Path, initial_screen: Option<String>) -> Result<Bundle> {
  let is_dir = tokio::fs::metadata(path)
    .await
    .with_context(|| format!("bundle not found: {}", path.display()))?
    .is_dir();

  let document_path = if is_dir {
    path.join(DOCUMENT_FILE)
  } else {
    path.to_path_buf()
  };

  let content = tokio::fs::read_to_string(&document_path)
    .await
    .with_context(|| format!("failed to read bundle document: {}", document_path.display()))?;

  let document: SpecificationDocument = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse bundle document: {}", document_path.display()))?;

  let resolver = match initial_screen {
    Some(screen) => StandardResolver::with_initial_screen(screen),
    None => StandardResolver::new(),
  };
  let spec = resolver
    .resolve(document)
    .context("failed to resolve specification")?;

  let assets = if is_dir {
    AssetRegistry::load_dir(path).await
  } else {
    AssetRegistry::load_candidates(asset_root(path)).await
  }
  .context("failed to load bundle assets")?;

  info!(
    bundle = %path.display(),
    screens = spec.screens.len(),
    rules = spec.rules.len(),
    transitions = spec.transitions.len(),
    assets = assets.len(),
    "bundle loaded"
  );

  Ok(Bundle {
    spec: Arc::new(spec),
    assets: Arc::new(assets),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const DOCUMENT: &str = r#"{
    "screens": [
      { "id": "login", "components": [{ "id": "logo", "type": "image", "file": "logo.b64.txt" }] },
      { "id": "home", "components": [] }
    ],
    "transitions": [{ "id": "t", "event": "login.ok", "from": "login", "to": "home" }]
  }"#;

  #[tokio::test]
  async fn test_load_bundle_directory() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp_dir.path().join(DOCUMENT_FILE), DOCUMENT).unwrap();
    std::fs::create_dir_all(temp_dir.path().join("images_base64")).unwrap();
    std::fs::write(
      temp_dir.path().join("images_base64/logo.b64.txt"),
      "TE9HTw==",
    )
    .unwrap();

    let bundle = load(temp_dir.path(), None).await.unwrap();

    assert_eq!(bundle.spec.initial_screen, "login");
    assert_eq!(bundle.assets.len(), 1);
  }

  #[tokio::test]
  async fn test_load_document_file_with_initial_screen() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("forms.json");
    std::fs::write(&path, DOCUMENT).unwrap();

    let bundle = load(&path, Some("home".to_string())).await.unwrap();

    assert_eq!(bundle.spec.initial_screen, "home");
    assert!(bundle.assets.is_empty());
  }

  #[tokio::test]
  async fn test_load_invalid_document() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "screens": [{ "id": "a" }, { "id": "a" }] }"#).unwrap();

    let err = load(&path, None).await.err().unwrap();
    assert!(format!("{:#}", err).contains("duplicate screen id: a"));
  }

  #[test]
  fn test_asset_root_of_relative_file_is_current_dir() {
    assert_eq!(asset_root(Path::new("forms.json")), PathBuf::from("."));
    assert_eq!(
      asset_root(Path::new("bundles/forms.json")),
      PathBuf::from("bundles")
    );
  }

  #[tokio::test]
  async fn test_load_document_file_reads_sibling_assets() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("forms.json");
    std::fs::write(&path, DOCUMENT).unwrap();
    std::fs::write(temp_dir.path().join("logo.b64.txt"), "TE9HTw==").unwrap();
    std::fs::create_dir_all(temp_dir.path().join("unrelated/deep")).unwrap();
    std::fs::write(temp_dir.path().join("unrelated/deep/x.b64.txt"), "WA==").unwrap();

    let bundle = load(&path, None).await.unwrap();

    assert_eq!(bundle.assets.len(), 1);
    assert_eq!(bundle.assets.get("logo.b64.txt"), Some("TE9HTw=="));
  }

  #[test]
  fn test_locate_relative_bundle_under_data_dir() {
    let data_dir = Path::new("/var/lib/screenspec");
    assert_eq!(
      locate(Path::new("caja-v1"), data_dir),
      PathBuf::from("/var/lib/screenspec/bundles/caja-v1")
    );
  }
}
