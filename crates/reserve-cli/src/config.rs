//! Layered settings: defaults, then the TOML file, then `RESERVE_*`
//! environment variables. Command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use reserve_core::store::DEFAULT_KEY;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite file holding the candidate collection. A leading `~/` is
  /// expanded.
  pub store_path:  PathBuf,
  /// Storage key the collection lives under.
  pub storage_key: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:  PathBuf::from("~/.local/share/reserve/reserve.sqlite3"),
      storage_key: DEFAULT_KEY.to_owned(),
    }
  }
}

impl Settings {
  /// Read `file` (optional) and the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("RESERVE"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
