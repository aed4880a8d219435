//! Layered pipeline configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file given
//! with `--config`, `RECOUNT_*` environment variables, CLI flags (applied
//! by the caller after [`load`]).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Resolved pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Directory holding `logon.csv`, `device.csv`, and `http.csv`.
  pub data_dir: PathBuf,
  /// Directory of role-directory CSV exports.
  /// Defaults to `<data_dir>/ldap` when unset.
  pub ldap_dir: Option<PathBuf>,
  /// Output CSV path.
  pub output:   PathBuf,
}

impl Settings {
  pub fn ldap_dir(&self) -> PathBuf {
    self
      .ldap_dir
      .clone()
      .unwrap_or_else(|| self.data_dir.join("ldap"))
  }
}

/// Load settings from defaults, an optional TOML file, and the environment.
pub fn load(config_file: Option<&Path>) -> anyhow::Result<Settings> {
  let mut builder = config::Config::builder()
    .set_default("data_dir", "data/raw/r1")?
    .set_default("output", "data/processed/r1/daily_user_narratives.csv")?;

  if let Some(path) = config_file {
    builder =
      builder.add_source(config::File::from(path.to_path_buf()).required(true));
  }

  let settings = builder
    .add_source(config::Environment::with_prefix("RECOUNT"))
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise settings")
}
