//! Process-wide settings, read once at start-up.
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file, then the environment (after `.env` has been loaded).

use std::path::{Path, PathBuf};

use marquee_store_sqlite::DEFAULT_DATABASE_PATH;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("{0} is not set")]
  Missing(&'static str),

  #[error("invalid configuration: {0}")]
  Config(#[from] config::ConfigError),
}

/// Missing keys read as empty strings and fail when a flow asks for them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub database:          PathBuf,
  #[serde(default)]
  pub omdb_key:          String,
  #[serde(default)]
  pub grist_key:         String,
  #[serde(default)]
  pub grist_document_id: String,
}

impl Settings {
  pub fn load(config_file: &Path) -> Result<Self, SettingsError> {
    Self::load_with(config_file, config::Environment::default())
  }

  fn load_with(
    config_file: &Path,
    environment: config::Environment,
  ) -> Result<Self, SettingsError> {
    let settings = config::Config::builder()
      .set_default("database", DEFAULT_DATABASE_PATH)?
      .add_source(config::File::from(config_file.to_path_buf()).required(false))
      .add_source(environment)
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn omdb_key(&self) -> Result<&str, SettingsError> {
    required(&self.omdb_key, "OMDB_KEY")
  }

  pub fn grist_key(&self) -> Result<&str, SettingsError> {
    required(&self.grist_key, "GRIST_KEY")
  }

  pub fn grist_document_id(&self) -> Result<&str, SettingsError> {
    required(&self.grist_document_id, "GRIST_DOCUMENT_ID")
  }

  /// Keys that would fail at point of use.
  pub fn missing_keys(&self) -> Vec<&'static str> {
    [
      self.omdb_key().err(),
      self.grist_key().err(),
      self.grist_document_id().err(),
    ]
    .into_iter()
    .flatten()
    .filter_map(|e| match e {
      SettingsError::Missing(key) => Some(key),
      SettingsError::Config(_) => None,
    })
    .collect()
  }
}

fn required<'a>(value: &'a str, key: &'static str) -> Result<&'a str, SettingsError> {
  if value.is_empty() { Err(SettingsError::Missing(key)) } else { Ok(value) }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> config::Environment {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    config::Environment::default().source(Some(map))
  }

  #[test]
  fn defaults_apply_without_sources() {
    let dir = tempfile::tempdir().unwrap();
    let settings =
      Settings::load_with(&dir.path().join("absent.toml"), env(&[])).unwrap();
    assert_eq!(settings.database, PathBuf::from("./data/movies.db"));
    assert!(matches!(settings.omdb_key(), Err(SettingsError::Missing("OMDB_KEY"))));
    assert_eq!(settings.missing_keys(), vec![
      "OMDB_KEY",
      "GRIST_KEY",
      "GRIST_DOCUMENT_ID"
    ]);
  }

  #[test]
  fn environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("marquee.toml");
    std::fs::write(&file, "database = \"/srv/movies.db\"\nomdb_key = \"from-file\"\n")
      .unwrap();

    let settings = Settings::load_with(&file, env(&[("OMDB_KEY", "from-env")])).unwrap();
    assert_eq!(settings.database, PathBuf::from("/srv/movies.db"));
    assert_eq!(settings.omdb_key().unwrap(), "from-env");
    assert_eq!(settings.missing_keys(), vec!["GRIST_KEY", "GRIST_DOCUMENT_ID"]);
  }
}
