//! Vault directory conventions.
//!
//! ```text
//! <vault>/
//!   Watches/<YYYY-MM-DD> <FileTitle>.md
//!   Movies/<FileTitle> (tt1234567).md
//!   Reviews/<FileTitle> (tt1234567).md
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use marquee_core::{ImdbId, normalize_title};

use crate::{Error, Result};

pub const WATCHES_DIR: &str = "Watches";
pub const MOVIES_DIR: &str = "Movies";
pub const REVIEWS_DIR: &str = "Reviews";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
  root: PathBuf,
}

impl VaultLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  /// The vault holding `note`, taken to be two directories above it
  /// (`<vault>/Watches/<note>.md`).
  pub fn containing(note: &Path) -> Result<Self> {
    let root = note
      .parent()
      .and_then(Path::parent)
      .ok_or_else(|| Error::NotInVault(note.to_path_buf()))?;
    let root = if root.as_os_str().is_empty() { Path::new(".") } else { root };
    Ok(Self::new(root))
  }

  pub fn root(&self) -> &Path { &self.root }

  pub fn watches_dir(&self) -> PathBuf { self.root.join(WATCHES_DIR) }

  pub fn movies_dir(&self) -> PathBuf { self.root.join(MOVIES_DIR) }

  pub fn reviews_dir(&self) -> PathBuf { self.root.join(REVIEWS_DIR) }

  /// `Watches/<watched> <FileTitle>.md`
  pub fn watch_note_path(&self, watched: NaiveDate, title: &str) -> PathBuf {
    self.watches_dir().join(format!(
      "{} {}.md",
      watched.format("%Y-%m-%d"),
      normalize_title(title)
    ))
  }

  /// `Movies/<FileTitle> (<imdb_id>).md`
  pub fn movie_note_path(&self, title: &str, imdb_id: &ImdbId) -> PathBuf {
    self
      .movies_dir()
      .join(format!("{} ({imdb_id}).md", normalize_title(title)))
  }

  /// `Reviews/<FileTitle> (<imdb_id>).md`
  pub fn review_note_path(&self, title: &str, imdb_id: &ImdbId) -> PathBuf {
    self
      .reviews_dir()
      .join(format!("{} ({imdb_id}).md", normalize_title(title)))
  }

  /// Create `Watches/` and `Movies/` if they are missing.
  pub async fn ensure_dirs(&self) -> Result<()> {
    for dir in [self.watches_dir(), self.movies_dir()] {
      tokio::fs::create_dir_all(&dir).await.map_err(Error::io(&dir))?;
    }
    Ok(())
  }
}

/// The first whitespace-separated token of a watch note's file name, which
/// by convention is its `YYYY-MM-DD` watch date.
pub fn date_prefix(file_name: &str) -> &str {
  file_name.split_whitespace().next().unwrap_or("")
}
