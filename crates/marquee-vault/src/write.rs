//! Note writer with create-if-absent semantics.

use std::{io::ErrorKind, path::Path};

use tokio::{fs::OpenOptions, io::AsyncWriteExt as _};

use crate::{Error, Result};

/// How a note write treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
  /// Exclusive create; an existing file is left untouched.
  CreateNew,
  /// Truncate and overwrite.
  Overwrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  Written,
  /// The file already existed under [`WriteMode::CreateNew`].
  Skipped,
}

/// Write `contents` to `path`.
///
/// Under [`WriteMode::CreateNew`] the existence check and the create are one
/// `O_CREAT|O_EXCL` open, so two writers racing for the same path produce
/// exactly one write. Only `AlreadyExists` becomes a skip; every other open
/// failure is an error.
pub async fn write_note(path: &Path, contents: &[u8], mode: WriteMode) -> Result<WriteOutcome> {
  let mut options = OpenOptions::new();
  options.write(true);
  match mode {
    WriteMode::CreateNew => options.create_new(true),
    WriteMode::Overwrite => options.create(true).truncate(true),
  };

  let mut file = match options.open(path).await {
    Ok(file) => file,
    Err(e) if mode == WriteMode::CreateNew && e.kind() == ErrorKind::AlreadyExists => {
      tracing::debug!(path = %path.display(), "note exists, skipping");
      return Ok(WriteOutcome::Skipped);
    }
    Err(e) => return Err(Error::io(path)(e)),
  };

  file.write_all(contents).await.map_err(Error::io(path))?;
  file.flush().await.map_err(Error::io(path))?;
  Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn create_new_skips_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.md");
    std::fs::write(&path, "hand edited").unwrap();

    let outcome = write_note(&path, b"generated", WriteMode::CreateNew).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Skipped);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hand edited");
  }

  #[tokio::test]
  async fn create_new_writes_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.md");

    let outcome = write_note(&path, b"generated", WriteMode::CreateNew).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "generated");
  }

  #[tokio::test]
  async fn overwrite_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.md");
    std::fs::write(&path, "a much longer hand edited note").unwrap();

    let outcome = write_note(&path, b"short", WriteMode::Overwrite).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
  }

  #[tokio::test]
  async fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("note.md");

    let err = write_note(&path, b"x", WriteMode::CreateNew).await.unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
