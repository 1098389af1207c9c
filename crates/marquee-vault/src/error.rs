//! Error type for `marquee-vault`.

use std::path::PathBuf;

use marquee_core::ImdbId;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{}: {source}", path.display())]
  Note {
    path:   PathBuf,
    #[source]
    source: marquee_notes::Error,
  },

  #[error("metadata lookup failed: {0}")]
  Metadata(#[from] marquee_omdb::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("{}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("no movie with imdb id {0} in the store")]
  MovieNotFound(ImdbId),

  #[error("movie {0} vanished while building the vault")]
  MovieMissing(Uuid),

  #[error("{} is not inside a vault directory", .0.display())]
  NotInVault(PathBuf),

  #[error("build task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub(crate) fn note(
    path: impl Into<PathBuf>,
  ) -> impl FnOnce(marquee_notes::Error) -> Self {
    let path = path.into();
    move |source| Self::Note { path, source }
  }

  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
