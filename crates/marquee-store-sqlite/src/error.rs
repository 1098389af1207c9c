//! Error type for `marquee-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] marquee_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("could not create database directory: {0}")]
  Io(#[from] std::io::Error),

  #[error("movie not found: {0}")]
  MovieNotFound(uuid::Uuid),

  #[error("movie watch not found: {0}")]
  WatchNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
