//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid imdb id: {0:?}")]
  InvalidImdbId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
