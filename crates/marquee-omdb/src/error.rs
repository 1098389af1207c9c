//! Error type for `marquee-omdb`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unparsable runtime: {0:?}")]
  UnparsableRuntime(String),

  #[error("unparsable release date: {0:?}")]
  UnparsableReleased(String),

  #[error("unparsable year: {0:?}")]
  UnparsableYear(String),

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("metadata API returned {status} for {imdb_id}")]
  Status { status: reqwest::StatusCode, imdb_id: String },

  #[error("metadata API rejected {imdb_id}: {message}")]
  Rejected { imdb_id: String, message: String },

  #[error("could not decode metadata response: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
