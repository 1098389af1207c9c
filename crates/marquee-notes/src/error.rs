//! Error types for the marquee-notes codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field matched zero times or more than once, or its single
  /// match disagrees with the rest of the note.
  #[error("malformed note: field `{field}` ({matches} matches)")]
  MalformedNote { field: &'static str, matches: usize },

  #[error("invalid boolean in `{field}`: {value:?}")]
  InvalidBoolean { field: &'static str, value: String },

  #[error("invalid date in `{field}`: {value:?}")]
  InvalidDate { field: &'static str, value: String },

  #[error("invalid number in `{field}`: {value:?}")]
  InvalidNumber { field: &'static str, value: String },

  #[error(transparent)]
  ImdbId(#[from] marquee_core::Error),

  #[error("could not write note: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
