//! OMDb metadata for marquee.
//!
//! [`OmdbMovie`] mirrors the API's JSON body. The [`adapter`] turns one into
//! rows ready for the store; [`OmdbClient`] fetches them over HTTP.

pub mod adapter;
mod client;
pub mod error;

use serde::{Deserialize, Serialize};

pub use adapter::{movie_details, parse_released, parse_runtime, split_names};
pub use client::{DEFAULT_ROOT_URL, MetadataSource, OmdbClient};
pub use error::{Error, Result};

/// A movie-info response from `GET /?apikey=KEY&i=<imdb_id>`.
///
/// Every field defaults to empty so that a rejected lookup, which carries only
/// `Response` and `Error`, still deserialises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OmdbMovie {
  pub title:      String,
  pub year:       String,
  pub rated:      String,
  pub released:   String,
  pub runtime:    String,
  pub genre:      String,
  pub director:   String,
  pub writer:     String,
  pub actors:     String,
  pub plot:       String,
  pub language:   String,
  pub country:    String,
  pub box_office: String,
  pub production: String,
  #[serde(rename = "imdbID")]
  pub imdb_id:    String,
  pub ratings:    Vec<OmdbRating>,
  /// `"True"` or `"False"`.
  pub response:   String,
  /// Present only when `response` is `"False"`.
  pub error:      Option<String>,
}

impl OmdbMovie {
  pub fn is_rejected(&self) -> bool { self.response.eq_ignore_ascii_case("false") }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRating {
  pub source: String,
  pub value:  String,
}
