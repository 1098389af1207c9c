//! Async HTTP client for the OMDb API.

use std::{future::Future, time::Duration};

use marquee_core::ImdbId;
use reqwest::Client;

use crate::{Error, OmdbMovie, Result};

pub const DEFAULT_ROOT_URL: &str = "http://omdbapi.com";

/// A source of movie-info records keyed by IMDb id.
///
/// The reconciler depends on this rather than on [`OmdbClient`] directly so
/// that it can run against canned responses.
pub trait MetadataSource: Send + Sync {
  fn fetch_movie<'a>(
    &'a self,
    imdb_id: &'a ImdbId,
  ) -> impl Future<Output = Result<OmdbMovie>> + Send + 'a;
}

/// Client for `GET <root>/?apikey=KEY&i=<imdb_id>`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OmdbClient {
  client:   Client,
  key:      String,
  root_url: String,
}

impl OmdbClient {
  pub fn new(key: impl Into<String>) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(5)).build()?;
    Ok(Self {
      client,
      key: key.into(),
      root_url: DEFAULT_ROOT_URL.to_string(),
    })
  }

  /// Point the client at another server.
  pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
    self.root_url = root_url.into();
    self
  }

  /// Fetch one movie. Non-2xx responses and bodies with `"Response": "False"`
  /// are errors.
  pub async fn get_movie(&self, imdb_id: &ImdbId) -> Result<OmdbMovie> {
    tracing::debug!(%imdb_id, "fetching movie metadata");

    let resp = self
      .client
      .get(format!("{}/", self.root_url.trim_end_matches('/')))
      .query(&[("apikey", self.key.as_str()), ("i", imdb_id.as_str())])
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { status, imdb_id: imdb_id.to_string() });
    }

    let body = resp.text().await?;
    let movie: OmdbMovie = serde_json::from_str(&body)?;
    if movie.is_rejected() {
      return Err(Error::Rejected {
        imdb_id: imdb_id.to_string(),
        message: movie.error.unwrap_or_else(|| "unknown error".to_string()),
      });
    }
    Ok(movie)
  }
}

impl MetadataSource for OmdbClient {
  async fn fetch_movie(&self, imdb_id: &ImdbId) -> Result<OmdbMovie> {
    self.get_movie(imdb_id).await
  }
}
