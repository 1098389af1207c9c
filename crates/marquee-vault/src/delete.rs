//! Explicit delete flows. Notes on disk are never removed.

use marquee_core::store::MovieStore;
use uuid::Uuid;

use crate::{Error, Result};

pub async fn delete_watch<S: MovieStore>(store: &S, uuid: Uuid) -> Result<()> {
  store.delete_movie_watch(uuid).await.map_err(Error::store)?;
  tracing::info!(%uuid, "deleted watch");
  Ok(())
}

/// Delete a movie with its ratings, genres, directors, writers and actors.
pub async fn delete_movie<S: MovieStore>(store: &S, uuid: Uuid) -> Result<()> {
  store.delete_movie_cascade(uuid).await.map_err(Error::store)?;
  tracing::info!(%uuid, "deleted movie");
  Ok(())
}
