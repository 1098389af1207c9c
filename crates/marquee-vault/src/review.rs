//! Review notes → review rows.

use std::path::Path;

use marquee_core::{review::Review, store::MovieStore};
use marquee_notes::parse_review_note;

use crate::{Error, Result, ingest::read_note};

/// Insert or update the review described by the note at `path`.
///
/// The movie must already be stored. Re-running on the same note updates the
/// existing review in place.
pub async fn update_review<S: MovieStore>(store: &S, path: &Path) -> Result<Review> {
  let text = read_note(path).await?;
  let note = parse_review_note(&text).map_err(Error::note(path))?;

  let movie_uuid = store
    .find_movie_by_imdb_id(&note.imdb_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::MovieNotFound(note.imdb_id.clone()))?;

  let review = store
    .upsert_review(note.to_new_review(movie_uuid))
    .await
    .map_err(Error::store)?;
  tracing::info!(
    uuid = %review.uuid,
    movie = %review.movie_title,
    liked = review.liked,
    "review updated"
  );
  Ok(review)
}
