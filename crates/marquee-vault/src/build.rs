//! Rows → notes: regenerate Watch and Movie notes from the store.

use std::collections::HashSet;

use marquee_core::{store::MovieStore, watch::JoinedWatch};
use marquee_notes::{MovieNote, WatchNote, render_movie_note, render_watch_note};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::{
  Error, Result,
  layout::VaultLayout,
  write::{WriteMode, WriteOutcome, write_note},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
  /// Overwrite existing notes instead of leaving them untouched.
  pub force: bool,
  /// Only build notes for the first `limit` watches.
  pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
  pub watches_written: usize,
  pub watches_skipped: usize,
  pub movies_written:  usize,
  pub movies_skipped:  usize,
}

enum Built {
  Watch(WriteOutcome),
  Movie(WriteOutcome),
}

async fn build_watch_note(
  layout: VaultLayout,
  joined: JoinedWatch,
  mode: WriteMode,
) -> Result<Built> {
  let note = WatchNote::from_joined(&joined);
  let path = layout.watch_note_path(note.watched, &note.title);
  let mut contents = Vec::new();
  render_watch_note(&note, &mut contents).map_err(Error::note(&path))?;
  let outcome = write_note(&path, &contents, mode).await?;
  Ok(Built::Watch(outcome))
}

/// The Movie note for a stored movie: its row plus the four name lists.
pub(crate) async fn stored_movie_note<S: MovieStore>(
  store: &S,
  movie_uuid: Uuid,
) -> Result<MovieNote> {
  let movie = store
    .get_movie(movie_uuid)
    .await
    .map_err(Error::store)?
    .ok_or(Error::MovieMissing(movie_uuid))?;

  let genres = store.genre_names_for_movie(movie_uuid).await.map_err(Error::store)?;
  let directors = store.director_names_for_movie(movie_uuid).await.map_err(Error::store)?;
  let writers = store.writer_names_for_movie(movie_uuid).await.map_err(Error::store)?;
  let actors = store.actor_names_for_movie(movie_uuid).await.map_err(Error::store)?;

  Ok(MovieNote::from_movie(&movie, genres, directors, writers, actors))
}

async fn build_movie_note<S: MovieStore>(
  store: S,
  layout: VaultLayout,
  movie_uuid: Uuid,
  mode: WriteMode,
) -> Result<Built> {
  let note = stored_movie_note(&store, movie_uuid).await?;
  let path = layout.movie_note_path(&note.title, &note.imdb_id);
  let mut contents = Vec::new();
  render_movie_note(&note, &mut contents).map_err(Error::note(&path))?;
  let outcome = write_note(&path, &contents, mode).await?;
  Ok(Built::Movie(outcome))
}

/// Write a Watch note for every stored watch and a Movie note for every movie
/// they reference.
///
/// Notes are written by parallel tasks. Each distinct movie gets exactly one
/// task, so no two tasks ever target the same path. Without `force`, notes
/// that already exist are skipped.
///
/// Every task runs to completion even when another fails; the first failure
/// is returned once all of them have finished.
pub async fn build<S>(store: &S, layout: &VaultLayout, options: BuildOptions) -> Result<BuildReport>
where
  S: MovieStore + Clone + 'static,
{
  layout.ensure_dirs().await?;

  let mut watches = store.get_all_movie_watches().await.map_err(Error::store)?;
  if let Some(limit) = options.limit {
    watches.truncate(limit);
  }
  let mode = if options.force { WriteMode::Overwrite } else { WriteMode::CreateNew };
  tracing::info!(watches = watches.len(), force = options.force, "building vault");

  let mut tasks = JoinSet::new();
  let mut movies = HashSet::new();
  for joined in watches {
    let movie_uuid = joined.movie_uuid;
    tasks.spawn(build_watch_note(layout.clone(), joined, mode));
    if movies.insert(movie_uuid) {
      tasks.spawn(build_movie_note(store.clone(), layout.clone(), movie_uuid, mode));
    }
  }

  let mut report = BuildReport::default();
  let mut first_error = None;
  while let Some(joined) = tasks.join_next().await {
    let built = match joined.map_err(Error::from).and_then(|built| built) {
      Ok(built) => built,
      Err(error) => {
        tracing::error!(%error, "note task failed");
        first_error.get_or_insert(error);
        continue;
      }
    };
    match built {
      Built::Watch(WriteOutcome::Written) => report.watches_written += 1,
      Built::Watch(WriteOutcome::Skipped) => report.watches_skipped += 1,
      Built::Movie(WriteOutcome::Written) => report.movies_written += 1,
      Built::Movie(WriteOutcome::Skipped) => report.movies_skipped += 1,
    }
  }

  tracing::info!(
    watches_written = report.watches_written,
    watches_skipped = report.watches_skipped,
    movies_written = report.movies_written,
    movies_skipped = report.movies_skipped,
    "vault built"
  );
  match first_error {
    Some(error) => Err(error),
    None => Ok(report),
  }
}
