//! Notes → rows: the incremental ingest and the single-note sync.

use std::path::{Path, PathBuf};

use marquee_core::{store::MovieStore, watch::MovieWatch};
use marquee_notes::{WatchNote, parse_watch_note, render_movie_note};
use marquee_omdb::{MetadataSource, movie_details};
use uuid::Uuid;

use crate::{
  Error, Result,
  build::stored_movie_note,
  layout::{VaultLayout, date_prefix},
  write::{WriteMode, write_note},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
  /// Consider every watch note, not just those dated on or after the latest
  /// watch already stored.
  pub check_all: bool,
}

#[derive(Debug, Default)]
pub struct IngestReport {
  /// Watches inserted by this run.
  pub inserted:       usize,
  /// Movies hydrated from the metadata source by this run.
  pub movies_created: usize,
  /// Notes whose watch was already stored.
  pub already_stored: usize,
  /// Notes dated before the cutoff and not opened.
  pub before_cutoff:  usize,
  pub failed:         Vec<FailedNote>,
}

impl IngestReport {
  pub fn is_success(&self) -> bool { self.failed.is_empty() }
}

#[derive(Debug)]
pub struct FailedNote {
  pub path:  PathBuf,
  pub error: Error,
}

/// Where a watch's movie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMovie {
  Existing(Uuid),
  Created(Uuid),
}

impl ResolvedMovie {
  pub fn uuid(self) -> Uuid {
    match self {
      Self::Existing(uuid) | Self::Created(uuid) => uuid,
    }
  }
}

enum WatchOutcome {
  AlreadyStored,
  Inserted(ResolvedMovie),
}

// ─── Shared steps ────────────────────────────────────────────────────────────

pub(crate) async fn read_note(path: &Path) -> Result<String> {
  tokio::fs::read_to_string(path).await.map_err(Error::io(path))
}

async fn read_watch_note(path: &Path) -> Result<WatchNote> {
  let text = read_note(path).await?;
  parse_watch_note(&text).map_err(Error::note(path))
}

/// Find the note's movie by IMDb id, or hydrate it from `metadata` and insert
/// it with all of its child rows.
///
/// Either way the movie's note is then created if absent, so a note lost to an
/// earlier failed run is restored. An existing Movie note is never
/// overwritten.
pub async fn resolve_movie<S, M>(
  store: &S,
  metadata: &M,
  layout: &VaultLayout,
  note: &WatchNote,
) -> Result<ResolvedMovie>
where
  S: MovieStore,
  M: MetadataSource,
{
  let resolved = match store
    .find_movie_by_imdb_id(&note.imdb_id)
    .await
    .map_err(Error::store)?
  {
    Some(uuid) => ResolvedMovie::Existing(uuid),
    None => {
      tracing::info!(imdb_id = %note.imdb_id, title = %note.title, "hydrating new movie");
      let response = metadata.fetch_movie(&note.imdb_id).await?;
      let details = movie_details(&response, note)?;
      let uuid = store.insert_movie_details(details).await.map_err(Error::store)?;
      ResolvedMovie::Created(uuid)
    }
  };

  let movie_note = stored_movie_note(store, resolved.uuid()).await?;
  let movies_dir = layout.movies_dir();
  tokio::fs::create_dir_all(&movies_dir)
    .await
    .map_err(Error::io(&movies_dir))?;
  let path = layout.movie_note_path(&movie_note.title, &movie_note.imdb_id);
  let mut contents = Vec::new();
  render_movie_note(&movie_note, &mut contents).map_err(Error::note(&path))?;
  let outcome = write_note(&path, &contents, WriteMode::CreateNew).await?;
  tracing::debug!(path = %path.display(), ?outcome, "movie note");

  Ok(resolved)
}

async fn ingest_one<S, M>(
  store: &S,
  metadata: &M,
  layout: &VaultLayout,
  path: &Path,
) -> Result<WatchOutcome>
where
  S: MovieStore,
  M: MetadataSource,
{
  let note = read_watch_note(path).await?;

  if store
    .find_watch_by_natural_key(&note.imdb_id, note.watched)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Ok(WatchOutcome::AlreadyStored);
  }

  let movie = resolve_movie(store, metadata, layout, &note).await?;
  let watch = store
    .insert_movie_watch(note.to_new_watch(None, Some(movie.uuid())))
    .await
    .map_err(Error::store)?;
  tracing::info!(
    uuid = %watch.uuid,
    imdb_id = %watch.imdb_id,
    watched = %watch.watched,
    "inserted watch"
  );
  Ok(WatchOutcome::Inserted(movie))
}

/// Regular `*.md` files in `dir`, sorted by file name.
async fn list_notes(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut entries = tokio::fs::read_dir(dir).await.map_err(Error::io(dir))?;
  let mut notes = Vec::new();
  while let Some(entry) = entries.next_entry().await.map_err(Error::io(dir))? {
    let path = entry.path();
    let file_type = entry.file_type().await.map_err(Error::io(&path))?;
    if file_type.is_file() && path.extension().is_some_and(|ext| ext == "md") {
      notes.push(path);
    }
  }
  notes.sort();
  Ok(notes)
}

// ─── Flows ───────────────────────────────────────────────────────────────────

/// Ingest new Watch notes from `<vault>/Watches`.
///
/// Unless `check_all` is set, notes whose date prefix sorts before the latest
/// stored watch date are not opened. Each note is processed on its own: a
/// failure is logged and recorded in the report and the run moves on. Only
/// failures that affect every note (listing the directory, reading the
/// cutoff) abort the run.
pub async fn ingest<S, M>(
  store: &S,
  metadata: &M,
  layout: &VaultLayout,
  options: IngestOptions,
) -> Result<IngestReport>
where
  S: MovieStore,
  M: MetadataSource,
{
  let cutoff = if options.check_all {
    None
  } else {
    store
      .latest_watch_date()
      .await
      .map_err(Error::store)?
      .map(|d| d.format("%Y-%m-%d").to_string())
  };
  tracing::info!(cutoff = cutoff.as_deref().unwrap_or("none"), "ingesting watch notes");

  let mut report = IngestReport::default();
  for path in list_notes(&layout.watches_dir()).await? {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if let Some(cutoff) = &cutoff
      && date_prefix(file_name) < cutoff.as_str()
    {
      report.before_cutoff += 1;
      continue;
    }

    match ingest_one(store, metadata, layout, &path).await {
      Ok(WatchOutcome::AlreadyStored) => report.already_stored += 1,
      Ok(WatchOutcome::Inserted(movie)) => {
        report.inserted += 1;
        if matches!(movie, ResolvedMovie::Created(_)) {
          report.movies_created += 1;
        }
      }
      Err(error) => {
        tracing::error!(path = %path.display(), %error, "failed to ingest watch note");
        report.failed.push(FailedNote { path, error });
      }
    }
  }

  tracing::info!(
    inserted = report.inserted,
    movies_created = report.movies_created,
    already_stored = report.already_stored,
    before_cutoff = report.before_cutoff,
    failed = report.failed.len(),
    "ingest finished"
  );
  Ok(report)
}

/// Upsert the watch described by one Watch note.
///
/// The movie is hydrated if unknown, with its note created in the vault two
/// directories above `note_path`. An existing watch with the same
/// `(imdb_id, watched)` is updated in place.
pub async fn sync_watch_note<S, M>(store: &S, metadata: &M, note_path: &Path) -> Result<MovieWatch>
where
  S: MovieStore,
  M: MetadataSource,
{
  let layout = VaultLayout::containing(note_path)?;
  let note = read_watch_note(note_path).await?;
  let movie = resolve_movie(store, metadata, &layout, &note).await?;

  let existing = store
    .find_watch_by_natural_key(&note.imdb_id, note.watched)
    .await
    .map_err(Error::store)?;
  let watch = store
    .insert_movie_watch(note.to_new_watch(existing, Some(movie.uuid())))
    .await
    .map_err(Error::store)?;

  tracing::info!(
    uuid = %watch.uuid,
    updated = existing.is_some(),
    path = %note_path.display(),
    "synced watch note"
  );
  Ok(watch)
}
