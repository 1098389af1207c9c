//! marquee: keep an Obsidian movie vault and a SQLite store in step.
//!
//! Settings come from `marquee.toml` (or `--config`), the environment and a
//! `.env` file in the working directory. `OMDB_KEY` is required by every
//! command that may hydrate a new movie.

mod prompt;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use marquee_core::store::MovieStore as _;
use marquee_omdb::OmdbClient;
use marquee_store_sqlite::SqliteStore;
use marquee_vault::{BuildOptions, IngestOptions, VaultLayout};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "marquee", author, version, about = "Movie-watch tracker for an Obsidian vault")]
struct Cli {
  /// Path to the TOML configuration file. Optional.
  #[arg(long, default_value = "marquee.toml", global = true)]
  config: PathBuf,

  /// Database path, overriding every other source.
  #[arg(long, global = true)]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Write Watch and Movie notes for everything in the database.
  BuildObsidianVault {
    vault_dir: PathBuf,
    /// Overwrite notes that already exist.
    #[arg(short, long)]
    force:     bool,
    /// Only build notes for the first N watches.
    #[arg(short, long)]
    limit:     Option<usize>,
  },
  /// Ingest new Watch notes from the vault.
  UpdateMovies {
    vault_dir: PathBuf,
    /// Consider every Watch note, not just the ones since the latest stored
    /// watch.
    #[arg(short, long)]
    check_all: bool,
  },
  /// Insert or update the watch described by one Watch note.
  UpdateMovieWatch { watch_note: PathBuf },
  /// Insert or update a review from a Review note.
  UpdateReview { review_note: PathBuf },
  /// Delete a watch by uuid.
  DeleteMovieWatch { uuid: Uuid },
  /// Delete a movie and its genres, directors, writers, actors and ratings.
  DeleteMovie { uuid: Uuid },
  /// Print the version and exit.
  Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(|| {
      dotenvy::dotenv().ok();
    }))
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Version => {
      println!("marquee {}", env!("CARGO_PKG_VERSION"));
    }

    Command::BuildObsidianVault { ref vault_dir, force, limit } => {
      let (_, store) = open(&cli).await?;
      let layout = VaultLayout::new(vault_dir);
      marquee_vault::build(&store, &layout, BuildOptions { force, limit })
        .await
        .with_context(|| format!("failed to build vault at {}", vault_dir.display()))?;
    }

    Command::UpdateMovies { ref vault_dir, check_all } => {
      let (settings, store) = open(&cli).await?;
      let omdb = omdb_client(&settings)?;
      let layout = VaultLayout::new(vault_dir);
      let report = marquee_vault::ingest(&store, &omdb, &layout, IngestOptions { check_all })
        .await
        .with_context(|| format!("failed to ingest {}", vault_dir.display()))?;
      if !report.is_success() {
        for failed in &report.failed {
          tracing::error!(path = %failed.path.display(), error = %failed.error, "not ingested");
        }
        bail!("{} watch note(s) failed to ingest", report.failed.len());
      }
    }

    Command::UpdateMovieWatch { ref watch_note } => {
      let (settings, store) = open(&cli).await?;
      let omdb = omdb_client(&settings)?;
      marquee_vault::sync_watch_note(&store, &omdb, watch_note)
        .await
        .with_context(|| format!("failed to update watch from {}", watch_note.display()))?;
    }

    Command::UpdateReview { ref review_note } => {
      let (_, store) = open(&cli).await?;
      marquee_vault::update_review(&store, review_note)
        .await
        .with_context(|| format!("failed to update review from {}", review_note.display()))?;
    }

    Command::DeleteMovieWatch { uuid } => {
      let (_, store) = open(&cli).await?;
      if prompt::confirm(&format!("Delete movie watch {uuid}?"))? {
        marquee_vault::delete_watch(&store, uuid).await?;
      } else {
        tracing::info!("nothing deleted");
      }
    }

    Command::DeleteMovie { uuid } => {
      let (_, store) = open(&cli).await?;
      let movie = store
        .get_movie(uuid)
        .await?
        .with_context(|| format!("no movie with uuid {uuid}"))?;
      let question = format!("Delete {} ({}) and all of its metadata?", movie.title, movie.imdb_id);
      if prompt::confirm(&question)? {
        marquee_vault::delete_movie(&store, uuid).await?;
      } else {
        tracing::info!("nothing deleted");
      }
    }
  }

  Ok(())
}

/// Run `load_env` and then build the log filter, so a `RUST_LOG` set in
/// `.env` takes effect.
fn log_filter(load_env: impl FnOnce()) -> EnvFilter {
  load_env();
  EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy()
}

/// Load settings and open the store they point at.
async fn open(cli: &Cli) -> anyhow::Result<(Settings, SqliteStore)> {
  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
  if let Some(database) = &cli.database {
    settings.database = database.clone();
  }
  for key in settings.missing_keys() {
    tracing::debug!(key, "not configured");
  }

  let store = SqliteStore::open(&settings.database)
    .await
    .with_context(|| format!("failed to open store at {}", settings.database.display()))?;
  Ok((settings, store))
}

fn omdb_client(settings: &Settings) -> anyhow::Result<OmdbClient> {
  let key = settings.omdb_key()?;
  OmdbClient::new(key).context("failed to build HTTP client")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn log_filter_sees_rust_log_from_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    let dotenv = dir.path().join(".env");
    std::fs::write(&dotenv, "RUST_LOG=marquee_vault=trace\n").unwrap();

    let filter = log_filter(|| {
      dotenvy::from_path_override(&dotenv).unwrap();
    });
    assert!(filter.to_string().contains("marquee_vault=trace"), "{filter}");
  }
}
