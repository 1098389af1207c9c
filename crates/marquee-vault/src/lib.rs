//! Vault ↔ store reconciliation for marquee.
//!
//! - [`ingest`] reads new Watch notes, hydrates unknown movies through a
//!   [`marquee_omdb::MetadataSource`] and writes rows through a
//!   [`marquee_core::store::MovieStore`].
//! - [`build`] regenerates Watch and Movie notes from stored rows.
//!
//! Notes are only ever created or overwritten, never deleted.

mod build;
mod delete;
pub mod error;
mod ingest;
pub mod layout;
mod review;
mod write;

pub use build::{BuildOptions, BuildReport, build};
pub use delete::{delete_movie, delete_watch};
pub use error::{Error, Result};
pub use ingest::{
  FailedNote, IngestOptions, IngestReport, ResolvedMovie, ingest, resolve_movie,
  sync_watch_note,
};
pub use layout::VaultLayout;
pub use review::update_review;
pub use write::{WriteMode, WriteOutcome, write_note};
