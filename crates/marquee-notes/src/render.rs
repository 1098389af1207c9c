//! Note renderer.
//!
//! Fixed templates for Watch and Movie notes. Every field the parser requires
//! is written, so rendered notes always parse back to the same record.

use std::{fmt::Write as _, io};

use marquee_core::movie::TopicalFlags;

use crate::{MovieNote, Result, WatchNote};

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Write `key:: value`, omitting the separator space for empty values.
fn field(out: &mut String, key: &str, value: impl std::fmt::Display) {
  let value = value.to_string();
  // Data lines are single-line by construction.
  let value = value.replace(['\r', '\n'], " ");
  if value.is_empty() {
    let _ = writeln!(out, "{key}::");
  } else {
    let _ = writeln!(out, "{key}:: {value}");
  }
}

fn links(names: &[String]) -> String {
  names
    .iter()
    .map(|n| format!("[[{n}]]"))
    .collect::<Vec<_>>()
    .join(", ")
}

fn opt(value: &Option<String>) -> &str { value.as_deref().unwrap_or("") }

// ─── Watch notes ─────────────────────────────────────────────────────────────

pub fn watch_note_to_string(note: &WatchNote) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "# {}: {}", note.title, note.watched);
  out.push_str("\n## Data\n");
  field(&mut out, "name", format!("[[{}]]", note.link_target()));
  field(&mut out, "watched", format!("[[{}]]", note.watched.format("%Y-%m-%d")));
  field(&mut out, "imdb_link", &note.imdb_link);
  field(&mut out, "imdb_id", &note.imdb_id);
  field(&mut out, "service", &note.service);
  field(&mut out, "first_time", note.first_time);
  field(&mut out, "joe_bob", note.joe_bob);
  let TopicalFlags { call_felissa, slasher, zombies, beast, godzilla, wallpaper_fu } =
    note.flags;
  field(&mut out, "slasher", slasher);
  field(&mut out, "call_felissa", call_felissa);
  field(&mut out, "beast", beast);
  field(&mut out, "zombies", zombies);
  field(&mut out, "godzilla", godzilla);
  field(&mut out, "wallpaper_fu", wallpaper_fu);
  out.push_str("\n## Tags\n#movie-watch\n\n## Notes\n");
  out.push_str(&note.notes);
  out
}

/// Render a Watch note into `sink`.
pub fn render_watch_note<W: io::Write>(note: &WatchNote, sink: &mut W) -> Result<()> {
  sink.write_all(watch_note_to_string(note).as_bytes())?;
  Ok(())
}

// ─── Movie notes ─────────────────────────────────────────────────────────────

pub fn movie_note_to_string(note: &MovieNote) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "# {}", note.title);
  out.push_str("\n## Data\n");
  field(&mut out, "title", &note.title);
  field(&mut out, "imdb_link", &note.imdb_link);
  field(&mut out, "imdb_id", &note.imdb_id);
  field(&mut out, "genre", links(&note.genres));
  field(&mut out, "director", links(&note.directors));
  field(&mut out, "actor", links(&note.actors));
  field(&mut out, "writer", links(&note.writers));
  field(&mut out, "year", note.year);
  field(&mut out, "rated", opt(&note.rated));
  field(&mut out, "released", note.released.as_deref().unwrap_or("N/A"));
  field(
    &mut out,
    "runtime_minutes",
    note.runtime_minutes.map(|m| m.to_string()).unwrap_or_default(),
  );
  field(&mut out, "plot", opt(&note.plot));
  field(&mut out, "country", opt(&note.country));
  field(&mut out, "language", opt(&note.language));
  field(&mut out, "box_office", opt(&note.box_office));
  field(&mut out, "production", opt(&note.production));
  let TopicalFlags { call_felissa, slasher, zombies, beast, godzilla, wallpaper_fu } =
    note.flags;
  field(&mut out, "call_felissa", call_felissa);
  field(&mut out, "slasher", slasher);
  field(&mut out, "zombies", zombies);
  field(&mut out, "beast", beast);
  field(&mut out, "godzilla", godzilla);
  field(&mut out, "wallpaper_fu", wallpaper_fu);
  out.push_str("\n## Tags\n#movie\n");
  for genre in &note.genres {
    let _ = writeln!(out, "#{genre}");
  }
  out
}

/// Render a Movie note into `sink`.
pub fn render_movie_note<W: io::Write>(note: &MovieNote, sink: &mut W) -> Result<()> {
  sink.write_all(movie_note_to_string(note).as_bytes())?;
  Ok(())
}
