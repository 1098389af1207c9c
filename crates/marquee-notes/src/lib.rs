//! Markdown note codec for marquee.
//!
//! Converts between vault notes (Markdown with `key:: value` data lines) and
//! typed records. Pure and synchronous; no filesystem or database access.
//!
//! # Quick start
//!
//! ```no_run
//! use marquee_notes::{parse_watch_note, watch_note_to_string};
//!
//! let text = std::fs::read_to_string("Watches/2022-07-01 Uncle Sam.md").unwrap();
//! let note = parse_watch_note(&text).unwrap();
//! assert_eq!(parse_watch_note(&watch_note_to_string(&note)).unwrap(), note);
//! ```

pub mod error;
mod parse;
mod render;

use chrono::NaiveDate;
use marquee_core::{
  movie::{ImdbId, Movie, TopicalFlags},
  normalize_title,
  review::NewReview,
  watch::{JoinedWatch, NewMovieWatch},
};
use uuid::Uuid;

pub use error::{Error, Result};
pub use parse::{parse_movie_note, parse_review_note, parse_watch_note};
pub use render::{
  movie_note_to_string, render_movie_note, render_watch_note, watch_note_to_string,
};

// ─── Watch notes ─────────────────────────────────────────────────────────────

/// One viewing event as recorded in `Watches/<date> <FileTitle>.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchNote {
  /// Display title, as linked in the `name::` field.
  pub title:      String,
  pub watched:    NaiveDate,
  pub imdb_link:  String,
  pub imdb_id:    ImdbId,
  pub service:    String,
  pub first_time: bool,
  pub joe_bob:    bool,
  pub flags:      TopicalFlags,
  /// Everything after the `## Notes` heading, verbatim.
  pub notes:      String,
}

impl WatchNote {
  /// The `[[...]]` link target naming the movie note: `Title (tt0000000)`.
  pub fn link_target(&self) -> String {
    format!("{} ({})", self.title, self.imdb_id)
  }

  pub fn file_title(&self) -> String { normalize_title(&self.title) }

  /// Build the note for a stored watch joined with its movie.
  pub fn from_joined(joined: &JoinedWatch) -> Self {
    let w = &joined.watch;
    Self {
      title:      w.movie_title.clone(),
      watched:    w.watched,
      imdb_link:  joined.imdb_link.clone(),
      imdb_id:    w.imdb_id.clone(),
      service:    w.service.clone(),
      first_time: w.first_time,
      joe_bob:    w.joe_bob,
      flags:      joined.flags,
      notes:      w.notes.clone().unwrap_or_default(),
    }
  }

  /// The watch row this note describes. Empty notes are stored as NULL.
  pub fn to_new_watch(&self, uuid: Option<Uuid>, movie_uuid: Option<Uuid>) -> NewMovieWatch {
    NewMovieWatch {
      uuid,
      movie_uuid,
      movie_title: self.title.clone(),
      imdb_id: self.imdb_id.clone(),
      watched: self.watched,
      service: self.service.clone(),
      first_time: self.first_time,
      joe_bob: self.joe_bob,
      notes: (!self.notes.is_empty()).then(|| self.notes.clone()),
    }
  }
}

// ─── Movie notes ─────────────────────────────────────────────────────────────

/// Metadata about one film as recorded in `Movies/<FileTitle> (<imdb_id>).md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieNote {
  pub title:           String,
  pub imdb_link:       String,
  pub imdb_id:         ImdbId,
  pub genres:          Vec<String>,
  pub directors:       Vec<String>,
  pub actors:          Vec<String>,
  pub writers:         Vec<String>,
  pub year:            i32,
  pub rated:           Option<String>,
  /// ISO date; rendered as `N/A` when unknown.
  pub released:        Option<String>,
  pub runtime_minutes: Option<u32>,
  pub plot:            Option<String>,
  pub country:         Option<String>,
  pub language:        Option<String>,
  pub box_office:      Option<String>,
  pub production:      Option<String>,
  pub flags:           TopicalFlags,
}

impl MovieNote {
  pub fn from_movie(
    movie: &Movie,
    genres: Vec<String>,
    directors: Vec<String>,
    writers: Vec<String>,
    actors: Vec<String>,
  ) -> Self {
    Self {
      title: movie.title.clone(),
      imdb_link: movie.imdb_link.clone(),
      imdb_id: movie.imdb_id.clone(),
      genres,
      directors,
      actors,
      writers,
      year: movie.year,
      rated: movie.rated.clone(),
      released: movie.released.clone(),
      runtime_minutes: movie.runtime_minutes,
      plot: movie.plot.clone(),
      country: movie.country.clone(),
      language: movie.language.clone(),
      box_office: movie.box_office.clone(),
      production: movie.production.clone(),
      flags: movie.flags,
    }
  }

  pub fn file_title(&self) -> String { normalize_title(&self.title) }
}

// ─── Review notes ────────────────────────────────────────────────────────────

/// A review as recorded in `Reviews/<FileTitle> (<imdb_id>).md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewNote {
  pub movie_title: String,
  pub imdb_id:     ImdbId,
  pub liked:       bool,
  /// Everything after the `## Review` heading, verbatim.
  pub review:      String,
}

impl ReviewNote {
  pub fn to_new_review(&self, movie_uuid: Uuid) -> NewReview {
    NewReview {
      movie_uuid,
      movie_title: self.movie_title.clone(),
      review: self.review.clone(),
      liked: self.liked,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  pub(crate) const UNCLE_SAM: &str = "# Uncle Sam: 2022-07-01

## Data
name:: [[Uncle Sam (tt0118025)]]
watched:: [[2022-07-01]]
imdb_link:: https://www.imdb.com/title/tt0118025/
imdb_id:: tt0118025
service:: Shudder
first_time:: true
joe_bob:: true
slasher:: false
call_felissa:: false
beast:: true
zombies:: false
godzilla:: false
wallpaper_fu:: true

## Tags
#movie-watch

## Notes
\"Don't be afraid, it's only friendly fire\"
Prevert uncle sam on stilts
";

  #[test]
  fn watch_note_round_trip() {
    let parsed = parse_watch_note(UNCLE_SAM).unwrap();
    let rendered = watch_note_to_string(&parsed);
    assert_eq!(parse_watch_note(&rendered).unwrap(), parsed);
  }

  #[test]
  fn watch_note_round_trip_ignores_field_order() {
    let shuffled = "## Data
wallpaper_fu:: false
godzilla:: true
imdb_id:: tt0084777
name:: [[Tenebrae (tt0084777)]]
service:: Blu ray
zombies:: false
beast:: false
call_felissa:: true
slasher:: true
joe_bob:: false
first_time:: false
imdb_link:: https://www.imdb.com/title/tt0084777/
watched:: [[2022-05-27]]

## Notes
";
    let parsed = parse_watch_note(shuffled).unwrap();
    assert_eq!(parsed.notes, "");
    let rendered = watch_note_to_string(&parsed);
    assert_eq!(parse_watch_note(&rendered).unwrap(), parsed);
  }

  #[test]
  fn movie_note_round_trip() {
    let note = MovieNote {
      title:           "Grizzly 2: Revenge".into(),
      imdb_link:       "https://www.imdb.com/title/tt0093119/".into(),
      imdb_id:         ImdbId::parse("tt0093119").unwrap(),
      genres:          vec!["Horror".into(), "Thriller".into()],
      directors:       vec!["André Szöts".into()],
      actors:          vec!["George Clooney".into(), "Laura Dern".into()],
      writers:         vec![],
      year:            2020,
      rated:           None,
      released:        Some("2020-10-15".into()),
      runtime_minutes: None,
      plot:            Some("A bear attacks a concert.".into()),
      country:         Some("United States, Hungary".into()),
      language:        Some("English".into()),
      box_office:      None,
      production:      None,
      flags:           TopicalFlags { beast: true, ..Default::default() },
    };

    let rendered = movie_note_to_string(&note);
    let parsed = parse_movie_note(&rendered).unwrap();
    assert_eq!(parsed, note);
    assert_eq!(movie_note_to_string(&parsed), rendered);
  }

  #[test]
  fn empty_notes_are_stored_as_null() {
    let mut note = parse_watch_note(UNCLE_SAM).unwrap();
    assert!(note.to_new_watch(None, None).notes.is_some());
    note.notes.clear();
    assert_eq!(note.to_new_watch(None, None).notes, None);
  }

  #[test]
  fn link_target_and_file_title() {
    let mut note = parse_watch_note(UNCLE_SAM).unwrap();
    assert_eq!(note.link_target(), "Uncle Sam (tt0118025)");
    note.title = "V/H/S 94".into();
    assert_eq!(note.file_title(), "VHS 94");
  }
}
