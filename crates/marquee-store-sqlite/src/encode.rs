//! Encoding and decoding helpers between marquee domain types and the column
//! representations stored in SQLite.
//!
//! UUIDs are hyphenated lowercase strings, watch dates are `YYYY-MM-DD`
//! text, booleans are 0/1 integers and creation times are unix seconds.

use chrono::{DateTime, NaiveDate, Utc};
use marquee_core::{
  movie::{ImdbId, Movie, Rating, TopicalFlags},
  review::Review,
  watch::{JoinedWatch, MovieWatch},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── Dates ────────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_unix(secs: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp(secs, 0)
    .ok_or_else(|| Error::DateParse(format!("timestamp out of range: {secs}")))
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// Column order for every `SELECT` that feeds [`RawMovie`].
pub const MOVIE_COLUMNS: &str = "uuid, imdb_id, title, imdb_link, year, rated, \
   released, runtime_minutes, plot, country, language, box_office, production, \
   call_felissa, slasher, zombies, beast, godzilla, wallpaper_fu";

/// A `movie` row as read from SQLite, before validation.
pub struct RawMovie {
  pub uuid:            String,
  pub imdb_id:         String,
  pub title:           String,
  pub imdb_link:       String,
  pub year:            i32,
  pub rated:           Option<String>,
  pub released:        Option<String>,
  pub runtime_minutes: Option<u32>,
  pub plot:            Option<String>,
  pub country:         Option<String>,
  pub language:        Option<String>,
  pub box_office:      Option<String>,
  pub production:      Option<String>,
  pub call_felissa:    bool,
  pub slasher:         bool,
  pub zombies:         bool,
  pub beast:           bool,
  pub godzilla:        bool,
  pub wallpaper_fu:    Option<bool>,
}

impl RawMovie {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      uuid:            row.get(0)?,
      imdb_id:         row.get(1)?,
      title:           row.get(2)?,
      imdb_link:       row.get(3)?,
      year:            row.get(4)?,
      rated:           row.get(5)?,
      released:        row.get(6)?,
      runtime_minutes: row.get(7)?,
      plot:            row.get(8)?,
      country:         row.get(9)?,
      language:        row.get(10)?,
      box_office:      row.get(11)?,
      production:      row.get(12)?,
      call_felissa:    row.get(13)?,
      slasher:         row.get(14)?,
      zombies:         row.get(15)?,
      beast:           row.get(16)?,
      godzilla:        row.get(17)?,
      wallpaper_fu:    row.get(18)?,
    })
  }

  pub fn into_movie(self) -> Result<Movie> {
    Ok(Movie {
      uuid:            decode_uuid(&self.uuid)?,
      imdb_id:         ImdbId::parse(&self.imdb_id)?,
      title:           self.title,
      imdb_link:       self.imdb_link,
      year:            self.year,
      rated:           self.rated,
      released:        self.released,
      runtime_minutes: self.runtime_minutes,
      plot:            self.plot,
      country:         self.country,
      language:        self.language,
      box_office:      self.box_office,
      production:      self.production,
      flags:           TopicalFlags {
        call_felissa: self.call_felissa,
        slasher:      self.slasher,
        zombies:      self.zombies,
        beast:        self.beast,
        godzilla:     self.godzilla,
        wallpaper_fu: self.wallpaper_fu.unwrap_or(false),
      },
    })
  }
}

/// A `movie_watch` row as read from SQLite.
pub struct RawWatch {
  pub uuid:        String,
  pub movie_uuid:  Option<String>,
  pub movie_title: String,
  pub imdb_id:     String,
  pub watched:     String,
  pub service:     String,
  pub first_time:  bool,
  pub joe_bob:     bool,
  pub notes:       Option<String>,
}

impl RawWatch {
  /// Reads the nine watch columns starting at `offset`.
  pub fn from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      uuid:        row.get(offset)?,
      movie_uuid:  row.get(offset + 1)?,
      movie_title: row.get(offset + 2)?,
      imdb_id:     row.get(offset + 3)?,
      watched:     row.get(offset + 4)?,
      service:     row.get(offset + 5)?,
      first_time:  row.get(offset + 6)?,
      joe_bob:     row.get(offset + 7)?,
      notes:       row.get(offset + 8)?,
    })
  }

  pub fn into_watch(self) -> Result<MovieWatch> {
    Ok(MovieWatch {
      uuid:        decode_uuid(&self.uuid)?,
      movie_uuid:  decode_opt_uuid(self.movie_uuid)?,
      movie_title: self.movie_title,
      imdb_id:     ImdbId::parse(&self.imdb_id)?,
      watched:     decode_date(&self.watched)?,
      service:     self.service,
      first_time:  self.first_time,
      joe_bob:     self.joe_bob,
      notes:       self.notes,
    })
  }
}

/// A watch joined with the movie columns a watch note needs.
pub struct RawJoinedWatch {
  pub watch:        RawWatch,
  pub movie_uuid:   String,
  pub imdb_link:    String,
  pub call_felissa: bool,
  pub slasher:      bool,
  pub zombies:      bool,
  pub beast:        bool,
  pub godzilla:     bool,
  pub wallpaper_fu: Option<bool>,
}

impl RawJoinedWatch {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      watch:        RawWatch::from_row(row, 0)?,
      movie_uuid:   row.get(9)?,
      imdb_link:    row.get(10)?,
      call_felissa: row.get(11)?,
      slasher:      row.get(12)?,
      zombies:      row.get(13)?,
      beast:        row.get(14)?,
      godzilla:     row.get(15)?,
      wallpaper_fu: row.get(16)?,
    })
  }

  pub fn into_joined(self) -> Result<JoinedWatch> {
    Ok(JoinedWatch {
      watch:      self.watch.into_watch()?,
      movie_uuid: decode_uuid(&self.movie_uuid)?,
      imdb_link:  self.imdb_link,
      flags:      TopicalFlags {
        call_felissa: self.call_felissa,
        slasher:      self.slasher,
        zombies:      self.zombies,
        beast:        self.beast,
        godzilla:     self.godzilla,
        wallpaper_fu: self.wallpaper_fu.unwrap_or(false),
      },
    })
  }
}

pub struct RawRating {
  pub uuid:       String,
  pub movie_uuid: String,
  pub source:     String,
  pub value:      String,
}

impl RawRating {
  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      uuid:       decode_uuid(&self.uuid)?,
      movie_uuid: decode_uuid(&self.movie_uuid)?,
      source:     self.source,
      value:      self.value,
    })
  }
}

pub struct RawReview {
  pub uuid:             String,
  pub movie_uuid:       String,
  pub movie_title:      String,
  pub review:           String,
  pub liked:            bool,
  pub created_datetime: i64,
}

impl RawReview {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      uuid:             row.get(0)?,
      movie_uuid:       row.get(1)?,
      movie_title:      row.get(2)?,
      review:           row.get(3)?,
      liked:            row.get(4)?,
      created_datetime: row.get(5)?,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      uuid:        decode_uuid(&self.uuid)?,
      movie_uuid:  decode_uuid(&self.movie_uuid)?,
      movie_title: self.movie_title,
      review:      self.review,
      liked:       self.liked,
      created_at:  decode_unix(self.created_datetime)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_use_iso_text() {
    let d = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
    assert_eq!(encode_date(d), "2022-07-01");
    assert_eq!(decode_date("2022-07-01").unwrap(), d);
    assert!(decode_date("01 Jul 2022").is_err());
  }

  #[test]
  fn unix_seconds_decode_to_utc() {
    let dt = decode_unix(1_653_609_600).unwrap();
    assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2022, 5, 27).unwrap());
  }
}
