//! Movie watches, one row per viewing event.
//!
//! `movie_title` and `imdb_id` are denormalised copies of the referenced
//! movie's fields. They are filled from the movie row at write time and are
//! not trusted on read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::movie::{ImdbId, TopicalFlags};

/// A persisted viewing event. `(imdb_id, watched)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieWatch {
  pub uuid:        Uuid,
  /// Nullable so historical orphan rows survive repair.
  pub movie_uuid:  Option<Uuid>,
  pub movie_title: String,
  pub imdb_id:     ImdbId,
  pub watched:     NaiveDate,
  pub service:     String,
  pub first_time:  bool,
  pub joe_bob:     bool,
  pub notes:       Option<String>,
}

/// Input to [`crate::store::MovieStore::insert_movie_watch`].
///
/// When `uuid` is `Some` and a row with that uuid exists, the row is updated;
/// otherwise a row is inserted (under a fresh uuid when `uuid` is `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovieWatch {
  pub uuid:        Option<Uuid>,
  pub movie_uuid:  Option<Uuid>,
  pub movie_title: String,
  pub imdb_id:     ImdbId,
  pub watched:     NaiveDate,
  pub service:     String,
  pub first_time:  bool,
  pub joe_bob:     bool,
  pub notes:       Option<String>,
}

impl NewMovieWatch {
  /// Assign the uuid the row will be written under.
  pub fn into_watch(self, uuid: Uuid) -> MovieWatch {
    MovieWatch {
      uuid,
      movie_uuid: self.movie_uuid,
      movie_title: self.movie_title,
      imdb_id: self.imdb_id,
      watched: self.watched,
      service: self.service,
      first_time: self.first_time,
      joe_bob: self.joe_bob,
      notes: self.notes,
    }
  }
}

/// A watch inner-joined with its movie: everything a watch note needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedWatch {
  pub watch:      MovieWatch,
  pub movie_uuid: Uuid,
  pub imdb_link:  String,
  pub flags:      TopicalFlags,
}
