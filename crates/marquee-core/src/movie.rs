//! Movie types: the film itself plus its one-to-many metadata rows.
//!
//! A movie is identified internally by an opaque UUID and externally by its
//! IMDb id, which is the natural key used for deduplication.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── ImdbId ──────────────────────────────────────────────────────────────────

/// An IMDb title id of the form `tt` followed by seven digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImdbId(String);

impl ImdbId {
  /// Validate and wrap `s`.
  pub fn parse(s: &str) -> Result<Self> {
    let digits = s
      .strip_prefix("tt")
      .ok_or_else(|| Error::InvalidImdbId(s.to_string()))?;
    if digits.len() != 7 || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::InvalidImdbId(s.to_string()));
    }
    Ok(Self(s.to_string()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The canonical IMDb page for this title, with a trailing slash.
  pub fn imdb_link(&self) -> String {
    format!("https://www.imdb.com/title/{}/", self.0)
  }
}

impl fmt::Display for ImdbId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for ImdbId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for ImdbId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<ImdbId> for String {
  fn from(id: ImdbId) -> Self { id.0 }
}

// ─── Topical flags ───────────────────────────────────────────────────────────

/// Personal tags recorded on a watch note and copied onto the movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicalFlags {
  pub call_felissa: bool,
  pub slasher:      bool,
  pub zombies:      bool,
  pub beast:        bool,
  pub godzilla:     bool,
  pub wallpaper_fu: bool,
}

// ─── Movie ───────────────────────────────────────────────────────────────────

/// A single film. At most one row exists per [`ImdbId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub uuid:            Uuid,
  pub imdb_id:         ImdbId,
  pub title:           String,
  pub imdb_link:       String,
  pub year:            i32,
  pub rated:           Option<String>,
  /// ISO `YYYY-MM-DD`; `None` when the release date is unknown.
  pub released:        Option<String>,
  pub runtime_minutes: Option<u32>,
  pub plot:            Option<String>,
  pub country:         Option<String>,
  pub language:        Option<String>,
  pub box_office:      Option<String>,
  pub production:      Option<String>,
  pub flags:           TopicalFlags,
}

// ─── Credits ─────────────────────────────────────────────────────────────────

/// The four name-list relations hanging off a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditKind {
  Genre,
  Director,
  Writer,
  Actor,
}

impl CreditKind {
  pub const ALL: [CreditKind; 4] =
    [Self::Genre, Self::Director, Self::Writer, Self::Actor];

  /// The note key and the suffix of the backing table (`movie_<key>`).
  pub fn key(self) -> &'static str {
    match self {
      Self::Genre => "genre",
      Self::Director => "director",
      Self::Writer => "writer",
      Self::Actor => "actor",
    }
  }
}

/// One named row in a genre, director, writer or actor relation.
/// No uniqueness is enforced on `(movie_uuid, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
  pub uuid:       Uuid,
  pub movie_uuid: Uuid,
  pub name:       String,
}

/// A third-party score such as `("Rotten Tomatoes", "77%")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
  pub uuid:       Uuid,
  pub movie_uuid: Uuid,
  pub source:     String,
  pub value:      String,
}

// ─── MovieDetails ────────────────────────────────────────────────────────────

/// A movie bundled with every child row, inserted as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
  pub movie:     Movie,
  pub genres:    Vec<Credit>,
  pub directors: Vec<Credit>,
  pub writers:   Vec<Credit>,
  pub actors:    Vec<Credit>,
  pub ratings:   Vec<Rating>,
}

impl MovieDetails {
  pub fn credits(&self, kind: CreditKind) -> &[Credit] {
    match kind {
      CreditKind::Genre => &self.genres,
      CreditKind::Director => &self.directors,
      CreditKind::Writer => &self.writers,
      CreditKind::Actor => &self.actors,
    }
  }

  /// Names for `kind` in insertion order.
  pub fn names(&self, kind: CreditKind) -> Vec<String> {
    self.credits(kind).iter().map(|c| c.name.clone()).collect()
  }
}
