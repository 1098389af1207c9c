//! Translation from an [`OmdbMovie`] to the rows the store persists.
//!
//! Pure: no network access. Topical flags and the display title come from
//! the watch note that triggered the lookup, not from the API.

use chrono::NaiveDate;
use marquee_core::movie::{Credit, Movie, MovieDetails, Rating};
use marquee_notes::WatchNote;
use uuid::Uuid;

use crate::{Error, OmdbMovie, Result};

const NOT_AVAILABLE: &str = "N/A";

/// `"85 min"` → `85`. Anything else, including `"N/A"`, is rejected.
pub fn parse_runtime(runtime: &str) -> Result<u32> {
  runtime
    .strip_suffix(" min")
    .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    .and_then(|digits| digits.parse().ok())
    .ok_or_else(|| Error::UnparsableRuntime(runtime.to_string()))
}

/// `"08 Sep 2022"` → `"2022-09-08"`. `"N/A"` is passed through unchanged.
pub fn parse_released(released: &str) -> Result<String> {
  if released == NOT_AVAILABLE {
    return Ok(released.to_string());
  }
  NaiveDate::parse_from_str(released, "%d %b %Y")
    .map(|d| d.format("%Y-%m-%d").to_string())
    .map_err(|_| Error::UnparsableReleased(released.to_string()))
}

/// Split a comma-separated name list, trimming each element and stripping a
/// single leading `[` and trailing `]`. Empty and `N/A` elements are dropped.
pub fn split_names(list: &str) -> Vec<String> {
  list
    .split(',')
    .map(|name| {
      let name = name.trim();
      let name = name.strip_prefix('[').unwrap_or(name);
      name.strip_suffix(']').unwrap_or(name).trim().to_string()
    })
    .filter(|name| !name.is_empty() && name != NOT_AVAILABLE)
    .collect()
}

/// `"1982"` or `"2019–2020"` → the leading four-digit year.
fn parse_year(year: &str) -> Result<i32> {
  year
    .get(..4)
    .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
    .and_then(|digits| digits.parse().ok())
    .ok_or_else(|| Error::UnparsableYear(year.to_string()))
}

/// `"N/A"` and empty strings become `None`.
fn text(value: &str) -> Option<String> {
  let value = value.trim();
  (!value.is_empty() && value != NOT_AVAILABLE).then(|| value.to_string())
}

fn credits(list: &str, movie_uuid: Uuid) -> Vec<Credit> {
  split_names(list)
    .into_iter()
    .map(|name| Credit { uuid: Uuid::new_v4(), movie_uuid, name })
    .collect()
}

/// Build a movie and all of its child rows from `response`, each under a
/// fresh uuid.
///
/// An unparsable runtime is logged and stored as `None`; an unparsable year
/// or release date fails the whole conversion.
pub fn movie_details(response: &OmdbMovie, watch: &WatchNote) -> Result<MovieDetails> {
  let uuid = Uuid::new_v4();

  let year = parse_year(&response.year)?;
  let released = match text(&response.released) {
    Some(released) => Some(parse_released(&released)?),
    None => None,
  };
  let runtime_minutes = match parse_runtime(&response.runtime) {
    Ok(minutes) => Some(minutes),
    Err(e) => {
      tracing::warn!(imdb_id = %watch.imdb_id, error = %e, "storing null runtime");
      None
    }
  };

  let movie = Movie {
    uuid,
    imdb_id: watch.imdb_id.clone(),
    title: watch.title.clone(),
    imdb_link: watch.imdb_id.imdb_link(),
    year,
    rated: text(&response.rated),
    released,
    runtime_minutes,
    plot: text(&response.plot),
    country: text(&response.country),
    language: text(&response.language),
    box_office: text(&response.box_office),
    production: text(&response.production),
    flags: watch.flags,
  };

  let ratings = response
    .ratings
    .iter()
    .map(|r| Rating {
      uuid:       Uuid::new_v4(),
      movie_uuid: uuid,
      source:     r.source.clone(),
      value:      r.value.clone(),
    })
    .collect();

  Ok(MovieDetails {
    movie,
    genres: credits(&response.genre, uuid),
    directors: credits(&response.director, uuid),
    writers: credits(&response.writer, uuid),
    actors: credits(&response.actors, uuid),
    ratings,
  })
}
