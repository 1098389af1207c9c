//! Note parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ scan_fields()       → Vec<Field>   every `key:: value` line
//!          └─ Fields::single() → &str       the one value for a key
//!               └─ typed coercion          → bool, date, list, ImdbId…
//!
//! Body sections (`## Notes`, `## Review`) are captured separately and kept
//! verbatim.

use std::sync::LazyLock;

use chrono::NaiveDate;
use marquee_core::movie::{ImdbId, TopicalFlags};
use regex::Regex;

use crate::{
  MovieNote, ReviewNote, WatchNote,
  error::{Error, Result},
};

// ─── Patterns ────────────────────────────────────────────────────────────────

/// A data line: a key at the start of a line, `::`, horizontal whitespace,
/// then the rest of the line.
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^([a-z_]+)::[ \t]*(.*)$").expect("valid regex")
});

/// `[[Title (tt0000000)]]`, with the title restricted to characters that are
/// legal in a link target.
static TITLE_LINK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\[\[([A-Za-z0-9:\-/ ]+) \((tt\d{7})\)\]\]$").expect("valid regex")
});

static DATE_LINK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\[\[(\d{4}-\d{2}-\d{2})\]\]$").expect("valid regex")
});

static IMDB_LINK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^https://www\.imdb\.com/title/tt\d{7}/$").expect("valid regex")
});

static IMDB_ID: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^tt\d{7}$").expect("valid regex"));

static SERVICE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z+ ]+$").expect("valid regex"));

static NOTES_BODY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)(?:\A|\n)## Notes\n(.*)").expect("valid regex")
});

static REVIEW_BODY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)(?:\A|\n)## Review\n(.*)").expect("valid regex")
});

// ─── Field scanning ──────────────────────────────────────────────────────────

struct Field<'a> {
  key:   &'a str,
  value: &'a str,
}

struct Fields<'a>(Vec<Field<'a>>);

fn scan_fields(input: &str) -> Fields<'_> {
  Fields(
    FIELD
      .captures_iter(input)
      .filter_map(|c| {
        let key = c.get(1)?.as_str();
        let value = c.get(2)?.as_str().trim_end();
        Some(Field { key, value })
      })
      .collect(),
  )
}

impl<'a> Fields<'a> {
  /// The value of `field`, which must appear exactly once.
  fn single(&self, field: &'static str) -> Result<&'a str> {
    let mut values = self.0.iter().filter(|f| f.key == field).map(|f| f.value);
    match (values.next(), values.count()) {
      (Some(value), 0) => Ok(value),
      (None, _) => Err(Error::MalformedNote { field, matches: 0 }),
      (Some(_), rest) => Err(Error::MalformedNote { field, matches: rest + 1 }),
    }
  }

  /// The value of `field`, which must also match `pattern` in full.
  fn matching(&self, field: &'static str, pattern: &Regex) -> Result<&'a str> {
    let value = self.single(field)?;
    if pattern.is_match(value) {
      Ok(value)
    } else {
      Err(Error::MalformedNote { field, matches: 0 })
    }
  }

  fn boolean(&self, field: &'static str) -> Result<bool> {
    parse_bool(field, self.single(field)?)
  }

  /// Empty values read as `None`.
  fn optional(&self, field: &'static str) -> Result<Option<String>> {
    let value = self.single(field)?.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
  }

  fn links(&self, field: &'static str) -> Result<Vec<String>> {
    Ok(split_links(self.single(field)?))
  }

  fn flags(&self) -> Result<TopicalFlags> {
    Ok(TopicalFlags {
      call_felissa: self.boolean("call_felissa")?,
      slasher:      self.boolean("slasher")?,
      zombies:      self.boolean("zombies")?,
      beast:        self.boolean("beast")?,
      godzilla:     self.boolean("godzilla")?,
      wallpaper_fu: self.boolean("wallpaper_fu")?,
    })
  }

  /// `[[Title (tt0000000)]]` split into its title and id.
  fn title_link(&self, field: &'static str) -> Result<(String, ImdbId)> {
    let value = self.single(field)?;
    let caps = TITLE_LINK
      .captures(value)
      .ok_or(Error::MalformedNote { field, matches: 0 })?;
    Ok((caps[1].to_string(), ImdbId::parse(&caps[2])?))
  }
}

// ─── Value coercion ──────────────────────────────────────────────────────────

fn parse_bool(field: &'static str, value: &str) -> Result<bool> {
  match value {
    "true" => Ok(true),
    "false" => Ok(false),
    other => Err(Error::InvalidBoolean { field, value: other.to_string() }),
  }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate { field, value: value.to_string() })
}

/// `[[A]], [[B]] ,[[C]]` → `["A", "B", "C"]`. Empty elements are dropped.
fn split_links(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(|part| {
      let part = part.trim();
      let part = part.strip_prefix("[[").unwrap_or(part);
      part.strip_suffix("]]").unwrap_or(part).trim().to_string()
    })
    .filter(|part| !part.is_empty())
    .collect()
}

fn body(pattern: &Regex, field: &'static str, input: &str) -> Result<String> {
  pattern
    .captures(input)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_string())
    .ok_or(Error::MalformedNote { field, matches: 0 })
}

// ─── Public parsers ──────────────────────────────────────────────────────────

/// Parse a Watch note. Every data field is required.
pub fn parse_watch_note(input: &str) -> Result<WatchNote> {
  let fields = scan_fields(input);

  let (title, linked_id) = fields.title_link("name")?;
  let watched_link = fields.matching("watched", &DATE_LINK)?;
  let watched = parse_date("watched", &watched_link[2..watched_link.len() - 2])?;
  let imdb_link = fields.matching("imdb_link", &IMDB_LINK)?.to_string();
  let imdb_id = ImdbId::parse(fields.matching("imdb_id", &IMDB_ID)?)?;
  // The name link must point at the same title as `imdb_id::`.
  if linked_id != imdb_id {
    return Err(Error::MalformedNote { field: "name", matches: 1 });
  }
  let service = fields.matching("service", &SERVICE)?.trim().to_string();

  Ok(WatchNote {
    title,
    watched,
    imdb_link,
    imdb_id,
    service,
    first_time: fields.boolean("first_time")?,
    joe_bob: fields.boolean("joe_bob")?,
    flags: fields.flags()?,
    notes: body(&NOTES_BODY, "notes", input)?,
  })
}

/// Parse a Movie note.
pub fn parse_movie_note(input: &str) -> Result<MovieNote> {
  let fields = scan_fields(input);

  let title = fields.single("title")?.trim().to_string();
  let imdb_link = fields.matching("imdb_link", &IMDB_LINK)?.to_string();
  let imdb_id = ImdbId::parse(fields.matching("imdb_id", &IMDB_ID)?)?;

  let year_str = fields.single("year")?.trim();
  let year = year_str
    .parse::<i32>()
    .map_err(|_| Error::InvalidNumber { field: "year", value: year_str.to_string() })?;

  let runtime_minutes = match fields.single("runtime_minutes")?.trim() {
    "" => None,
    s => Some(s.parse::<u32>().map_err(|_| Error::InvalidNumber {
      field: "runtime_minutes",
      value: s.to_string(),
    })?),
  };

  let released = match fields.single("released")?.trim() {
    "" | "N/A" => None,
    s => Some(parse_date("released", s)?.format("%Y-%m-%d").to_string()),
  };

  Ok(MovieNote {
    title,
    imdb_link,
    imdb_id,
    genres: fields.links("genre")?,
    directors: fields.links("director")?,
    actors: fields.links("actor")?,
    writers: fields.links("writer")?,
    year,
    rated: fields.optional("rated")?,
    released,
    runtime_minutes,
    plot: fields.optional("plot")?,
    country: fields.optional("country")?,
    language: fields.optional("language")?,
    box_office: fields.optional("box_office")?,
    production: fields.optional("production")?,
    flags: fields.flags()?,
  })
}

/// Parse a Review note: `movie::`, `liked::` and a `## Review` body.
pub fn parse_review_note(input: &str) -> Result<ReviewNote> {
  let fields = scan_fields(input);
  let (movie_title, imdb_id) = fields.title_link("movie")?;

  Ok(ReviewNote {
    movie_title,
    imdb_id,
    liked: fields.boolean("liked")?,
    review: body(&REVIEW_BODY, "review", input)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tests::UNCLE_SAM;

  #[test]
  fn parses_sample_watch_note() {
    let note = parse_watch_note(UNCLE_SAM).unwrap();
    assert_eq!(note.title, "Uncle Sam");
    assert_eq!(note.link_target(), "Uncle Sam (tt0118025)");
    assert_eq!(note.watched, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
    assert_eq!(note.imdb_link, "https://www.imdb.com/title/tt0118025/");
    assert_eq!(note.imdb_id.as_str(), "tt0118025");
    assert_eq!(note.service, "Shudder");
    assert!(note.first_time);
    assert!(note.joe_bob);
    assert_eq!(note.flags, TopicalFlags {
      beast: true,
      wallpaper_fu: true,
      ..Default::default()
    });
    assert!(note.notes.starts_with("\"Don't be afraid"));
    assert!(note.notes.ends_with("on stilts\n"));
  }

  #[test]
  fn missing_field_is_malformed() {
    let input = UNCLE_SAM.replace("service:: Shudder\n", "");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "service", matches: 0 }));
  }

  #[test]
  fn duplicate_field_is_malformed() {
    let input = UNCLE_SAM.replace("joe_bob:: true\n", "joe_bob:: true\njoe_bob:: false\n");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "joe_bob", matches: 2 }));
  }

  #[test]
  fn bad_boolean_is_reported_with_value() {
    let input = UNCLE_SAM.replace("beast:: true", "beast:: yes");
    match parse_watch_note(&input).unwrap_err() {
      Error::InvalidBoolean { field, value } => {
        assert_eq!(field, "beast");
        assert_eq!(value, "yes");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn title_outside_link_alphabet_is_malformed() {
    let input = UNCLE_SAM.replace("[[Uncle Sam (tt0118025)]]", "[[Uncle Sam's (tt0118025)]]");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "name", .. }));
  }

  #[test]
  fn name_link_must_agree_with_imdb_id() {
    let input = UNCLE_SAM.replace("[[Uncle Sam (tt0118025)]]", "[[Uncle Sam (tt0118026)]]");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "name", matches: 1 }));
  }

  #[test]
  fn impossible_date_is_invalid() {
    let input = UNCLE_SAM.replace("[[2022-07-01]]", "[[2022-13-01]]");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::InvalidDate { field: "watched", .. }));
  }

  #[test]
  fn missing_notes_section_is_malformed() {
    let input = UNCLE_SAM.split("## Notes").next().unwrap().to_string();
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "notes", .. }));
  }

  #[test]
  fn key_does_not_match_inside_another_key() {
    // `imdb_id` must not be satisfied by a line that only mentions it.
    let input = UNCLE_SAM.replace("imdb_id:: tt0118025\n", "not_imdb_id:: tt0118025\n");
    let err = parse_watch_note(&input).unwrap_err();
    assert!(matches!(err, Error::MalformedNote { field: "imdb_id", matches: 0 }));
  }

  #[test]
  fn links_are_split_and_debracketed() {
    assert_eq!(
      split_links("[[Bela Lugosi]],  [[Vincent Price]] ,[[Christopher Lee]]"),
      vec!["Bela Lugosi", "Vincent Price", "Christopher Lee"]
    );
    assert!(split_links("").is_empty());
    assert_eq!(split_links("Plain, [[Linked]]"), vec!["Plain", "Linked"]);
  }

  #[test]
  fn parses_review_note() {
    let input = "## Data
movie:: [[Things (tt0098463)]]
liked:: false

## Review
YOU HAVE JUST EXPERIENCED ... THINGS
";
    let note = parse_review_note(input).unwrap();
    assert_eq!(note.movie_title, "Things");
    assert_eq!(note.imdb_id.as_str(), "tt0098463");
    assert!(!note.liked);
    assert_eq!(note.review, "YOU HAVE JUST EXPERIENCED ... THINGS\n");
  }

  #[test]
  fn movie_note_released_na_is_none() {
    let rendered = crate::movie_note_to_string(&crate::MovieNote {
      title:           "Tenebrae".into(),
      imdb_link:       "https://www.imdb.com/title/tt0084777/".into(),
      imdb_id:         ImdbId::parse("tt0084777").unwrap(),
      genres:          vec!["Horror".into()],
      directors:       vec!["Dario Argento".into()],
      actors:          vec![],
      writers:         vec![],
      year:            1982,
      rated:           Some("Not Rated".into()),
      released:        None,
      runtime_minutes: Some(101),
      plot:            None,
      country:         None,
      language:        None,
      box_office:      None,
      production:      None,
      flags:           TopicalFlags::default(),
    });
    assert!(rendered.contains("\nreleased:: N/A\n"));
    let parsed = parse_movie_note(&rendered).unwrap();
    assert_eq!(parsed.released, None);
    assert_eq!(parsed.runtime_minutes, Some(101));
  }
}
