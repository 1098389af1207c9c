//! [`SqliteStore`], the SQLite implementation of [`MovieStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use marquee_core::{
  movie::{CreditKind, ImdbId, Movie, MovieDetails, Rating},
  review::{NewReview, Review},
  store::MovieStore,
  watch::{JoinedWatch, MovieWatch, NewMovieWatch},
};

use crate::{
  encode::{
    decode_date, decode_uuid, encode_date, encode_uuid, RawJoinedWatch, RawMovie,
    RawRating, RawReview, MOVIE_COLUMNS,
  },
  schema::SCHEMA,
  Error, Result,
};

/// Where the CLI looks for the database when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "./data/movies.db";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A movie store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MovieStore impl ─────────────────────────────────────────────────────────

impl MovieStore for SqliteStore {
  type Error = Error;

  async fn find_movie_by_imdb_id(&self, imdb_id: &ImdbId) -> Result<Option<Uuid>> {
    let id = imdb_id.as_str().to_owned();
    let found: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT uuid FROM movie WHERE imdb_id = ?1",
              rusqlite::params![id],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    found.as_deref().map(decode_uuid).transpose()
  }

  async fn find_watch_by_natural_key(
    &self,
    imdb_id: &ImdbId,
    watched: NaiveDate,
  ) -> Result<Option<Uuid>> {
    let id = imdb_id.as_str().to_owned();
    let watched_str = encode_date(watched);
    let found: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT uuid FROM movie_watch WHERE imdb_id = ?1 AND watched = ?2",
              rusqlite::params![id, watched_str],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    found.as_deref().map(decode_uuid).transpose()
  }

  async fn latest_watch_date(&self) -> Result<Option<NaiveDate>> {
    let latest: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT MAX(watched) FROM movie_watch", [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    latest.as_deref().map(decode_date).transpose()
  }

  async fn insert_movie_details(&self, details: MovieDetails) -> Result<Uuid> {
    let movie_uuid = details.movie.uuid;
    let imdb_id = details.movie.imdb_id.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let m = &details.movie;
        tx.execute(
          "INSERT INTO movie (
             uuid, title, imdb_link, imdb_id, year, rated, released,
             runtime_minutes, plot, country, language, box_office, production,
             call_felissa, slasher, zombies, beast, godzilla, wallpaper_fu,
             created_datetime
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
          rusqlite::params![
            encode_uuid(m.uuid),
            m.title,
            m.imdb_link,
            m.imdb_id.as_str(),
            m.year,
            m.rated,
            m.released,
            m.runtime_minutes,
            m.plot,
            m.country,
            m.language,
            m.box_office,
            m.production,
            m.flags.call_felissa,
            m.flags.slasher,
            m.flags.zombies,
            m.flags.beast,
            m.flags.godzilla,
            m.flags.wallpaper_fu,
            Utc::now().timestamp(),
          ],
        )?;

        for kind in CreditKind::ALL {
          let sql = format!(
            "INSERT INTO movie_{} (uuid, movie_uuid, name) VALUES (?1, ?2, ?3)",
            kind.key()
          );
          let mut stmt = tx.prepare(&sql)?;
          for credit in details.credits(kind) {
            stmt.execute(rusqlite::params![
              encode_uuid(credit.uuid),
              encode_uuid(credit.movie_uuid),
              credit.name,
            ])?;
          }
        }

        {
          let mut stmt = tx.prepare(
            "INSERT INTO movie_rating (uuid, movie_uuid, source, value)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for rating in &details.ratings {
            stmt.execute(rusqlite::params![
              encode_uuid(rating.uuid),
              encode_uuid(rating.movie_uuid),
              rating.source,
              rating.value,
            ])?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(%movie_uuid, %imdb_id, "inserted movie details");
    Ok(movie_uuid)
  }

  async fn insert_movie_watch(&self, watch: NewMovieWatch) -> Result<MovieWatch> {
    let requested = watch.uuid.map(encode_uuid);
    let movie_uuid = watch.movie_uuid.map(encode_uuid);
    let imdb_id = watch.imdb_id.as_str().to_owned();
    let watched = encode_date(watch.watched);
    let service = watch.service.clone();
    let notes = watch.notes.clone();
    let (first_time, joe_bob) = (watch.first_time, watch.joe_bob);
    let note_title = watch.movie_title.clone();

    // Err carries the uuid of a referenced movie that does not exist.
    let outcome: std::result::Result<(String, String), String> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Denormalised fields follow the movie row when there is one.
        let (title, imdb_id) = match &movie_uuid {
          Some(movie_uuid) => {
            let row: Option<(String, String)> = tx
              .query_row(
                "SELECT title, imdb_id FROM movie WHERE uuid = ?1",
                rusqlite::params![movie_uuid],
                |r| Ok((r.get(0)?, r.get(1)?)),
              )
              .optional()?;
            match row {
              Some(row) => row,
              None => return Ok(Err(movie_uuid.clone())),
            }
          }
          None => (note_title, imdb_id),
        };

        let uuid = match requested {
          Some(uuid) => uuid,
          None => tx
            .query_row(
              "SELECT uuid FROM movie_watch WHERE imdb_id = ?1 AND watched = ?2",
              rusqlite::params![imdb_id, watched],
              |r| r.get(0),
            )
            .optional()?
            .unwrap_or_else(|| encode_uuid(Uuid::new_v4())),
        };

        tx.execute(
          "INSERT INTO movie_watch (
             uuid, movie_uuid, movie_title, imdb_id, watched, service,
             first_time, joe_bob, notes, created_datetime
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
           ON CONFLICT(uuid) DO UPDATE SET
             movie_uuid  = excluded.movie_uuid,
             movie_title = excluded.movie_title,
             imdb_id     = excluded.imdb_id,
             watched     = excluded.watched,
             service     = excluded.service,
             first_time  = excluded.first_time,
             joe_bob     = excluded.joe_bob,
             notes       = excluded.notes",
          rusqlite::params![
            uuid,
            movie_uuid,
            title,
            imdb_id,
            watched,
            service,
            first_time,
            joe_bob,
            notes,
            Utc::now().timestamp(),
          ],
        )?;
        tx.commit()?;
        Ok(Ok((uuid, title)))
      })
      .await?;

    let (uuid, title) = match outcome {
      Ok(found) => found,
      Err(missing) => return Err(Error::MovieNotFound(decode_uuid(&missing)?)),
    };

    let mut persisted = watch.into_watch(decode_uuid(&uuid)?);
    persisted.movie_title = title;
    tracing::debug!(uuid = %persisted.uuid, imdb_id = %persisted.imdb_id, "upserted movie watch");
    Ok(persisted)
  }

  async fn upsert_review(&self, review: NewReview) -> Result<Review> {
    let movie_uuid = encode_uuid(review.movie_uuid);
    let movie_title = review.movie_title.clone();
    let body = review.review.clone();
    let liked = review.liked;

    let raw: RawReview = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
          .query_row(
            "SELECT uuid FROM review WHERE movie_uuid = ?1
             ORDER BY created_datetime DESC LIMIT 1",
            rusqlite::params![movie_uuid],
            |r| r.get(0),
          )
          .optional()?;

        let uuid = match existing {
          Some(uuid) => {
            tx.execute(
              "UPDATE review SET movie_title = ?2, review = ?3, liked = ?4
               WHERE uuid = ?1",
              rusqlite::params![uuid, movie_title, body, liked],
            )?;
            uuid
          }
          None => {
            let uuid = encode_uuid(Uuid::new_v4());
            tx.execute(
              "INSERT INTO review (
                 uuid, movie_uuid, movie_title, review, liked, created_datetime
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
              rusqlite::params![
                uuid,
                movie_uuid,
                movie_title,
                body,
                liked,
                Utc::now().timestamp(),
              ],
            )?;
            uuid
          }
        };

        let raw = tx.query_row(
          "SELECT uuid, movie_uuid, movie_title, review, liked, created_datetime
           FROM review WHERE uuid = ?1",
          rusqlite::params![uuid],
          RawReview::from_row,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_review()
  }

  async fn delete_movie_cascade(&self, movie_uuid: Uuid) -> Result<()> {
    let id = encode_uuid(movie_uuid);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for table in [
          "movie_rating",
          "movie_genre",
          "movie_director",
          "movie_writer",
          "movie_actor",
        ] {
          tx.execute(
            &format!("DELETE FROM {table} WHERE movie_uuid = ?1"),
            rusqlite::params![id],
          )?;
        }
        let deleted =
          tx.execute("DELETE FROM movie WHERE uuid = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(deleted)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::MovieNotFound(movie_uuid));
    }
    tracing::debug!(%movie_uuid, "deleted movie and its child rows");
    Ok(())
  }

  async fn delete_movie_watch(&self, uuid: Uuid) -> Result<()> {
    let id = encode_uuid(uuid);
    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM movie_watch WHERE uuid = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::WatchNotFound(uuid));
    }
    Ok(())
  }

  async fn get_all_movie_watches(&self) -> Result<Vec<JoinedWatch>> {
    let raws: Vec<RawJoinedWatch> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT w.uuid, w.movie_uuid, w.movie_title, w.imdb_id, w.watched,
                  w.service, w.first_time, w.joe_bob, w.notes,
                  m.uuid, m.imdb_link, m.call_felissa, m.slasher, m.zombies,
                  m.beast, m.godzilla, m.wallpaper_fu
           FROM movie_watch w
           INNER JOIN movie m ON m.uuid = w.movie_uuid",
        )?;
        let rows = stmt
          .query_map([], RawJoinedWatch::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJoinedWatch::into_joined).collect()
  }

  async fn get_movie(&self, uuid: Uuid) -> Result<Option<Movie>> {
    let id = encode_uuid(uuid);
    let raw: Option<RawMovie> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE uuid = ?1"),
              rusqlite::params![id],
              RawMovie::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawMovie::into_movie).transpose()
  }

  async fn list_movies(&self) -> Result<Vec<Movie>> {
    let raws: Vec<RawMovie> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {MOVIE_COLUMNS} FROM movie ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawMovie::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawMovie::into_movie).collect()
  }

  async fn names_for_movie(
    &self,
    kind: CreditKind,
    movie_uuid: Uuid,
  ) -> Result<Vec<String>> {
    let id = encode_uuid(movie_uuid);
    let sql = format!(
      "SELECT name FROM movie_{} WHERE movie_uuid = ?1 ORDER BY rowid",
      kind.key()
    );
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id], |r| r.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  async fn ratings_for_movie(&self, movie_uuid: Uuid) -> Result<Vec<Rating>> {
    let id = encode_uuid(movie_uuid);
    let raws: Vec<RawRating> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT uuid, movie_uuid, source, value FROM movie_rating
           WHERE movie_uuid = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |r| {
            Ok(RawRating {
              uuid:       r.get(0)?,
              movie_uuid: r.get(1)?,
              source:     r.get(2)?,
              value:      r.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawRating::into_rating).collect()
  }

  async fn find_review_for_movie(&self, movie_uuid: Uuid) -> Result<Option<Review>> {
    let id = encode_uuid(movie_uuid);
    let raw: Option<RawReview> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT uuid, movie_uuid, movie_title, review, liked, created_datetime
               FROM review WHERE movie_uuid = ?1
               ORDER BY created_datetime DESC LIMIT 1",
              rusqlite::params![id],
              RawReview::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawReview::into_review).transpose()
  }
}
