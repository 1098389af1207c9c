//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use marquee_core::{
  movie::{CreditKind, Credit, ImdbId, Movie, MovieDetails, Rating, TopicalFlags},
  review::NewReview,
  store::MovieStore,
  watch::NewMovieWatch,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn credits(movie_uuid: Uuid, names: &[&str]) -> Vec<Credit> {
  names
    .iter()
    .map(|name| Credit {
      uuid: Uuid::new_v4(),
      movie_uuid,
      name: name.to_string(),
    })
    .collect()
}

fn tenebrae() -> MovieDetails {
  let uuid = Uuid::new_v4();
  let imdb_id = ImdbId::parse("tt0084777").unwrap();
  MovieDetails {
    movie:     Movie {
      uuid,
      imdb_link: imdb_id.imdb_link(),
      imdb_id,
      title: "Tenebrae".into(),
      year: 1982,
      rated: Some("Not Rated".into()),
      released: Some("1984-02-17".into()),
      runtime_minutes: Some(101),
      plot: Some("An American writer in Rome is stalked.".into()),
      country: Some("Italy".into()),
      language: Some("Italian, English".into()),
      box_office: None,
      production: None,
      flags: TopicalFlags { slasher: true, ..Default::default() },
    },
    genres:    credits(uuid, &["Horror", "Mystery", "Thriller"]),
    directors: credits(uuid, &["Dario Argento"]),
    writers:   credits(uuid, &["Dario Argento"]),
    actors:    credits(uuid, &["Anthony Franciosa", "Giuliano Gemma", "Daria Nicolodi"]),
    ratings:   vec![
      Rating {
        uuid:       Uuid::new_v4(),
        movie_uuid: uuid,
        source:     "Internet Movie Database".into(),
        value:      "7.0/10".into(),
      },
      Rating {
        uuid:       Uuid::new_v4(),
        movie_uuid: uuid,
        source:     "Rotten Tomatoes".into(),
        value:      "77%".into(),
      },
    ],
  }
}

fn watch_of(details: &MovieDetails, watched: NaiveDate) -> NewMovieWatch {
  NewMovieWatch {
    uuid:        None,
    movie_uuid:  Some(details.movie.uuid),
    movie_title: details.movie.title.clone(),
    imdb_id:     details.movie.imdb_id.clone(),
    watched,
    service:     "Shudder".into(),
    first_time:  true,
    joe_bob:     false,
    notes:       Some("Still great.\n".into()),
  }
}

// ─── Movies ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_movie_details_round_trips() {
  let s = store().await;
  let details = tenebrae();
  let uuid = s.insert_movie_details(details.clone()).await.unwrap();
  assert_eq!(uuid, details.movie.uuid);

  let movie = s.get_movie(uuid).await.unwrap().unwrap();
  assert_eq!(movie, details.movie);

  for kind in CreditKind::ALL {
    let names = s.names_for_movie(kind, uuid).await.unwrap();
    assert_eq!(names, details.names(kind), "{kind:?} names");
  }
  assert_eq!(
    s.actor_names_for_movie(uuid).await.unwrap(),
    vec!["Anthony Franciosa", "Giuliano Gemma", "Daria Nicolodi"]
  );

  let ratings = s.ratings_for_movie(uuid).await.unwrap();
  assert_eq!(ratings, details.ratings);
}

#[tokio::test]
async fn find_movie_by_imdb_id() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();

  let found = s.find_movie_by_imdb_id(&details.movie.imdb_id).await.unwrap();
  assert_eq!(found, Some(details.movie.uuid));

  let missing = ImdbId::parse("tt0000001").unwrap();
  assert_eq!(s.find_movie_by_imdb_id(&missing).await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_imdb_id_is_rejected() {
  let s = store().await;
  s.insert_movie_details(tenebrae()).await.unwrap();

  let err = s.insert_movie_details(tenebrae()).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "got {err:?}");
  assert_eq!(s.list_movies().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_insert_leaves_no_child_rows() {
  let s = store().await;
  let first = tenebrae();
  s.insert_movie_details(first).await.unwrap();

  // Same IMDb id, so the movie insert fails and nothing else lands.
  let second = tenebrae();
  let second_uuid = second.movie.uuid;
  s.insert_movie_details(second).await.unwrap_err();

  assert!(s.genre_names_for_movie(second_uuid).await.unwrap().is_empty());
  assert!(s.ratings_for_movie(second_uuid).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_movie_cascade_removes_children() {
  let s = store().await;
  let details = tenebrae();
  let uuid = s.insert_movie_details(details).await.unwrap();

  s.delete_movie_cascade(uuid).await.unwrap();

  assert!(s.get_movie(uuid).await.unwrap().is_none());
  for kind in CreditKind::ALL {
    assert!(s.names_for_movie(kind, uuid).await.unwrap().is_empty());
  }
  assert!(s.ratings_for_movie(uuid).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_movie_cascade_orphans_watches() {
  let s = store().await;
  let details = tenebrae();
  let uuid = s.insert_movie_details(details.clone()).await.unwrap();
  let watch = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  s.delete_movie_cascade(uuid).await.unwrap();

  // The watch survives but no longer joins to a movie.
  assert!(s.get_all_movie_watches().await.unwrap().is_empty());
  let still_there = s
    .find_watch_by_natural_key(&details.movie.imdb_id, date(2022, 5, 27))
    .await
    .unwrap();
  assert_eq!(still_there, Some(watch.uuid));
}

#[tokio::test]
async fn delete_unknown_movie_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.delete_movie_cascade(id).await.unwrap_err();
  assert!(matches!(err, Error::MovieNotFound(got) if got == id));
}

// ─── Watches ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn natural_key_lookup_misses_are_none() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  s.insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  // Slaughterhouse was never watched.
  let slaughterhouse = ImdbId::parse("tt0093964").unwrap();
  assert_eq!(
    s.find_watch_by_natural_key(&slaughterhouse, date(2022, 5, 27))
      .await
      .unwrap(),
    None
  );
  assert_eq!(s.find_movie_by_imdb_id(&slaughterhouse).await.unwrap(), None);

  // Tenebrae, but on another day.
  assert_eq!(
    s.find_watch_by_natural_key(&details.movie.imdb_id, date(2022, 5, 28))
      .await
      .unwrap(),
    None
  );
}

#[tokio::test]
async fn watch_joins_with_movie() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  let watch = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  let all = s.get_all_movie_watches().await.unwrap();
  assert_eq!(all.len(), 1);
  let joined = &all[0];
  assert_eq!(joined.watch, watch);
  assert_eq!(joined.movie_uuid, details.movie.uuid);
  assert_eq!(joined.imdb_link, "https://www.imdb.com/title/tt0084777/");
  assert!(joined.flags.slasher);
  assert!(!joined.flags.zombies);
}

#[tokio::test]
async fn watch_upsert_by_uuid_updates_in_place() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  let first = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  let mut edit = watch_of(&details, date(2022, 5, 27));
  edit.uuid = Some(first.uuid);
  edit.service = "Blu-ray".into();
  edit.joe_bob = true;
  let second = s.insert_movie_watch(edit).await.unwrap();

  assert_eq!(second.uuid, first.uuid);
  let all = s.get_all_movie_watches().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].watch.service, "Blu-ray");
  assert!(all[0].watch.joe_bob);
}

#[tokio::test]
async fn watch_without_uuid_reuses_natural_key_row() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  let first = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();
  let again = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  assert_eq!(first.uuid, again.uuid);
  assert_eq!(s.get_all_movie_watches().await.unwrap().len(), 1);
}

#[tokio::test]
async fn watch_title_follows_movie_row() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();

  let mut new = watch_of(&details, date(2022, 5, 27));
  new.movie_title = "Tenebre".into();
  let watch = s.insert_movie_watch(new).await.unwrap();
  assert_eq!(watch.movie_title, "Tenebrae");
}

#[tokio::test]
async fn watch_for_unknown_movie_fails() {
  let s = store().await;
  let details = tenebrae();
  let err = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::MovieNotFound(id) if id == details.movie.uuid));
}

#[tokio::test]
async fn latest_watch_date_tracks_max() {
  let s = store().await;
  assert_eq!(s.latest_watch_date().await.unwrap(), None);

  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  for d in [date(2022, 5, 27), date(2023, 10, 31), date(2021, 1, 2)] {
    s.insert_movie_watch(watch_of(&details, d)).await.unwrap();
  }
  assert_eq!(s.latest_watch_date().await.unwrap(), Some(date(2023, 10, 31)));
}

#[tokio::test]
async fn delete_movie_watch() {
  let s = store().await;
  let details = tenebrae();
  s.insert_movie_details(details.clone()).await.unwrap();
  let watch = s
    .insert_movie_watch(watch_of(&details, date(2022, 5, 27)))
    .await
    .unwrap();

  s.delete_movie_watch(watch.uuid).await.unwrap();
  assert!(s.get_all_movie_watches().await.unwrap().is_empty());

  let err = s.delete_movie_watch(watch.uuid).await.unwrap_err();
  assert!(matches!(err, Error::WatchNotFound(_)));
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn review_upsert_keeps_identity() {
  let s = store().await;
  let details = tenebrae();
  let movie_uuid = s.insert_movie_details(details).await.unwrap();

  let first = s
    .upsert_review(NewReview {
      movie_uuid,
      movie_title: "Tenebrae".into(),
      review: "Sharp.".into(),
      liked: true,
    })
    .await
    .unwrap();

  let second = s
    .upsert_review(NewReview {
      movie_uuid,
      movie_title: "Tenebrae".into(),
      review: "Sharper on rewatch.".into(),
      liked: false,
    })
    .await
    .unwrap();

  assert_eq!(second.uuid, first.uuid);
  assert_eq!(second.created_at, first.created_at);
  assert_eq!(second.review, "Sharper on rewatch.");
  assert!(!second.liked);

  let stored = s.find_review_for_movie(movie_uuid).await.unwrap().unwrap();
  assert_eq!(stored, second);
}

#[tokio::test]
async fn review_for_unknown_movie_is_rejected() {
  let s = store().await;
  let result = s
    .upsert_review(NewReview {
      movie_uuid:  Uuid::new_v4(),
      movie_title: "Nothing".into(),
      review:      "".into(),
      liked:       false,
    })
    .await;
  assert!(result.is_err());
}

#[tokio::test]
async fn open_creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("data").join("movies.db");
  let s = SqliteStore::open(&path).await.unwrap();
  s.insert_movie_details(tenebrae()).await.unwrap();
  assert!(path.exists());

  // Reopening applies the schema idempotently.
  drop(s);
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_movies().await.unwrap().len(), 1);
}
