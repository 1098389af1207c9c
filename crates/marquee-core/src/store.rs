//! The `MovieStore` trait: the typed surface over the relational store.
//!
//! The trait is implemented by storage backends (e.g. `marquee-store-sqlite`).
//! The reconciler in `marquee-vault` depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  movie::{CreditKind, ImdbId, Movie, MovieDetails, Rating},
  review::{NewReview, Review},
  watch::{JoinedWatch, MovieWatch, NewMovieWatch},
};

/// Abstraction over a movie store backend.
///
/// Natural-key lookups return `Ok(None)` when no row matches; any other
/// failure surfaces as `Err`. Every mutating method runs under its own
/// transaction.
///
/// All methods return `Send` futures so the trait can be shared across tasks
/// spawned on a multi-threaded runtime.
pub trait MovieStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Natural-key lookups ───────────────────────────────────────────────

  /// The uuid of the movie with `imdb_id`, if any.
  fn find_movie_by_imdb_id<'a>(
    &'a self,
    imdb_id: &'a ImdbId,
  ) -> impl Future<Output = Result<Option<Uuid>, Self::Error>> + Send + 'a;

  /// The uuid of the watch keyed by `(imdb_id, watched)`, if any.
  fn find_watch_by_natural_key<'a>(
    &'a self,
    imdb_id: &'a ImdbId,
    watched: NaiveDate,
  ) -> impl Future<Output = Result<Option<Uuid>, Self::Error>> + Send + 'a;

  /// The most recent `watched` date in the store, or `None` when empty.
  fn latest_watch_date(
    &self,
  ) -> impl Future<Output = Result<Option<NaiveDate>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a movie and all of its child rows atomically. Returns the movie
  /// uuid.
  fn insert_movie_details(
    &self,
    details: MovieDetails,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// Upsert a watch on its primary key and return the persisted row.
  fn insert_movie_watch(
    &self,
    watch: NewMovieWatch,
  ) -> impl Future<Output = Result<MovieWatch, Self::Error>> + Send + '_;

  /// Insert the review for `review.movie_uuid`, or update the existing one in
  /// place (keeping its uuid and creation time).
  fn upsert_review(
    &self,
    review: NewReview,
  ) -> impl Future<Output = Result<Review, Self::Error>> + Send + '_;

  /// Delete ratings, genres, directors, writers, actors and then the movie,
  /// in that order, under one transaction.
  fn delete_movie_cascade(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_movie_watch(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every watch inner-joined with its movie. No ordering is guaranteed.
  fn get_all_movie_watches(
    &self,
  ) -> impl Future<Output = Result<Vec<JoinedWatch>, Self::Error>> + Send + '_;

  fn get_movie(
    &self,
    uuid: Uuid,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + '_;

  fn list_movies(
    &self,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + '_;

  /// Names in one of the four credit relations, in insertion order.
  fn names_for_movie(
    &self,
    kind: CreditKind,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  fn ratings_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<Rating>, Self::Error>> + Send + '_;

  fn find_review_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Option<Review>, Self::Error>> + Send + '_;

  // ── Convenience reads ─────────────────────────────────────────────────

  fn genre_names_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    self.names_for_movie(CreditKind::Genre, movie_uuid)
  }

  fn director_names_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    self.names_for_movie(CreditKind::Director, movie_uuid)
  }

  fn writer_names_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    self.names_for_movie(CreditKind::Writer, movie_uuid)
  }

  fn actor_names_for_movie(
    &self,
    movie_uuid: Uuid,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_ {
    self.names_for_movie(CreditKind::Actor, movie_uuid)
  }
}
