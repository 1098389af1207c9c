//! Reviews: free-text write-ups of a movie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted review. At most one review is kept per movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  pub uuid:        Uuid,
  pub movie_uuid:  Uuid,
  pub movie_title: String,
  pub review:      String,
  pub liked:       bool,
  /// Set on first insert; preserved across updates.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::MovieStore::upsert_review`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
  pub movie_uuid:  Uuid,
  pub movie_title: String,
  pub review:      String,
  pub liked:       bool,
}
