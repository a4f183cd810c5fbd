//! Review models.

use reelbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/* --------------------------------------------------------------------------
   Reviews
   -------------------------------------------------------------------------- */

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub rating: i32,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review joined with the catalogue columns the recommendation engine
/// reads, so one query covers both.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithMovie {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub rating: i32,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub average_rating: f64,
    pub popularity: f64,
}

/// DTO for creating or replacing a user's review of a movie.
///
/// Reviews are unique per `(user_id, movie_id)`; submitting a second review
/// for the same movie overwrites the first.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertReview {
    pub movie_id: DbId,
    pub rating: i32,
    pub content: Option<String>,
}
