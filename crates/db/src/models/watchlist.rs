//! Watchlist entry models.

use reelbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/* --------------------------------------------------------------------------
   Watchlist entries
   -------------------------------------------------------------------------- */

/// A row from the `watchlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub status: String,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A watchlist entry joined with the catalogue columns the recommendation
/// engine reads, so one query covers both.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistEntryWithMovie {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub status: String,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub average_rating: f64,
    pub popularity: f64,
}

/// DTO for adding a movie to a user's watchlist.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWatchlistEntry {
    pub movie_id: DbId,
    pub status: Option<String>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for updating an existing watchlist entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWatchlistEntry {
    pub status: Option<String>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}
