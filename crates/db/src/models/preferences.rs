//! User preference models.

use reelbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/* --------------------------------------------------------------------------
   User preferences
   -------------------------------------------------------------------------- */

/// A row from the `user_preferences` table.
///
/// One row per user, keyed by `user_id`. `favorite_genres`, `preferred_years`
/// and `min_rating` are rewritten by the preference refresh; `max_runtime` is
/// only ever set explicitly by the user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreferences {
    pub user_id: DbId,
    pub favorite_genres: Vec<String>,
    pub preferred_years: Vec<i32>,
    pub min_rating: f64,
    pub max_runtime: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for explicitly replacing a user's preferences.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesUpdate {
    pub favorite_genres: Option<Vec<String>>,
    pub preferred_years: Option<Vec<i32>>,
    pub min_rating: Option<f64>,
    pub max_runtime: Option<i32>,
}
