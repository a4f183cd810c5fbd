//! Repository for the `user_preferences` table.

use reelbase_core::preferences::DerivedPreferences;
use reelbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::preferences::{PreferencesUpdate, UserPreferences};

/// Column list for user_preferences queries.
const COLUMNS: &str =
    "user_id, favorite_genres, preferred_years, min_rating, max_runtime, created_at, updated_at";

/// Provides operations for the single preferences row each user owns.
pub struct PreferencesRepo;

impl PreferencesRepo {
    /// Find a user's preferences row, if one exists.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's preferences, creating the row if needed.
    ///
    /// This is a full write, not a merge: fields left unset in the DTO are
    /// stored as their defaults, dropping whatever the row held before.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &PreferencesUpdate,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences
                (user_id, favorite_genres, preferred_years, min_rating, max_runtime)
             VALUES ($1, COALESCE($2, '{{}}'), COALESCE($3, '{{}}'), COALESCE($4, 6.0), $5)
             ON CONFLICT (user_id) DO UPDATE SET
                favorite_genres = EXCLUDED.favorite_genres,
                preferred_years = EXCLUDED.preferred_years,
                min_rating = EXCLUDED.min_rating,
                max_runtime = EXCLUDED.max_runtime
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .bind(&input.favorite_genres)
            .bind(&input.preferred_years)
            .bind(input.min_rating)
            .bind(input.max_runtime)
            .fetch_one(pool)
            .await
    }

    /// Store preferences derived from a user's watch history, creating the
    /// row if needed.
    ///
    /// Replaces `favorite_genres`, `preferred_years` and `min_rating`;
    /// `max_runtime` is user-set and stays untouched.
    pub async fn upsert_derived(
        pool: &PgPool,
        user_id: DbId,
        derived: &DerivedPreferences,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences
                (user_id, favorite_genres, preferred_years, min_rating)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET
                favorite_genres = EXCLUDED.favorite_genres,
                preferred_years = EXCLUDED.preferred_years,
                min_rating = EXCLUDED.min_rating
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .bind(&derived.favorite_genres)
            .bind(&derived.preferred_years)
            .bind(derived.min_rating)
            .fetch_one(pool)
            .await
    }
}
