//! Repository for the `watchlist_entries` table.

use reelbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::watchlist::{
    CreateWatchlistEntry, UpdateWatchlistEntry, WatchlistEntry, WatchlistEntryWithMovie,
};

/// Column list for watchlist_entries queries.
const COLUMNS: &str = "id, user_id, movie_id, status, rating, notes, created_at, updated_at";

/// Column list for entry-with-movie joins (aliases match `WatchlistEntryWithMovie`).
const WITH_MOVIE_COLUMNS: &str = "w.id, w.user_id, w.movie_id, w.status, w.rating, w.notes, \
    w.created_at, w.updated_at, m.title, m.genres, m.release_year, m.average_rating, \
    m.popularity";

/// Provides CRUD operations for watchlist entries.
pub struct WatchlistRepo;

impl WatchlistRepo {
    /// List a user's full watchlist with movie details, most recently
    /// touched first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WatchlistEntryWithMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MOVIE_COLUMNS}
             FROM watchlist_entries w
             INNER JOIN movies m ON m.id = w.movie_id
             WHERE w.user_id = $1
             ORDER BY w.updated_at DESC"
        );
        sqlx::query_as::<_, WatchlistEntryWithMovie>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the most recently touched entries for a user, movie details
    /// included. Feeds taste profiling and preference refresh.
    pub async fn recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<WatchlistEntryWithMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MOVIE_COLUMNS}
             FROM watchlist_entries w
             INNER JOIN movies m ON m.id = w.movie_id
             WHERE w.user_id = $1
             ORDER BY w.updated_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, WatchlistEntryWithMovie>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a user's entry for a specific movie.
    pub async fn find_entry(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<WatchlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watchlist_entries WHERE user_id = $1 AND movie_id = $2"
        );
        sqlx::query_as::<_, WatchlistEntry>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Add a movie to a user's watchlist, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWatchlistEntry,
    ) -> Result<WatchlistEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO watchlist_entries (user_id, movie_id, status, rating, notes)
             VALUES ($1, $2, COALESCE($3, 'PLANNED'), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchlistEntry>(&query)
            .bind(user_id)
            .bind(input.movie_id)
            .bind(&input.status)
            .bind(input.rating)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Update a user's entry for a movie (status, rating and/or notes).
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        input: &UpdateWatchlistEntry,
    ) -> Result<Option<WatchlistEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE watchlist_entries SET
                status = COALESCE($1, status),
                rating = COALESCE($2, rating),
                notes = COALESCE($3, notes)
             WHERE user_id = $4 AND movie_id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchlistEntry>(&query)
            .bind(&input.status)
            .bind(input.rating)
            .bind(&input.notes)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a movie from a user's watchlist. Returns true if a row was
    /// removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM watchlist_entries WHERE user_id = $1 AND movie_id = $2")
                .bind(user_id)
                .bind(movie_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
