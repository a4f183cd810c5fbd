//! Storage abstraction consumed by the recommendation engine.
//!
//! The engine only ever talks to a [`CatalogStore`], so tests can swap in an
//! in-memory implementation and the Postgres wiring stays in one place.

use async_trait::async_trait;
use reelbase_core::preferences::DerivedPreferences;
use reelbase_core::types::DbId;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::movie::Movie;
use crate::models::preferences::UserPreferences;
use crate::models::review::ReviewWithMovie;
use crate::models::watchlist::WatchlistEntryWithMovie;
use crate::repositories::{MovieRepo, PreferencesRepo, ReviewRepo, WatchlistRepo};

/// Error raised by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database query failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// The backend cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Catalogue reads and preference writes the recommendation engine needs.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Movies
    // =========================================================================

    /// Fetch a movie by ID.
    async fn movie(&self, id: DbId) -> StoreResult<Option<Movie>>;

    /// Fetch the most popular movies at or above `min_rating`, excluding the
    /// given IDs.
    async fn recommendation_candidates(
        &self,
        exclude_ids: &[DbId],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>>;

    /// Fetch movies sharing at least one of `genres`, excluding `movie_id`
    /// and anything rated below `min_rating`.
    async fn genre_overlap_candidates(
        &self,
        movie_id: DbId,
        genres: &[String],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>>;

    /// Fetch the best-rated movies with at least `min_rating_count` reviews,
    /// ordered rating first, then review count, then popularity.
    async fn top_rated(
        &self,
        min_rating: f64,
        min_rating_count: i32,
        limit: i64,
    ) -> StoreResult<Vec<Movie>>;

    // =========================================================================
    // Watch history
    // =========================================================================

    /// Fetch a user's entire watchlist with movie details.
    async fn watchlist_with_movies(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>>;

    /// Fetch a user's most recently touched watchlist entries with movie
    /// details.
    async fn recent_watchlist_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>>;

    /// Fetch all of a user's reviews with movie details.
    async fn reviews_with_movies(&self, user_id: DbId) -> StoreResult<Vec<ReviewWithMovie>>;

    /// Fetch a user's most recently touched reviews with movie details.
    async fn recent_reviews_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<ReviewWithMovie>>;

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Fetch a user's stored preferences, if any.
    async fn user_preferences(&self, user_id: DbId) -> StoreResult<Option<UserPreferences>>;

    /// Store derived preferences for a user, leaving user-set fields alone.
    async fn upsert_preferences(
        &self,
        user_id: DbId,
        derived: &DerivedPreferences,
    ) -> StoreResult<UserPreferences>;
}

/// Postgres-backed [`CatalogStore`] delegating to the repository layer.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        Ok(MovieRepo::find_by_id(&self.pool, id).await?)
    }

    async fn recommendation_candidates(
        &self,
        exclude_ids: &[DbId],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        Ok(MovieRepo::recommendation_candidates(&self.pool, exclude_ids, min_rating, limit).await?)
    }

    async fn genre_overlap_candidates(
        &self,
        movie_id: DbId,
        genres: &[String],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        Ok(
            MovieRepo::genre_overlap_candidates(&self.pool, movie_id, genres, min_rating, limit)
                .await?,
        )
    }

    async fn top_rated(
        &self,
        min_rating: f64,
        min_rating_count: i32,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        Ok(MovieRepo::top_rated(&self.pool, min_rating, min_rating_count, limit).await?)
    }

    async fn watchlist_with_movies(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>> {
        Ok(WatchlistRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn recent_watchlist_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>> {
        Ok(WatchlistRepo::recent_for_user(&self.pool, user_id, limit).await?)
    }

    async fn reviews_with_movies(&self, user_id: DbId) -> StoreResult<Vec<ReviewWithMovie>> {
        Ok(ReviewRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn recent_reviews_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<ReviewWithMovie>> {
        Ok(ReviewRepo::recent_for_user(&self.pool, user_id, limit).await?)
    }

    async fn user_preferences(&self, user_id: DbId) -> StoreResult<Option<UserPreferences>> {
        Ok(PreferencesRepo::find_by_user(&self.pool, user_id).await?)
    }

    async fn upsert_preferences(
        &self,
        user_id: DbId,
        derived: &DerivedPreferences,
    ) -> StoreResult<UserPreferences> {
        Ok(PreferencesRepo::upsert_derived(&self.pool, user_id, derived).await?)
    }
}
