//! Repository for the `reviews` table.
//!
//! Review writes keep the movie's rating aggregates in step: the
//! `*_and_refresh` methods recompute `average_rating` and `rating_count`
//! after the review row changes.

use reelbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::Movie;
use crate::models::review::{Review, ReviewWithMovie, UpsertReview};
use crate::repositories::movie_repo::MovieRepo;

/// Column list for reviews queries.
const COLUMNS: &str = "id, user_id, movie_id, rating, content, created_at, updated_at";

/// Column list for review-with-movie joins (aliases match `ReviewWithMovie`).
const WITH_MOVIE_COLUMNS: &str = "r.id, r.user_id, r.movie_id, r.rating, r.content, \
    r.created_at, r.updated_at, m.title, m.genres, m.release_year, m.average_rating, \
    m.popularity";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Create or replace a user's review of a movie.
    ///
    /// Reviews are unique per `(user_id, movie_id)`; a second submission
    /// overwrites the rating and content of the first.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, movie_id, rating, content)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, movie_id) DO UPDATE SET
                rating = EXCLUDED.rating,
                content = EXCLUDED.content
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(input.movie_id)
            .bind(input.rating)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Upsert a review and recompute the movie's rating aggregates.
    pub async fn upsert_and_refresh(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertReview,
    ) -> Result<(Review, Movie), sqlx::Error> {
        let review = Self::upsert(pool, user_id, input).await?;
        let movie = MovieRepo::refresh_rating_stats(pool, review.movie_id).await?;
        Ok((review, movie))
    }

    /// List a page of a movie's reviews, newest first.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE movie_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all of a user's reviews with movie details, most recently
    /// touched first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReviewWithMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MOVIE_COLUMNS}
             FROM reviews r
             INNER JOIN movies m ON m.id = r.movie_id
             WHERE r.user_id = $1
             ORDER BY r.updated_at DESC"
        );
        sqlx::query_as::<_, ReviewWithMovie>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch a user's most recently touched reviews, movie details included.
    /// Feeds taste profiling and preference refresh.
    pub async fn recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ReviewWithMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MOVIE_COLUMNS}
             FROM reviews r
             INNER JOIN movies m ON m.id = r.movie_id
             WHERE r.user_id = $1
             ORDER BY r.updated_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ReviewWithMovie>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a user's review of a specific movie.
    pub async fn find_by_user_and_movie(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user's review of a movie and recompute the movie's rating
    /// aggregates. Returns the refreshed movie, or `None` if there was no
    /// review to delete.
    pub async fn delete_and_refresh(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let deleted = sqlx::query_scalar::<_, DbId>(
            "DELETE FROM reviews WHERE user_id = $1 AND movie_id = $2 RETURNING movie_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(pool)
        .await?;

        match deleted {
            Some(movie_id) => {
                let movie = MovieRepo::refresh_rating_stats(pool, movie_id).await?;
                Ok(Some(movie))
            }
            None => Ok(None),
        }
    }
}
