//! Repository for the `movies` table.
//!
//! Besides plain CRUD this hosts the catalogue queries the recommendation
//! engine is built on: candidate pools, the trending chart and the rating
//! aggregate refresh that runs after every review write.

use reelbase_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieFilter, UpdateMovie};

/// Column list for movies queries.
const COLUMNS: &str = "id, title, overview, genres, release_year, runtime, \
    poster_url, backdrop_url, tmdb_id, imdb_id, average_rating, rating_count, \
    popularity, created_by, created_at, updated_at";

/// Sort columns accepted by `list`; anything else falls back to `created_at`.
const SORT_COLUMNS: &[&str] = &[
    "title",
    "release_year",
    "average_rating",
    "popularity",
    "created_at",
];

/// Default page size for catalogue listing.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on page size.
const MAX_PAGE_SIZE: i64 = 100;

/// Provides CRUD and catalogue queries for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Create a new movie, returning the created row.
    ///
    /// Aggregate columns default to zero unless the DTO seeds them (external
    /// imports carry ratings from the source catalogue).
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies
                (title, overview, genres, release_year, runtime, poster_url,
                 backdrop_url, tmdb_id, imdb_id, average_rating, rating_count,
                 popularity, created_by)
             VALUES ($1, $2, COALESCE($3, '{{}}'), $4, $5, $6, $7, $8, $9,
                     COALESCE($10, 0), COALESCE($11, 0), COALESCE($12, 0), $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.overview)
            .bind(&input.genres)
            .bind(input.release_year)
            .bind(input.runtime)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(input.tmdb_id)
            .bind(&input.imdb_id)
            .bind(input.average_rating)
            .bind(input.rating_count)
            .bind(input.popularity)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its external catalogue ID (import dedupe).
    pub async fn find_by_tmdb_id(
        pool: &PgPool,
        tmdb_id: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE tmdb_id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await
    }

    /// List movies with filtering, sorting and pagination.
    pub async fn list(pool: &PgPool, filter: &MovieFilter) -> Result<Vec<Movie>, sqlx::Error> {
        let limit = filter
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = filter.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let (where_clause, bind_values, bind_idx) = build_movie_filter(filter);
        let order_clause = build_order_clause(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM movies {where_clause} {order_clause} \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_movie_values(sqlx::query_as::<_, Movie>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count movies matching the given filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &MovieFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_movie_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM movies {where_clause}");

        let q = bind_movie_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Fetch the candidate pool for personalized recommendations.
    ///
    /// Excludes the given IDs, keeps only movies at or above the rating
    /// floor, and returns the most popular remainder. Ordering carries a
    /// secondary `id` key so repeated calls see the same pool.
    pub async fn recommendation_candidates(
        pool: &PgPool,
        exclude_ids: &[DbId],
        min_rating: f64,
        limit: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE NOT (id = ANY($1)) AND average_rating >= $2
             ORDER BY popularity DESC, id ASC
             LIMIT $3"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(exclude_ids)
            .bind(min_rating)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fetch candidates sharing at least one genre with a reference movie.
    ///
    /// The reference itself is excluded and candidates below the rating floor
    /// are dropped in SQL; similarity scoring happens in the engine.
    pub async fn genre_overlap_candidates(
        pool: &PgPool,
        movie_id: DbId,
        genres: &[String],
        min_rating: f64,
        limit: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE id <> $1 AND genres && $2 AND average_rating >= $3
             ORDER BY popularity DESC, id ASC
             LIMIT $4"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(movie_id)
            .bind(genres)
            .bind(min_rating)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fetch the best-rated movies with enough reviews to trust the average.
    pub async fn top_rated(
        pool: &PgPool,
        min_rating: f64,
        min_rating_count: i32,
        limit: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE average_rating >= $1 AND rating_count >= $2
             ORDER BY average_rating DESC, rating_count DESC, popularity DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(min_rating)
            .bind(min_rating_count)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Recompute a movie's rating aggregates from its reviews.
    ///
    /// A movie with no reviews resets to `average_rating = 0, rating_count = 0`.
    pub async fn refresh_rating_stats(pool: &PgPool, id: DbId) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                average_rating = COALESCE(
                    (SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE movie_id = $1), 0),
                rating_count =
                    (SELECT COUNT(*)::INT FROM reviews WHERE movie_id = $1)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update a movie's editable fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($1, title),
                overview = COALESCE($2, overview),
                genres = COALESCE($3, genres),
                release_year = COALESCE($4, release_year),
                runtime = COALESCE($5, runtime),
                poster_url = COALESCE($6, poster_url),
                backdrop_url = COALESCE($7, backdrop_url),
                imdb_id = COALESCE($8, imdb_id),
                popularity = COALESCE($9, popularity)
             WHERE id = $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.overview)
            .bind(&input.genres)
            .bind(input.release_year)
            .bind(input.runtime)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(&input.imdb_id)
            .bind(input.popularity)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie by its ID. Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built catalogue queries.
enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Int(i32),
    Double(f64),
}

/// Build a WHERE clause and bind values from `MovieFilter` parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_movie_filter(filter: &MovieFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref search) = filter.search {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR overview ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{search}%")));
    }

    if let Some(ref genres) = filter.genres {
        if !genres.is_empty() {
            // Contains-all: a movie must carry every requested genre.
            conditions.push(format!("genres @> ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::TextArray(genres.clone()));
        }
    }

    if let Some(year) = filter.release_year {
        conditions.push(format!("release_year = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(year));
    }

    if let Some(min_rating) = filter.min_rating {
        conditions.push(format!("average_rating >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Double(min_rating));
    }

    if let Some(max_rating) = filter.max_rating {
        conditions.push(format!("average_rating <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Double(max_rating));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Build an ORDER BY clause from whitelisted sort parameters.
fn build_order_clause(filter: &MovieFilter) -> String {
    let sort_by = filter
        .sort_by
        .as_deref()
        .filter(|col| SORT_COLUMNS.contains(col))
        .unwrap_or("created_at");
    let sort_order = match filter.sort_order.as_deref() {
        Some(order) if order.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    };
    format!("ORDER BY {sort_by} {sort_order}")
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_movie_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Double(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_movie_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Double(v) => q = q.bind(*v),
        }
    }
    q
}
