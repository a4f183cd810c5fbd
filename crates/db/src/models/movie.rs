//! Movie catalogue models.

use reelbase_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/* --------------------------------------------------------------------------
   Movies
   -------------------------------------------------------------------------- */

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub runtime: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub average_rating: f64,
    pub rating_count: i32,
    pub popularity: f64,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
///
/// `average_rating`, `rating_count` and `popularity` are accepted so external
/// imports can seed aggregate stats; manual creation leaves them unset and the
/// columns fall back to their defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub overview: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_year: i32,
    pub runtime: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub average_rating: Option<f64>,
    pub rating_count: Option<i32>,
    pub popularity: Option<f64>,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing movie.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub runtime: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub imdb_id: Option<String>,
    pub popularity: Option<f64>,
}

/* --------------------------------------------------------------------------
   Listing filters
   -------------------------------------------------------------------------- */

/// Query parameters for paginated catalogue listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilter {
    pub search: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
