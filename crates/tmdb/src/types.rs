//! Wire types for the TMDB v3 API.

use serde::Deserialize;

/// Image CDN base for poster and backdrop paths, at 500px width.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// One page of a paginated listing response.
#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    pub page: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    pub total_results: i64,
}

/// A movie as returned by search and popular listings.
///
/// Listings carry genre IDs only; resolving names takes a details call.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
}

impl TmdbMovieSummary {
    /// Release year parsed from the `YYYY-MM-DD` release date.
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    pub fn poster_url(&self) -> Option<String> {
        image_url(self.poster_path.as_deref())
    }
}

/// A genre entry on a details response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

/// Full movie details, including resolved genre names.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl TmdbMovieDetails {
    /// Release year parsed from the `YYYY-MM-DD` release date.
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// Genre names in catalogue order.
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }

    pub fn poster_url(&self) -> Option<String> {
        image_url(self.poster_path.as_deref())
    }

    pub fn backdrop_url(&self) -> Option<String> {
        image_url(self.backdrop_path.as_deref())
    }
}

/// Parse the year out of a `YYYY-MM-DD` date string.
fn release_year(date: Option<&str>) -> Option<i32> {
    date?.get(..4)?.parse().ok()
}

/// Prefix a CDN path (e.g. `/abc.jpg`) with the image base URL.
fn image_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE_URL}{p}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
