//! HTTP client for the TMDB v3 API.

use serde::de::DeserializeOwned;

use crate::types::{TmdbMovieDetails, TmdbMovieSummary, TmdbPage};

/// Production TMDB API base.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("TMDB API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Client for the TMDB endpoints the catalogue import uses.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Search movies by title. Adult titles are always excluded.
    pub async fn search_movies(
        &self,
        query: &str,
        page: i64,
    ) -> Result<TmdbPage<TmdbMovieSummary>, TmdbError> {
        let url = format!("{}/search/movie", self.base_url);
        let page = page.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("page", page.as_str()),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Self::parse_response(response).await
    }

    /// One page of the popular-movies chart.
    pub async fn popular_movies(
        &self,
        page: i64,
    ) -> Result<TmdbPage<TmdbMovieSummary>, TmdbError> {
        let url = format!("{}/movie/popular", self.base_url);
        let page = page.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("page", page.as_str()),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Self::parse_response(response).await
    }

    /// Full details for one movie, including resolved genre names.
    pub async fn movie_details(&self, tmdb_id: i64) -> Result<TmdbMovieDetails, TmdbError> {
        let url = format!("{}/movie/{}", self.base_url, tmdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Self::parse_response(response).await
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(TmdbError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TmdbError> {
        Ok(response.json::<T>().await?)
    }
}
