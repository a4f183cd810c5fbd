//! Client for The Movie Database (TMDB) v3 HTTP API.
//!
//! Covers the three endpoints the catalogue import needs: title search,
//! the popular listing, and per-movie details. Ratings stay on TMDB's
//! 0-10 scale, matching the catalogue's own rating range.

pub mod client;
pub mod types;

pub use client::{TmdbClient, TmdbError, DEFAULT_BASE_URL};
pub use types::{TmdbGenre, TmdbMovieDetails, TmdbMovieSummary, TmdbPage};
