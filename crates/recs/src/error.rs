//! Recommendation engine errors.

use reelbase_core::types::DbId;
use reelbase_db::StoreError;
use thiserror::Error;

/// Errors surfaced by recommendation operations.
///
/// Storage failures are wrapped per operation so callers can map each to
/// a stable user-facing message without inspecting the cause chain.
#[derive(Debug, Error)]
pub enum RecsError {
    /// The reference movie of a similarity query does not exist.
    #[error("Movie not found: {0}")]
    MovieNotFound(DbId),

    /// Personalized recommendation inputs could not be loaded or scored.
    #[error("Failed to get recommendations")]
    Recommendations(#[source] StoreError),

    /// Similar-movie candidates could not be loaded.
    #[error("Failed to get similar movies")]
    SimilarMovies(#[source] StoreError),

    /// The trending chart could not be loaded.
    #[error("Failed to get trending movies")]
    TrendingMovies(#[source] StoreError),

    /// Derived preferences could not be computed or stored.
    #[error("Failed to update user preferences")]
    PreferenceRefresh(#[source] StoreError),
}

/// Convenience alias for engine operation results.
pub type RecsResult<T> = Result<T, RecsError>;
