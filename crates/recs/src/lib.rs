//! Recommendation engine.
//!
//! Combines a user's watch history, reviews and stored preferences into
//! ranked movie recommendations, and keeps the stored preferences in step
//! with recent activity. All storage access goes through the
//! [`CatalogStore`](reelbase_db::CatalogStore) seam, so the engine itself
//! is plain scoring and orchestration.

pub mod engine;
pub mod error;

pub use engine::RecommendationEngine;
pub use error::{RecsError, RecsResult};
