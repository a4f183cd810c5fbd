//! The four recommendation operations.
//!
//! Each operation loads what it needs through the store, runs the pure
//! scoring from `reelbase-core` and returns plain movie rows. Candidate
//! pre-filtering (exclusions, rating floors, genre overlap) happens in
//! SQL; ranking happens here.

use std::collections::HashSet;
use std::sync::Arc;

use reelbase_core::affinity::TasteProfile;
use reelbase_core::preferences::{PreferenceAccumulator, DEFAULT_MIN_RATING, TASTE_WINDOW};
use reelbase_core::scoring::{
    clamp_limit, personalized_score, rank_top_n, similarity_score, MovieSignals,
    CANDIDATE_POOL_SIZE, DEFAULT_LIMIT, MAX_LIMIT, SIMILAR_CANDIDATE_FACTOR,
    SIMILAR_RATING_FLOOR_FACTOR,
};
use reelbase_core::trending::{TRENDING_MIN_RATING, TRENDING_MIN_RATING_COUNT};
use reelbase_core::types::DbId;
use reelbase_core::watchlist::WatchStatus;
use reelbase_db::models::movie::Movie;
use reelbase_db::models::preferences::UserPreferences;
use reelbase_db::CatalogStore;

use crate::error::{RecsError, RecsResult};

/// Scores and ranks movies for users against a [`CatalogStore`].
#[derive(Clone)]
pub struct RecommendationEngine {
    store: Arc<dyn CatalogStore>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Rank unseen movies for a user by taste-profile score.
    ///
    /// The profile sums the user's ratings per genre and per release year:
    /// completed-and-rated watchlist entries count, every review counts,
    /// and stored preferences add flat boosts on top. Candidates are the
    /// most popular movies the user has not rated, at or above the user's
    /// rating floor.
    pub async fn personalized_recommendations(
        &self,
        user_id: DbId,
        limit: Option<i64>,
    ) -> RecsResult<Vec<Movie>> {
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);

        let (watchlist, reviews, preferences) = tokio::try_join!(
            self.store.watchlist_with_movies(user_id),
            self.store.reviews_with_movies(user_id),
            self.store.user_preferences(user_id),
        )
        .map_err(RecsError::Recommendations)?;

        // Only rated activity excludes a movie; a planned or unrated entry
        // leaves it recommendable.
        let mut profile = TasteProfile::new();
        let mut rated: HashSet<DbId> = HashSet::new();
        for entry in &watchlist {
            if entry.status == WatchStatus::Completed.as_str() {
                if let Some(rating) = entry.rating {
                    rated.insert(entry.movie_id);
                    profile.add_rated_title(&entry.genres, entry.release_year, f64::from(rating));
                }
            }
        }
        for review in &reviews {
            rated.insert(review.movie_id);
            profile.add_rated_title(&review.genres, review.release_year, f64::from(review.rating));
        }

        let min_rating = match &preferences {
            Some(prefs) => {
                profile.apply_preferences(&prefs.favorite_genres, &prefs.preferred_years);
                prefs.min_rating
            }
            None => DEFAULT_MIN_RATING,
        };

        let exclude_ids: Vec<DbId> = rated.into_iter().collect();

        let candidates = self
            .store
            .recommendation_candidates(&exclude_ids, min_rating, CANDIDATE_POOL_SIZE)
            .await
            .map_err(RecsError::Recommendations)?;

        tracing::debug!(
            user_id,
            watchlist = watchlist.len(),
            reviews = reviews.len(),
            candidates = candidates.len(),
            min_rating,
            "Scoring personalized recommendations"
        );

        let scored: Vec<(Movie, f64)> = candidates
            .into_iter()
            .map(|movie| {
                let score = personalized_score(&profile, signals(&movie));
                (movie, score)
            })
            .collect();

        Ok(rank_top_n(scored, limit as usize))
    }

    /// Rank movies similar to a reference movie.
    ///
    /// Candidates must share at least one genre with the reference and
    /// rate at least 80% of its average; they are then scored on genre
    /// overlap, rating proximity and release-year proximity.
    pub async fn similar_movies(
        &self,
        movie_id: DbId,
        limit: Option<i64>,
    ) -> RecsResult<Vec<Movie>> {
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);

        let reference = self
            .store
            .movie(movie_id)
            .await
            .map_err(RecsError::SimilarMovies)?
            .ok_or(RecsError::MovieNotFound(movie_id))?;

        let rating_floor = reference.average_rating * SIMILAR_RATING_FLOOR_FACTOR;
        let candidates = self
            .store
            .genre_overlap_candidates(
                reference.id,
                &reference.genres,
                rating_floor,
                limit * SIMILAR_CANDIDATE_FACTOR,
            )
            .await
            .map_err(RecsError::SimilarMovies)?;

        tracing::debug!(
            movie_id,
            candidates = candidates.len(),
            rating_floor,
            "Scoring similar movies"
        );

        let scored: Vec<(Movie, f64)> = candidates
            .into_iter()
            .map(|movie| {
                let score = similarity_score(signals(&reference), signals(&movie));
                (movie, score)
            })
            .collect();

        Ok(rank_top_n(scored, limit as usize))
    }

    /// The best-rated movies with enough reviews to trust the average.
    ///
    /// Ordering is decided in SQL: rating first, then review count, then
    /// popularity.
    pub async fn trending_movies(&self, limit: Option<i64>) -> RecsResult<Vec<Movie>> {
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);

        let movies = self
            .store
            .top_rated(TRENDING_MIN_RATING, TRENDING_MIN_RATING_COUNT, limit)
            .await
            .map_err(RecsError::TrendingMovies)?;

        tracing::debug!(count = movies.len(), "Fetched trending movies");
        Ok(movies)
    }

    /// Re-derive and store a user's preferences from recent activity.
    ///
    /// Scans the user's most recent watchlist entries and reviews (two
    /// independent windows), counts genres and release years across the
    /// qualifying titles, and stores the top of each plus a rating floor.
    /// The user's own `max_runtime` setting is left alone.
    pub async fn refresh_user_preferences(&self, user_id: DbId) -> RecsResult<UserPreferences> {
        let (watchlist, reviews) = tokio::try_join!(
            self.store.recent_watchlist_with_movies(user_id, TASTE_WINDOW),
            self.store.recent_reviews_with_movies(user_id, TASTE_WINDOW),
        )
        .map_err(RecsError::PreferenceRefresh)?;

        // Watchlist first, then reviews: count ties resolve to whichever
        // genre or year entered the scan first.
        let mut accumulator = PreferenceAccumulator::new();
        for entry in &watchlist {
            if entry.status == WatchStatus::Completed.as_str() {
                if let Some(rating) = entry.rating {
                    accumulator.add_title(&entry.genres, entry.release_year, f64::from(rating));
                }
            }
        }
        for review in &reviews {
            accumulator.add_title(&review.genres, review.release_year, f64::from(review.rating));
        }

        let derived = accumulator.derive();
        tracing::info!(
            user_id,
            favorite_genres = ?derived.favorite_genres,
            preferred_years = ?derived.preferred_years,
            min_rating = derived.min_rating,
            "Storing refreshed preferences"
        );

        self.store
            .upsert_preferences(user_id, &derived)
            .await
            .map_err(RecsError::PreferenceRefresh)
    }
}

/// The scoring inputs of a movie row.
fn signals(movie: &Movie) -> MovieSignals<'_> {
    MovieSignals {
        genres: &movie.genres,
        release_year: movie.release_year,
        average_rating: movie.average_rating,
        popularity: movie.popularity,
    }
}
