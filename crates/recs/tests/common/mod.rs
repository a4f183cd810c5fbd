use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reelbase_core::preferences::DerivedPreferences;
use reelbase_core::types::{DbId, Timestamp};
use reelbase_db::models::movie::Movie;
use reelbase_db::models::preferences::UserPreferences;
use reelbase_db::models::review::ReviewWithMovie;
use reelbase_db::models::watchlist::WatchlistEntryWithMovie;
use reelbase_db::{CatalogStore, StoreError, StoreResult};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

fn next_id() -> DbId {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

fn now() -> Timestamp {
    Utc::now()
}

/// In-memory [`CatalogStore`] mirroring the SQL filter and order semantics
/// of the Postgres implementation, so engine tests run without a database.
#[derive(Default)]
pub struct MemoryStore {
    pub movies: Mutex<Vec<Movie>>,
    pub watchlist: Mutex<Vec<WatchlistEntryWithMovie>>,
    pub reviews: Mutex<Vec<ReviewWithMovie>>,
    pub preferences: Mutex<Vec<UserPreferences>>,
    fail_all: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn add_movie(&self, movie: Movie) {
        self.movies.lock().unwrap().push(movie);
    }

    pub fn add_watch(&self, entry: WatchlistEntryWithMovie) {
        self.watchlist.lock().unwrap().push(entry);
    }

    pub fn add_review(&self, review: ReviewWithMovie) {
        self.reviews.lock().unwrap().push(review);
    }

    pub fn add_preferences(&self, prefs: UserPreferences) {
        self.preferences.lock().unwrap().push(prefs);
    }

    pub fn stored_preferences(&self, user_id: DbId) -> Option<UserPreferences> {
        self.preferences
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail_all {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn movie(&self, id: DbId) -> StoreResult<Option<Movie>> {
        self.check()?;
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn recommendation_candidates(
        &self,
        exclude_ids: &[DbId],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        self.check()?;
        let mut movies: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !exclude_ids.contains(&m.id) && m.average_rating >= min_rating)
            .cloned()
            .collect();
        movies.sort_by(|a, b| {
            b.popularity
                .total_cmp(&a.popularity)
                .then_with(|| a.id.cmp(&b.id))
        });
        movies.truncate(limit as usize);
        Ok(movies)
    }

    async fn genre_overlap_candidates(
        &self,
        movie_id: DbId,
        genres: &[String],
        min_rating: f64,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        self.check()?;
        let mut movies: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.id != movie_id
                    && m.genres.iter().any(|g| genres.contains(g))
                    && m.average_rating >= min_rating
            })
            .cloned()
            .collect();
        movies.sort_by(|a, b| {
            b.popularity
                .total_cmp(&a.popularity)
                .then_with(|| a.id.cmp(&b.id))
        });
        movies.truncate(limit as usize);
        Ok(movies)
    }

    async fn top_rated(
        &self,
        min_rating: f64,
        min_rating_count: i32,
        limit: i64,
    ) -> StoreResult<Vec<Movie>> {
        self.check()?;
        let mut movies: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.average_rating >= min_rating && m.rating_count >= min_rating_count)
            .cloned()
            .collect();
        movies.sort_by(|a, b| {
            b.average_rating
                .total_cmp(&a.average_rating)
                .then_with(|| b.rating_count.cmp(&a.rating_count))
                .then_with(|| b.popularity.total_cmp(&a.popularity))
        });
        movies.truncate(limit as usize);
        Ok(movies)
    }

    async fn watchlist_with_movies(
        &self,
        user_id: DbId,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>> {
        self.check()?;
        let mut entries: Vec<WatchlistEntryWithMovie> = self
            .watchlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    async fn recent_watchlist_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<WatchlistEntryWithMovie>> {
        let mut entries = self.watchlist_with_movies(user_id).await?;
        entries.truncate(limit as usize);
        Ok(entries)
    }

    async fn reviews_with_movies(&self, user_id: DbId) -> StoreResult<Vec<ReviewWithMovie>> {
        self.check()?;
        let mut reviews: Vec<ReviewWithMovie> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(reviews)
    }

    async fn recent_reviews_with_movies(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<ReviewWithMovie>> {
        let mut reviews = self.reviews_with_movies(user_id).await?;
        reviews.truncate(limit as usize);
        Ok(reviews)
    }

    async fn user_preferences(&self, user_id: DbId) -> StoreResult<Option<UserPreferences>> {
        self.check()?;
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn upsert_preferences(
        &self,
        user_id: DbId,
        derived: &DerivedPreferences,
    ) -> StoreResult<UserPreferences> {
        self.check()?;
        let mut rows = self.preferences.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|p| p.user_id == user_id) {
            row.favorite_genres = derived.favorite_genres.clone();
            row.preferred_years = derived.preferred_years.clone();
            row.min_rating = derived.min_rating;
            row.updated_at = now();
            return Ok(row.clone());
        }
        let row = UserPreferences {
            user_id,
            favorite_genres: derived.favorite_genres.clone(),
            preferred_years: derived.preferred_years.clone(),
            min_rating: derived.min_rating,
            max_runtime: None,
            created_at: now(),
            updated_at: now(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

/// Build a movie row with the scoring-relevant columns set explicitly.
pub fn movie(
    id: DbId,
    title: &str,
    genres: &[&str],
    release_year: i32,
    average_rating: f64,
    rating_count: i32,
    popularity: f64,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        release_year,
        runtime: None,
        poster_url: None,
        backdrop_url: None,
        tmdb_id: None,
        imdb_id: None,
        average_rating,
        rating_count,
        popularity,
        created_by: None,
        created_at: now(),
        updated_at: now(),
    }
}

/// Build a watchlist entry joined with its movie, touched `age_secs` ago.
pub fn watch(
    user_id: DbId,
    movie: &Movie,
    status: &str,
    rating: Option<i32>,
    age_secs: i64,
) -> WatchlistEntryWithMovie {
    let touched = now() - Duration::seconds(age_secs);
    WatchlistEntryWithMovie {
        id: next_id(),
        user_id,
        movie_id: movie.id,
        status: status.to_string(),
        rating,
        notes: None,
        created_at: touched,
        updated_at: touched,
        title: movie.title.clone(),
        genres: movie.genres.clone(),
        release_year: movie.release_year,
        average_rating: movie.average_rating,
        popularity: movie.popularity,
    }
}

/// Build a review joined with its movie, touched `age_secs` ago.
pub fn review(user_id: DbId, movie: &Movie, rating: i32, age_secs: i64) -> ReviewWithMovie {
    let touched = now() - Duration::seconds(age_secs);
    ReviewWithMovie {
        id: next_id(),
        user_id,
        movie_id: movie.id,
        rating,
        content: None,
        created_at: touched,
        updated_at: touched,
        title: movie.title.clone(),
        genres: movie.genres.clone(),
        release_year: movie.release_year,
        average_rating: movie.average_rating,
        popularity: movie.popularity,
    }
}

/// Build a stored preferences row.
pub fn prefs(
    user_id: DbId,
    favorite_genres: &[&str],
    preferred_years: &[i32],
    min_rating: f64,
    max_runtime: Option<i32>,
) -> UserPreferences {
    UserPreferences {
        user_id,
        favorite_genres: favorite_genres.iter().map(|g| g.to_string()).collect(),
        preferred_years: preferred_years.to_vec(),
        min_rating,
        max_runtime,
        created_at: now(),
        updated_at: now(),
    }
}
