//! TMDB catalogue import pipeline.
//!
//! Walks a TMDB listing (popular chart or a title search), fetches full
//! details for each movie not yet in the local catalogue, and inserts it
//! with resolved genre names and the provider's vote aggregates. One bad
//! movie never aborts the run; listing-page failures do.

use reelbase_db::models::movie::CreateMovie;
use reelbase_db::repositories::MovieRepo;
use reelbase_db::DbPool;
use reelbase_tmdb::{TmdbClient, TmdbError, TmdbMovieDetails, TmdbMovieSummary};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("TMDB fetch failed")]
    Tmdb(#[from] TmdbError),

    #[error("database write failed")]
    Db(#[from] sqlx::Error),
}

/// Which TMDB listing feeds the import.
#[derive(Debug, Clone)]
pub enum ImportSource {
    /// The popular-movies chart.
    Popular,
    /// A title search for the given query.
    Search(String),
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Listing entries seen across all fetched pages.
    pub fetched: usize,
    /// New catalogue rows written.
    pub imported: usize,
    /// Entries skipped: already present, or no usable release year.
    pub skipped: usize,
    /// Entries that errored and were logged.
    pub failed: usize,
}

/// Outcome of handling one listing entry.
enum Outcome {
    Imported,
    AlreadyPresent,
    NoReleaseYear,
}

/// Import `pages` pages of the chosen listing into the catalogue.
///
/// Listing-page fetches are fatal; everything downstream of a single
/// entry (dedupe lookup, details fetch, insert) is logged and counted
/// in [`ImportStats::failed`] instead.
pub async fn run_import(
    pool: &DbPool,
    client: &TmdbClient,
    source: &ImportSource,
    pages: i64,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::default();

    for page in 1..=pages {
        let listing = match source {
            ImportSource::Popular => client.popular_movies(page).await?,
            ImportSource::Search(query) => client.search_movies(query, page).await?,
        };

        tracing::info!(
            page,
            total_pages = listing.total_pages,
            results = listing.results.len(),
            "Fetched listing page",
        );

        for summary in &listing.results {
            stats.fetched += 1;
            match import_movie(pool, client, summary).await {
                Ok(Outcome::Imported) => stats.imported += 1,
                Ok(Outcome::AlreadyPresent) => {
                    tracing::debug!(tmdb_id = summary.id, title = %summary.title, "Already in catalogue");
                    stats.skipped += 1;
                }
                Ok(Outcome::NoReleaseYear) => {
                    tracing::warn!(tmdb_id = summary.id, title = %summary.title, "No release year, skipping");
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        tmdb_id = summary.id,
                        title = %summary.title,
                        error = %e,
                        "Import failed for movie",
                    );
                    stats.failed += 1;
                }
            }
        }

        // The listing ran out before the requested page count.
        if page >= listing.total_pages {
            break;
        }
    }

    Ok(stats)
}

/// Handle one listing entry: dedupe, fetch details, insert.
async fn import_movie(
    pool: &DbPool,
    client: &TmdbClient,
    summary: &TmdbMovieSummary,
) -> Result<Outcome, ImportError> {
    if MovieRepo::find_by_tmdb_id(pool, summary.id).await?.is_some() {
        return Ok(Outcome::AlreadyPresent);
    }

    let details = client.movie_details(summary.id).await?;
    let Some(create) = movie_from_details(&details) else {
        return Ok(Outcome::NoReleaseYear);
    };

    let movie = MovieRepo::create(pool, &create).await?;
    tracing::info!(
        movie_id = movie.id,
        tmdb_id = summary.id,
        title = %movie.title,
        "Imported movie",
    );
    Ok(Outcome::Imported)
}

/// Map a TMDB details response to a catalogue insert.
///
/// Returns `None` when the release date carries no parseable year; the
/// catalogue requires one. Vote aggregates are kept on TMDB's 0..=10
/// scale, matching local review ratings; vote counts beyond the column's
/// 32-bit range clamp to `i32::MAX`.
pub fn movie_from_details(details: &TmdbMovieDetails) -> Option<CreateMovie> {
    let release_year = details.release_year()?;

    Some(CreateMovie {
        title: details.title.clone(),
        overview: details.overview.clone(),
        genres: Some(details.genre_names()),
        release_year,
        runtime: details.runtime,
        poster_url: details.poster_url(),
        backdrop_url: details.backdrop_url(),
        tmdb_id: Some(details.id),
        imdb_id: details.imdb_id.clone(),
        average_rating: Some(details.vote_average),
        rating_count: Some(i32::try_from(details.vote_count).unwrap_or(i32::MAX)),
        popularity: Some(details.popularity),
        created_by: None,
    })
}
