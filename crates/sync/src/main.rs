//! `reelbase-sync` -- TMDB catalogue import binary.
//!
//! Fetches a TMDB listing (the popular chart by default, or a title
//! search), resolves full details for each movie, and inserts new rows
//! into the local catalogue. Safe to re-run: movies already present are
//! skipped by `tmdb_id`.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default | Description                                         |
//! |-----------------|----------|---------|-----------------------------------------------------|
//! | `DATABASE_URL`  | yes      | --      | PostgreSQL connection string                        |
//! | `TMDB_API_KEY`  | yes      | --      | TMDB v3 API key                                     |
//! | `TMDB_BASE_URL` | no       | TMDB v3 | API base URL override                               |
//! | `SYNC_QUERY`    | no       | --      | Title search query; unset imports the popular chart |
//! | `SYNC_PAGES`    | no       | `1`     | Listing pages to walk                               |

use reelbase_sync::import::{self, ImportSource};
use reelbase_tmdb::TmdbClient;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default number of listing pages to import.
const DEFAULT_SYNC_PAGES: i64 = 1;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelbase_sync=info,reelbase_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| {
        tracing::error!("TMDB_API_KEY environment variable is required");
        std::process::exit(1);
    });

    let client = match std::env::var("TMDB_BASE_URL").ok() {
        Some(base_url) => TmdbClient::with_base_url(api_key, base_url),
        None => TmdbClient::new(api_key),
    };

    let source = match std::env::var("SYNC_QUERY").ok() {
        Some(query) => ImportSource::Search(query),
        None => ImportSource::Popular,
    };

    let pages: i64 = std::env::var("SYNC_PAGES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SYNC_PAGES);

    tracing::info!(?source, pages, "Starting reelbase-sync");

    let pool = reelbase_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    reelbase_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let stats = match import::run_import(&pool, &client, &source, pages).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error = %e, "Import aborted");
            std::process::exit(1);
        }
    };

    tracing::info!(
        fetched = stats.fetched,
        imported = stats.imported,
        skipped = stats.skipped,
        failed = stats.failed,
        "Catalogue sync complete",
    );
}
