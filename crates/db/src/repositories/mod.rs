//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod movie_repo;
pub mod preferences_repo;
pub mod review_repo;
pub mod user_repo;
pub mod watchlist_repo;

pub use movie_repo::MovieRepo;
pub use preferences_repo::PreferencesRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
pub use watchlist_repo::WatchlistRepo;
