//! Watchlist status domain logic.

use crate::error::CoreError;
use crate::rating::validate_rating;

/// Lifecycle status of a movie on a user's watchlist.
///
/// Stored in the database as the upper-snake string form (`as_str`).
/// Only `Completed` entries feed taste profiles, and only when the user
/// also left a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Planned,
    InProgress,
    Completed,
    Dropped,
}

impl WatchStatus {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Dropped => "DROPPED",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PLANNED" => Some(Self::Planned),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "DROPPED" => Some(Self::Dropped),
            _ => None,
        }
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &["PLANNED", "IN_PROGRESS", "COMPLETED", "DROPPED"];
}

impl Default for WatchStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate the writable fields of a watchlist entry before it reaches
/// storage: the status string must be one of [`WatchStatus::ALL`] and the
/// rating, when present, must be in range.
pub fn validate_entry(status: &str, rating: Option<i32>) -> Result<(), CoreError> {
    if WatchStatus::from_str(status).is_none() {
        return Err(CoreError::Validation(format!(
            "Invalid watchlist status: {status}"
        )));
    }
    if let Some(rating) = rating {
        validate_rating(rating)?;
    }
    Ok(())
}
