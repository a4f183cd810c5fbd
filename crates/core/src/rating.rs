//! Rating scale constants and helpers.
//!
//! Watchlist ratings and review ratings share one integer scale; movie
//! aggregates (`average_rating`) live on the matching 0..=10 float scale.

use crate::error::CoreError;

/// Lowest rating a user can give.
pub const MIN_RATING: i32 = 1;

/// Highest rating a user can give.
pub const MAX_RATING: i32 = 10;

/// Validate a user-supplied rating for a review or watchlist entry.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Arithmetic mean of a slice. Returns `None` for an empty slice so the
/// caller decides the fallback instead of dividing by zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_midrange() {
        assert!(validate_rating(MIN_RATING).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(MAX_RATING).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(11).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[8.0, 6.0]), Some(7.0));
        assert_eq!(mean(&[4.0]), Some(4.0));
    }
}
