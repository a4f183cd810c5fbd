//! Catalogue-wide trending thresholds.
//!
//! Trending is not personalized: a movie qualifies on its review-derived
//! aggregates alone. Ordering of qualifying movies (average rating, then
//! rating count, then popularity, all descending) is applied by the
//! storage query.

/// Minimum average rating for a movie to count as trending.
pub const TRENDING_MIN_RATING: f64 = 7.0;

/// Minimum number of reviews for a movie to count as trending. Keeps
/// single-review movies with one enthusiastic fan off the list.
pub const TRENDING_MIN_RATING_COUNT: i32 = 5;

/// Whether a movie's aggregates meet the trending bar. Both thresholds
/// are inclusive.
pub fn qualifies(average_rating: f64, rating_count: i32) -> bool {
    average_rating >= TRENDING_MIN_RATING && rating_count >= TRENDING_MIN_RATING_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert!(qualifies(TRENDING_MIN_RATING, TRENDING_MIN_RATING_COUNT));
    }

    #[test]
    fn either_threshold_alone_is_not_enough() {
        assert!(!qualifies(9.5, TRENDING_MIN_RATING_COUNT - 1));
        assert!(!qualifies(TRENDING_MIN_RATING - 0.1, 100));
    }

    #[test]
    fn zero_aggregates_never_qualify() {
        assert!(!qualifies(0.0, 0));
    }
}
