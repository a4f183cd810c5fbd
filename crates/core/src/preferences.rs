//! Preference derivation from recent user activity.
//!
//! [`PreferenceAccumulator`] replays a window of a user's qualifying
//! titles (completed-and-rated watchlist entries plus all reviews) and
//! derives the preference row to store: the most frequent genres, the
//! most frequent release years, and a minimum-rating threshold from the
//! mean of the collected ratings. Derivation is deterministic, so running
//! it twice over the same activity produces identical output.

use crate::rating::mean;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How many recent watchlist entries and how many recent reviews feed a
/// preference refresh. Each source gets its own window of this size.
pub const TASTE_WINDOW: i64 = 50;

/// Number of top genres stored as favorites.
pub const TOP_GENRE_COUNT: usize = 5;

/// Number of top release years stored as preferred.
pub const TOP_YEAR_COUNT: usize = 5;

/// Rating floor applied at recommendation time for users without a stored
/// preference row.
pub const DEFAULT_MIN_RATING: f64 = 6.0;

/// Derived rating floor for users whose window contains no ratings.
pub const FALLBACK_MIN_RATING: f64 = 5.0;

// ---------------------------------------------------------------------------
// DerivedPreferences
// ---------------------------------------------------------------------------

/// Output of a preference derivation, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPreferences {
    /// Most frequent genres, highest count first.
    pub favorite_genres: Vec<String>,
    /// Most frequent release years, highest count first.
    pub preferred_years: Vec<i32>,
    /// Mean of the collected ratings rounded to the nearest integer, or
    /// [`FALLBACK_MIN_RATING`] when nothing was rated.
    pub min_rating: f64,
}

// ---------------------------------------------------------------------------
// PreferenceAccumulator
// ---------------------------------------------------------------------------

/// Counts genre and year occurrences across qualifying titles.
///
/// Keys are kept in first-seen order and the top-N sort is stable, so
/// count ties resolve to whichever key entered the scan first. Callers
/// must therefore feed titles in a deterministic order.
#[derive(Debug, Default)]
pub struct PreferenceAccumulator {
    genre_counts: Vec<(String, u32)>,
    year_counts: Vec<(i32, u32)>,
    ratings: Vec<f64>,
}

impl PreferenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one qualifying title: every genre counts once, the release
    /// year counts once, and the rating joins the mean.
    pub fn add_title(&mut self, genres: &[String], release_year: i32, rating: f64) {
        for genre in genres {
            match self.genre_counts.iter_mut().find(|(g, _)| g == genre) {
                Some((_, count)) => *count += 1,
                None => self.genre_counts.push((genre.clone(), 1)),
            }
        }
        match self.year_counts.iter_mut().find(|(y, _)| *y == release_year) {
            Some((_, count)) => *count += 1,
            None => self.year_counts.push((release_year, 1)),
        }
        self.ratings.push(rating);
    }

    /// Finish the scan and derive the preference values.
    pub fn derive(self) -> DerivedPreferences {
        DerivedPreferences {
            favorite_genres: top_n(self.genre_counts, TOP_GENRE_COUNT),
            preferred_years: top_n(self.year_counts, TOP_YEAR_COUNT),
            min_rating: mean(&self.ratings)
                .map(f64::round)
                .unwrap_or(FALLBACK_MIN_RATING),
        }
    }
}

/// Keys with the highest counts, at most `n`. The sort is stable, so ties
/// keep first-seen order.
fn top_n<K>(mut counts: Vec<(K, u32)>, n: usize) -> Vec<K> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts.into_iter().map(|(key, _count)| key).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn derives_profile_from_small_history() {
        // One completed watchlist title and one review.
        let mut acc = PreferenceAccumulator::new();
        acc.add_title(&genres(&["Drama", "Action"]), 2008, 6.0);
        acc.add_title(&genres(&["Drama"]), 1994, 8.0);

        let derived = acc.derive();
        assert_eq!(derived.favorite_genres, vec!["Drama", "Action"]);
        assert_eq!(derived.preferred_years, vec![2008, 1994]);
        // round((6 + 8) / 2)
        assert_eq!(derived.min_rating, 7.0);
    }

    #[test]
    fn empty_window_falls_back() {
        let derived = PreferenceAccumulator::new().derive();
        assert!(derived.favorite_genres.is_empty());
        assert!(derived.preferred_years.is_empty());
        assert_eq!(derived.min_rating, FALLBACK_MIN_RATING);
    }

    #[test]
    fn caps_genres_and_years_at_top_five() {
        let mut acc = PreferenceAccumulator::new();
        // "Drama" appears twice, six other genres once each.
        acc.add_title(&genres(&["Drama", "Action", "Crime"]), 2001, 7.0);
        acc.add_title(&genres(&["Drama", "Sci-Fi", "Thriller", "Romance"]), 2002, 7.0);
        for year in 2003..=2007 {
            acc.add_title(&genres(&["Horror"]), year, 5.0);
        }

        let derived = acc.derive();
        assert_eq!(derived.favorite_genres.len(), TOP_GENRE_COUNT);
        assert_eq!(derived.favorite_genres[0], "Drama");
        assert_eq!(derived.preferred_years.len(), TOP_YEAR_COUNT);
    }

    #[test]
    fn count_ties_keep_first_seen_order() {
        let mut acc = PreferenceAccumulator::new();
        acc.add_title(&genres(&["Western"]), 1960, 6.0);
        acc.add_title(&genres(&["Noir"]), 1950, 6.0);
        acc.add_title(&genres(&["Musical"]), 1955, 6.0);

        let derived = acc.derive();
        assert_eq!(derived.favorite_genres, vec!["Western", "Noir", "Musical"]);
        assert_eq!(derived.preferred_years, vec![1960, 1950, 1955]);
    }

    #[test]
    fn higher_counts_beat_earlier_arrival() {
        let mut acc = PreferenceAccumulator::new();
        acc.add_title(&genres(&["Western"]), 1960, 6.0);
        acc.add_title(&genres(&["Noir"]), 1950, 6.0);
        acc.add_title(&genres(&["Noir"]), 1950, 7.0);

        let derived = acc.derive();
        assert_eq!(derived.favorite_genres, vec!["Noir", "Western"]);
        assert_eq!(derived.preferred_years, vec![1950, 1960]);
    }

    #[test]
    fn min_rating_rounds_half_away_from_zero() {
        let mut acc = PreferenceAccumulator::new();
        acc.add_title(&genres(&["Drama"]), 2000, 7.0);
        acc.add_title(&genres(&["Drama"]), 2001, 8.0);

        // mean 7.5 rounds up to 8
        assert_eq!(acc.derive().min_rating, 8.0);
    }

    #[test]
    fn derivation_is_deterministic() {
        let build = || {
            let mut acc = PreferenceAccumulator::new();
            acc.add_title(&genres(&["Drama", "Action"]), 2008, 6.0);
            acc.add_title(&genres(&["Sci-Fi"]), 2014, 9.0);
            acc.add_title(&genres(&["Drama"]), 1994, 8.0);
            acc.derive()
        };
        assert_eq!(build(), build());
    }
}
