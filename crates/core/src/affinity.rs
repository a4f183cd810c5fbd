//! Taste profile accumulation.
//!
//! A [`TasteProfile`] condenses a user's rated history into per-genre and
//! per-year affinity weights. Affinity is additive: every qualifying title
//! adds its rating to each of its genres and to its release year, and
//! stored preferences add flat boosts on top. The profile is a pure
//! accumulator; which titles qualify is decided by the caller.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Boost constants
// ---------------------------------------------------------------------------

/// Flat affinity added for each of the user's stored favorite genres.
pub const FAVORITE_GENRE_BOOST: f64 = 2.0;

/// Flat affinity added for each of the user's stored preferred years.
pub const PREFERRED_YEAR_BOOST: f64 = 1.0;

// ---------------------------------------------------------------------------
// TasteProfile
// ---------------------------------------------------------------------------

/// Per-genre and per-year affinity weights for one user.
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    genre_affinity: HashMap<String, f64>,
    year_affinity: HashMap<i32, f64>,
}

impl TasteProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a title the user has rated.
    ///
    /// The rating is added to the affinity of **each** genre of the title
    /// (a Drama/Action title rated 8 adds 8 to both genres) and once to
    /// the affinity of its release year.
    pub fn add_rated_title(&mut self, genres: &[String], release_year: i32, rating: f64) {
        for genre in genres {
            *self.genre_affinity.entry(genre.clone()).or_insert(0.0) += rating;
        }
        *self.year_affinity.entry(release_year).or_insert(0.0) += rating;
    }

    /// Layer stored preferences on top of the history-derived affinity.
    ///
    /// Boosts are additive with whatever the history already contributed;
    /// a favorite genre the user also watches heavily ends up with both.
    pub fn apply_preferences(&mut self, favorite_genres: &[String], preferred_years: &[i32]) {
        for genre in favorite_genres {
            *self.genre_affinity.entry(genre.clone()).or_insert(0.0) += FAVORITE_GENRE_BOOST;
        }
        for &year in preferred_years {
            *self.year_affinity.entry(year).or_insert(0.0) += PREFERRED_YEAR_BOOST;
        }
    }

    /// Summed affinity of the given genres. Genres the profile has never
    /// seen contribute 0.
    pub fn genre_score(&self, genres: &[String]) -> f64 {
        genres
            .iter()
            .filter_map(|genre| self.genre_affinity.get(genre))
            .sum()
    }

    /// Affinity of the given release year, or 0 if unseen.
    pub fn year_score(&self, year: i32) -> f64 {
        self.year_affinity.get(&year).copied().unwrap_or(0.0)
    }
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
    fn rating_spreads_across_all_genres_of_a_title() {
        let mut profile = TasteProfile::new();
        profile.add_rated_title(&genres(&["Drama", "Action"]), 2008, 6.0);

        assert_eq!(profile.genre_score(&genres(&["Drama"])), 6.0);
        assert_eq!(profile.genre_score(&genres(&["Action"])), 6.0);
        assert_eq!(profile.year_score(2008), 6.0);
    }

    #[test]
    fn affinity_accumulates_over_titles() {
        let mut profile = TasteProfile::new();
        profile.add_rated_title(&genres(&["Drama"]), 1994, 8.0);
        profile.add_rated_title(&genres(&["Drama", "Action"]), 2008, 6.0);

        assert_eq!(profile.genre_score(&genres(&["Drama"])), 14.0);
        assert_eq!(profile.genre_score(&genres(&["Action"])), 6.0);
        assert_eq!(profile.year_score(1994), 8.0);
        assert_eq!(profile.year_score(2008), 6.0);
    }

    #[test]
    fn preference_boosts_are_additive() {
        let mut profile = TasteProfile::new();
        profile.add_rated_title(&genres(&["Drama"]), 1994, 8.0);
        profile.apply_preferences(&genres(&["Drama", "Sci-Fi"]), &[1994, 2020]);

        assert_eq!(profile.genre_score(&genres(&["Drama"])), 10.0);
        assert_eq!(profile.genre_score(&genres(&["Sci-Fi"])), FAVORITE_GENRE_BOOST);
        assert_eq!(profile.year_score(1994), 9.0);
        assert_eq!(profile.year_score(2020), PREFERRED_YEAR_BOOST);
    }

    #[test]
    fn unseen_genres_and_years_score_zero() {
        let profile = TasteProfile::new();
        assert_eq!(profile.genre_score(&genres(&["Horror"])), 0.0);
        assert_eq!(profile.year_score(1971), 0.0);
    }

    #[test]
    fn genre_score_sums_only_known_genres() {
        let mut profile = TasteProfile::new();
        profile.add_rated_title(&genres(&["Drama"]), 2001, 7.0);

        assert_eq!(profile.genre_score(&genres(&["Drama", "Horror"])), 7.0);
    }
}
