//! Candidate scoring and ranking.
//!
//! Two weighted-sum scores drive the engine: the personalized score ranks
//! candidates against a [`TasteProfile`], and the similarity score ranks
//! candidates against a reference movie. Both are recomputed on demand and
//! never persisted. The weight constants are part of the contract; a
//! change to any of them changes every ranking.

use crate::affinity::TasteProfile;

// ---------------------------------------------------------------------------
// Personalized score weights
// ---------------------------------------------------------------------------

/// Weight of the summed genre affinity of the candidate's genres.
pub const WEIGHT_GENRE_AFFINITY: f64 = 0.4;

/// Weight of the affinity of the candidate's release year.
pub const WEIGHT_YEAR_AFFINITY: f64 = 0.2;

/// Weight of the candidate's review-derived average rating.
pub const WEIGHT_AVERAGE_RATING: f64 = 0.3;

/// Weight of the candidate's external popularity signal.
pub const WEIGHT_POPULARITY: f64 = 0.1;

// ---------------------------------------------------------------------------
// Similarity score weights and scales
// ---------------------------------------------------------------------------

/// Weight of the genre overlap ratio between candidate and reference.
pub const SIMILARITY_WEIGHT_GENRES: f64 = 0.5;

/// Weight of the rating proximity between candidate and reference.
pub const SIMILARITY_WEIGHT_RATING: f64 = 0.3;

/// Weight of the release-year proximity between candidate and reference.
pub const SIMILARITY_WEIGHT_YEAR: f64 = 0.2;

/// Rating difference is normalized by the full 0..=10 rating scale.
pub const RATING_PROXIMITY_SCALE: f64 = 10.0;

/// Year proximity decays linearly and bottoms out at zero beyond this
/// many years of distance.
pub const YEAR_PROXIMITY_WINDOW: f64 = 20.0;

/// Similar-movie candidates must reach this fraction of the reference
/// movie's average rating.
pub const SIMILAR_RATING_FLOOR_FACTOR: f64 = 0.8;

// ---------------------------------------------------------------------------
// Candidate pool sizing
// ---------------------------------------------------------------------------

/// Upper bound on the personalized candidate pool fetched from storage.
pub const CANDIDATE_POOL_SIZE: i64 = 100;

/// Similar-movie queries fetch this many times the requested limit so the
/// scorer has headroom to reorder.
pub const SIMILAR_CANDIDATE_FACTOR: i64 = 2;

/// Result count when the caller does not pass a limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard cap on the result count a caller may request.
pub const MAX_LIMIT: i64 = 50;

/// Clamp a caller-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Scoring inputs
// ---------------------------------------------------------------------------

/// Borrowed view of the movie fields scoring reads.
#[derive(Debug, Clone, Copy)]
pub struct MovieSignals<'a> {
    pub genres: &'a [String],
    pub release_year: i32,
    pub average_rating: f64,
    pub popularity: f64,
}

// ---------------------------------------------------------------------------
// Personalized score
// ---------------------------------------------------------------------------

/// Composite score of a candidate under a user's taste profile.
pub fn personalized_score(profile: &TasteProfile, movie: MovieSignals<'_>) -> f64 {
    WEIGHT_GENRE_AFFINITY * profile.genre_score(movie.genres)
        + WEIGHT_YEAR_AFFINITY * profile.year_score(movie.release_year)
        + WEIGHT_AVERAGE_RATING * movie.average_rating
        + WEIGHT_POPULARITY * movie.popularity
}

// ---------------------------------------------------------------------------
// Similarity score
// ---------------------------------------------------------------------------

/// Fraction of the reference movie's genres the candidate shares.
///
/// A reference with no genres yields 0.0 rather than dividing by zero;
/// the other similarity terms still apply.
pub fn genre_overlap_ratio(reference: &[String], candidate: &[String]) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let shared = reference
        .iter()
        .filter(|genre| candidate.contains(genre))
        .count();
    shared as f64 / reference.len() as f64
}

/// Closeness of two average ratings on the 0..=10 scale (1 = identical).
pub fn rating_proximity(a: f64, b: f64) -> f64 {
    1.0 - (a - b).abs() / RATING_PROXIMITY_SCALE
}

/// Closeness of two release years (1 = same year, 0 = 20+ years apart).
pub fn year_proximity(a: i32, b: i32) -> f64 {
    1.0 - ((a - b).abs() as f64 / YEAR_PROXIMITY_WINDOW).min(1.0)
}

/// Composite similarity of a candidate against a reference movie.
pub fn similarity_score(reference: MovieSignals<'_>, candidate: MovieSignals<'_>) -> f64 {
    SIMILARITY_WEIGHT_GENRES * genre_overlap_ratio(reference.genres, candidate.genres)
        + SIMILARITY_WEIGHT_RATING
            * rating_proximity(candidate.average_rating, reference.average_rating)
        + SIMILARITY_WEIGHT_YEAR * year_proximity(candidate.release_year, reference.release_year)
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Sort scored items by descending score, truncate to `limit`, and strip
/// the scores.
///
/// The sort is stable: ties keep the order in which the candidates were
/// supplied.
pub fn rank_top_n<T>(mut scored: Vec<(T, f64)>, limit: usize) -> Vec<T> {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored.into_iter().map(|(item, _score)| item).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    // -- weights -------------------------------------------------------------

    #[test]
    fn weight_sets_are_normalized() {
        assert_close(
            WEIGHT_GENRE_AFFINITY + WEIGHT_YEAR_AFFINITY + WEIGHT_AVERAGE_RATING
                + WEIGHT_POPULARITY,
            1.0,
        );
        assert_close(
            SIMILARITY_WEIGHT_GENRES + SIMILARITY_WEIGHT_RATING + SIMILARITY_WEIGHT_YEAR,
            1.0,
        );
    }

    // -- personalized score --------------------------------------------------

    #[test]
    fn personalized_score_combines_all_terms() {
        let mut profile = TasteProfile::new();
        profile.add_rated_title(&genres(&["Drama"]), 1994, 8.0);
        profile.add_rated_title(&genres(&["Drama", "Action"]), 2008, 6.0);

        let movie = MovieSignals {
            genres: &genres(&["Drama", "Action"]),
            release_year: 2008,
            average_rating: 7.5,
            popularity: 50.0,
        };

        // 0.4 * (14 + 6) + 0.2 * 6 + 0.3 * 7.5 + 0.1 * 50
        assert_close(personalized_score(&profile, movie), 16.45);
    }

    #[test]
    fn empty_profile_scores_on_quality_terms_only() {
        let profile = TasteProfile::new();
        let movie = MovieSignals {
            genres: &genres(&["Horror"]),
            release_year: 2021,
            average_rating: 8.0,
            popularity: 30.0,
        };

        assert_close(
            personalized_score(&profile, movie),
            WEIGHT_AVERAGE_RATING * 8.0 + WEIGHT_POPULARITY * 30.0,
        );
    }

    // -- genre overlap -------------------------------------------------------

    #[test]
    fn overlap_is_measured_against_reference_genres() {
        let reference = genres(&["Sci-Fi", "Action", "Thriller"]);
        assert_close(
            genre_overlap_ratio(&reference, &genres(&["Sci-Fi", "Action"])),
            2.0 / 3.0,
        );
        assert_close(genre_overlap_ratio(&reference, &reference), 1.0);
        assert_close(genre_overlap_ratio(&reference, &genres(&["Romance"])), 0.0);
    }

    #[test]
    fn reference_without_genres_contributes_zero_not_a_panic() {
        let candidate = genres(&["Drama"]);
        assert_close(genre_overlap_ratio(&[], &candidate), 0.0);

        let reference = MovieSignals {
            genres: &[],
            release_year: 2000,
            average_rating: 8.0,
            popularity: 0.0,
        };
        let similar = MovieSignals {
            genres: &candidate,
            release_year: 2000,
            average_rating: 8.0,
            popularity: 0.0,
        };
        // Rating and year terms still apply.
        assert_close(
            similarity_score(reference, similar),
            SIMILARITY_WEIGHT_RATING + SIMILARITY_WEIGHT_YEAR,
        );
    }

    // -- proximities ---------------------------------------------------------

    #[test]
    fn rating_proximity_spans_the_scale() {
        assert_close(rating_proximity(8.0, 8.0), 1.0);
        assert_close(rating_proximity(8.0, 7.2), 0.92);
        assert_close(rating_proximity(10.0, 0.0), 0.0);
    }

    #[test]
    fn year_proximity_decays_and_bottoms_out() {
        assert_close(year_proximity(2010, 2010), 1.0);
        assert_close(year_proximity(2010, 2012), 0.9);
        assert_close(year_proximity(2010, 1990), 0.0);
        // Distances beyond the window clamp to zero instead of going negative.
        assert_close(year_proximity(2010, 1960), 0.0);
    }

    #[test]
    fn similarity_score_hand_computed() {
        let reference = MovieSignals {
            genres: &genres(&["Sci-Fi", "Action", "Thriller"]),
            release_year: 2010,
            average_rating: 8.8,
            popularity: 0.0,
        };
        let close = MovieSignals {
            genres: &genres(&["Sci-Fi", "Action"]),
            release_year: 2012,
            average_rating: 8.0,
            popularity: 0.0,
        };
        let far = MovieSignals {
            genres: &genres(&["Sci-Fi"]),
            release_year: 1990,
            average_rating: 6.0,
            popularity: 0.0,
        };

        let close_score = similarity_score(reference, close);
        let far_score = similarity_score(reference, far);

        assert_close(close_score, 0.5 * (2.0 / 3.0) + 0.3 * 0.92 + 0.2 * 0.9);
        assert_close(far_score, 0.5 * (1.0 / 3.0) + 0.3 * 0.72);
        assert!(close_score > far_score);
    }

    // -- ranking -------------------------------------------------------------

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let scored = vec![("low", 1.0), ("high", 3.0), ("mid", 2.0)];
        assert_eq!(rank_top_n(scored, 2), vec!["high", "mid"]);
    }

    #[test]
    fn rank_keeps_input_order_on_ties() {
        let scored = vec![("first", 1.0), ("top", 2.0), ("second", 1.0)];
        assert_eq!(rank_top_n(scored, 3), vec!["top", "first", "second"]);
    }

    #[test]
    fn rank_with_limit_beyond_len_returns_everything() {
        let scored = vec![("only", 4.2)];
        assert_eq!(rank_top_n(scored, 10), vec!["only"]);
    }

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), DEFAULT_LIMIT);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(500), DEFAULT_LIMIT, MAX_LIMIT), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-7), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(25), DEFAULT_LIMIT, MAX_LIMIT), 25);
    }
}
