//! Rating algorithm trait and the Elo implementation
//!
//! A rating algorithm maps a subject's rating, its opponent's rating and the
//! subject's result to a base rating delta. It is pure and stateless so that
//! other systems can be substituted without touching the resolution step.

use crate::config::rating::DEFAULT_K_FACTOR;
use skillratings::elo::EloRating;

/// Trait for computing the base rating delta of one side of a match
#[cfg_attr(test, mockall::automock)]
pub trait RatingAlgorithm: Send + Sync {
    /// Calculate the rating change for `subject_rating` after playing
    /// `opponent_rating`.
    ///
    /// Positive when the subject won, negative when it lost. The magnitude
    /// grows with the size of the upset.
    fn calculate_rating_change(
        &self,
        subject_rating: f64,
        opponent_rating: f64,
        subject_won: bool,
    ) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Logistic win probability of `subject_rating` against `opponent_rating`.
///
/// A 400 point gap corresponds to 10:1 odds.
pub fn expected_score(subject_rating: f64, opponent_rating: f64) -> f64 {
    let (expected, _) = skillratings::elo::expected_score(
        &EloRating {
            rating: subject_rating,
        },
        &EloRating {
            rating: opponent_rating,
        },
    );
    expected
}

/// Score actually achieved by the subject
pub fn actual_score(subject_won: bool) -> f64 {
    if subject_won {
        1.0
    } else {
        0.0
    }
}

/// Elo-style rating algorithm with a fixed K-factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloRatingAlgorithm {
    k_factor: f64,
}

impl EloRatingAlgorithm {
    pub fn new(k_factor: f64) -> Self {
        Self { k_factor }
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }
}

impl Default for EloRatingAlgorithm {
    fn default() -> Self {
        Self::new(DEFAULT_K_FACTOR)
    }
}

impl RatingAlgorithm for EloRatingAlgorithm {
    fn calculate_rating_change(
        &self,
        subject_rating: f64,
        opponent_rating: f64,
        subject_won: bool,
    ) -> f64 {
        let expected = expected_score(subject_rating, opponent_rating);
        self.k_factor * (actual_score(subject_won) - expected)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.k_factor
        })
    }
}
