//! Per-participant rating value and its update rule

use crate::config::rating::{
    RatingConfig, DECISIVE_VICTORY_MODIFIER, DEFAULT_RATING, DEFEAT_THRESHOLD,
    LOPSIDED_DEFEAT_MODIFIER, VICTORY_THRESHOLD,
};
use crate::rating::algorithm::{EloRatingAlgorithm, RatingAlgorithm};
use serde::{Deserialize, Serialize};

/// Scales the base delta by how decisively a match was won or lost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceModifier {
    pub victory_threshold: f64,
    pub defeat_threshold: f64,
    pub decisive_victory: f64,
    pub lopsided_defeat: f64,
}

impl Default for PerformanceModifier {
    fn default() -> Self {
        Self {
            victory_threshold: VICTORY_THRESHOLD,
            defeat_threshold: DEFEAT_THRESHOLD,
            decisive_victory: DECISIVE_VICTORY_MODIFIER,
            lopsided_defeat: LOPSIDED_DEFEAT_MODIFIER,
        }
    }
}

impl From<&RatingConfig> for PerformanceModifier {
    fn from(config: &RatingConfig) -> Self {
        Self {
            victory_threshold: config.victory_threshold,
            defeat_threshold: config.defeat_threshold,
            decisive_victory: config.decisive_victory_modifier,
            lopsided_defeat: config.lopsided_defeat_modifier,
        }
    }
}

impl PerformanceModifier {
    /// Multiplier for a participant who scored `match_score`.
    ///
    /// A decisive win is amplified. A lopsided loss is dampened, which softens
    /// the penalty for a blowout defeat. Everything else is left at 1.0.
    pub fn factor(&self, match_score: f64, won: bool) -> f64 {
        if won && match_score >= self.victory_threshold {
            self.decisive_victory
        } else if !won && match_score <= self.defeat_threshold {
            self.lopsided_defeat
        } else {
            1.0
        }
    }
}

/// Skill rating owned by a single participant.
///
/// The value only changes through [`Rating::update_rating_with`] (or
/// [`Rating::update_rating`]). Updates are not synchronized; callers must not
/// apply two resolutions to the same rating at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating {
    value: f64,
}

impl Rating {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Current rating value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Delta this rating would receive, without applying it
    pub fn rating_change(
        &self,
        algorithm: &dyn RatingAlgorithm,
        modifier: &PerformanceModifier,
        match_score: f64,
        opponent_rating: f64,
        won: bool,
    ) -> f64 {
        let base = algorithm.calculate_rating_change(self.value, opponent_rating, won);
        base * modifier.factor(match_score, won)
    }

    /// Apply one match result in place and return the applied delta.
    ///
    /// There is no rollback; call at most once per match.
    pub fn update_rating_with(
        &mut self,
        algorithm: &dyn RatingAlgorithm,
        modifier: &PerformanceModifier,
        match_score: f64,
        opponent_rating: f64,
        won: bool,
    ) -> f64 {
        let delta = self.rating_change(algorithm, modifier, match_score, opponent_rating, won);
        self.value += delta;
        delta
    }

    /// Apply one match result using the default Elo algorithm and modifier
    pub fn update_rating(&mut self, match_score: f64, opponent_rating: f64, won: bool) {
        self.update_rating_with(
            &EloRatingAlgorithm::default(),
            &PerformanceModifier::default(),
            match_score,
            opponent_rating,
            won,
        );
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::new(DEFAULT_RATING)
    }
}
