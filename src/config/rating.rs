//! Rating system configuration

use crate::error::RatingError;
use serde::{Deserialize, Serialize};

/// Rating seeded for a participant the first time it is needed
pub const DEFAULT_RATING: f64 = 1500.0;

/// Sensitivity of a single match result
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Winning performance score at or above which a victory counts as decisive
pub const VICTORY_THRESHOLD: f64 = 80.0;

/// Losing performance score at or below which a defeat counts as lopsided
pub const DEFEAT_THRESHOLD: f64 = 20.0;

/// Multiplier applied to a decisive victory
pub const DECISIVE_VICTORY_MODIFIER: f64 = 1.2;

/// Multiplier applied to a lopsided defeat. Softens the penalty for a blowout.
pub const LOPSIDED_DEFEAT_MODIFIER: f64 = 0.8;

/// Upper bound of the performance score scale
pub const MAX_PERFORMANCE_SCORE: f64 = 100.0;

/// Elo and performance modifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub default_rating: f64,
    pub k_factor: f64,
    pub victory_threshold: f64,
    pub defeat_threshold: f64,
    pub decisive_victory_modifier: f64,
    pub lopsided_defeat_modifier: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            k_factor: DEFAULT_K_FACTOR,
            victory_threshold: VICTORY_THRESHOLD,
            defeat_threshold: DEFEAT_THRESHOLD,
            decisive_victory_modifier: DECISIVE_VICTORY_MODIFIER,
            lopsided_defeat_modifier: LOPSIDED_DEFEAT_MODIFIER,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(config_error("K-factor must be a positive finite number"));
        }

        if !self.default_rating.is_finite() {
            return Err(config_error("Default rating must be finite"));
        }

        for (name, threshold) in [
            ("Victory threshold", self.victory_threshold),
            ("Defeat threshold", self.defeat_threshold),
        ] {
            if !(0.0..=MAX_PERFORMANCE_SCORE).contains(&threshold) {
                return Err(config_error(&format!(
                    "{} must be within 0..={}",
                    name, MAX_PERFORMANCE_SCORE
                )));
            }
        }

        if self.defeat_threshold >= self.victory_threshold {
            return Err(config_error(
                "Defeat threshold must be below the victory threshold",
            ));
        }

        for modifier in [self.decisive_victory_modifier, self.lopsided_defeat_modifier] {
            if !modifier.is_finite() || modifier <= 0.0 {
                return Err(config_error("Score modifiers must be positive finite numbers"));
            }
        }

        Ok(())
    }
}

fn config_error(message: &str) -> anyhow::Error {
    RatingError::ConfigurationError {
        message: message.to_string(),
    }
    .into()
}
