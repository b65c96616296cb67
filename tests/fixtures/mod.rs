//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use match_rating::rating::{EloRatingAlgorithm, RatedParticipant, RatingAlgorithm};
use match_rating::types::ParticipantId;
use match_rating::{MatchOutcome, Rating};
use std::sync::{Mutex, RwLock};

/// Arguments of one `calculate_rating_change` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedCall {
    pub subject_rating: f64,
    pub opponent_rating: f64,
    pub subject_won: bool,
}

/// Rating algorithm that records every call and delegates to Elo unless a
/// fixed delta is set
#[derive(Debug, Default)]
pub struct RecordingRatingAlgorithm {
    calls: Mutex<Vec<RecordedCall>>,
    fixed_delta: RwLock<Option<f64>>,
    inner: EloRatingAlgorithm,
}

impl RecordingRatingAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `delta` (negated for losses) instead of the Elo result
    pub fn set_fixed_delta(&self, delta: f64) {
        if let Ok(mut fixed) = self.fixed_delta.write() {
            *fixed = Some(delta);
        }
    }

    /// Get all calls made (for testing)
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingAlgorithm for RecordingRatingAlgorithm {
    fn calculate_rating_change(
        &self,
        subject_rating: f64,
        opponent_rating: f64,
        subject_won: bool,
    ) -> f64 {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                subject_rating,
                opponent_rating,
                subject_won,
            });
        }

        if let Ok(fixed) = self.fixed_delta.read() {
            if let Some(delta) = *fixed {
                return if subject_won { delta } else { -delta };
            }
        }

        self.inner
            .calculate_rating_change(subject_rating, opponent_rating, subject_won)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({ "type": "recording" })
    }
}

/// Minimal participant owning a rating, standing in for a player record
#[derive(Debug, Clone)]
pub struct TestPlayer {
    pub id: ParticipantId,
    pub rating: Rating,
}

impl TestPlayer {
    pub fn new(id: &str, rating: f64) -> Self {
        Self {
            id: id.to_string(),
            rating: Rating::new(rating),
        }
    }
}

impl RatedParticipant for TestPlayer {
    fn participant_id(&self) -> &ParticipantId {
        &self.id
    }

    fn rating(&self) -> &Rating {
        &self.rating
    }

    fn rating_mut(&mut self) -> &mut Rating {
        &mut self.rating
    }
}

/// Outcome with a score for each of the two participants
pub fn outcome_for(winner: &str, winner_score: f64, loser: &str, loser_score: f64) -> MatchOutcome {
    MatchOutcome::default()
        .with_score(winner, winner_score)
        .with_score(loser, loser_score)
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
