//! Match outcome as reported by the match engine

use crate::error::RatingError;
use crate::types::{MatchId, ParticipantId};
use crate::utils::generate_match_id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only performance scores for the participants of one match.
///
/// Scores are conventionally on a 0-100 scale. Every participant passed to a
/// resolution must have an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    match_id: MatchId,
    scores: HashMap<ParticipantId, f64>,
}

impl MatchOutcome {
    /// Create an outcome with a freshly generated match id
    pub fn new(scores: HashMap<ParticipantId, f64>) -> Self {
        Self::with_match_id(generate_match_id(), scores)
    }

    pub fn with_match_id(match_id: MatchId, scores: HashMap<ParticipantId, f64>) -> Self {
        Self { match_id, scores }
    }

    /// Builder-style helper, mostly for tests and the replay tool
    pub fn with_score(mut self, participant_id: impl Into<ParticipantId>, score: f64) -> Self {
        self.scores.insert(participant_id.into(), score);
        self
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Performance score of `participant_id`, or `MissingPerformanceScore`
    pub fn performance_score(&self, participant_id: &ParticipantId) -> crate::error::Result<f64> {
        self.scores.get(participant_id).copied().ok_or_else(|| {
            RatingError::MissingPerformanceScore {
                participant_id: participant_id.clone(),
            }
            .into()
        })
    }

    pub fn contains(&self, participant_id: &ParticipantId) -> bool {
        self.scores.contains_key(participant_id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> {
        self.scores.keys()
    }
}

impl Default for MatchOutcome {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}
