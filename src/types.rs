//! Common types used throughout the rating service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for match participants
pub type ParticipantId = String;

/// Unique identifier for matches
pub type MatchId = Uuid;

/// Rating change information for one participant of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub participant_id: ParticipantId,
    pub old_rating: f64,
    pub new_rating: f64,
    pub delta: f64,
    pub won: bool,
    pub performance_score: f64,
}

/// Both sides of a resolved (or projected) 1v1 match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAdjustment {
    pub match_id: MatchId,
    pub winner: RatingChange,
    pub loser: RatingChange,
}
