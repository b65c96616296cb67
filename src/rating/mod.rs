//! Elo-style rating with performance-based modifiers
//!
//! This module provides the rating algorithm abstraction, the per-participant
//! rating value, the match outcome contract, the resolution step that applies a
//! match result to both participants, and an in-memory rating directory.

pub mod algorithm;
pub mod outcome;
pub mod resolution;
pub mod storage;
pub mod value;

// Re-export commonly used types
pub use algorithm::{expected_score, EloRatingAlgorithm, RatingAlgorithm};
pub use outcome::MatchOutcome;
pub use resolution::{RatedParticipant, RatingResolution};
pub use storage::{InMemoryRatingDirectory, RatingDirectory, RatingEntry, SharedEntry};
pub use value::{PerformanceModifier, Rating};
