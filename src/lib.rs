//! Match Rating - Elo-style skill ratings for 1v1 matches
//!
//! This crate turns a resolved match (winner, loser and a per-participant
//! performance score) into rating changes for both participants, applied
//! exactly once and against the pre-match ratings of both sides.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{
    EloRatingAlgorithm, InMemoryRatingDirectory, MatchOutcome, Rating, RatingAlgorithm,
    RatingDirectory, RatingResolution,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
