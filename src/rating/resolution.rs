//! Applies the result of a completed 1v1 match to both participants
//!
//! Both updates are computed against the ratings as they stood before the
//! match. The snapshot is taken once, up front, so the order in which the two
//! ratings are mutated cannot leak one side's new value into the other side's
//! update.

use crate::config::rating::RatingConfig;
use crate::error::RatingError;
use crate::rating::algorithm::{EloRatingAlgorithm, RatingAlgorithm};
use crate::rating::outcome::MatchOutcome;
use crate::rating::storage::{RatingDirectory, RatingEntry, SharedEntry};
use crate::rating::value::{PerformanceModifier, Rating};
use crate::types::{ParticipantId, RatingAdjustment, RatingChange};
use std::fmt;
use std::sync::{Arc, MutexGuard};
use tracing::{debug, info};

/// Accessor from a participant to the rating it owns
pub trait RatedParticipant {
    fn participant_id(&self) -> &ParticipantId;

    fn rating(&self) -> &Rating;

    fn rating_mut(&mut self) -> &mut Rating;
}

/// Pre-match view of both sides, taken before anything is mutated
#[derive(Debug, Clone, Copy)]
struct MatchSnapshot {
    winner_rating: f64,
    loser_rating: f64,
    winner_score: f64,
    loser_score: f64,
}

/// Stateless coordinator that resolves rating changes for a match
#[derive(Clone)]
pub struct RatingResolution {
    algorithm: Arc<dyn RatingAlgorithm>,
    modifier: PerformanceModifier,
}

impl fmt::Debug for RatingResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingResolution")
            .field("algorithm", &self.algorithm.config())
            .field("modifier", &self.modifier)
            .finish()
    }
}

impl Default for RatingResolution {
    fn default() -> Self {
        Self::with_algorithm(
            Arc::new(EloRatingAlgorithm::default()),
            PerformanceModifier::default(),
        )
    }
}

impl RatingResolution {
    /// Create an Elo-based resolution from validated configuration
    pub fn new(config: &RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self::with_algorithm(
            Arc::new(EloRatingAlgorithm::new(config.k_factor)),
            PerformanceModifier::from(config),
        ))
    }

    /// Use an alternative rating algorithm
    pub fn with_algorithm(
        algorithm: Arc<dyn RatingAlgorithm>,
        modifier: PerformanceModifier,
    ) -> Self {
        Self {
            algorithm,
            modifier,
        }
    }

    pub fn modifier(&self) -> &PerformanceModifier {
        &self.modifier
    }

    pub fn algorithm_config(&self) -> serde_json::Value {
        self.algorithm.config()
    }

    fn snapshot<W, L>(
        &self,
        winner: &W,
        loser: &L,
        outcome: &MatchOutcome,
    ) -> crate::error::Result<MatchSnapshot>
    where
        W: RatedParticipant + ?Sized,
        L: RatedParticipant + ?Sized,
    {
        ensure_distinct(winner.participant_id(), loser.participant_id())?;

        Ok(MatchSnapshot {
            winner_score: outcome.performance_score(winner.participant_id())?,
            loser_score: outcome.performance_score(loser.participant_id())?,
            winner_rating: winner.rating().value(),
            loser_rating: loser.rating().value(),
        })
    }

    /// Project both rating changes without mutating either participant
    pub fn plan_victory_results<W, L>(
        &self,
        winner: &W,
        loser: &L,
        outcome: &MatchOutcome,
    ) -> crate::error::Result<RatingAdjustment>
    where
        W: RatedParticipant + ?Sized,
        L: RatedParticipant + ?Sized,
    {
        let snapshot = self.snapshot(winner, loser, outcome)?;

        let winner_delta = winner.rating().rating_change(
            self.algorithm.as_ref(),
            &self.modifier,
            snapshot.winner_score,
            snapshot.loser_rating,
            true,
        );
        let loser_delta = loser.rating().rating_change(
            self.algorithm.as_ref(),
            &self.modifier,
            snapshot.loser_score,
            snapshot.winner_rating,
            false,
        );

        Ok(adjustment(
            outcome,
            winner.participant_id(),
            loser.participant_id(),
            &snapshot,
            winner_delta,
            loser_delta,
        ))
    }

    /// Apply the result of a match to both participants.
    ///
    /// Fails without touching either rating if the outcome lacks a score for
    /// either side. Not idempotent: call exactly once per resolved match.
    pub fn process_victory_results<W, L>(
        &self,
        winner: &mut W,
        loser: &mut L,
        outcome: &MatchOutcome,
    ) -> crate::error::Result<RatingAdjustment>
    where
        W: RatedParticipant + ?Sized,
        L: RatedParticipant + ?Sized,
    {
        let snapshot = self.snapshot(&*winner, &*loser, outcome)?;
        debug!(
            "Resolving match {}: {} ({}) beat {} ({})",
            outcome.match_id(),
            winner.participant_id(),
            snapshot.winner_rating,
            loser.participant_id(),
            snapshot.loser_rating
        );

        let winner_delta = winner.rating_mut().update_rating_with(
            self.algorithm.as_ref(),
            &self.modifier,
            snapshot.winner_score,
            snapshot.loser_rating,
            true,
        );
        let loser_delta = loser.rating_mut().update_rating_with(
            self.algorithm.as_ref(),
            &self.modifier,
            snapshot.loser_score,
            snapshot.winner_rating,
            false,
        );

        let adjustment = adjustment(
            outcome,
            winner.participant_id(),
            loser.participant_id(),
            &snapshot,
            winner_delta,
            loser_delta,
        );

        info!(
            "Match {} resolved: {} {:+.2} -> {:.2}, {} {:+.2} -> {:.2}",
            adjustment.match_id,
            adjustment.winner.participant_id,
            adjustment.winner.delta,
            adjustment.winner.new_rating,
            adjustment.loser.participant_id,
            adjustment.loser.delta,
            adjustment.loser.new_rating
        );

        Ok(adjustment)
    }

    /// Resolve a match for participants held in a [`RatingDirectory`].
    ///
    /// Both entries stay locked for the whole resolution. Locks are always
    /// taken in participant id order, so overlapping resolutions that share a
    /// participant serialize instead of deadlocking.
    pub fn resolve_in_directory(
        &self,
        directory: &dyn RatingDirectory,
        winner_id: &ParticipantId,
        loser_id: &ParticipantId,
        outcome: &MatchOutcome,
    ) -> crate::error::Result<RatingAdjustment> {
        ensure_distinct(winner_id, loser_id)?;
        outcome.performance_score(winner_id)?;
        outcome.performance_score(loser_id)?;

        let winner_entry = directory.entry(winner_id)?;
        let loser_entry = directory.entry(loser_id)?;

        let (mut winner_guard, mut loser_guard) = if winner_id < loser_id {
            let winner_guard = lock_entry(&winner_entry)?;
            (winner_guard, lock_entry(&loser_entry)?)
        } else {
            let loser_guard = lock_entry(&loser_entry)?;
            (lock_entry(&winner_entry)?, loser_guard)
        };

        let adjustment =
            self.process_victory_results(&mut *winner_guard, &mut *loser_guard, outcome)?;

        winner_guard.record_match();
        loser_guard.record_match();

        Ok(adjustment)
    }
}

fn ensure_distinct(
    winner_id: &ParticipantId,
    loser_id: &ParticipantId,
) -> crate::error::Result<()> {
    if winner_id == loser_id {
        return Err(RatingError::InvalidMatch {
            reason: format!("Participant {} cannot play against itself", winner_id),
        }
        .into());
    }
    Ok(())
}

fn lock_entry(entry: &SharedEntry) -> crate::error::Result<MutexGuard<'_, RatingEntry>> {
    entry.lock().map_err(|_| {
        RatingError::InternalError {
            message: "Failed to acquire rating entry lock".to_string(),
        }
        .into()
    })
}

fn adjustment(
    outcome: &MatchOutcome,
    winner_id: &ParticipantId,
    loser_id: &ParticipantId,
    snapshot: &MatchSnapshot,
    winner_delta: f64,
    loser_delta: f64,
) -> RatingAdjustment {
    RatingAdjustment {
        match_id: outcome.match_id(),
        winner: RatingChange {
            participant_id: winner_id.clone(),
            old_rating: snapshot.winner_rating,
            new_rating: snapshot.winner_rating + winner_delta,
            delta: winner_delta,
            won: true,
            performance_score: snapshot.winner_score,
        },
        loser: RatingChange {
            participant_id: loser_id.clone(),
            old_rating: snapshot.loser_rating,
            new_rating: snapshot.loser_rating + loser_delta,
            delta: loser_delta,
            won: false,
            performance_score: snapshot.loser_score,
        },
    }
}
