//! Rating directory interface and the in-memory implementation
//!
//! The directory owns one [`RatingEntry`] per participant. Each entry sits
//! behind its own mutex so that resolutions touching the same participant are
//! serialized, while resolutions over disjoint pairs proceed in parallel.

use crate::error::RatingError;
use crate::rating::resolution::RatedParticipant;
use crate::rating::value::Rating;
use crate::types::ParticipantId;
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

/// Storage entry for a participant's rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub participant_id: ParticipantId,
    pub rating: Rating,
    pub games_played: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry for a new participant
    pub fn new(participant_id: ParticipantId, initial_rating: Rating) -> Self {
        let now = current_timestamp();
        Self {
            participant_id,
            rating: initial_rating,
            games_played: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Increment games played after a resolved match
    pub fn record_match(&mut self) {
        self.games_played += 1;
        self.last_updated = current_timestamp();
    }
}

impl RatedParticipant for RatingEntry {
    fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    fn rating(&self) -> &Rating {
        &self.rating
    }

    fn rating_mut(&mut self) -> &mut Rating {
        &mut self.rating
    }
}

/// Per-participant entry guarded by its own lock
pub type SharedEntry = Arc<Mutex<RatingEntry>>;

/// Trait for looking up participant ratings
pub trait RatingDirectory: Send + Sync {
    /// Get the shared entry for a participant, seeding it on first need
    fn entry(&self, participant_id: &ParticipantId) -> crate::error::Result<SharedEntry>;

    /// Snapshot of a participant's entry, if it exists
    fn get_rating(&self, participant_id: &ParticipantId)
        -> crate::error::Result<Option<RatingEntry>>;

    /// Store a participant's entry, e.g. when loading persisted records.
    ///
    /// An existing entry is overwritten in place, behind its current lock.
    fn store_rating(&self, entry: RatingEntry) -> crate::error::Result<()>;

    /// Snapshot of every entry (for export/debugging)
    fn get_all_ratings(&self) -> crate::error::Result<HashMap<ParticipantId, RatingEntry>>;

    /// Get total number of rated participants
    fn participant_count(&self) -> crate::error::Result<usize>;
}

/// In-memory rating directory
#[derive(Debug)]
pub struct InMemoryRatingDirectory {
    entries: RwLock<HashMap<ParticipantId, SharedEntry>>,
    default_rating: f64,
}

impl InMemoryRatingDirectory {
    /// Create a directory that seeds new participants with `default_rating`
    pub fn new(default_rating: f64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_rating,
        }
    }
}

impl Default for InMemoryRatingDirectory {
    fn default() -> Self {
        Self::new(crate::config::rating::DEFAULT_RATING)
    }
}

fn lock_error(what: &str) -> anyhow::Error {
    RatingError::InternalError {
        message: format!("Failed to acquire {}", what),
    }
    .into()
}

fn snapshot(entry: &SharedEntry) -> crate::error::Result<RatingEntry> {
    entry
        .lock()
        .map(|guard| guard.clone())
        .map_err(|_| lock_error("rating entry lock"))
}

impl RatingDirectory for InMemoryRatingDirectory {
    fn entry(&self, participant_id: &ParticipantId) -> crate::error::Result<SharedEntry> {
        {
            let entries = self
                .entries
                .read()
                .map_err(|_| lock_error("ratings read lock"))?;
            if let Some(entry) = entries.get(participant_id) {
                return Ok(entry.clone());
            }
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| lock_error("ratings write lock"))?;

        let entry = entries.entry(participant_id.clone()).or_insert_with(|| {
            debug!(
                "Seeding rating {} for participant {}",
                self.default_rating,
                participant_id
            );
            Arc::new(Mutex::new(RatingEntry::new(
                participant_id.clone(),
                Rating::new(self.default_rating),
            )))
        });

        Ok(entry.clone())
    }

    fn get_rating(
        &self,
        participant_id: &ParticipantId,
    ) -> crate::error::Result<Option<RatingEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| lock_error("ratings read lock"))?;

        entries.get(participant_id).map(snapshot).transpose()
    }

    fn store_rating(&self, entry: RatingEntry) -> crate::error::Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| lock_error("ratings write lock"))?;

        // Keep the existing mutex; swapping it would split the participant's lock
        match entries.get(&entry.participant_id) {
            Some(existing) => {
                let mut guard = existing
                    .lock()
                    .map_err(|_| lock_error("rating entry lock"))?;
                *guard = entry;
            }
            None => {
                entries.insert(entry.participant_id.clone(), Arc::new(Mutex::new(entry)));
            }
        }
        Ok(())
    }

    fn get_all_ratings(&self) -> crate::error::Result<HashMap<ParticipantId, RatingEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| lock_error("ratings read lock"))?;

        entries
            .iter()
            .map(|(id, entry)| Ok((id.clone(), snapshot(entry)?)))
            .collect()
    }

    fn participant_count(&self) -> crate::error::Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|_| lock_error("ratings read lock"))?;

        Ok(entries.len())
    }
}
