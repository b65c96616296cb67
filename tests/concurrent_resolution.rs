//! Concurrency tests for resolving matches through a shared rating directory
//!
//! These tests check that overlapping resolutions touching the same
//! participant are serialized and that no update is lost.

mod fixtures;

use fixtures::{assert_close, outcome_for};
use match_rating::rating::{RatingDirectory, RatingEntry};
use match_rating::{InMemoryRatingDirectory, Rating, RatingResolution};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

#[test]
fn test_shared_participant_updates_are_not_lost() {
    let directory = Arc::new(InMemoryRatingDirectory::default());
    let resolution = Arc::new(RatingResolution::default());
    let threads = 8;
    let matches_per_thread = 25;

    // Every match involves "hub"; half the time as winner, half as loser,
    // so lock order alternates between the two participants.
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let directory = directory.clone();
            let resolution = resolution.clone();
            thread::spawn(move || {
                let opponent = format!("opponent_{}", t);
                for i in 0..matches_per_thread {
                    let (winner, loser) = if i % 2 == 0 {
                        ("hub".to_string(), opponent.clone())
                    } else {
                        (opponent.clone(), "hub".to_string())
                    };
                    let outcome = outcome_for(&winner, 50.0, &loser, 50.0);
                    resolution
                        .resolve_in_directory(directory.as_ref(), &winner, &loser, &outcome)
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let all = directory.get_all_ratings().unwrap();
    assert_eq!(all.len(), threads + 1);
    assert_eq!(all["hub"].games_played, (threads * matches_per_thread) as u64);

    // No modifiers apply at 50/50, so every match is zero-sum
    let total: f64 = all.values().map(|entry| entry.rating.value()).sum();
    assert_close(total, 1500.0 * (threads + 1) as f64, 1e-6);
}

#[test]
fn test_disjoint_pairs_resolve_in_parallel() {
    let directory = Arc::new(InMemoryRatingDirectory::default());
    let resolution = Arc::new(RatingResolution::default());

    let handles: Vec<_> = (0..4)
        .map(|pair| {
            let directory = directory.clone();
            let resolution = resolution.clone();
            thread::spawn(move || {
                let winner = format!("winner_{}", pair);
                let loser = format!("loser_{}", pair);
                let outcome = outcome_for(&winner, 50.0, &loser, 50.0);
                resolution
                    .resolve_in_directory(directory.as_ref(), &winner, &loser, &outcome)
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for pair in 0..4 {
        let winner = directory
            .get_rating(&format!("winner_{}", pair))
            .unwrap()
            .unwrap();
        let loser = directory
            .get_rating(&format!("loser_{}", pair))
            .unwrap()
            .unwrap();
        assert_close(winner.rating.value(), 1516.0, 1e-9);
        assert_close(loser.rating.value(), 1484.0, 1e-9);
    }
}

#[test]
fn test_stored_entry_keeps_resolutions_serialized() {
    let directory = Arc::new(InMemoryRatingDirectory::default());
    let resolution = Arc::new(RatingResolution::default());
    let hub = "hub".to_string();

    let held = directory.entry(&hub).unwrap();
    directory
        .store_rating(RatingEntry::new(hub.clone(), Rating::new(1500.0)))
        .unwrap();

    let mut guard = held.lock().unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let handle = {
        let directory = directory.clone();
        let resolution = resolution.clone();
        thread::spawn(move || {
            let outcome = outcome_for("hub", 50.0, "rival", 50.0);
            resolution
                .resolve_in_directory(
                    directory.as_ref(),
                    &"hub".to_string(),
                    &"rival".to_string(),
                    &outcome,
                )
                .unwrap();
            done_tx.send(()).unwrap();
        })
    };

    // The resolution must wait for the lock held on the original entry
    assert!(done_rx.recv_timeout(Duration::from_millis(200)).is_err());

    guard.record_match();
    drop(guard);

    done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    handle.join().unwrap();

    let entry = directory.get_rating(&hub).unwrap().unwrap();
    assert_eq!(entry.games_played, 2);
    assert_close(entry.rating.value(), 1516.0, 1e-9);
}
