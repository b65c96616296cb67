//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match_rating::rating::{RatingDirectory, RatingEntry};
use match_rating::{
    EloRatingAlgorithm, InMemoryRatingDirectory, MatchOutcome, Rating, RatingAlgorithm,
    RatingResolution,
};

fn bench_rating_calculations(c: &mut Criterion) {
    let algorithm = EloRatingAlgorithm::default();

    c.bench_function("elo_rating_change", |b| {
        b.iter(|| {
            algorithm.calculate_rating_change(black_box(1500.0), black_box(1600.0), black_box(true))
        })
    });

    c.bench_function("rating_update", |b| {
        b.iter(|| {
            let mut rating = Rating::new(black_box(1500.0));
            rating.update_rating(black_box(85.0), black_box(1400.0), true);
            rating
        })
    });
}

fn bench_resolution(c: &mut Criterion) {
    let resolution = RatingResolution::default();
    let outcome = MatchOutcome::default()
        .with_score("player1", 85.0)
        .with_score("player2", 15.0);

    c.bench_function("process_victory_results", |b| {
        b.iter(|| {
            let mut winner = RatingEntry::new("player1".to_string(), Rating::new(1500.0));
            let mut loser = RatingEntry::new("player2".to_string(), Rating::new(1600.0));
            resolution
                .process_victory_results(&mut winner, &mut loser, black_box(&outcome))
                .unwrap()
        })
    });

    let directory = InMemoryRatingDirectory::default();
    directory
        .store_rating(RatingEntry::new("player1".to_string(), Rating::new(1500.0)))
        .unwrap();

    c.bench_function("resolve_in_directory", |b| {
        b.iter(|| {
            resolution
                .resolve_in_directory(
                    &directory,
                    &"player1".to_string(),
                    &"player2".to_string(),
                    black_box(&outcome),
                )
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_rating_calculations, bench_resolution);
criterion_main!(benches);
