//! Replays a JSON match log through the rating resolution and prints the
//! resulting ratings.
//!
//! The log is a JSON array of matches:
//!
//! ```json
//! [{ "winner": "alice", "loser": "bob", "scores": { "alice": 85.0, "bob": 40.0 } }]
//! ```
//!
//! An entry may carry its own `match_id`; otherwise a fresh one is generated.

use anyhow::{Context, Result};
use clap::Parser;
use match_rating::config::AppConfig;
use match_rating::types::{MatchId, ParticipantId};
use match_rating::{InMemoryRatingDirectory, MatchOutcome, RatingDirectory, RatingResolution};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Rating Replay - apply a log of match results and report final ratings
#[derive(Parser)]
#[command(
    name = "rating-replay",
    version,
    about = "Replay a JSON match log through Elo-style rating resolution"
)]
struct Args {
    /// Match log to replay
    #[arg(value_name = "MATCH_LOG", required_unless_present = "dry_run")]
    matches: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without replaying")]
    dry_run: bool,
}

/// One entry of the match log
#[derive(Debug, Deserialize)]
struct ReplayMatch {
    winner: ParticipantId,
    loser: ParticipantId,
    scores: HashMap<ParticipantId, f64>,
    #[serde(default)]
    match_id: Option<MatchId>,
}

/// Final standing printed after the replay
#[derive(Debug, Serialize)]
struct Standing {
    participant_id: ParticipantId,
    rating: f64,
    games_played: u64,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    match_rating::config::validate_config(&config)?;
    Ok(config)
}

impl ReplayMatch {
    /// Outcome for this match, keeping the logged match id when present
    fn into_outcome(self) -> (ParticipantId, ParticipantId, MatchOutcome) {
        let outcome = match self.match_id {
            Some(match_id) => MatchOutcome::with_match_id(match_id, self.scores),
            None => MatchOutcome::new(self.scores),
        };
        (self.winner, self.loser, outcome)
    }
}

fn replay(config: &AppConfig, path: &Path) -> Result<Vec<Standing>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match log {}", path.display()))?;
    let matches: Vec<ReplayMatch> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid match log {}", path.display()))?;

    info!("Replaying {} matches from {}", matches.len(), path.display());
    replay_matches(config, matches)
}

/// Resolve every match in order and return standings, best rating first
fn replay_matches(config: &AppConfig, matches: Vec<ReplayMatch>) -> Result<Vec<Standing>> {
    let resolution = RatingResolution::new(&config.rating)?;
    let directory = InMemoryRatingDirectory::new(config.rating.default_rating);

    for (index, entry) in matches.into_iter().enumerate() {
        let (winner, loser, outcome) = entry.into_outcome();

        resolution
            .resolve_in_directory(&directory, &winner, &loser, &outcome)
            .with_context(|| format!("Failed to resolve match #{}", index + 1))?;
    }

    let mut standings: Vec<Standing> = directory
        .get_all_ratings()?
        .into_values()
        .map(|entry| Standing {
            participant_id: entry.participant_id,
            rating: entry.rating.value(),
            games_played: entry.games_played,
        })
        .collect();

    standings.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    Ok(standings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        info!("   Service: {}", config.service.name);
        info!("   K-factor: {}", config.rating.k_factor);
        info!("   Default rating: {}", config.rating.default_rating);
        return Ok(());
    }

    let Some(path) = args.matches.as_ref() else {
        anyhow::bail!("No match log given");
    };

    match replay(&config, path) {
        Ok(standings) => {
            println!("{}", serde_json::to_string_pretty(&standings)?);
            Ok(())
        }
        Err(e) => {
            error!("Replay failed: {:#}", e);
            Err(e)
        }
    }
}
