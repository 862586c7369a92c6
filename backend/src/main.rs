//! FitCoach Gamification Backend
//!
//! Replays a log of athlete activity against the gamification store.
//!
//! ## Usage
//!
//! ```text
//! fitcoach-backend [EVENTS.ndjson]
//! ```
//!
//! Events are read from the given file, or from stdin when no path is given.
//! After replay, ranks are recomputed, the leaderboard is printed to stdout
//! as JSON and the store is written to the configured snapshot path.

use anyhow::{Context, Result};
use chrono::Utc;
use fitcoach_backend::{
    config, db, events,
    services::{AchievementService, GamificationService},
    state::AppState,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting FitCoach gamification replay"
    );

    let store = db::open_store(config.storage.snapshot_path.as_deref()).await?;
    let state = AppState::new(store, config);

    if state.config().gamification.seed_default_achievements {
        AchievementService::seed_default_achievements(state.store(), Utc::now()).await;
    }

    let (applied, rejected) = match std::env::args().nth(1) {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening event log {}", path))?;
            replay(&state, file).await?
        }
        None => replay(&state, tokio::io::stdin()).await?,
    };

    GamificationService::update_ranks(state.store()).await;
    let leaderboard = GamificationService::leaderboard(
        state.store(),
        state.config().gamification.leaderboard_default_limit,
        None,
    )
    .await?;
    println!("{}", serde_json::to_string_pretty(&leaderboard)?);

    if let Some(path) = state.config().storage.snapshot_path.as_deref() {
        db::save_snapshot(state.store(), path).await?;
    }

    info!(applied, rejected, "Replay complete");
    Ok(())
}

/// Apply every event line from `input`
///
/// Rejected events are logged and skipped. Returns (applied, rejected).
async fn replay<R: AsyncRead + Unpin>(state: &AppState, input: R) -> Result<(usize, usize)> {
    let mut lines = BufReader::new(input).lines();
    let mut applied = 0;
    let mut rejected = 0;
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = match events::parse_line(line) {
            Ok(event) => events::apply(state, event, Utc::now()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => applied += 1,
            Err(e) => {
                rejected += 1;
                warn!(line = line_no, code = e.code(), error = %e, "Event rejected");
            }
        }
    }

    Ok((applied, rejected))
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only the leaderboard.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fitcoach_backend=info".into()
        } else {
            "fitcoach_backend=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
