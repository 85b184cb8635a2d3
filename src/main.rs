//! Catfish Odds Logger - single-shot entry point
//!
//! Meant to be run hourly by cron (or any scheduler). Each invocation:
//! 1. Reads configuration from the environment / `.env`
//! 2. Fetches the river gauge and the latest weather observation
//! 3. Scores the conditions against recent pressure history
//! 4. Appends the result to the JSON log, pruning entries past 30 days
//!
//! Usage:
//!   cargo run --release
//!
//! Environment:
//!   ZIP_CODE      - 5-digit US postal code (required)
//!   USER_AGENT    - identifying agent for api.weather.gov / Nominatim (required)
//!   LOG_FILE_PATH - odds log location (default ./data/odds_log.json)
//!
//! Exit status is 0 on success and non-zero on any failure, with no log
//! entry written for a failed run.

use catfish_odds::config::Config;
use catfish_odds::error::RunError;
use catfish_odds::{logging, runner};

fn main() {
    logging::init();

    if let Some(arg) = std::env::args().nth(1) {
        eprintln!("Unknown argument: {}", arg);
        eprintln!("Usage: catfish_odds   (configure via environment, see .env.example)");
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => fail(RunError::from(e)),
    };

    match runner::run(&config) {
        Ok(summary) => {
            println!(
                "[{}] Logged odds: {:.1}% ({}) at {}{}",
                summary.reading.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                summary.odds.score,
                summary.odds.band,
                summary.resolution.station().name,
                if summary.resolution.is_default() { " (default gauge)" } else { "" },
            );
        }
        Err(e) => fail(e),
    }
}

fn fail(error: RunError) -> ! {
    tracing::error!(%error, "run failed; no entry logged");
    std::process::exit(error.exit_code());
}
