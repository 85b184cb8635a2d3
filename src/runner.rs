/// One fetch → score → log cycle.
///
/// This is the whole job of a scheduled invocation:
/// 1. Resolve the ZIP code to a gauge (falling back to the default gauge)
/// 2. Work out where the weather should come from (geocoding unmapped ZIPs)
/// 3. Fetch the gauge stage/discharge from USGS
/// 4. Fetch the latest and previous observations from the nearest NWS station
/// 5. Read back the recent log for pressure history
/// 6. Score the conditions and append the entry, pruning past retention
///
/// Every fetch happens before the log is touched, so a failed fetch leaves
/// the log exactly as it was. Nothing is retried; the next scheduled run
/// simply tries again.

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::analysis::odds::{self, Odds};
use crate::analysis::stability::STABILITY_LOOKBACK_DAYS;
use crate::config::Config;
use crate::error::RunError;
use crate::ingest::{self, geocode, nws, usgs};
use crate::log_store::{AppendOutcome, LogStore};
use crate::model::{Coordinates, LogEntry, Reading};
use crate::stations::{self, Resolution};

/// What a successful run did, for the console summary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub resolution: Resolution,
    pub coordinates: Coordinates,
    pub weather_station: String,
    /// Pressure at the station's observation before the latest, if any.
    pub previous_pressure_hpa: Option<f64>,
    pub reading: Reading,
    pub odds: Odds,
    pub history_len: usize,
    pub outcome: AppendOutcome,
}

/// Runs one cycle against the real clock.
pub fn run(config: &Config) -> Result<RunSummary, RunError> {
    run_at(config, Utc::now())
}

/// Runs one cycle as if the current time were `now`.
pub fn run_at(config: &Config, now: DateTime<Utc>) -> Result<RunSummary, RunError> {
    let now = now.trunc_subsecs(0);

    let resolution = stations::resolve(&config.zip_code);
    let station = resolution.station();
    if resolution.is_default() {
        tracing::warn!(
            zip = %config.zip_code,
            station = station.site_code,
            "no gauge mapped for ZIP; using default gauge"
        );
    } else {
        tracing::info!(zip = %config.zip_code, station = station.site_code, "resolved gauge");
    }

    let client = ingest::build_client(config)?;

    let coordinates = match resolution {
        Resolution::Mapped(s) => s.coordinates(),
        Resolution::Default(_) => {
            geocode::lookup_zip(&client, &config.endpoints.nominatim, &config.zip_code)?
        }
    };

    let gauge = usgs::fetch_gauge(&client, &config.endpoints.usgs_iv, station.site_code)?;
    tracing::info!(
        station = %gauge.site_code,
        stage_ft = gauge.stage_ft,
        discharge_cfs = ?gauge.discharge_cfs,
        observed_at = %gauge.observed_at,
        "gauge reading"
    );

    let weather_station = nws::fetch_nearest_station(&client, &config.endpoints.nws, coordinates)?;
    let weather = nws::fetch_latest_observation(&client, &config.endpoints.nws, &weather_station)?;
    tracing::info!(
        station = %weather.station_id,
        pressure_hpa = weather.pressure_hpa,
        temperature_f = weather.temperature_f,
        precipitation_in = weather.precipitation_in,
        observed_at = %weather.observed_at,
        "weather observation"
    );
    let previous_pressure_hpa =
        nws::fetch_previous_pressure(&client, &config.endpoints.nws, &weather_station)?;
    tracing::debug!(previous_pressure_hpa = ?previous_pressure_hpa, "previous observation");

    let reading = Reading {
        timestamp: now,
        gauge_level_ft: gauge.stage_ft,
        gauge_flow_cfs: gauge.discharge_cfs,
        temperature_f: weather.temperature_f,
        pressure_hpa: weather.pressure_hpa,
        precipitation_in: weather.precipitation_in,
    };

    let store = LogStore::new(&config.log_file_path);
    let recent = store.read_recent(Duration::days(STABILITY_LOOKBACK_DAYS), now)?;
    let history_len = recent.len();
    // The previous NWS observation widens the range on a sharp change even
    // when the log has no history yet.
    let odds = odds::compute(&reading, station, recent.pressures().chain(previous_pressure_hpa));
    tracing::debug!(history = history_len, factors = ?odds.factors, "computed odds");

    let entry = LogEntry::new(station.site_code, &reading, odds.score, odds.factors);
    let outcome = store.append_and_prune(entry, now)?;
    tracing::info!(
        score = odds.score,
        band = %odds.band,
        retained = outcome.retained,
        pruned = outcome.pruned,
        kind = ?outcome.kind,
        path = %store.path().display(),
        "logged odds"
    );

    Ok(RunSummary {
        resolution,
        coordinates,
        weather_station,
        previous_pressure_hpa,
        reading,
        odds,
        history_len,
        outcome,
    })
}
