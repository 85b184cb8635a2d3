//! catfish_odds: hourly catfish-odds logger for a single US ZIP code.
//!
//! # Module structure
//!
//! ```text
//! catfish_odds
//! ├── model       — shared data types (Reading, LogEntry, OddsFactors, …)
//! ├── error       — ConfigError, FetchError, LogStoreError, RunError
//! ├── config      — environment-driven Config (ZIP_CODE, USER_AGENT, …)
//! ├── stations    — ZIP → USGS gauge registry with default fallback
//! ├── ingest
//! │   ├── usgs    — USGS NWIS IV API: URL construction + JSON parsing
//! │   ├── nws     — api.weather.gov nearest station + latest/previous observation
//! │   ├── geocode — Nominatim ZIP → coordinates
//! │   └── fixtures (test only) — representative API response payloads
//! ├── analysis
//! │   ├── stability — barometric stability from logged pressure
//! │   └── odds      — weighted 0–100 score and band
//! ├── log_store   — JSON log: read-recent, append-with-prune, atomic rewrite
//! ├── runner      — one fetch → score → log cycle
//! └── logging     — tracing subscriber setup
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod log_store;
pub mod logging;
pub mod model;
pub mod runner;
pub mod stations;
