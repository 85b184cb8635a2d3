/// Core data types for the catfish odds logger.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O, only types and the unit conversions the upstream APIs
/// force on us.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter codes
// ---------------------------------------------------------------------------

/// USGS parameter code for discharge (streamflow), in cubic feet per second.
pub const PARAM_DISCHARGE: &str = "00060";

/// USGS parameter code for gage height (stage), in feet.
pub const PARAM_STAGE: &str = "00065";

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// WGS84 coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single instantaneous measurement from a USGS gauge station.
///
/// Corresponds to one entry in the `values[].value[]` array of a USGS
/// IV API response, enriched with site and parameter metadata from the
/// enclosing `timeSeries` object.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeReading {
    pub site_code: String,
    pub site_name: String,
    pub parameter_code: String,
    pub unit: String,
    pub value: f64,
    pub datetime: String,   // ISO 8601, e.g. "2024-05-01T12:00:00.000-05:00"
    pub qualifier: String,  // "P" = provisional, "A" = approved
}

/// Everything one run learns about the conditions "now".
///
/// Built once from the gauge and weather fetches and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub gauge_level_ft: f64,
    pub gauge_flow_cfs: Option<f64>,
    pub temperature_f: f64,
    pub pressure_hpa: f64,
    pub precipitation_in: f64,
}

/// The individual contributions behind a score, each in `[0, 1]`.
///
/// Written into every log entry so a score can be explained after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OddsFactors {
    pub stability: f64,
    pub level: f64,
    pub temperature: f64,
    pub precipitation: f64,
}

// ---------------------------------------------------------------------------
// Log entries
// ---------------------------------------------------------------------------

/// One line of the odds log.
///
/// The short keys (`time`, `p_now`, `T_now`, `L_now`) match the files written
/// by the earlier Python logger so existing logs keep working. Fields that
/// logger never wrote fall back to their defaults when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,
    pub score: f64,
    #[serde(default)]
    pub station: String,
    #[serde(rename = "p_now")]
    pub pressure_hpa: f64,
    #[serde(rename = "T_now")]
    pub temperature_f: f64,
    #[serde(rename = "L_now")]
    pub gauge_level_ft: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge_flow_cfs: Option<f64>,
    #[serde(default)]
    pub precipitation_in: f64,
    #[serde(default)]
    pub factors: OddsFactors,
}

impl LogEntry {
    pub fn new(station: &str, reading: &Reading, score: f64, factors: OddsFactors) -> Self {
        LogEntry {
            timestamp: reading.timestamp,
            score,
            station: station.to_string(),
            pressure_hpa: reading.pressure_hpa,
            temperature_f: reading.temperature_f,
            gauge_level_ft: reading.gauge_level_ft,
            gauge_flow_cfs: reading.gauge_flow_cfs,
            precipitation_in: reading.precipitation_in,
            factors,
        }
    }

    /// Name of the first numeric field that is NaN or infinite, if any.
    ///
    /// JSON has no representation for these; serde_json writes them as
    /// `null`, which then fails to load as `f64`.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let fields = [
            ("score", self.score),
            ("p_now", self.pressure_hpa),
            ("T_now", self.temperature_f),
            ("L_now", self.gauge_level_ft),
            ("gauge_flow_cfs", self.gauge_flow_cfs.unwrap_or(0.0)),
            ("precipitation_in", self.precipitation_in),
            ("factors.stability", self.factors.stability),
            ("factors.level", self.factors.level),
            ("factors.temperature", self.factors.temperature),
            ("factors.precipitation", self.factors.precipitation),
        ];
        fields.iter().find(|(_, v)| !v.is_finite()).map(|(name, _)| *name)
    }
}

// ---------------------------------------------------------------------------
// Unit conversions
// ---------------------------------------------------------------------------

pub fn pascals_to_hpa(pa: f64) -> f64 {
    pa / 100.0
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
