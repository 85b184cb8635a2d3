/// Catfish odds scoring.
///
/// Four factors, each in `[0, 1]`, are combined with fixed weights into a
/// score from 0 to 100:
///
/// | factor        | peaks at                            | weight |
/// |---------------|-------------------------------------|--------|
/// | stability     | flat pressure over the lookback     | 0.30   |
/// | level         | the gauge's normal stage            | 0.20   |
/// | temperature   | 75 °F                               | 0.25   |
/// | precipitation | no rain in the last hour            | 0.25   |
///
/// The formula is a heuristic. What matters is that each factor is bounded
/// and that better conditions never lower the score.

use std::fmt;

use super::stability::pressure_stability;
use crate::model::{OddsFactors, Reading};
use crate::stations::GaugeStation;

pub const STABILITY_WEIGHT: f64 = 0.30;
pub const LEVEL_WEIGHT: f64 = 0.20;
pub const TEMPERATURE_WEIGHT: f64 = 0.25;
pub const PRECIPITATION_WEIGHT: f64 = 0.25;

/// Water temperature proxy: air temperature at which feeding peaks.
pub const IDEAL_TEMPERATURE_F: f64 = 75.0;
/// Distance from `IDEAL_TEMPERATURE_F` at which the factor reaches zero.
pub const TEMPERATURE_TOLERANCE_F: f64 = 15.0;
/// Hourly rainfall at which the precipitation factor reaches zero.
pub const PRECIPITATION_LIMIT_IN: f64 = 1.0;

/// Score boundaries for `OddsBand`.
pub const FAIR_THRESHOLD: f64 = 40.0;
pub const FAVORABLE_THRESHOLD: f64 = 70.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Coarse reading of a score, for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OddsBand {
    Poor,
    Fair,
    Favorable,
}

impl OddsBand {
    pub fn from_score(score: f64) -> Self {
        if score >= FAVORABLE_THRESHOLD {
            OddsBand::Favorable
        } else if score >= FAIR_THRESHOLD {
            OddsBand::Fair
        } else {
            OddsBand::Poor
        }
    }
}

impl fmt::Display for OddsBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddsBand::Poor => write!(f, "poor"),
            OddsBand::Fair => write!(f, "fair"),
            OddsBand::Favorable => write!(f, "favorable"),
        }
    }
}

/// Score plus the factors that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Odds {
    pub score: f64,
    pub factors: OddsFactors,
    pub band: OddsBand,
}

// ---------------------------------------------------------------------------
// Factors
// ---------------------------------------------------------------------------

/// 1.0 at `target`, falling linearly to 0 at `target ± tolerance`.
fn closeness(value: f64, target: f64, tolerance: f64) -> f64 {
    unit(1.0 - (value - target).abs() / tolerance)
}

/// Clamps to `[0, 1]`; a non-finite input contributes nothing.
fn unit(x: f64) -> f64 {
    if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }
}

pub fn level_factor(stage_ft: f64, station: &GaugeStation) -> f64 {
    closeness(stage_ft, station.normal_stage_ft, station.stage_tolerance_ft)
}

pub fn temperature_factor(temperature_f: f64) -> f64 {
    closeness(temperature_f, IDEAL_TEMPERATURE_F, TEMPERATURE_TOLERANCE_F)
}

pub fn precipitation_factor(precipitation_in: f64) -> f64 {
    unit(1.0 - precipitation_in.max(0.0) / PRECIPITATION_LIMIT_IN)
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Weighted 0–100 score for a set of factors, rounded to one decimal.
pub fn score(factors: &OddsFactors) -> f64 {
    let weighted = STABILITY_WEIGHT * factors.stability
        + LEVEL_WEIGHT * factors.level
        + TEMPERATURE_WEIGHT * factors.temperature
        + PRECIPITATION_WEIGHT * factors.precipitation;

    ((weighted * 100.0 * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Computes the odds for `reading` at `station`.
///
/// `pressure_history` is the earlier pressure (hPa) over the stability
/// lookback window: logged entries plus the weather station's previous
/// observation when one exists. It may be empty.
pub fn compute<I>(reading: &Reading, station: &GaugeStation, pressure_history: I) -> Odds
where
    I: IntoIterator<Item = f64>,
{
    let factors = OddsFactors {
        stability: pressure_stability(pressure_history, reading.pressure_hpa),
        level: level_factor(reading.gauge_level_ft, station),
        temperature: temperature_factor(reading.temperature_f),
        precipitation: precipitation_factor(reading.precipitation_in),
    };
    let score = score(&factors);

    Odds {
        score,
        factors,
        band: OddsBand::from_score(score),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
