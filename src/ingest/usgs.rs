/// USGS NWIS Instantaneous Values (IV) API client.
///
/// Handles URL construction and JSON response parsing for the USGS Water
/// Services IV endpoint:
///   https://waterservices.usgs.gov/nwis/iv/
///
/// The IV service returns WaterML rendered as JSON. See `fixtures.rs` for
/// annotated examples of the response structure.

use reqwest::blocking::Client;
use serde::Deserialize;

use super::get_text;
use crate::error::FetchError;
use crate::model::{GaugeReading, PARAM_DISCHARGE, PARAM_STAGE};

const SOURCE: &str = "USGS";

// ---------------------------------------------------------------------------
// Serde structures for WaterML JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IvResponse {
    value: ValueWrapper,
}

#[derive(Deserialize)]
struct ValueWrapper {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeries>,
}

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "sourceInfo")]
    source_info: SourceInfo,
    variable: Variable,
    values: Vec<Values>,
}

#[derive(Deserialize)]
struct SourceInfo {
    #[serde(rename = "siteName")]
    site_name: String,
    #[serde(rename = "siteCode")]
    site_code: Vec<SiteCode>,
}

#[derive(Deserialize)]
struct SiteCode {
    value: String,
}

#[derive(Deserialize)]
struct Variable {
    #[serde(rename = "variableCode")]
    variable_code: Vec<VariableCode>,
    unit: Unit,
    #[serde(rename = "noDataValue")]
    no_data_value: f64,
}

#[derive(Deserialize)]
struct VariableCode {
    value: String,
}

#[derive(Deserialize)]
struct Unit {
    #[serde(rename = "unitCode")]
    unit_code: String,
}

#[derive(Deserialize)]
struct Values {
    value: Vec<ValueEntry>,
}

#[derive(Deserialize)]
struct ValueEntry {
    value: String,  // USGS returns as string!
    #[serde(default)]
    qualifiers: Vec<String>,
    #[serde(rename = "dateTime")]
    date_time: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a USGS IV API URL for the given site codes, parameter codes,
/// and ISO 8601 period (e.g. `"PT2H"` for the past two hours).
///
/// The returned URL always requests JSON format and filters to active
/// sites only.
pub fn build_iv_url(base: &str, sites: &[&str], param_codes: &[&str], period: &str) -> String {
    let sites_param = sites.join(",");
    let params_param = param_codes.join(",");

    format!(
        "{}?sites={}&parameterCd={}&period={}&format=json&siteStatus=active",
        base.trim_end_matches('?'),
        sites_param,
        params_param,
        period,
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a USGS IV API JSON response body into a flat list of
/// `GaugeReading`s, one per `timeSeries` entry that contains valid data.
///
/// # Errors
/// - `FetchError::Parse` — malformed or unexpected JSON structure, or a
///   latest value that is not a finite number.
/// - `FetchError::NoData` — all `timeSeries` entries had either an empty
///   `value` array or the USGS sentinel value (`-999999`).
pub fn parse_iv_response(json: &str) -> Result<Vec<GaugeReading>, FetchError> {
    let response: IvResponse = serde_json::from_str(json).map_err(|e| parse_error(format!(
        "JSON deserialization failed: {}",
        e
    )))?;

    if response.value.time_series.is_empty() {
        return Err(no_data("No timeSeries entries in response"));
    }

    let mut readings = Vec::new();

    for series in response.value.time_series {
        let site_code = series
            .source_info
            .site_code
            .first()
            .ok_or_else(|| parse_error("Missing siteCode".to_string()))?
            .value
            .clone();

        let parameter_code = series
            .variable
            .variable_code
            .first()
            .ok_or_else(|| parse_error("Missing variableCode".to_string()))?
            .value
            .clone();

        let no_data_value = series.variable.no_data_value;

        let values_wrapper = series
            .values
            .first()
            .ok_or_else(|| parse_error("Missing values array".to_string()))?;

        // Most recent value is last in the chronologically sorted array.
        let Some(latest) = values_wrapper.value.last() else {
            continue;
        };

        let value: f64 = latest.value.parse().map_err(|e| {
            parse_error(format!("Failed to parse value '{}': {}", latest.value, e))
        })?;

        // "NaN" and "inf" parse as f64 but are not measurements.
        if !value.is_finite() {
            return Err(parse_error(format!(
                "Non-finite value '{}' for site {} parameter {}",
                latest.value, site_code, parameter_code
            )));
        }

        if (value - no_data_value).abs() < 0.1 {
            continue;
        }

        let qualifier = latest
            .qualifiers
            .first()
            .map(|s| s.as_str())
            .unwrap_or("P")
            .to_string();

        readings.push(GaugeReading {
            site_code,
            site_name: series.source_info.site_name.clone(),
            parameter_code,
            unit: series.variable.unit.unit_code.clone(),
            value,
            datetime: latest.date_time.clone(),
            qualifier,
        });
    }

    if readings.is_empty() {
        return Err(no_data(
            "All timeSeries entries were empty or contained sentinel values",
        ));
    }

    Ok(readings)
}

// ---------------------------------------------------------------------------
// Gauge snapshot
// ---------------------------------------------------------------------------

/// Latest stage (required) and discharge (if the site reports it) for one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSnapshot {
    pub site_code: String,
    pub site_name: String,
    pub stage_ft: f64,
    pub discharge_cfs: Option<f64>,
    /// Timestamp of the stage reading as reported by USGS.
    pub observed_at: String,
}

/// Picks the stage and discharge for `site_code` out of parsed readings.
///
/// Returns `FetchError::NoData` when the site has no stage reading; many
/// gauges report stage only, so a missing discharge is not an error.
pub fn snapshot_for_site(readings: &[GaugeReading], site_code: &str) -> Result<GaugeSnapshot, FetchError> {
    let for_site = |param: &str| {
        readings
            .iter()
            .find(|r| r.site_code == site_code && r.parameter_code == param)
    };

    let stage = for_site(PARAM_STAGE)
        .ok_or_else(|| no_data(&format!("no gage height reported for site {}", site_code)))?;

    Ok(GaugeSnapshot {
        site_code: stage.site_code.clone(),
        site_name: stage.site_name.clone(),
        stage_ft: stage.value,
        discharge_cfs: for_site(PARAM_DISCHARGE).map(|r| r.value),
        observed_at: stage.datetime.clone(),
    })
}

/// Fetches the latest stage/discharge for a single gauge.
pub fn fetch_gauge(client: &Client, base_url: &str, site_code: &str) -> Result<GaugeSnapshot, FetchError> {
    let url = build_iv_url(base_url, &[site_code], &[PARAM_STAGE, PARAM_DISCHARGE], "PT2H");

    let body = get_text(client, &url, "application/json", SOURCE)?;
    let readings = parse_iv_response(&body)?;
    snapshot_for_site(&readings, site_code)
}

fn parse_error(message: String) -> FetchError {
    FetchError::Parse { source_name: SOURCE, message }
}

fn no_data(detail: &str) -> FetchError {
    FetchError::NoData { source_name: SOURCE, detail: detail.to_string() }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
