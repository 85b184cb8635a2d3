/// National Weather Service (api.weather.gov) client.
///
/// Two hops find the observing station nearest a point, then its
/// observations are read:
///   /points/{lat},{lon}                      → properties.observationStations
///   {observationStations}                    → features[0].stationIdentifier
///   /stations/{id}/observations/latest       → pressure, temperature, precip
///   /stations/{id}/observations?limit=2      → features[1] pressure (previous)
///
/// API Documentation: https://www.weather.gov/documentation/services-web-api
///
/// NWS reports SI units; conversion to hPa / degF / inches happens here so
/// nothing downstream sees pascals.

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{get_json, join_url};
use crate::error::FetchError;
use crate::model::{celsius_to_fahrenheit, mm_to_inches, pascals_to_hpa, Coordinates};

const SOURCE: &str = "NWS";
const GEO_JSON: &str = "application/geo+json";

/// Observations requested for the previous pressure; newest comes first.
const PREVIOUS_OBSERVATION_LIMIT: usize = 2;

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct PointResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
struct PointProperties {
    #[serde(rename = "observationStations")]
    observation_stations: String,
}

#[derive(Debug, Deserialize)]
struct StationCollection {
    features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
struct StationFeature {
    properties: StationProperties,
}

#[derive(Debug, Deserialize)]
struct StationProperties {
    #[serde(rename = "stationIdentifier")]
    station_identifier: String,
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
struct ObservationProperties {
    timestamp: String,
    #[serde(default)]
    temperature: Option<QuantitativeValue>,
    #[serde(rename = "barometricPressure", default)]
    barometric_pressure: Option<QuantitativeValue>,
    #[serde(rename = "precipitationLastHour", default)]
    precipitation_last_hour: Option<QuantitativeValue>,
}

#[derive(Debug, Deserialize)]
struct ObservationCollection {
    features: Vec<ObservationFeature>,
}

#[derive(Debug, Deserialize)]
struct ObservationFeature {
    properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
struct QuantitativeValue {
    value: Option<f64>,
}

/// Latest weather conditions at a station, already in logging units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub station_id: String,
    pub observed_at: String,
    pub pressure_hpa: f64,
    pub temperature_f: f64,
    pub precipitation_in: f64,
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Finds the observation station nearest to `coords`.
pub fn fetch_nearest_station(
    client: &Client,
    base_url: &str,
    coords: Coordinates,
) -> Result<String, FetchError> {
    let url = join_url(
        base_url,
        &format!("points/{:.4},{:.4}", coords.latitude, coords.longitude),
    );
    let point: PointResponse = get_json(client, &url, GEO_JSON, SOURCE)?;

    let stations: StationCollection =
        get_json(client, &point.properties.observation_stations, GEO_JSON, SOURCE)?;

    stations
        .features
        .into_iter()
        .next()
        .map(|f| f.properties.station_identifier)
        .ok_or(FetchError::NoStation {
            latitude: coords.latitude,
            longitude: coords.longitude,
        })
}

/// Fetches and normalizes the latest observation for `station_id`.
pub fn fetch_latest_observation(
    client: &Client,
    base_url: &str,
    station_id: &str,
) -> Result<WeatherSnapshot, FetchError> {
    let url = join_url(base_url, &format!("stations/{}/observations/latest", station_id));
    let body: ObservationResponse = get_json(client, &url, GEO_JSON, SOURCE)?;
    parse_observation(station_id, body.properties)
}

/// Barometric pressure (hPa) of the observation before the latest one.
///
/// `Ok(None)` when the station has a single observation on record or did not
/// report pressure last time. HTTP and JSON failures are still errors.
pub fn fetch_previous_pressure(
    client: &Client,
    base_url: &str,
    station_id: &str,
) -> Result<Option<f64>, FetchError> {
    let url = join_url(
        base_url,
        &format!("stations/{}/observations?limit={}", station_id, PREVIOUS_OBSERVATION_LIMIT),
    );
    let body: ObservationCollection = get_json(client, &url, GEO_JSON, SOURCE)?;
    Ok(previous_pressure(body))
}

/// Parses a raw `/observations` collection body. Split out for fixture tests.
pub fn parse_previous_pressure(json: &str) -> Result<Option<f64>, FetchError> {
    let body: ObservationCollection = serde_json::from_str(json).map_err(|e| FetchError::Parse {
        source_name: SOURCE,
        message: format!("JSON deserialization failed: {}", e),
    })?;
    Ok(previous_pressure(body))
}

fn previous_pressure(collection: ObservationCollection) -> Option<f64> {
    collection
        .features
        .into_iter()
        .nth(1)
        .and_then(|f| f.properties.barometric_pressure)
        .and_then(|q| q.value)
        .filter(|pa| pa.is_finite())
        .map(pascals_to_hpa)
}

/// Parses a raw `/observations/latest` body. Split out for fixture tests.
pub fn parse_latest_observation(station_id: &str, json: &str) -> Result<WeatherSnapshot, FetchError> {
    let body: ObservationResponse = serde_json::from_str(json).map_err(|e| FetchError::Parse {
        source_name: SOURCE,
        message: format!("JSON deserialization failed: {}", e),
    })?;
    parse_observation(station_id, body.properties)
}

fn parse_observation(station_id: &str, props: ObservationProperties) -> Result<WeatherSnapshot, FetchError> {
    let value_of = |q: &Option<QuantitativeValue>| q.as_ref().and_then(|q| q.value);

    let pressure_pa = value_of(&props.barometric_pressure).ok_or(FetchError::MissingValue {
        source_name: SOURCE,
        field: "barometricPressure",
    })?;
    let temperature_c = value_of(&props.temperature).ok_or(FetchError::MissingValue {
        source_name: SOURCE,
        field: "temperature",
    })?;
    // Most stations leave this null when nothing fell.
    let precipitation_mm = value_of(&props.precipitation_last_hour).unwrap_or(0.0);

    Ok(WeatherSnapshot {
        station_id: station_id.to_string(),
        observed_at: props.timestamp,
        pressure_hpa: pascals_to_hpa(pressure_pa),
        temperature_f: celsius_to_fahrenheit(temperature_c),
        precipitation_in: mm_to_inches(precipitation_mm),
    })
}

// ============================================================================
// Tests
// ============================================================================
