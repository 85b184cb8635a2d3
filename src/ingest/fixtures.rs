//! Test fixtures: representative JSON payloads from the upstream APIs.
//!
//! These fixtures are structurally complete but truncated to the minimum
//! needed to exercise the parsers.
//!
//! USGS IV response shape:
//!   response.value.timeSeries[]
//!     .sourceInfo.siteCode[0].value  — site number (string)
//!     .variable.variableCode[0].value — parameter code (string)
//!     .variable.noDataValue          — sentinel for missing data (-999999)
//!     .values[0].value[]
//!       .value     — the measurement as a STRING (not a number)
//!       .dateTime  — ISO 8601 with offset
//!
//! api.weather.gov observation shape:
//!   properties.<field>.value  — SI units (Pa, degC, mm), may be null
//!
//! Note: USGS measurement values are always JSON strings, and NWS values
//! are frequently null for a station that does not report that field.

/// Schuylkill River gauge with both discharge and stage.
pub(crate) fn fixture_usgs_schuylkill_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Schuylkill River at Philadelphia, PA",
              "siteCode": [{ "value": "01473730", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "6.79", "qualifiers": ["P"], "dateTime": "2024-06-01T09:45:00.000-04:00" },
                { "value": "6.82", "qualifiers": ["P"], "dateTime": "2024-06-01T10:00:00.000-04:00" }
              ]
            }]
          },
          {
            "sourceInfo": {
              "siteName": "Schuylkill River at Philadelphia, PA",
              "siteCode": [{ "value": "01473730", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "variableName": "Streamflow, ft&#179;/s",
              "unit": { "unitCode": "ft3/s" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "2140", "qualifiers": ["P"], "dateTime": "2024-06-01T10:00:00.000-04:00" }
              ]
            }]
          }
        ]
      }
    }"#
}

/// Peoria pool gauge, stage only, several values in the window.
pub(crate) fn fixture_usgs_stage_only_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Illinois River at Peoria, IL",
              "siteCode": [{ "value": "05567500", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "11.7", "qualifiers": ["P"], "dateTime": "2024-06-01T08:45:00.000-05:00" },
                { "value": "11.8", "qualifiers": ["P"], "dateTime": "2024-06-01T09:00:00.000-05:00" },
                { "value": "11.9", "qualifiers": ["P"], "dateTime": "2024-06-01T09:15:00.000-05:00" }
              ]
            }]
          }
        ]
      }
    }"#
}

/// Gauge offline: the latest value is the USGS no-data sentinel.
pub(crate) fn fixture_usgs_sentinel_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Schuylkill River at Philadelphia, PA",
              "siteCode": [{ "value": "01473730", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "unit": { "unitCode": "ft" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "-999999", "qualifiers": ["P", "Eqp"], "dateTime": "2024-06-01T10:00:00.000-04:00" }
              ]
            }]
          }
        ]
      }
    }"#
}

/// `/points/{lat},{lon}` — only the field we follow is kept.
pub(crate) fn fixture_nws_points_json(stations_url: &str) -> String {
    format!(
        r#"{{
          "id": "https://api.weather.gov/points/39.967,-75.188",
          "type": "Feature",
          "properties": {{
            "gridId": "PHI",
            "gridX": 49,
            "gridY": 76,
            "observationStations": "{}"
          }}
        }}"#,
        stations_url
    )
}

/// `/gridpoints/.../stations` — nearest station first.
pub(crate) fn fixture_nws_stations_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        { "properties": { "stationIdentifier": "KPHL", "name": "Philadelphia International Airport" } },
        { "properties": { "stationIdentifier": "KPNE", "name": "Philadelphia Northeast Airport" } }
      ]
    }"#
}

/// `/stations/KPHL/observations/latest` with every field we read present.
/// 101 400 Pa = 1014 hPa, 23.9 degC ≈ 75 degF, 2.54 mm = 0.1 in.
pub(crate) fn fixture_nws_latest_observation_json() -> &'static str {
    r#"{
      "properties": {
        "station": "https://api.weather.gov/stations/KPHL",
        "timestamp": "2024-06-01T13:54:00+00:00",
        "temperature": { "unitCode": "wmoUnit:degC", "value": 23.9, "qualityControl": "V" },
        "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101400, "qualityControl": "V" },
        "precipitationLastHour": { "unitCode": "wmoUnit:mm", "value": 2.54, "qualityControl": "C" }
      }
    }"#
}

/// Latest observation where the station reports no precipitation value.
pub(crate) fn fixture_nws_observation_null_precip_json() -> &'static str {
    r#"{
      "properties": {
        "timestamp": "2024-06-01T13:54:00+00:00",
        "temperature": { "unitCode": "wmoUnit:degC", "value": 20.0 },
        "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101000 },
        "precipitationLastHour": { "unitCode": "wmoUnit:mm", "value": null }
      }
    }"#
}

/// Latest observation missing barometric pressure entirely.
pub(crate) fn fixture_nws_observation_null_pressure_json() -> &'static str {
    r#"{
      "properties": {
        "timestamp": "2024-06-01T13:54:00+00:00",
        "temperature": { "unitCode": "wmoUnit:degC", "value": 20.0 },
        "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": null }
      }
    }"#
}

/// `/stations/KPHL/observations?limit=2`, newest first: 1014 hPa now,
/// 1006 hPa at the previous observation.
pub(crate) fn fixture_nws_observations_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "properties": {
            "timestamp": "2024-06-01T13:54:00+00:00",
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101400 }
          }
        },
        {
          "properties": {
            "timestamp": "2024-06-01T12:54:00+00:00",
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 100600 }
          }
        }
      ]
    }"#
}

/// A freshly commissioned station with only one observation on record.
pub(crate) fn fixture_nws_single_observation_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "properties": {
            "timestamp": "2024-06-01T13:54:00+00:00",
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101400 }
          }
        }
      ]
    }"#
}

/// Nominatim `/search?postalcode=...` — lat/lon come back as strings.
pub(crate) fn fixture_nominatim_json() -> &'static str {
    r#"[
      {
        "place_id": 330209381,
        "lat": "34.0901",
        "lon": "-118.4065",
        "display_name": "Beverly Hills, Los Angeles County, California, 90210, United States"
      }
    ]"#
}
