/// Forward geocoding: US ZIP code to coordinates.
///
/// Uses Nominatim (OpenStreetMap). No API key is required, but a real user
/// agent is mandatory under its usage policy.

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{get_json, join_url};
use crate::error::FetchError;
use crate::model::Coordinates;

const SOURCE: &str = "Nominatim";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Builds the Nominatim search URL for a US postal code.
pub fn build_search_url(base_url: &str, zip_code: &str) -> String {
    format!(
        "{}?postalcode={}&country={}&format=json&limit=1",
        join_url(base_url, "search"),
        urlencoding::encode(zip_code),
        urlencoding::encode("USA"),
    )
}

/// Looks up the centroid of a ZIP code.
pub fn lookup_zip(client: &Client, base_url: &str, zip_code: &str) -> Result<Coordinates, FetchError> {
    let url = build_search_url(base_url, zip_code);
    let places: Vec<NominatimPlace> = get_json(client, &url, "application/json", SOURCE)?;
    coordinates_from_places(zip_code, places)
}

/// Parses a raw Nominatim search body. Split out for fixture tests.
pub fn parse_search_response(zip_code: &str, json: &str) -> Result<Coordinates, FetchError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(json).map_err(|e| FetchError::Parse {
        source_name: SOURCE,
        message: format!("JSON deserialization failed: {}", e),
    })?;
    coordinates_from_places(zip_code, places)
}

fn coordinates_from_places(zip_code: &str, places: Vec<NominatimPlace>) -> Result<Coordinates, FetchError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoGeocodeResult(zip_code.to_string()))?;

    let parse = |field: &str, raw: &str| {
        raw.parse::<f64>().map_err(|e| FetchError::Parse {
            source_name: SOURCE,
            message: format!("{} '{}' is not a number: {}", field, raw, e),
        })
    };

    Ok(Coordinates {
        latitude: parse("lat", &place.lat)?,
        longitude: parse("lon", &place.lon)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_NOMINATIM_URL;
    use crate::ingest::fixtures::fixture_nominatim_json;

    #[test]
    fn test_search_url_shape() {
        let url = build_search_url(DEFAULT_NOMINATIM_URL, "90210");
        assert_eq!(
            url,
            "https://nominatim.openstreetmap.org/search?postalcode=90210&country=USA&format=json&limit=1"
        );
    }

    #[test]
    fn test_search_url_encodes_input() {
        let url = build_search_url(DEFAULT_NOMINATIM_URL, "90 210&x");
        assert!(url.contains("postalcode=90%20210%26x"), "got {}", url);
    }

    #[test]
    fn test_parse_string_coordinates() {
        let coords = parse_search_response("90210", fixture_nominatim_json()).expect("should parse");
        assert!((coords.latitude - 34.0901).abs() < 1e-9);
        assert!((coords.longitude + 118.4065).abs() < 1e-9);
    }

    #[test]
    fn test_empty_result_is_no_geocode_result() {
        let result = parse_search_response("00000", "[]");
        assert!(matches!(result, Err(FetchError::NoGeocodeResult(ref zip)) if zip == "00000"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_parse_error() {
        let result = parse_search_response("00000", r#"[{"lat": "north", "lon": "-75.0"}]"#);
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }
}
