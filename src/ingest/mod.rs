//! Upstream data providers.
//!
//! One file per provider; each builds its own URLs and owns the serde
//! structures for its response shape. The shared pieces here are the HTTP
//! client and the "GET and decode JSON" step, which map every failure onto
//! `FetchError` so callers never see a raw reqwest error.

pub mod geocode;
pub mod nws;
pub mod usgs;

#[cfg(test)]
pub(crate) mod fixtures;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::FetchError;

/// Builds the blocking client shared by every fetch in a run.
///
/// The configured user agent is sent on every request; api.weather.gov and
/// Nominatim reject anonymous clients.
pub fn build_client(config: &Config) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.http_timeout)
        .build()
        .map_err(|error| FetchError::Http { source_name: "HTTP client", error })
}

/// Issues one GET and returns the body of a 2xx response. No retries.
pub(crate) fn get_text(
    client: &Client,
    url: &str,
    accept: &str,
    source_name: &'static str,
) -> Result<String, FetchError> {
    tracing::debug!(source = source_name, %url, "GET");

    let response = client
        .get(url)
        .header("Accept", accept)
        .send()
        .map_err(|error| FetchError::Http { source_name, error })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus { source_name, status: status.as_u16() });
    }

    response
        .text()
        .map_err(|error| FetchError::Http { source_name, error })
}

/// `get_text` followed by JSON decoding into `T`.
pub(crate) fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    accept: &str,
    source_name: &'static str,
) -> Result<T, FetchError> {
    let body = get_text(client, url, accept, source_name)?;
    serde_json::from_str(&body).map_err(|e| FetchError::Parse {
        source_name,
        message: format!("JSON deserialization failed: {}", e),
    })
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(join_url("https://api.weather.gov", "points/1,2"), "https://api.weather.gov/points/1,2");
        assert_eq!(join_url("https://api.weather.gov/", "/points/1,2"), "https://api.weather.gov/points/1,2");
    }
}
