/// Runtime configuration loader - reads the process environment (and `.env`).
///
/// The whole configuration is read once at startup into a `Config` that is
/// passed explicitly to every stage of a run. Nothing reads the environment
/// after that.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_LOG_FILE_PATH: &str = "./data/odds_log.json";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_NWS_API_URL: &str = "https://api.weather.gov";
pub const DEFAULT_USGS_IV_URL: &str = "https://waterservices.usgs.gov/nwis/iv/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Base URLs of the upstream providers. Overridable so tests can point the
/// fetchers at a local mock server.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub nominatim: String,
    pub nws: String,
    pub usgs_iv: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            nominatim: DEFAULT_NOMINATIM_URL.to_string(),
            nws: DEFAULT_NWS_API_URL.to_string(),
            usgs_iv: DEFAULT_USGS_IV_URL.to_string(),
        }
    }
}

/// Everything a run needs to know about its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// 5-digit US postal code the odds are computed for.
    pub zip_code: String,
    /// Path to the JSON odds log.
    pub log_file_path: String,
    /// Sent with every request; api.weather.gov and Nominatim both require
    /// an identifying agent with contact details.
    pub user_agent: String,
    pub endpoints: Endpoints,
    pub http_timeout: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let zip_code = get("ZIP_CODE").ok_or(ConfigError::Missing("ZIP_CODE"))?;
        validate_zip(&zip_code)?;

        let user_agent = get("USER_AGENT").ok_or(ConfigError::Missing("USER_AGENT"))?;

        let log_file_path =
            get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string());

        let endpoints = Endpoints {
            nominatim: base_url("NOMINATIM_URL", get("NOMINATIM_URL"), DEFAULT_NOMINATIM_URL)?,
            nws: base_url("NWS_API_URL", get("NWS_API_URL"), DEFAULT_NWS_API_URL)?,
            usgs_iv: base_url("USGS_IV_URL", get("USGS_IV_URL"), DEFAULT_USGS_IV_URL)?,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "HTTP_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got '{}'", raw),
                    });
                }
            },
        };

        Ok(Config {
            zip_code,
            log_file_path,
            user_agent,
            endpoints,
            http_timeout,
        })
    }
}

fn validate_zip(zip: &str) -> Result<(), ConfigError> {
    if zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var: "ZIP_CODE",
            reason: format!("expected 5 digits, got '{}'", zip),
        })
    }
}

fn base_url(var: &'static str, value: Option<String>, default: &str) -> Result<String, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: format!("'{}' is not a URL: {}", raw, e),
    })?;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("ZIP_CODE", "19130"),
            ("USER_AGENT", "CatfishOdds/0.1 (me@example.com)"),
        ]))
        .expect("minimal config should load");

        assert_eq!(config.zip_code, "19130");
        assert_eq!(config.log_file_path, DEFAULT_LOG_FILE_PATH);
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_zip_is_reported() {
        let err = Config::from_lookup(lookup(&[("USER_AGENT", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ZIP_CODE")));
    }

    #[test]
    fn test_blank_user_agent_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("ZIP_CODE", "19130"), ("USER_AGENT", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("USER_AGENT")));
    }

    #[test]
    fn test_malformed_zip_is_invalid() {
        for bad in ["1913", "191300", "19a30", "PA-19"] {
            let err = Config::from_lookup(lookup(&[("ZIP_CODE", bad), ("USER_AGENT", "x")]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: "ZIP_CODE", .. }),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("ZIP_CODE", "61602"),
            ("USER_AGENT", "x"),
            ("LOG_FILE_PATH", "/tmp/odds.json"),
            ("NWS_API_URL", "http://127.0.0.1:9000"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.log_file_path, "/tmp/odds.json");
        assert_eq!(config.endpoints.nws, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.usgs_iv, DEFAULT_USGS_IV_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_url_and_timeout_are_invalid() {
        let err = Config::from_lookup(lookup(&[
            ("ZIP_CODE", "61602"),
            ("USER_AGENT", "x"),
            ("USGS_IV_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "USGS_IV_URL", .. }));

        let err = Config::from_lookup(lookup(&[
            ("ZIP_CODE", "61602"),
            ("USER_AGENT", "x"),
            ("HTTP_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "HTTP_TIMEOUT_SECS", .. }));
    }
}
