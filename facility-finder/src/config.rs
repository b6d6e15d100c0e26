//! Environment-driven server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::UserLocation;
use crate::overpass::DEFAULT_RADIUS_METERS;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STORE_DIR: &str = ".facility-store";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// A variable was set to something unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Settings for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,

    /// Overpass interpreter URL; the client default when unset
    pub overpass_url: Option<String>,

    /// Nominatim base URL; the client default when unset
    pub nominatim_url: Option<String>,

    /// Origin serving `/api/health-centers`
    pub directory_url: String,

    /// `None` keeps the store in memory
    pub store_dir: Option<PathBuf>,

    pub search_radius_m: u32,

    /// Keep seed facilities alongside live results
    pub merge_seed: bool,

    /// Fixed device position; `None` means no geolocation capability
    pub device_location: Option<UserLocation>,

    pub http_timeout_secs: u64,

    pub user_agent: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value.
    ///
    /// Blank values count as unset, except `FACILITY_STORE_DIR` where an
    /// empty value selects the in-memory store.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string());
        let non_empty = |var: &str| get(var).filter(|v| !v.is_empty());

        let bind_raw = non_empty("FACILITY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|e: std::net::AddrParseError| invalid("FACILITY_BIND_ADDR", bind_raw.clone(), e))?;

        let directory_url =
            non_empty("DIRECTORY_URL").unwrap_or_else(|| format!("http://{bind_addr}"));

        let store_dir = match get("FACILITY_STORE_DIR") {
            None => Some(PathBuf::from(DEFAULT_STORE_DIR)),
            Some(dir) if dir.is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
        };

        let search_radius_m = match non_empty("SEARCH_RADIUS_M") {
            None => DEFAULT_RADIUS_METERS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => return Err(invalid("SEARCH_RADIUS_M", raw, "must be positive")),
                Ok(r) => r,
                Err(e) => return Err(invalid("SEARCH_RADIUS_M", raw, e)),
            },
        };

        let merge_seed = match non_empty("MERGE_SEED_RESULTS") {
            None => false,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid("MERGE_SEED_RESULTS", raw, "expected true or false")),
            },
        };

        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| invalid("HTTP_TIMEOUT_SECS", raw.clone(), e))?,
        };

        let device_location = match (non_empty("DEVICE_LAT"), non_empty("DEVICE_LNG")) {
            (None, None) => None,
            (Some(lat), Some(lng)) => {
                let lat_v = parse_coordinate("DEVICE_LAT", &lat)?;
                let lng_v = parse_coordinate("DEVICE_LNG", &lng)?;
                Some(
                    UserLocation::new(lat_v, lng_v)
                        .map_err(|e| invalid("DEVICE_LAT", format!("{lat},{lng}"), e))?,
                )
            }
            (Some(_), None) => {
                return Err(invalid("DEVICE_LNG", String::new(), "required with DEVICE_LAT"));
            }
            (None, Some(_)) => {
                return Err(invalid("DEVICE_LAT", String::new(), "required with DEVICE_LNG"));
            }
        };

        Ok(Self {
            bind_addr,
            overpass_url: non_empty("OVERPASS_URL"),
            nominatim_url: non_empty("NOMINATIM_URL"),
            directory_url,
            store_dir,
            search_radius_m,
            merge_seed,
            device_location,
            http_timeout_secs,
            user_agent: non_empty("HTTP_USER_AGENT"),
        })
    }
}

fn invalid(var: &'static str, value: String, reason: impl ToString) -> ConfigError {
    ConfigError {
        var,
        value,
        reason: reason.to_string(),
    }
}

fn parse_coordinate(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>()
        .map_err(|e| invalid(var, raw.to_string(), e))
}
