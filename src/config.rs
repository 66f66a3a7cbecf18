//! Upstream service configuration, optionally loaded from a TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAP_SERVICE_URL: &str =
    "https://mapprod3.environment.nsw.gov.au/arcgis/rest/services/Planning/EPI_Primary_Planning_Layers/MapServer";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "planproxy/0.1 (planning attribute proxy)";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub map_service: MapServiceConfig,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapServiceConfig {
    /// MapServer root; layer ids are appended to it
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for MapServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MAP_SERVICE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl MapServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String,
    /// Nominatim's usage policy rejects requests without an identifying agent
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Deployment metadata reported by `/api/info`.
#[derive(Debug, Clone, Default)]
pub struct DeploymentInfo {
    /// Public URL of this deployment
    pub url: Option<String>,
    pub env: Option<String>,
    pub sha: Option<String>,
}

impl DeploymentInfo {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("APP_URL").ok().filter(|v| !v.is_empty()),
            env: std::env::var("APP_ENV").ok().filter(|v| !v.is_empty()),
            sha: std::env::var("GIT_COMMIT_SHA").ok().filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.map_service.base_url, DEFAULT_MAP_SERVICE_URL);
        assert_eq!(config.geocoder.timeout(), Duration::from_secs(10));
        assert_eq!(config.map_service.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [map_service]
            base_url = "http://localhost:9000/MapServer"

            [geocoder]
            user_agent = "northern-beaches-dev/1.0"
            "#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.map_service.base_url, "http://localhost:9000/MapServer");
        assert_eq!(config.map_service.timeout_secs, 30);
        assert_eq!(config.geocoder.user_agent, "northern-beaches-dev/1.0");
        assert_eq!(config.geocoder.url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map_service\nbase_url = 3").unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }
}
