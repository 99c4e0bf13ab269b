//! Configuration management for quakeboard using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{
    CatalogClient, Endpoints, DEFAULT_API_BASE, DEFAULT_END_TIME, DEFAULT_START_TIME,
};
use crate::session::FetchSession;
use crate::utils::{DisplayZone, TimeConfigError, TimeDisplay, DEFAULT_TIME_FORMAT};

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Environment overrides, applied after the config file.
pub const ENV_API_BASE: &str = "QUAKEBOARD_API_BASE";
pub const ENV_TIMEZONE: &str = "QUAKEBOARD_TIMEZONE";
pub const ENV_BIND: &str = "QUAKEBOARD_BIND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Invalid API base URL '{url}': {source}")]
    InvalidApiBase {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Time(#[from] TimeConfigError),
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the FDSN event service.
    pub api_base: String,
    /// Start of the event query window (`starttime` query parameter).
    pub starttime: String,
    /// End of the event query window (`endtime` query parameter).
    pub endtime: String,
    /// User agent override. None uses the built-in one.
    pub user_agent: Option<String>,
    /// Per-request timeout. None waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// strftime pattern for event times.
    pub time_format: String,
    pub timezone: DisplayZone,
    /// Server bind address: PORT, HOST, or HOST:PORT.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            starttime: DEFAULT_START_TIME.to_string(),
            endtime: DEFAULT_END_TIME.to_string(),
            user_agent: None,
            request_timeout: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            timezone: DisplayZone::Local,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Endpoints::new(&self.api_base, &self.starttime, &self.endtime).map_err(|source| {
            ConfigError::InvalidApiBase {
                url: self.api_base.clone(),
                source,
            }
        })
    }

    pub fn time_display(&self) -> Result<TimeDisplay, ConfigError> {
        Ok(TimeDisplay::new(self.timezone, &self.time_format)?)
    }

    /// Build a fetch session from these settings.
    pub fn fetch_session(&self) -> anyhow::Result<FetchSession> {
        let client = CatalogClient::new(self.user_agent.as_deref(), self.request_timeout)?;
        Ok(FetchSession::new(
            client,
            self.endpoints()?,
            self.time_display()?,
        ))
    }

    /// Apply `QUAKEBOARD_*` overrides from `lookup` (normally the process env).
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(api_base) = get(ENV_API_BASE) {
            tracing::debug!("Using {} from environment: {}", ENV_API_BASE, api_base);
            self.api_base = api_base;
        }
        if let Some(timezone) = get(ENV_TIMEZONE) {
            tracing::debug!("Using {} from environment: {}", ENV_TIMEZONE, timezone);
            self.timezone = timezone.parse()?;
        }
        if let Some(bind) = get(ENV_BIND) {
            tracing::debug!("Using {} from environment: {}", ENV_BIND, bind);
            self.bind = bind;
        }
        Ok(())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the FDSN event service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Event query window start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starttime: Option<String>,
    /// Event query window end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endtime: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// strftime pattern for event times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    /// `local`, `utc`, or a fixed offset such as `+02:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Server bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers quakeboard config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("quakeboard").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring discovered config: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => {
                // No config file found
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_error("JSON", e.to_string()))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if let Some(ref api_base) = self.api_base {
            settings.api_base = api_base.clone();
        }
        if let Some(ref starttime) = self.starttime {
            settings.starttime = starttime.clone();
        }
        if let Some(ref endtime) = self.endtime {
            settings.endtime = endtime.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(secs) = self.request_timeout {
            settings.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ref time_format) = self.time_format {
            settings.time_format = time_format.clone();
        }
        if let Some(ref timezone) = self.timezone {
            settings.timezone = timezone.parse()?;
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        Ok(())
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
///
/// Precedence: defaults, then the config file, then the environment.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            Config::load_from_path(Path::new(&expanded)).await?
        }
        None => Config::load().await,
    };

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from: {}", path.display());
    }

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings)?;
    settings.apply_env_overrides(|key| std::env::var(key).ok())?;

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        let endpoints = settings.endpoints().unwrap();
        assert_eq!(
            endpoints.query().as_str(),
            "https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&starttime=2014-01-01&endtime=2014-01-02"
        );
        assert!(settings.request_timeout.is_none());
        assert_eq!(settings.bind, DEFAULT_BIND);
    }

    #[tokio::test]
    async fn test_load_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quakeboard.toml");
        std::fs::write(
            &path,
            r#"
api_base = "http://localhost:9000/fdsn"
starttime = "2020-01-01"
endtime = "2020-01-08"
request_timeout = 30
timezone = "utc"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings).unwrap();
        assert_eq!(settings.api_base, "http://localhost:9000/fdsn");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.timezone, DisplayZone::Utc);
        assert_eq!(
            settings.endpoints().unwrap().query().as_str(),
            "http://localhost:9000/fdsn/query?format=geojson&starttime=2020-01-01&endtime=2020-01-08"
        );
        // untouched keys keep their defaults
        assert_eq!(settings.time_format, DEFAULT_TIME_FORMAT);
    }

    #[tokio::test]
    async fn test_load_json_and_yaml() {
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("quakeboard.json");
        std::fs::write(&json_path, r#"{"bind": "0.0.0.0:8080", "user_agent": "Test/1.0"}"#)
            .unwrap();
        let config = Config::load_from_path(&json_path).await.unwrap();
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.user_agent.as_deref(), Some("Test/1.0"));

        let yaml_path = dir.path().join("quakeboard.yaml");
        std::fs::write(&yaml_path, "time_format: \"%Y-%m-%d\"\ntimezone: \"+01:00\"\n").unwrap();
        let config = Config::load_from_path(&yaml_path).await.unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings).unwrap();
        assert_eq!(settings.time_display().unwrap().format_str(), "%Y-%m-%d");
    }

    #[tokio::test]
    async fn test_parse_error_reports_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "api_base = [").unwrap();

        let err = Config::load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn test_explicit_config_path_must_load() {
        let dir = tempdir().unwrap();
        let options = LoadOptions {
            config_path: Some(dir.path().join("missing.json")),
        };
        assert!(load_settings_with_options(options).await.is_err());
    }

    #[test]
    fn test_invalid_timezone_in_config() {
        let config = Config {
            timezone: Some("Mars/Olympus".to_string()),
            ..Config::default()
        };
        let err = config.apply_to_settings(&mut Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Time(TimeConfigError::InvalidZone(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE, "http://127.0.0.1:1/"),
            (ENV_TIMEZONE, "utc"),
            (ENV_BIND, ""),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.api_base, "http://127.0.0.1:1/");
        assert_eq!(settings.timezone, DisplayZone::Utc);
        // empty values are ignored
        assert_eq!(settings.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_invalid_api_base() {
        let settings = Settings {
            api_base: "::not-a-url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.endpoints(),
            Err(ConfigError::InvalidApiBase { .. })
        ));
        assert!(settings.fetch_session().is_err());
    }
}
