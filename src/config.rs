//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `SENTIWATCH_*` environment variables. Command-line flags are applied
//! on top by the binary.
//!
//! ```toml
//! base_url = "http://localhost:8000"
//! refresh = "1s"
//! request_timeout = "10s"
//!
//! [endpoints]
//! summary = "/stats/sentiment/summary"
//! messages = "/messages/sentiment"
//! timeline = "/stats/sentiment/iter"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `SENTIWATCH_ENDPOINTS__SUMMARY`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::source::Endpoint;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SENTIWATCH";

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the sentiment backend.
    pub base_url: String,
    /// Polling interval, e.g. "1s" or "500ms".
    pub refresh: String,
    /// Optional per-request timeout. No timeout when unset.
    pub request_timeout: Option<String>,
    /// Where to write logs. Defaults to the system temp dir.
    pub log_file: Option<PathBuf>,
    pub endpoints: EndpointPaths,
}

/// Paths of the three endpoints, relative to `base_url` (or absolute URLs).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub summary: String,
    pub messages: String,
    pub timeline: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            summary: Endpoint::Summary.default_path().to_string(),
            messages: Endpoint::Messages.default_path().to_string(),
            timeline: Endpoint::Timeline.default_path().to_string(),
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub refresh: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh: "1s".to_string(),
            request_timeout: None,
            log_file: None,
            endpoints: EndpointPaths::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, env_source())
    }

    /// Load settings with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(env)
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides and re-validate.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(refresh) = overrides.refresh {
            self.refresh = refresh;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = Some(log_file);
        }
        self.validate()
    }

    /// Check that interval strings parse and the refresh interval is positive.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval()?.is_zero() {
            bail!("refresh interval must be greater than zero");
        }
        self.request_timeout()?;
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        Ok(())
    }

    /// Parsed polling interval.
    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh)
            .with_context(|| format!("invalid refresh interval {:?}", self.refresh))
    }

    /// Parsed request timeout, if one is configured.
    pub fn request_timeout(&self) -> Result<Option<Duration>> {
        self.request_timeout
            .as_deref()
            .map(|s| {
                parse_duration(s).with_context(|| format!("invalid request timeout {:?}", s))
            })
            .transpose()
    }

    /// Log file path, falling back to `sentiwatch.log` in the temp dir.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sentiwatch.log"))
    }
}

/// Environment source for `SENTIWATCH_*` variables.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn empty_env() -> Environment {
        env_source().source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        env_source().source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_env(None, empty_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(settings.request_timeout().unwrap(), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            base_url = "http://stats.internal:9000"
            refresh = "250ms"
            request_timeout = "5s"

            [endpoints]
            timeline = "/v2/iter"
            "#,
        );

        let settings = Settings::load_with_env(Some(file.path()), empty_env()).unwrap();
        assert_eq!(settings.base_url, "http://stats.internal:9000");
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_millis(250));
        assert_eq!(settings.request_timeout().unwrap(), Some(Duration::from_secs(5)));
        assert_eq!(settings.endpoints.timeline, "/v2/iter");
        assert_eq!(settings.endpoints.summary, "/stats/sentiment/summary");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file(r#"base_url = "http://from-file""#);
        let env = env(&[
            ("SENTIWATCH_BASE_URL", "http://from-env"),
            ("SENTIWATCH_ENDPOINTS__MESSAGES", "/recent"),
        ]);

        let settings = Settings::load_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.base_url, "http://from-env");
        assert_eq!(settings.endpoints.messages, "/recent");
    }

    #[test]
    fn test_cli_overrides_env_and_file() {
        let file = toml_file(
            r#"
            base_url = "http://from-file"
            refresh = "5s"
            "#,
        );
        let env = env(&[("SENTIWATCH_REFRESH", "2s")]);
        let mut settings = Settings::load_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(2));

        settings
            .apply_overrides(Overrides {
                refresh: Some("500ms".to_string()),
                log_file: Some(PathBuf::from("/tmp/dash.log")),
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(settings.base_url, "http://from-file");
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_millis(500));
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/dash.log"));

        let bad = Overrides {
            refresh: Some("soon".to_string()),
            ..Overrides::default()
        };
        assert!(settings.apply_overrides(bad).is_err());
    }

    #[test]
    fn test_rejects_zero_refresh() {
        let file = toml_file(r#"refresh = "0s""#);
        assert!(Settings::load_with_env(Some(file.path()), empty_env()).is_err());
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let settings = Settings {
            request_timeout: Some("whenever".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = Path::new("/nonexistent/sentiwatch.toml");
        assert!(Settings::load_with_env(Some(path), empty_env()).is_err());
    }

    #[test]
    fn test_log_path_default() {
        let settings = Settings::default();
        assert!(settings.log_path().ends_with("sentiwatch.log"));
    }
}
