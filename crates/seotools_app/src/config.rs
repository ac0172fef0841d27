//! Client configuration.
//!
//! Resolution order: built-in defaults, then the optional RON file, then
//! `SEOTOOLS_BASE_URL`, then command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use seotools_core::{Timings, DEFAULT_NOTICE_TTL, DEFAULT_REDIRECT_DELAY};
use seotools_engine::{ApiSettings, DEFAULT_POLL_INTERVAL};

pub const DEFAULT_CONFIG_FILENAME: &str = "seotools.ron";
pub const BASE_URL_ENV: &str = "SEOTOOLS_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub storage_dir: PathBuf,
    pub poll_interval: Duration,
    pub redirect_delay: Duration,
    pub notice_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ApiSettings::default().base_url,
            storage_dir: PathBuf::from(".seotools"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

impl ClientConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
        }
    }

    pub fn timings(&self) -> Timings {
        Timings {
            redirect_delay: self.redirect_delay,
            notice_ttl: self.notice_ttl,
        }
    }
}

/// On-disk shape; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    storage_dir: Option<PathBuf>,
    poll_interval_secs: Option<u64>,
    redirect_delay_ms: Option<u64>,
    notice_ttl_ms: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub storage_dir: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, `seotools.ron` in the working
/// directory is used when present and defaults otherwise.
pub fn load(
    path: Option<&Path>,
    env_base_url: Option<String>,
    overrides: &ConfigOverrides,
) -> Result<ClientConfig, ConfigError> {
    let file = match path {
        Some(path) => read_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
            if default_path.exists() {
                read_file(default_path)?
            } else {
                ConfigFile::default()
            }
        }
    };

    let mut config = ClientConfig::default();
    if let Some(base_url) = file.base_url {
        config.base_url = base_url;
    }
    if let Some(dir) = file.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(secs) = file.poll_interval_secs {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(ms) = file.redirect_delay_ms {
        config.redirect_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = file.notice_ttl_ms {
        config.notice_ttl = Duration::from_millis(ms);
    }

    if let Some(base_url) = env_base_url.filter(|value| !value.trim().is_empty()) {
        config.base_url = base_url;
    }

    if let Some(base_url) = &overrides.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(dir) = &overrides.storage_dir {
        config.storage_dir = dir.clone();
    }
    if let Some(secs) = overrides.poll_interval_secs {
        config.poll_interval = Duration::from_secs(secs);
    }

    if config.poll_interval.is_zero() {
        return Err(ConfigError::ZeroDuration("poll interval"));
    }
    Ok(config)
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("client.ron");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn file_values_replace_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"(base_url: Some("http://seo.internal/api"), redirect_delay_ms: Some(250))"#,
        );

        let config = load(Some(path.as_path()), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.base_url, "http://seo.internal/api");
        assert_eq!(config.redirect_delay, Duration::from_millis(250));
        assert_eq!(config.notice_ttl, DEFAULT_NOTICE_TTL);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn env_then_flags_take_precedence() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"(base_url: Some("http://file/api"))"#);

        let from_env = load(
            Some(path.as_path()),
            Some("http://env/api".to_string()),
            &ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(from_env.base_url, "http://env/api");

        let overrides = ConfigOverrides {
            base_url: Some("http://flag/api".to_string()),
            ..ConfigOverrides::default()
        };
        let from_flag = load(
            Some(path.as_path()),
            Some("http://env/api".to_string()),
            &overrides,
        )
        .unwrap();
        assert_eq!(from_flag.base_url, "http://flag/api");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "(base_url: ");
        let err = load(Some(path.as_path()), None, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load(
            Some(dir.path().join("absent.ron").as_path()),
            None,
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let overrides = ConfigOverrides {
            poll_interval_secs: Some(0),
            ..ConfigOverrides::default()
        };
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "()");
        let err = load(Some(path.as_path()), None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration(_)));
    }
}
