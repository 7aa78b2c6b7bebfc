//! Process configuration, resolved once at startup.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::constants::{FIXTURE_CREATE_DELAY_MS, FIXTURE_DELETE_DELAY_MS};
use crate::fixtures::FixtureLatency;
use crate::{Error, Result};

pub const DATABASE_URL_VAR: &str = "DENTQUOTE_DATABASE_URL";
pub const FIXTURE_CREATE_DELAY_VAR: &str = "DENTQUOTE_FIXTURE_CREATE_DELAY_MS";
pub const FIXTURE_DELETE_DELAY_VAR: &str = "DENTQUOTE_FIXTURE_DELETE_DELAY_MS";
pub const EXPORT_DIR_VAR: &str = "DENTQUOTE_EXPORT_DIR";

static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the live backend. Absent or blank means fixture mode.
    pub database_url: Option<String>,
    pub fixture_latency: FixtureLatency,
    /// Directory exported documents are written to.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            fixture_latency: FixtureLatency::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let create_ms = parse_millis(&lookup, FIXTURE_CREATE_DELAY_VAR, FIXTURE_CREATE_DELAY_MS)?;
        let delete_ms = parse_millis(&lookup, FIXTURE_DELETE_DELAY_VAR, FIXTURE_DELETE_DELAY_MS)?;
        let export_dir = lookup(EXPORT_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            database_url,
            fixture_latency: FixtureLatency::from_millis(create_ms, delete_ms),
            export_dir,
        })
    }

    /// True when a live backend location is present.
    pub fn backend_configured(&self) -> bool {
        self.database_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Publishes the config for the rest of the process. Only the first call
    /// wins; later calls get the installed value back.
    pub fn install(config: AppConfig) -> &'static AppConfig {
        GLOBAL_CONFIG.get_or_init(|| config)
    }

    /// The installed config, if any.
    pub fn global() -> Option<&'static AppConfig> {
        GLOBAL_CONFIG.get()
    }
}

fn parse_millis<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u64>().map_err(|_| {
            Error::InvalidConfigValue(format!(
                "{} must be a whole number of milliseconds, got '{}'",
                key, raw
            ))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_select_fixture_mode() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(!config.backend_configured());
        assert_eq!(config.fixture_latency, FixtureLatency::default());
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_blank_database_url_is_not_configured() {
        let config = AppConfig::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "   ")])).unwrap();
        assert!(!config.backend_configured());
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_values_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "/tmp/dentquote.db"),
            (FIXTURE_CREATE_DELAY_VAR, "10"),
            (FIXTURE_DELETE_DELAY_VAR, "5"),
            (EXPORT_DIR_VAR, "/tmp/exports"),
        ]))
        .unwrap();
        assert!(config.backend_configured());
        assert_eq!(config.fixture_latency.create, Duration::from_millis(10));
        assert_eq!(config.fixture_latency.delete, Duration::from_millis(5));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_bad_delay_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[(FIXTURE_CREATE_DELAY_VAR, "soon")]));
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }
}
