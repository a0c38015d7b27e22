// Runtime configuration loaded from the environment (and an optional .env file)

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::verdict::VerdictProviderKind;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 1234;

/// Default location of the sled database
pub const DEFAULT_DATA_DIR: &str = "data/truthdesk.sled";

/// Log filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "truthdesk=info,tower_http=info";

#[derive(Error, Debug)]
#[error("Invalid value for {key}: {message}")]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub seed_categories: bool,
    pub verdict_provider: VerdictProviderKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_categories: true,
            verdict_provider: VerdictProviderKind::Random,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            info!("No .env file found, using process environment");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys fall back to logged defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", &DEFAULT_PORT.to_string())?,
            data_dir: try_load(&lookup, "DATA_DIR", DEFAULT_DATA_DIR)?,
            seed_categories: try_load_bool(&lookup, "SEED_CATEGORIES", true)?,
            verdict_provider: try_load(&lookup, "VERDICT_PROVIDER", "random")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            message: e.to_string(),
        }
    })
}

fn try_load_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_bool(&raw).ok_or_else(|| {
            warn!("Invalid {key} value: {raw}");
            ConfigError {
                key: key.to_string(),
                message: format!("expected a boolean, got '{raw}'"),
            }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" 1 "), Some(true));
        assert_eq!(parse_bool("OFF"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_default_address() {
        let config = Config::default();
        assert_eq!(config.address(), "0.0.0.0:1234");
        assert!(config.seed_categories);
        assert_eq!(config.verdict_provider, VerdictProviderKind::Random);
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_uses_defaults_when_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.seed_categories);
        assert_eq!(config.verdict_provider, VerdictProviderKind::Random);
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("SEED_CATEGORIES", "no"),
            ("VERDICT_PROVIDER", "pending"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(!config.seed_categories);
        assert_eq!(config.verdict_provider, VerdictProviderKind::Pending);
    }

    #[test]
    fn test_unparsable_values_are_config_errors() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "PORT");

        let err = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
        assert_eq!(err.key, "PORT");

        let err = Config::from_lookup(lookup_from(&[("VERDICT_PROVIDER", "oracle")])).unwrap_err();
        assert_eq!(err.key, "VERDICT_PROVIDER");
        assert!(err.message.contains("oracle"));

        let err = Config::from_lookup(lookup_from(&[("SEED_CATEGORIES", "sometimes")])).unwrap_err();
        assert_eq!(err.key, "SEED_CATEGORIES");
    }
}
