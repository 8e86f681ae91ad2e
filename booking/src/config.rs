//! Configuration management for the booking binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Smallest home-page listing
const MIN_RECOMMENDED: usize = 1;

/// Largest home-page listing; selections are single digits
const MAX_RECOMMENDED: usize = 9;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ledger file (`MULTIPLEX_LEDGER_PATH`, default `CACHE`)
    pub ledger_path: PathBuf,
    /// Films on the home page (`MULTIPLEX_RECOMMENDED_LIMIT`, default 5, clamped to 1..=9)
    pub recommended_limit: usize,
    /// Days ahead a search may book (`MULTIPLEX_BOOKING_WINDOW_DAYS`, default 7)
    pub booking_window_days: u32,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            ledger_path: lookup("MULTIPLEX_LEDGER_PATH")
                .filter(|path| !path.is_empty())
                .map_or_else(|| PathBuf::from("CACHE"), PathBuf::from),
            recommended_limit: lookup("MULTIPLEX_RECOMMENDED_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5_usize)
                .clamp(MIN_RECOMMENDED, MAX_RECOMMENDED),
            booking_window_days: lookup("MULTIPLEX_BOOKING_WINDOW_DAYS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::default();
        assert_eq!(config.ledger_path, PathBuf::from("CACHE"));
        assert_eq!(config.recommended_limit, 5);
        assert_eq!(config.booking_window_days, 7);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn recommended_limit_is_clamped() {
        assert_eq!(config(&[("MULTIPLEX_RECOMMENDED_LIMIT", "40")]).recommended_limit, 9);
        assert_eq!(config(&[("MULTIPLEX_RECOMMENDED_LIMIT", "0")]).recommended_limit, 1);
        assert_eq!(config(&[("MULTIPLEX_RECOMMENDED_LIMIT", "3")]).recommended_limit, 3);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = config(&[
            ("MULTIPLEX_BOOKING_WINDOW_DAYS", "a week"),
            ("MULTIPLEX_LEDGER_PATH", ""),
        ]);
        assert_eq!(config.booking_window_days, 7);
        assert_eq!(config.ledger_path, PathBuf::from("CACHE"));
    }

    #[test]
    fn explicit_values_are_used() {
        let config = config(&[
            ("MULTIPLEX_LEDGER_PATH", "/var/lib/multiplex/ledger"),
            ("RUST_LOG", "debug"),
        ]);
        assert_eq!(config.ledger_path, PathBuf::from("/var/lib/multiplex/ledger"));
        assert_eq!(config.log_level, "debug");
    }
}
