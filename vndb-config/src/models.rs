use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use vndb_core::{ClientOptions, ProviderSettings};

use crate::util::{parse_bool, parse_csv, parse_number};

pub const ENV_ENABLED: &str = "VNDB_ENABLED";
pub const ENV_PRIORITY: &str = "VNDB_PRIORITY";
pub const ENV_REQUEST_INTERVAL_MS: &str = "VNDB_REQUEST_INTERVAL_MS";
pub const ENV_LANGUAGES: &str = "VNDB_LANGUAGES";
pub const ENV_INCLUDE_UNOFFICIAL_RELEASES: &str =
    "VNDB_INCLUDE_UNOFFICIAL_RELEASES";

/// Provider settings. Unset or invalid values keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Whether the host should consult this provider at all.
    pub enabled: bool,
    /// Ordering among metadata providers; higher runs first.
    pub priority: u32,
    /// Pause (ms) between consecutive pages of one listing. The API allows
    /// about 200 requests per five minutes, which the default respects.
    pub request_interval_ms: u64,
    /// Language codes, most preferred first. Restricts results and orders
    /// companies; empty means any language.
    pub languages: Vec<String>,
    /// Consider fan translations and other unofficial releases.
    pub include_unofficial_releases: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 5,
            request_interval_ms: 700,
            languages: Vec::new(),
            include_unofficial_releases: false,
        }
    }
}

impl ProviderConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its raw
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let flag = |key: &str, default: bool| match read(key) {
            None => default,
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!(key, value = %raw, default, "Ignoring invalid boolean setting");
                default
            }),
        };
        let number = |key: &str, default: u64| match read(key) {
            None => default,
            Some(raw) => parse_number(&raw).unwrap_or_else(|| {
                warn!(key, value = %raw, default, "Ignoring invalid numeric setting");
                default
            }),
        };

        let priority = number(ENV_PRIORITY, u64::from(defaults.priority));
        let priority = u32::try_from(priority).unwrap_or_else(|_| {
            warn!(value = priority, "Priority out of range, using default");
            defaults.priority
        });

        Self {
            enabled: flag(ENV_ENABLED, defaults.enabled),
            priority,
            request_interval_ms: number(
                ENV_REQUEST_INTERVAL_MS,
                defaults.request_interval_ms,
            ),
            languages: read(ENV_LANGUAGES)
                .map(|raw| parse_csv(&raw))
                .unwrap_or(defaults.languages),
            include_unofficial_releases: flag(
                ENV_INCLUDE_UNOFFICIAL_RELEASES,
                defaults.include_unofficial_releases,
            ),
        }
    }

    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            request_interval: self.request_interval(),
            languages: self.languages.clone(),
        }
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            enabled: self.enabled,
            priority: self.priority,
            include_unofficial_releases: self.include_unofficial_releases,
        }
    }
}
