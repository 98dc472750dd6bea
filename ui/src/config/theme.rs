use super::limits::*;
use engine::providers::{DEFAULT_USER_THEME_CHANCE, Latency};
use engine::resolver::ResolverConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// `[theme]` section: resolution and simulated provider settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeSettings {
    default_theme_id: Option<String>,
    lookup_timeout_secs: Option<u64>,
    cache_ttl_secs: Option<u64>,
    latency_min_ms: Option<u64>,
    latency_max_ms: Option<u64>,
    user_theme_chance: Option<f64>,
    preference_file: Option<String>,
}

impl ThemeSettings {
    pub fn default_theme_id(&self) -> Option<&str> {
        self.default_theme_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    pub fn lookup_timeout_secs(&self) -> u64 {
        self.lookup_timeout_secs
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS)
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS)
    }

    pub fn latency_min_ms(&self) -> u64 {
        self.latency_min_ms.unwrap_or(DEFAULT_LATENCY_MIN_MS)
    }

    pub fn latency_max_ms(&self) -> u64 {
        self.latency_max_ms.unwrap_or(DEFAULT_LATENCY_MAX_MS)
    }

    pub fn user_theme_chance(&self) -> f64 {
        self.user_theme_chance.unwrap_or(DEFAULT_USER_THEME_CHANCE)
    }

    /// Explicit preference file, if configured. Otherwise the store lives in the
    /// config directory.
    pub fn preference_file(&self) -> Option<PathBuf> {
        self.preference_file.as_ref().map(PathBuf::from)
    }

    pub fn latency(&self) -> Latency {
        Latency::new(
            Duration::from_millis(self.latency_min_ms()),
            Duration::from_millis(self.latency_max_ms()),
        )
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            default_theme_id: self.default_theme_id().map(str::to_string),
            lookup_timeout: Duration::from_secs(self.lookup_timeout_secs()),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs()),
        }
    }
}
