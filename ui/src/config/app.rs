use super::{
    LoggingConfig, limits::*, session::SessionSettings, theme::ThemeSettings,
    validation::ConfigValidationError,
};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeSettings,
    #[serde(default)]
    session: SessionSettings,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();
        let theme = &self.theme;

        let timeout = theme.lookup_timeout_secs();
        if !(MIN_LOOKUP_TIMEOUT_SECS..=MAX_LOOKUP_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::LookupTimeout {
                configured: timeout,
                min_limit: MIN_LOOKUP_TIMEOUT_SECS,
                max_limit: MAX_LOOKUP_TIMEOUT_SECS,
            });
        }

        let ttl = theme.cache_ttl_secs();
        if !(MIN_CACHE_TTL_SECS..=MAX_CACHE_TTL_SECS).contains(&ttl) {
            errors.push(ConfigValidationError::CacheTtl {
                configured: ttl,
                min_limit: MIN_CACHE_TTL_SECS,
                max_limit: MAX_CACHE_TTL_SECS,
            });
        }

        let (min_ms, max_ms) = (theme.latency_min_ms(), theme.latency_max_ms());
        if min_ms > max_ms || max_ms > MAX_LATENCY_MS {
            errors.push(ConfigValidationError::Latency {
                min_ms,
                max_ms,
                limit: MAX_LATENCY_MS,
            });
        }

        let chance = theme.user_theme_chance();
        if !(0.0..=1.0).contains(&chance) {
            errors.push(ConfigValidationError::UserThemeChance { configured: chance });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn session(&self) -> &SessionSettings {
        &self.session
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}
