use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid lookup_timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    LookupTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid cache_ttl_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    CacheTtl {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid latency range: {min_ms}..{max_ms} ms (limit: {limit} ms)")]
    Latency { min_ms: u64, max_ms: u64, limit: u64 },
    #[error("Invalid user_theme_chance: {configured} (must be between 0.0 and 1.0)")]
    UserThemeChance { configured: f64 },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::LookupTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Theme lookup timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update theme.lookup_timeout_secs in schoolhub.toml."
                )
            }
            ConfigValidationError::CacheTtl {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Theme cache TTL out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update theme.cache_ttl_secs in schoolhub.toml."
                )
            }
            ConfigValidationError::Latency {
                min_ms,
                max_ms,
                limit,
            } => {
                format!(
                    "Simulated latency range is invalid!\n\n\
                    Your configured range: {min_ms} - {max_ms} ms\n\
                    The minimum must not exceed the maximum, and neither may exceed {limit} ms.\n\n\
                    Please update theme.latency_min_ms and theme.latency_max_ms in schoolhub.toml."
                )
            }
            ConfigValidationError::UserThemeChance { configured } => {
                format!(
                    "User theme chance out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: 0.0 - 1.0\n\n\
                    Please update theme.user_theme_chance in schoolhub.toml."
                )
            }
        }
    }
}

/// Configuration loading result
#[derive(Debug)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
    ValidationError(Vec<ConfigValidationError>),
}

impl ConfigLoadResult {
    /// Collapse into a single error message for callers that cannot recover.
    pub fn into_result(self) -> Result<AppConfig, String> {
        match self {
            ConfigLoadResult::Success(config) => Ok(*config),
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => Err(msg),
            ConfigLoadResult::ValidationError(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
                Err(format!(
                    "Configuration validation failed:\n{}",
                    messages.join("\n\n")
                ))
            }
        }
    }
}
