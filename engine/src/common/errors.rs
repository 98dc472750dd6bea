use thiserror::Error;

/// Errors raised while parsing or manipulating a single color value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Color value is empty")]
    Empty,

    #[error("Invalid hex color '{value}': {reason}")]
    InvalidHex { value: String, reason: String },
}

/// Palette invariant violations reported by the palette validator.
///
/// Every named role must be present, non-empty and a well-formed hex color
/// before a palette is accepted for application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteValidationError {
    #[error("Palette is missing required role '{role}'")]
    MissingRole { role: String },

    #[error("Palette role '{role}' is empty")]
    EmptyRole { role: String },

    #[error("Palette role '{role}' has malformed color '{value}'")]
    MalformedColor { role: String, value: String },

    #[error("Theme field '{field}' is invalid: {reason}")]
    InvalidThemeField { field: String, reason: String },
}

/// Errors a theme provider can signal through a failed response.
///
/// Providers never panic across their boundary. Every failure is carried
/// back to the resolver inside [`ProviderResponse::Failure`].
///
/// [`ProviderResponse::Failure`]: crate::providers::ProviderResponse::Failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Theme not found: {id}")]
    NotFound { id: String },

    #[error("Provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Internal provider error: {0}")]
    Internal(String),
}

/// Errors surfaced by the theme resolver.
///
/// The error taxonomy maps one-to-one onto the recovery policy:
///
/// - [`Provider`] and [`Timeout`] are recoverable; resolution falls through to
///   the next precedence source.
/// - [`Validation`] and [`NotFound`] block the application of a theme while the
///   previously active theme stays in place.
/// - [`Emergency`] is only recorded when every source failed and the
///   hardcoded emergency theme had to be fabricated.
///
/// [`Provider`]: ThemeError::Provider
/// [`Timeout`]: ThemeError::Timeout
/// [`Validation`]: ThemeError::Validation
/// [`NotFound`]: ThemeError::NotFound
/// [`Emergency`]: ThemeError::Emergency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("{provider} provider failed: {source}")]
    Provider {
        provider: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    #[error("Theme validation failed: {0}")]
    Validation(#[from] PaletteValidationError),

    #[error("Theme '{id}' not found")]
    NotFound { id: String },

    #[error("All theme sources failed; using emergency fallback theme")]
    Emergency,
}

impl ThemeError {
    pub fn provider(provider: &'static str, source: ProviderError) -> Self {
        match source {
            ProviderError::NotFound { id } => ThemeError::NotFound { id },
            other => ThemeError::Provider {
                provider,
                source: other,
            },
        }
    }

    /// Whether the resolver may fall through to the next source after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ThemeError::Provider { .. } | ThemeError::Timeout { .. }
        )
    }
}

impl From<ColorError> for PaletteValidationError {
    fn from(err: ColorError) -> Self {
        match err {
            ColorError::Empty => PaletteValidationError::EmptyRole {
                role: "seed".to_string(),
            },
            ColorError::InvalidHex { value, .. } => PaletteValidationError::MalformedColor {
                role: "seed".to_string(),
                value,
            },
        }
    }
}
