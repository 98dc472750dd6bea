use crate::common::ProviderError;
use crate::theme::Theme;
use chrono::{DateTime, Utc};

/// Version stamped onto every provider response.
pub const RESPONSE_VERSION: &str = "1.0.0";

/// Metadata attached to every provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

impl ResponseMeta {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            version: RESPONSE_VERSION,
        }
    }
}

/// Tagged result returned by every theme provider.
///
/// A `Failure` is authoritative, but it may still carry a best-effort
/// `fallback` theme for emergency use.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse<T> {
    Success {
        data: T,
        meta: ResponseMeta,
    },
    Failure {
        error: ProviderError,
        fallback: Option<Theme>,
        meta: ResponseMeta,
    },
}

impl<T> ProviderResponse<T> {
    pub fn success(data: T) -> Self {
        ProviderResponse::Success {
            data,
            meta: ResponseMeta::now(),
        }
    }

    pub fn failure(error: ProviderError) -> Self {
        ProviderResponse::Failure {
            error,
            fallback: None,
            meta: ResponseMeta::now(),
        }
    }

    pub fn failure_with_fallback(error: ProviderError, fallback: Theme) -> Self {
        ProviderResponse::Failure {
            error,
            fallback: Some(fallback),
            meta: ResponseMeta::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResponse::Success { .. })
    }

    pub fn meta(&self) -> &ResponseMeta {
        match self {
            ProviderResponse::Success { meta, .. } | ProviderResponse::Failure { meta, .. } => meta,
        }
    }

    /// The emergency theme attached to a failure, if any.
    pub fn fallback(&self) -> Option<&Theme> {
        match self {
            ProviderResponse::Failure { fallback, .. } => fallback.as_ref(),
            ProviderResponse::Success { .. } => None,
        }
    }

    /// Drop the metadata and any fallback payload.
    pub fn into_result(self) -> Result<T, ProviderError> {
        match self {
            ProviderResponse::Success { data, .. } => Ok(data),
            ProviderResponse::Failure { error, .. } => Err(error),
        }
    }
}

impl<T> From<ProviderError> for ProviderResponse<T> {
    fn from(error: ProviderError) -> Self {
        ProviderResponse::failure(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_converts_to_ok() {
        let response = ProviderResponse::success(7);
        assert!(response.is_success());
        assert_eq!(response.meta().version, RESPONSE_VERSION);
        assert_eq!(response.into_result(), Ok(7));
    }

    #[test]
    fn failure_keeps_error_authoritative() {
        let response: ProviderResponse<()> = ProviderResponse::failure(ProviderError::Unavailable {
            reason: "offline".to_string(),
        });
        assert!(!response.is_success());
        assert!(response.fallback().is_none());
        assert!(response.into_result().is_err());
    }
}
