use engine::common::{PaletteValidationError, ThemeError};
use std::fmt::Display;
use std::sync::mpsc::Sender;

/// Application-wide error type for the SchoolHub client.
///
/// Theme engine failures are folded into these variants so callers only deal
/// with one error type. Each variant carries a human-readable message.
///
/// # Examples
///
/// ```no_run
/// use schoolhub::error::{AppError, AppResult};
///
/// fn require_admin(is_admin: bool) -> AppResult<()> {
///     if is_admin {
///         Ok(())
///     } else {
///         Err(AppError::Permission("Only administrators can edit themes".to_string()))
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A theme source failed or timed out.
    Theme(String),

    /// A palette, theme or user input failed validation. Blocks application of
    /// the theme; the active theme stays in place.
    Validation(String),

    /// The requested theme does not exist.
    NotFound(String),

    /// The session is not allowed to perform the operation.
    Permission(String),

    /// Reading or writing the stored dark-mode preference failed.
    Preference(String),

    /// Configuration loading and validation errors.
    Config(String),

    /// The controller was used in the wrong lifecycle phase.
    State(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Permission(msg) => write!(f, "Permission Error: {msg}"),
            AppError::Preference(msg) => write!(f, "Preference Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::State(msg) => write!(f, "State Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        match err {
            ThemeError::NotFound { id } => AppError::NotFound(format!("Theme '{id}' not found")),
            ThemeError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Theme(other.to_string()),
        }
    }
}

impl From<PaletteValidationError> for AppError {
    fn from(err: PaletteValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Error severity levels for appropriate UI response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Show a warning toast and log
    Warning,
    /// Show an error toast and log
    Error,
    /// Show an error toast and log loudly
    Critical,
}

/// Context information for errors
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: String,
    pub technical_details: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    /// New context with a generic message. Use [`with_message`](Self::with_message)
    /// for an explicit one.
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: format!("An error occurred in {component}. Please try again."),
            technical_details: None,
            suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = message.to_string();
        self
    }

    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// A transient user-facing message. Stands in for a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: ErrorSeverity,
    pub title: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Central error reporting: logs with context and emits a [`Notification`].
#[derive(Clone)]
pub struct ErrorReporter {
    tx: Option<Sender<Notification>>,
}

impl ErrorReporter {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A reporter that only logs.
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    pub fn report_warning(&self, error: AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation)
            .with_technical_details(&error.to_string())
            .with_severity(ErrorSeverity::Warning);
        self.report(error, context);
    }

    pub fn report(&self, error: AppError, context: ErrorContext) {
        let details = Self::format_additional_context(&context);
        match context.severity {
            ErrorSeverity::Warning => log::warn!(
                "[{}:{}] {} ({error}){details}",
                context.component,
                context.operation,
                context.user_message
            ),
            ErrorSeverity::Error => log::error!(
                "[{}:{}] {} ({error}){details}",
                context.component,
                context.operation,
                context.user_message
            ),
            ErrorSeverity::Critical => log::error!(
                "[CRITICAL] [{}:{}] {} ({error}){details}",
                context.component,
                context.operation,
                context.user_message
            ),
        }

        let Some(tx) = &self.tx else {
            return;
        };

        let notification = Notification {
            severity: context.severity,
            title: Self::title_for(&error).to_string(),
            message: context.user_message,
            suggestion: context.suggestion,
        };
        if let Err(e) = tx.send(notification) {
            log::error!("Failed to send notification: {e}");
        }
    }

    fn title_for(error: &AppError) -> &'static str {
        match error {
            AppError::Theme(_) => "Theme unavailable",
            AppError::Validation(_) => "Invalid theme",
            AppError::NotFound(_) => "Theme not found",
            AppError::Permission(_) => "Not allowed",
            AppError::Preference(_) => "Preference not saved",
            AppError::Config(_) => "Configuration problem",
            AppError::State(_) => "Unexpected state",
        }
    }

    fn format_additional_context(context: &ErrorContext) -> String {
        let mut parts = Vec::new();

        if let Some(technical_details) = &context.technical_details {
            parts.push(format!("Technical: {technical_details}"));
        }
        if let Some(suggestion) = &context.suggestion {
            parts.push(format!("Suggestion: {suggestion}"));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("\n{}", parts.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_matches, assert_ok, assert_some};
    use std::sync::mpsc;

    #[test]
    fn theme_errors_map_to_app_errors() {
        let not_found = AppError::from(ThemeError::NotFound {
            id: "nonexistent-id".to_string(),
        });
        assert_matches!(not_found, AppError::NotFound(_));

        let timeout = AppError::from(ThemeError::Timeout {
            operation: "user theme lookup".to_string(),
            seconds: 10,
        });
        assert_matches!(timeout, AppError::Theme(_));

        let validation = AppError::from(PaletteValidationError::EmptyRole {
            role: "primary".to_string(),
        });
        assert_eq!(
            validation.to_string(),
            "Validation Error: Palette role 'primary' is empty"
        );
    }

    #[test]
    fn reporter_sends_notification() {
        let (tx, rx) = mpsc::channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report(
            AppError::NotFound("Theme 'x' not found".to_string()),
            ErrorContext::new("ThemeController", "apply_theme")
                .with_message("That theme no longer exists")
                .with_suggestion("Pick another theme"),
        );

        let notification = assert_ok!(rx.try_recv());
        assert_eq!(notification.title, "Theme not found");
        assert_eq!(notification.message, "That theme no longer exists");
        assert_eq!(notification.severity, ErrorSeverity::Error);
        assert_some!(notification.suggestion);
    }

    #[test]
    fn silent_reporter_only_logs() {
        ErrorReporter::silent().report_warning(
            AppError::Preference("disk full".to_string()),
            "PreferenceStore",
            "save",
        );
    }
}
