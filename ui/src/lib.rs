//! # SchoolHub Theme Client
//!
//! Applies SchoolHub themes on the client: resolves the startup theme for the
//! signed-in session, keeps the active palette and dark-mode flag, and writes
//! them to the presentation layer.
//!
//! ## Features
//!
//! - Startup resolution with user, organization and default precedence
//! - Runtime theme switching with palette validation
//! - Persisted dark-mode preference that follows the environment until set
//! - Admin theme management (create, update, delete)
//! - Configuration from `schoolhub.toml` and `SCHOOLHUB__*` environment variables
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and centralized error reporting
//! - [`logger`] - Logging setup
//! - [`theme`] - Theme controller, presentation and preference storage
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod config;
pub mod error;
pub mod logger;
pub mod theme;

// Re-export commonly used types for easier access in tests
pub use error::AppError;

pub use engine::resolver::SessionContext;

// Re-export validation trait for broader use
pub use engine::validation::Validator;
