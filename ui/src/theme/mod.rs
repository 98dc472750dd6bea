//! # Theme Application
//!
//! Client-side half of the theming system. The [`ThemeController`] owns the
//! active theme and the dark-mode flag, resolves the startup theme through the
//! engine's [`ThemeResolver`](engine::resolver::ThemeResolver), and writes the
//! active palette to a [`PresentationAdapter`].
//!
//! ## Components
//!
//! - **[`ThemeController`]** - lifecycle, theme switching, admin operations
//! - **[`PresentationAdapter`]** - where palette roles end up; [`CssVariableStore`]
//!   keeps them in memory and renders a `:root` block
//! - **[`PreferenceStore`]** - persisted dark-mode choice ([`MemoryPreferenceStore`],
//!   [`FilePreferenceStore`])
//! - **[`EnvironmentSignal`]** - the host's preferred color scheme, followed
//!   until the user makes an explicit choice
//! - **Validators** - admin input checks for names and seed colors
//!
//! ## Basic Usage
//!
//! ```no_run
//! use engine::providers::Latency;
//! use engine::resolver::{ResolverConfig, ResolverProviders, SessionContext, ThemeResolver};
//! use schoolhub::theme::ThemeController;
//! use std::sync::Arc;
//!
//! # async fn run() -> schoolhub::error::AppResult<()> {
//! let resolver = Arc::new(ThemeResolver::new(
//!     ResolverProviders::simulated(Latency::default(), 0.3),
//!     ResolverConfig::default(),
//! ));
//! let controller = ThemeController::builder(resolver)
//!     .session(SessionContext {
//!         user_id: Some("student-1".to_string()),
//!         org_id: Some("default-org".to_string()),
//!         is_admin: false,
//!     })
//!     .build();
//!
//! controller.init().await?;
//! controller.apply_theme("modern-lavender-mint").await;
//! controller.toggle_dark_mode().await?;
//! controller.dispose();
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Handling
//!
//! - **Startup** - `init` always ends with a theme; failed sources are recorded
//!   in [`ThemeController::error`]
//! - **Switching** - a theme that cannot be fetched or fails palette validation
//!   is not applied and the previous theme stays active
//! - **Overlapping requests** - the most recently issued apply wins

pub mod environment;
pub mod manager;
pub mod preference;
pub mod presentation;
pub mod state;
pub mod validation;

pub use environment::EnvironmentSignal;
pub use manager::{ThemeController, ThemeControllerBuilder};
pub use preference::{DARK_MODE_KEY, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use presentation::{CssVariableStore, PresentationAdapter, apply_palette};
pub use state::{ThemePhase, ThemeState};
pub use validation::{
    NewThemeValidator, SeedColorValidator, ThemeNameValidator, ThemeUpdateValidator,
    ThemeValidationError, new_theme_from_hex,
};
