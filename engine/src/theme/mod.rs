//! Theme values, the built-in catalog, and theme-level validation.

pub mod catalog;
pub mod types;
pub mod validation;

pub use catalog::{DEFAULT_THEME_ID, catalog_themes, is_builtin, predefined_themes};
pub use types::{NewTheme, Theme, ThemeCategory, ThemeUpdate};
pub use validation::{ActivePaletteValidator, ThemeValidator};
