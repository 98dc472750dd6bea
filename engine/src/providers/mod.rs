//! # Theme Providers
//!
//! Named sources a theme can come from. Every provider answers with a
//! [`ProviderResponse`] and never panics across its boundary.
//!
//! | Provider | Trait | Notes |
//! |----------|-------|-------|
//! | [`PredefinedThemes`] | - | Hardcoded, synchronous, always succeeds |
//! | [`SimulatedCatalog`] | [`ThemeCatalogProvider`] | Mutable catalog with admin operations |
//! | [`SimulatedOrganizationProvider`] | [`OrganizationThemeProvider`] | Hash-bucketed org palettes |
//! | [`SimulatedUserProvider`] | [`UserThemeProvider`] | Saved or probabilistic personal palette |
//! | [`TimeOfDayProvider`] | [`DynamicThemeProvider`] | Palette derived from the local hour |

pub mod catalog;
pub mod dynamic;
pub mod organization;
pub mod predefined;
pub mod provider;
pub mod response;
pub mod strategy;
pub mod user;

pub use catalog::SimulatedCatalog;
pub use dynamic::{DayPeriod, TimeOfDayProvider};
pub use organization::{
    OrganizationPalette, SimulatedOrganizationProvider, default_organization_palettes,
    organization_hash, organization_palette_index,
};
pub use predefined::PredefinedThemes;
pub use provider::{
    DynamicThemeProvider, OrganizationThemeProvider, ThemeCatalogProvider, UserThemeProvider,
};
pub use response::{ProviderResponse, RESPONSE_VERSION, ResponseMeta};
pub use strategy::{Clock, FixedClock, Latency, RollFn, SystemClock, fixed_roll, random_roll};
pub use user::{DEFAULT_USER_THEME_CHANCE, SimulatedUserProvider, personal_palette_index};
