use super::response::ProviderResponse;
use crate::theme::{NewTheme, Theme, ThemeUpdate};
use async_trait::async_trait;

/// Source of the full theme catalog, including the admin mutation surface.
///
/// # Examples
///
/// ```no_run
/// use engine::providers::{ProviderResponse, ThemeCatalogProvider};
/// use engine::theme::{NewTheme, Theme, ThemeUpdate};
/// use engine::common::ProviderError;
/// use async_trait::async_trait;
///
/// struct ReadOnlyCatalog(Vec<Theme>);
///
/// #[async_trait]
/// impl ThemeCatalogProvider for ReadOnlyCatalog {
///     async fn fetch_themes(&self) -> ProviderResponse<Vec<Theme>> {
///         ProviderResponse::success(self.0.clone())
///     }
///
///     async fn fetch_theme(&self, id: &str) -> ProviderResponse<Theme> {
///         match self.0.iter().find(|t| t.id == id) {
///             Some(theme) => ProviderResponse::success(theme.clone()),
///             None => ProviderError::NotFound { id: id.to_string() }.into(),
///         }
///     }
///
///     async fn create_theme(&self, _theme: NewTheme) -> ProviderResponse<Theme> {
///         ProviderError::Conflict { reason: "read-only".into() }.into()
///     }
///
///     async fn update_theme(&self, _id: &str, _update: ThemeUpdate) -> ProviderResponse<Theme> {
///         ProviderError::Conflict { reason: "read-only".into() }.into()
///     }
///
///     async fn delete_theme(&self, _id: &str) -> ProviderResponse<()> {
///         ProviderError::Conflict { reason: "read-only".into() }.into()
///     }
/// }
/// ```
#[async_trait]
pub trait ThemeCatalogProvider: Send + Sync {
    async fn fetch_themes(&self) -> ProviderResponse<Vec<Theme>>;

    /// Look up a single theme.
    ///
    /// Unknown ids fail with [`ProviderError::NotFound`](crate::common::ProviderError::NotFound).
    async fn fetch_theme(&self, id: &str) -> ProviderResponse<Theme>;

    async fn create_theme(&self, theme: NewTheme) -> ProviderResponse<Theme>;

    async fn update_theme(&self, id: &str, update: ThemeUpdate) -> ProviderResponse<Theme>;

    async fn delete_theme(&self, id: &str) -> ProviderResponse<()>;
}

/// Organization-wide default theme lookup.
#[async_trait]
pub trait OrganizationThemeProvider: Send + Sync {
    async fn fetch_organization_theme(&self, org_id: &str) -> ProviderResponse<Theme>;
}

/// Per-user theme preference lookup.
#[async_trait]
pub trait UserThemeProvider: Send + Sync {
    /// `Success { data: None }` means the user has no preference. It is not a
    /// failure.
    async fn fetch_user_theme(&self, user_id: &str) -> ProviderResponse<Option<Theme>>;

    async fn save_user_preference(&self, user_id: &str, theme: Theme) -> ProviderResponse<()>;
}

/// Generated theme that varies with the time of day.
#[async_trait]
pub trait DynamicThemeProvider: Send + Sync {
    async fn fetch_dynamic_theme(&self, seed: Option<u64>) -> ProviderResponse<Theme>;
}
