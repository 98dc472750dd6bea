//! # Theme Source Resolver
//!
//! Walks the theme sources in a fixed precedence order and always ends with a
//! usable theme:
//!
//! 1. the user's theme, when the session names a user and one exists
//! 2. the organization theme, when the session names an organization
//! 3. the configured default, else the first `is_default`, else the first
//!    available theme (predefined themes when the catalog is down)
//! 4. the hardcoded emergency theme
//!
//! Lookups are cached in a [`ThemeCache`] and run under a timeout. Failures are
//! collected into the [`Resolution`] rather than returned.

use crate::cache::{DEFAULT_CACHE_TTL, ThemeCache};
use crate::common::ThemeError;
use crate::palette::ThemeSeeds;
use crate::providers::{
    DynamicThemeProvider, Latency, OrganizationThemeProvider, PredefinedThemes, ProviderResponse,
    RollFn, SimulatedCatalog, SimulatedOrganizationProvider, SimulatedUserProvider,
    ThemeCatalogProvider, TimeOfDayProvider, UserThemeProvider, random_roll,
};
use crate::theme::{NewTheme, Theme, ThemeCategory, ThemeUpdate};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub const EMERGENCY_THEME_ID: &str = "emergency-fallback";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

const ORGANIZATION_THEME_PREFIX: &str = "org-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Preferred default theme id. Falls back to the `is_default` flag when unset
    /// or unknown.
    pub default_theme_id: Option<String>,
    pub lookup_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_theme_id: None,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Who is asking for a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: Option<String>,
    pub org_id: Option<String>,
    pub is_admin: bool,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        non_blank(self.user_id.as_deref())
    }

    pub fn organization(&self) -> Option<&str> {
        non_blank(self.org_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Which precedence step produced the resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSource {
    User,
    Organization,
    Default,
    Emergency,
}

/// Outcome of [`ThemeResolver::resolve_initial`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub theme: Theme,
    pub source: ThemeSource,
    /// Failures met on the way, in precedence order.
    pub errors: Vec<ThemeError>,
}

impl Resolution {
    pub fn is_emergency(&self) -> bool {
        self.source == ThemeSource::Emergency
    }
}

/// The set of providers a resolver queries.
#[derive(Clone)]
pub struct ResolverProviders {
    pub predefined: PredefinedThemes,
    pub catalog: Arc<dyn ThemeCatalogProvider>,
    pub organization: Arc<dyn OrganizationThemeProvider>,
    pub user: Arc<dyn UserThemeProvider>,
    pub dynamic: Arc<dyn DynamicThemeProvider>,
}

impl ResolverProviders {
    /// In-memory providers with the given latency and user-theme chance.
    pub fn simulated(latency: Latency, user_theme_chance: f64) -> Self {
        Self::simulated_with_roll(latency, user_theme_chance, random_roll())
    }

    pub fn simulated_with_roll(latency: Latency, user_theme_chance: f64, roll: RollFn) -> Self {
        Self {
            predefined: PredefinedThemes::new(),
            catalog: Arc::new(SimulatedCatalog::new(latency)),
            organization: Arc::new(SimulatedOrganizationProvider::new(latency)),
            user: Arc::new(SimulatedUserProvider::with_roll(
                latency,
                user_theme_chance,
                roll,
            )),
            dynamic: Arc::new(TimeOfDayProvider::new(latency)),
        }
    }
}

/// Merge the predefined list with a catalog result.
///
/// Predefined themes come first. A catalog theme with an id already present
/// replaces that entry in place; the rest are appended in catalog order. When
/// the catalog flags a default, the predefined flag is cleared so the registry
/// keeps a single default.
pub fn merge_registry(predefined: &[Theme], catalog: Vec<Theme>) -> Vec<Theme> {
    let catalog_default = catalog.iter().any(|theme| theme.is_default);
    let mut merged: Vec<Theme> = predefined
        .iter()
        .cloned()
        .map(|theme| {
            let is_default = theme.is_default && !catalog_default;
            theme.with_default(is_default)
        })
        .collect();
    for theme in catalog {
        match merged.iter().position(|existing| existing.id == theme.id) {
            Some(index) => merged[index] = theme,
            None => merged.push(theme),
        }
    }
    merged
}

/// Pick the default theme from a registry.
pub fn select_default<'a>(themes: &'a [Theme], preferred_id: Option<&str>) -> Option<&'a Theme> {
    if let Some(id) = preferred_id {
        match themes.iter().find(|theme| theme.id == id) {
            Some(theme) => return Some(theme),
            None => log::warn!("Configured default theme '{id}' is not available"),
        }
    }

    themes
        .iter()
        .find(|theme| theme.is_default)
        .or_else(|| themes.first())
}

pub struct ThemeResolver {
    providers: ResolverProviders,
    cache: ThemeCache,
    config: ResolverConfig,
}

impl ThemeResolver {
    pub fn new(providers: ResolverProviders, config: ResolverConfig) -> Self {
        Self {
            cache: ThemeCache::new(config.cache_ttl),
            providers,
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &ThemeCache {
        &self.cache
    }

    pub fn predefined(&self) -> &PredefinedThemes {
        &self.providers.predefined
    }

    async fn timed<T, F>(&self, operation: &str, future: F) -> Result<ProviderResponse<T>, ThemeError>
    where
        F: Future<Output = ProviderResponse<T>>,
    {
        tokio::time::timeout(self.config.lookup_timeout, future)
            .await
            .map_err(|_| ThemeError::Timeout {
                operation: operation.to_string(),
                seconds: self.config.lookup_timeout.as_secs(),
            })
    }

    /// The merged predefined + catalog registry. Cached.
    pub async fn fetch_available_themes(&self) -> Result<Vec<Theme>, ThemeError> {
        if let Some(themes) = self.cache.available.get(&()).await {
            log::debug!("Available themes served from cache");
            return Ok(themes);
        }

        let response = self
            .timed("available themes lookup", self.providers.catalog.fetch_themes())
            .await?;
        let catalog = response
            .into_result()
            .map_err(|e| ThemeError::provider("catalog", e))?;

        let themes = merge_registry(self.providers.predefined.themes(), catalog);
        self.cache.available.insert((), themes.clone()).await;
        Ok(themes)
    }

    /// A single theme by id: catalog first, then the predefined list. Cached.
    pub async fn fetch_theme(&self, id: &str) -> Result<Theme, ThemeError> {
        let key = id.to_string();
        if let Some(theme) = self.cache.by_id.get(&key).await {
            log::debug!("Theme {id} served from cache");
            return Ok(theme);
        }

        let catalog_result = match self
            .timed("theme lookup", self.providers.catalog.fetch_theme(id))
            .await
        {
            Ok(response) => response
                .into_result()
                .map_err(|e| ThemeError::provider("catalog", e)),
            Err(timeout) => Err(timeout),
        };

        let theme = match catalog_result {
            Ok(theme) => theme,
            Err(error) => match self.providers.predefined.find(id) {
                Some(theme) => theme.clone(),
                None => return Err(error),
            },
        };

        self.cache.by_id.insert(key, theme.clone()).await;
        Ok(theme)
    }

    /// Organization theme plus any fallback attached to a failed response.
    async fn lookup_organization(&self, org_id: &str) -> (Result<Theme, ThemeError>, Option<Theme>) {
        let key = org_id.to_string();
        if let Some(theme) = self.cache.organization.get(&key).await {
            log::debug!("Organization theme for {org_id} served from cache");
            return (Ok(theme), None);
        }

        let response = match self
            .timed(
                "organization theme lookup",
                self.providers.organization.fetch_organization_theme(org_id),
            )
            .await
        {
            Ok(response) => response,
            Err(timeout) => return (Err(timeout), None),
        };

        let fallback = response.fallback().cloned();
        match response.into_result() {
            Ok(theme) => {
                self.cache.organization.insert(key, theme.clone()).await;
                (Ok(theme), None)
            }
            Err(e) => (Err(ThemeError::provider("organization", e)), fallback),
        }
    }

    pub async fn fetch_organization_theme(&self, org_id: &str) -> Result<Theme, ThemeError> {
        self.lookup_organization(org_id).await.0
    }

    /// The user's theme, `None` when they have no preference.
    ///
    /// Only `Some` results are cached, so a user without a preference is asked
    /// again on the next lookup.
    pub async fn fetch_user_theme(&self, user_id: &str) -> Result<Option<Theme>, ThemeError> {
        let key = user_id.to_string();
        if let Some(theme) = self.cache.user.get(&key).await {
            log::debug!("User theme for {user_id} served from cache");
            return Ok(Some(theme));
        }

        let theme = self
            .timed(
                "user theme lookup",
                self.providers.user.fetch_user_theme(user_id),
            )
            .await?
            .into_result()
            .map_err(|e| ThemeError::provider("user", e))?;

        if let Some(theme) = &theme {
            self.cache.user.insert(key, theme.clone()).await;
        }
        Ok(theme)
    }

    /// A freshly generated time-of-day theme. Never cached.
    pub async fn fetch_dynamic_theme(&self, seed: Option<u64>) -> Result<Theme, ThemeError> {
        self.timed(
            "dynamic theme lookup",
            self.providers.dynamic.fetch_dynamic_theme(seed),
        )
        .await?
        .into_result()
        .map_err(|e| ThemeError::provider("dynamic", e))
    }

    /// Resolve the theme to show at startup. Never fails.
    pub async fn resolve_initial(&self, session: &SessionContext) -> Resolution {
        let mut errors = Vec::new();
        let mut fallback = None;

        if let Some(user_id) = session.user() {
            match self.fetch_user_theme(user_id).await {
                Ok(Some(theme)) => {
                    log::info!("Resolved user theme {} for {user_id}", theme.id);
                    return Resolution {
                        theme,
                        source: ThemeSource::User,
                        errors,
                    };
                }
                Ok(None) => log::debug!("User {user_id} has no theme preference"),
                Err(e) => {
                    log::warn!("User theme lookup failed, trying next source: {e}");
                    errors.push(e);
                }
            }
        }

        if let Some(org_id) = session.organization() {
            let (result, org_fallback) = self.lookup_organization(org_id).await;
            match result {
                Ok(theme) => {
                    log::info!("Resolved organization theme {} for {org_id}", theme.id);
                    return Resolution {
                        theme,
                        source: ThemeSource::Organization,
                        errors,
                    };
                }
                Err(e) => {
                    log::warn!("Organization theme lookup failed, trying next source: {e}");
                    errors.push(e);
                    fallback = org_fallback;
                }
            }
        }

        let available = match self.fetch_available_themes().await {
            Ok(themes) => themes,
            Err(e) => {
                log::warn!("Theme catalog unavailable, using predefined themes: {e}");
                errors.push(e);
                self.providers.predefined.themes().to_vec()
            }
        };

        if let Some(theme) = select_default(&available, self.config.default_theme_id.as_deref()) {
            return Resolution {
                theme: theme.clone(),
                source: ThemeSource::Default,
                errors,
            };
        }

        log::error!("Every theme source failed, using emergency theme");
        errors.push(ThemeError::Emergency);
        Resolution {
            theme: fallback.unwrap_or_else(emergency_theme),
            source: ThemeSource::Emergency,
            errors,
        }
    }

    pub async fn save_user_preference(&self, user_id: &str, theme: Theme) -> Result<(), ThemeError> {
        let result = self
            .timed(
                "user preference save",
                self.providers.user.save_user_preference(user_id, theme),
            )
            .await?
            .into_result()
            .map_err(|e| ThemeError::provider("user", e));

        self.cache.user.invalidate(&user_id.to_string()).await;
        result
    }

    async fn invalidate_theme(&self, id: &str) {
        self.cache.available.invalidate(&()).await;
        self.cache.by_id.invalidate(&id.to_string()).await;
        if let Some(org_id) = id.strip_prefix(ORGANIZATION_THEME_PREFIX) {
            self.cache.organization.invalidate(&org_id.to_string()).await;
        }
    }

    pub async fn create_theme(&self, theme: NewTheme) -> Result<Theme, ThemeError> {
        let created = self
            .timed("theme create", self.providers.catalog.create_theme(theme))
            .await?
            .into_result()
            .map_err(|e| ThemeError::provider("catalog", e))?;

        self.invalidate_theme(&created.id).await;
        Ok(created)
    }

    pub async fn update_theme(&self, id: &str, update: ThemeUpdate) -> Result<Theme, ThemeError> {
        let updated = self
            .timed(
                "theme update",
                self.providers.catalog.update_theme(id, update),
            )
            .await?
            .into_result()
            .map_err(|e| ThemeError::provider("catalog", e))?;

        self.invalidate_theme(id).await;
        Ok(updated)
    }

    pub async fn delete_theme(&self, id: &str) -> Result<(), ThemeError> {
        self.timed("theme delete", self.providers.catalog.delete_theme(id))
            .await?
            .into_result()
            .map_err(|e| ThemeError::provider("catalog", e))?;

        self.invalidate_theme(id).await;
        Ok(())
    }

    /// Drop the cached available-themes list.
    pub async fn invalidate_available(&self) {
        self.cache.available.invalidate(&()).await;
    }

    pub async fn invalidate_all(&self) {
        self.cache.clear().await;
    }

    pub fn emergency_theme(&self) -> Theme {
        emergency_theme()
    }
}

/// The last-resort theme, built from the safe default seeds.
pub fn emergency_theme() -> Theme {
    Theme::from_seeds(
        EMERGENCY_THEME_ID,
        "Emergency Fallback",
        ThemeCategory::System,
        &ThemeSeeds::fallback(),
        false,
    )
}
