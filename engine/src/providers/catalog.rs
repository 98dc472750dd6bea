use super::provider::ThemeCatalogProvider;
use super::response::ProviderResponse;
use super::strategy::Latency;
use crate::common::ProviderError;
use crate::theme::{NewTheme, Theme, ThemeCategory, ThemeUpdate, catalog_themes, is_builtin};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory stand-in for the remote theme catalog.
///
/// Starts from the 30 built-in catalog themes and supports the admin
/// create/update/delete surface. Every call waits the configured latency.
pub struct SimulatedCatalog {
    themes: RwLock<Vec<Theme>>,
    latency: Latency,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

impl SimulatedCatalog {
    pub fn new(latency: Latency) -> Self {
        Self::with_themes(catalog_themes(), latency)
    }

    pub fn with_themes(themes: Vec<Theme>, latency: Latency) -> Self {
        Self {
            themes: RwLock::new(themes),
            latency,
            fail_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Make the next call fail with [`ProviderError::Unavailable`].
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of calls that reached the simulated backend.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin(&self, operation: &str) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.latency.wait().await;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            log::warn!("Simulated catalog failure during {operation}");
            return Err(ProviderError::Unavailable {
                reason: format!("catalog unavailable during {operation}"),
            });
        }
        Ok(())
    }
}

fn require_id(id: &str) -> Result<(), ProviderError> {
    if id.trim().is_empty() {
        return Err(ProviderError::InvalidInput {
            field: "id".to_string(),
            reason: "Theme id cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ThemeCatalogProvider for SimulatedCatalog {
    async fn fetch_themes(&self) -> ProviderResponse<Vec<Theme>> {
        if let Err(e) = self.begin("fetch_themes").await {
            return e.into();
        }
        ProviderResponse::success(self.themes.read().await.clone())
    }

    async fn fetch_theme(&self, id: &str) -> ProviderResponse<Theme> {
        if let Err(e) = require_id(id) {
            return e.into();
        }
        if let Err(e) = self.begin("fetch_theme").await {
            return e.into();
        }

        let themes = self.themes.read().await;
        match themes.iter().find(|theme| theme.id == id) {
            Some(theme) => ProviderResponse::success(theme.clone()),
            None => ProviderError::NotFound { id: id.to_string() }.into(),
        }
    }

    async fn create_theme(&self, theme: NewTheme) -> ProviderResponse<Theme> {
        if theme.name.trim().is_empty() {
            return ProviderError::InvalidInput {
                field: "name".to_string(),
                reason: "Theme name cannot be empty".to_string(),
            }
            .into();
        }
        if let Err(e) = self.begin("create_theme").await {
            return e.into();
        }

        let id = format!("custom-{}", Uuid::new_v4());
        let mut created = Theme::from_seeds(
            id,
            theme.name,
            ThemeCategory::Custom,
            &theme.seeds,
            theme.high_contrast,
        )
        .with_timestamps(Utc::now());
        created.description = theme.description;

        log::info!("Created custom theme {}", created.id);
        self.themes.write().await.push(created.clone());
        ProviderResponse::success(created)
    }

    async fn update_theme(&self, id: &str, update: ThemeUpdate) -> ProviderResponse<Theme> {
        if let Err(e) = require_id(id) {
            return e.into();
        }
        if update.is_empty() {
            return ProviderError::InvalidInput {
                field: "update".to_string(),
                reason: "Update contains no changes".to_string(),
            }
            .into();
        }
        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return ProviderError::InvalidInput {
                field: "name".to_string(),
                reason: "Theme name cannot be empty".to_string(),
            }
            .into();
        }
        if let Err(e) = self.begin("update_theme").await {
            return e.into();
        }

        let mut themes = self.themes.write().await;
        let Some(index) = themes.iter().position(|theme| theme.id == id) else {
            return ProviderError::NotFound { id: id.to_string() }.into();
        };

        let updated = themes[index].updated(&update, Utc::now());
        if updated.is_default {
            for other in themes.iter_mut() {
                other.is_default = false;
            }
        }
        themes[index] = updated.clone();

        log::info!("Updated theme {id}");
        ProviderResponse::success(updated)
    }

    async fn delete_theme(&self, id: &str) -> ProviderResponse<()> {
        if let Err(e) = require_id(id) {
            return e.into();
        }
        if is_builtin(id) {
            return ProviderError::Conflict {
                reason: format!("Built-in theme '{id}' cannot be deleted"),
            }
            .into();
        }
        if let Err(e) = self.begin("delete_theme").await {
            return e.into();
        }

        let mut themes = self.themes.write().await;
        let before = themes.len();
        themes.retain(|theme| theme.id != id);
        if themes.len() == before {
            return ProviderError::NotFound { id: id.to_string() }.into();
        }

        log::info!("Deleted theme {id}");
        ProviderResponse::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ThemeSeeds;

    fn catalog() -> SimulatedCatalog {
        SimulatedCatalog::new(Latency::none())
    }

    fn new_theme(name: &str) -> NewTheme {
        NewTheme {
            name: name.to_string(),
            description: Some("Made in a test".to_string()),
            seeds: ThemeSeeds::fallback(),
            high_contrast: false,
        }
    }

    #[tokio::test]
    async fn serves_thirty_themes() {
        let themes = catalog().fetch_themes().await.into_result().unwrap();
        assert_eq!(themes.len(), 30);
        assert!(themes.iter().any(|t| t.id == "modern-lavender-mint"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let response = catalog().fetch_theme("nonexistent-id").await;
        assert_eq!(
            response.into_result(),
            Err(ProviderError::NotFound {
                id: "nonexistent-id".to_string()
            })
        );
    }

    #[tokio::test]
    async fn create_update_delete_lifecycle() {
        let catalog = catalog();

        let created = catalog
            .create_theme(new_theme("Staff Room"))
            .await
            .into_result()
            .unwrap();
        assert!(created.id.starts_with("custom-"));
        assert_eq!(created.category, ThemeCategory::Custom);
        assert!(created.created_at.is_some());

        let update = ThemeUpdate {
            name: Some("Staff Lounge".to_string()),
            ..ThemeUpdate::default()
        };
        let updated = catalog
            .update_theme(&created.id, update)
            .await
            .into_result()
            .unwrap();
        assert_eq!(updated.name, "Staff Lounge");
        assert_eq!(
            catalog.fetch_theme(&created.id).await.into_result().unwrap().name,
            "Staff Lounge"
        );

        assert!(catalog.delete_theme(&created.id).await.is_success());
        assert!(!catalog.fetch_theme(&created.id).await.is_success());
    }

    #[tokio::test]
    async fn seed_update_keeps_high_contrast_palettes() {
        let catalog = catalog();
        let update = ThemeUpdate {
            seeds: Some(ThemeSeeds::fallback()),
            ..ThemeUpdate::default()
        };

        let updated = catalog
            .update_theme("high-contrast-classic", update)
            .await
            .into_result()
            .unwrap();
        assert!(updated.high_contrast);
        assert_eq!(updated.light.background, "#FFFFFF");
        assert_eq!(updated.dark.background, "#000000");
        assert_eq!(updated.seeds, Some(ThemeSeeds::fallback()));
    }

    #[tokio::test]
    async fn contrast_only_update_regenerates_palettes() {
        let catalog = catalog();
        let update = ThemeUpdate {
            high_contrast: Some(true),
            ..ThemeUpdate::default()
        };

        let updated = catalog
            .update_theme("modern-lavender-mint", update)
            .await
            .into_result()
            .unwrap();
        assert!(updated.high_contrast);
        assert_eq!(updated.light.background, "#FFFFFF");
        assert_eq!(updated.light.border, "#000000");
    }

    #[tokio::test]
    async fn builtin_themes_cannot_be_deleted() {
        let response = catalog().delete_theme("modern-lavender-mint").await;
        assert!(matches!(
            response.into_result(),
            Err(ProviderError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let response = catalog().create_theme(new_theme("  ")).await;
        assert!(matches!(
            response.into_result(),
            Err(ProviderError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn fail_next_affects_exactly_one_call() {
        let catalog = catalog();
        catalog.fail_next();

        assert!(!catalog.fetch_themes().await.is_success());
        assert!(catalog.fetch_themes().await.is_success());
        assert_eq!(catalog.call_count(), 2);
    }
}
