use super::provider::UserThemeProvider;
use super::response::ProviderResponse;
use super::strategy::{Latency, RollFn, random_roll};
use crate::common::ProviderError;
use crate::palette::{Rgb, ThemeSeeds};
use crate::theme::{Theme, ThemeCategory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Probability that a user without a saved preference gets a personal palette.
pub const DEFAULT_USER_THEME_CHANCE: f64 = 0.3;

struct PersonalPalette {
    slug: &'static str,
    name: &'static str,
    seeds: ThemeSeeds,
}

const PERSONAL_PALETTES: [PersonalPalette; 4] = [
    PersonalPalette {
        slug: "focus",
        name: "Personal Focus",
        seeds: ThemeSeeds::new(
            Rgb::from_u32(0x2563EB),
            Rgb::from_u32(0x64748B),
            Rgb::from_u32(0xF59E0B),
        ),
    },
    PersonalPalette {
        slug: "calm",
        name: "Personal Calm",
        seeds: ThemeSeeds::new(
            Rgb::from_u32(0x0D9488),
            Rgb::from_u32(0x7DD3FC),
            Rgb::from_u32(0xA78BFA),
        ),
    },
    PersonalPalette {
        slug: "energy",
        name: "Personal Energy",
        seeds: ThemeSeeds::new(
            Rgb::from_u32(0xE11D48),
            Rgb::from_u32(0xF97316),
            Rgb::from_u32(0xFACC15),
        ),
    },
    PersonalPalette {
        slug: "night-owl",
        name: "Personal Night Owl",
        seeds: ThemeSeeds::new(
            Rgb::from_u32(0x6366F1),
            Rgb::from_u32(0x1E293B),
            Rgb::from_u32(0x22D3EE),
        ),
    },
];

/// Personal palette index for a user: last char code mod 4.
pub fn personal_palette_index(user_id: &str) -> usize {
    user_id
        .chars()
        .last()
        .map(|c| c as usize % PERSONAL_PALETTES.len())
        .unwrap_or(0)
}

/// Simulated per-user preference service.
///
/// Saved preferences are returned deterministically. Users without one get a
/// personal palette only when the injected roll lands below `chance`.
pub struct SimulatedUserProvider {
    saved: RwLock<HashMap<String, Theme>>,
    latency: Latency,
    chance: f64,
    roll: RollFn,
    calls: AtomicUsize,
}

impl SimulatedUserProvider {
    pub fn new(latency: Latency) -> Self {
        Self::with_roll(latency, DEFAULT_USER_THEME_CHANCE, random_roll())
    }

    pub fn with_roll(latency: Latency, chance: f64, roll: RollFn) -> Self {
        Self {
            saved: RwLock::new(HashMap::new()),
            latency,
            chance: chance.clamp(0.0, 1.0),
            roll,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn personal_theme(user_id: &str) -> Theme {
        let palette = &PERSONAL_PALETTES[personal_palette_index(user_id)];
        Theme::from_seeds(
            format!("user-{user_id}-{}", palette.slug),
            palette.name,
            ThemeCategory::Personal,
            &palette.seeds,
            false,
        )
        .with_description(format!("Personal palette for {user_id}"))
    }
}

fn require_user_id(user_id: &str) -> Result<(), ProviderError> {
    if user_id.trim().is_empty() {
        return Err(ProviderError::InvalidInput {
            field: "user_id".to_string(),
            reason: "User id cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl UserThemeProvider for SimulatedUserProvider {
    async fn fetch_user_theme(&self, user_id: &str) -> ProviderResponse<Option<Theme>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.latency.wait().await;

        if let Err(e) = require_user_id(user_id) {
            return e.into();
        }

        if let Some(theme) = self.saved.read().await.get(user_id) {
            return ProviderResponse::success(Some(theme.clone()));
        }

        if (self.roll)() < self.chance {
            ProviderResponse::success(Some(Self::personal_theme(user_id)))
        } else {
            ProviderResponse::success(None)
        }
    }

    async fn save_user_preference(&self, user_id: &str, theme: Theme) -> ProviderResponse<()> {
        self.latency.wait().await;

        if let Err(e) = require_user_id(user_id) {
            return e.into();
        }

        log::info!("Saved theme preference {} for user {user_id}", theme.id);
        self.saved.write().await.insert(user_id.to_string(), theme);
        ProviderResponse::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::strategy::fixed_roll;

    fn provider(roll: f64) -> SimulatedUserProvider {
        SimulatedUserProvider::with_roll(Latency::none(), DEFAULT_USER_THEME_CHANCE, fixed_roll(roll))
    }

    #[tokio::test]
    async fn low_roll_yields_personal_palette() {
        let theme = provider(0.1)
            .fetch_user_theme("student-1")
            .await
            .into_result()
            .unwrap()
            .unwrap();
        // '1' is 49, 49 % 4 == 1
        assert_eq!(theme.name, "Personal Calm");
        assert_eq!(theme.id, "user-student-1-calm");
    }

    #[tokio::test]
    async fn high_roll_means_no_preference() {
        let response = provider(0.9).fetch_user_theme("student-1").await;
        assert!(response.is_success());
        assert_eq!(response.into_result(), Ok(None));
    }

    #[tokio::test]
    async fn empty_user_id_fails() {
        let response = provider(0.1).fetch_user_theme("").await;
        assert!(matches!(
            response.into_result(),
            Err(ProviderError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn saved_preference_wins_over_roll() {
        let provider = provider(0.9);
        let theme = SimulatedUserProvider::personal_theme("staff-7");
        assert!(
            provider
                .save_user_preference("staff-7", theme.clone())
                .await
                .is_success()
        );

        let fetched = provider.fetch_user_theme("staff-7").await.into_result();
        assert_eq!(fetched, Ok(Some(theme)));
    }
}
