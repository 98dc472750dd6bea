use crate::palette::{Palette, ThemeSeeds, generate_palette_pair};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broad grouping used by theme pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Educational,
    Professional,
    Accessibility,
    Seasonal,
    Brand,
    Modern,
    Organization,
    Personal,
    Dynamic,
    Custom,
    #[default]
    System,
}

/// An identified pair of palettes plus metadata.
///
/// Themes are immutable values; "updating" one produces a new `Theme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: ThemeCategory,
    pub light: Palette,
    pub dark: Palette,
    /// Seeds the palettes were generated from. Absent for themes received
    /// as finished palettes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeds: Option<ThemeSeeds>,
    #[serde(default)]
    pub high_contrast: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Theme {
    /// Build a theme whose light/dark pair is generated from `seeds`.
    pub fn from_seeds(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ThemeCategory,
        seeds: &ThemeSeeds,
        high_contrast: bool,
    ) -> Self {
        let (light, dark) = generate_palette_pair(seeds, high_contrast);
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category,
            light,
            dark,
            seeds: Some(*seeds),
            high_contrast,
            is_default: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(created_at);
        self
    }

    /// The palette for the requested mode.
    pub fn palette(&self, dark: bool) -> &Palette {
        if dark { &self.dark } else { &self.light }
    }

    /// Produce the updated value described by `update`.
    ///
    /// Palettes are regenerated when the seeds or the contrast flag change,
    /// keeping whichever of the two the update leaves unset. A contrast change
    /// on a theme without known seeds is ignored.
    pub fn updated(&self, update: &ThemeUpdate, now: DateTime<Utc>) -> Theme {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(description) = &update.description {
            next.description = Some(description.clone());
        }

        let high_contrast = update.high_contrast.unwrap_or(self.high_contrast);
        let regenerate = update.seeds.is_some() || high_contrast != self.high_contrast;
        if let (true, Some(seeds)) = (regenerate, update.seeds.or(self.seeds)) {
            let (light, dark) = generate_palette_pair(&seeds, high_contrast);
            next.light = light;
            next.dark = dark;
            next.seeds = Some(seeds);
            next.high_contrast = high_contrast;
        }
        if let Some(is_default) = update.is_default {
            next.is_default = is_default;
        }
        next.updated_at = Some(now);
        next
    }
}

/// Input for creating a custom theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTheme {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub seeds: ThemeSeeds,
    #[serde(default)]
    pub high_contrast: bool,
}

/// Partial update for an existing theme. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub seeds: Option<ThemeSeeds>,
    pub high_contrast: Option<bool>,
    pub is_default: Option<bool>,
}

impl ThemeUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ThemeUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgb;

    fn sample() -> Theme {
        Theme::from_seeds(
            "sample",
            "Sample",
            ThemeCategory::Custom,
            &ThemeSeeds::fallback(),
            false,
        )
    }

    #[test]
    fn palette_selects_mode() {
        let theme = sample();
        assert_eq!(theme.palette(false), &theme.light);
        assert_eq!(theme.palette(true), &theme.dark);
    }

    #[test]
    fn update_produces_new_value() {
        let theme = sample();
        let now = Utc::now();
        let update = ThemeUpdate {
            name: Some("Renamed".to_string()),
            seeds: Some(ThemeSeeds::new(
                Rgb::new(1, 2, 3),
                Rgb::new(4, 5, 6),
                Rgb::new(7, 8, 9),
            )),
            ..ThemeUpdate::default()
        };

        let next = theme.updated(&update, now);
        assert_eq!(theme.name, "Sample");
        assert_eq!(next.name, "Renamed");
        assert_eq!(next.id, theme.id);
        assert_eq!(next.light.primary, "#010203");
        assert_eq!(next.updated_at, Some(now));
    }

    #[test]
    fn seed_update_keeps_high_contrast() {
        let theme = Theme::from_seeds(
            "contrast",
            "Contrast",
            ThemeCategory::Accessibility,
            &ThemeSeeds::fallback(),
            true,
        );
        let update = ThemeUpdate {
            seeds: Some(ThemeSeeds::new(
                Rgb::new(1, 2, 3),
                Rgb::new(4, 5, 6),
                Rgb::new(7, 8, 9),
            )),
            ..ThemeUpdate::default()
        };

        let next = theme.updated(&update, Utc::now());
        assert!(next.high_contrast);
        assert_eq!(next.light.background, theme.light.background);
        assert_eq!(next.dark.background, theme.dark.background);
        assert_eq!(next.light.primary, "#010203");
    }

    #[test]
    fn contrast_update_regenerates_from_existing_seeds() {
        let theme = sample();
        let update = ThemeUpdate {
            high_contrast: Some(true),
            ..ThemeUpdate::default()
        };

        let next = theme.updated(&update, Utc::now());
        let (light, dark) = generate_palette_pair(&ThemeSeeds::fallback(), true);
        assert!(next.high_contrast);
        assert_eq!(next.seeds, theme.seeds);
        assert_eq!(next.light, light);
        assert_eq!(next.dark, dark);
        assert_ne!(next.light, theme.light);
    }

    #[test]
    fn contrast_update_without_seeds_keeps_palettes() {
        let mut theme = sample();
        theme.seeds = None;
        let update = ThemeUpdate {
            high_contrast: Some(true),
            ..ThemeUpdate::default()
        };

        let next = theme.updated(&update, Utc::now());
        assert!(!next.high_contrast);
        assert_eq!(next.light, theme.light);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample().with_default(true)).unwrap();

        assert_eq!(json["isDefault"], true);
        assert_eq!(json["category"], "custom");
        assert_eq!(json["light"]["primaryForeground"], "#FFFFFF");
        assert!(json["light"]["chart1"].is_string());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ThemeUpdate::default().is_empty());
        assert!(
            !ThemeUpdate {
                is_default: Some(true),
                ..ThemeUpdate::default()
            }
            .is_empty()
        );
    }
}
