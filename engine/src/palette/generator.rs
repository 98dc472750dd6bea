use super::color::{BLACK, Rgb, WHITE};
use super::types::{Palette, PaletteMode};
use crate::common::ColorError;
use serde::{Deserialize, Serialize};

/// Safe default seeds used whenever generation input is missing or malformed.
pub mod fallback_seeds {
    pub const PRIMARY: &str = "#7C3AED";
    pub const SECONDARY: &str = "#0EA5E9";
    pub const ACCENT: &str = "#FB7185";
}

// Fixed structural colors shared by every generated palette
mod structural {
    use super::Rgb;

    pub const LIGHT_BACKGROUND: Rgb = Rgb::new(0xFA, 0xFA, 0xFA);
    pub const LIGHT_FOREGROUND: Rgb = Rgb::new(0x0A, 0x0A, 0x0A);
    pub const DARK_BACKGROUND: Rgb = Rgb::new(0x0A, 0x0A, 0x0A);
    pub const DARK_FOREGROUND: Rgb = Rgb::new(0xFA, 0xFA, 0xFA);

    pub const LIGHT_MUTED: Rgb = Rgb::new(0xF4, 0xF4, 0xF5);
    pub const LIGHT_MUTED_FOREGROUND: Rgb = Rgb::new(0x71, 0x71, 0x7A);
    pub const DARK_MUTED: Rgb = Rgb::new(0x27, 0x27, 0x2A);
    pub const DARK_MUTED_FOREGROUND: Rgb = Rgb::new(0xA1, 0xA1, 0xAA);

    pub const LIGHT_BORDER: Rgb = Rgb::new(0xE4, 0xE4, 0xE7);
    pub const DARK_BORDER: Rgb = Rgb::new(0x27, 0x27, 0x2A);

    pub const LIGHT_DESTRUCTIVE: Rgb = Rgb::new(0xEF, 0x44, 0x44);
    pub const DARK_DESTRUCTIVE: Rgb = Rgb::new(0xDC, 0x26, 0x26);
}

/// The three seed colors every theme is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeSeeds {
    #[serde(with = "hex_rgb")]
    pub primary: Rgb,
    #[serde(with = "hex_rgb")]
    pub secondary: Rgb,
    #[serde(with = "hex_rgb")]
    pub accent: Rgb,
}

impl ThemeSeeds {
    pub const fn new(primary: Rgb, secondary: Rgb, accent: Rgb) -> Self {
        Self {
            primary,
            secondary,
            accent,
        }
    }

    /// Strictly parse three hex seeds.
    pub fn parse(primary: &str, secondary: &str, accent: &str) -> Result<Self, ColorError> {
        Ok(Self::new(
            Rgb::parse_hex(primary)?,
            Rgb::parse_hex(secondary)?,
            Rgb::parse_hex(accent)?,
        ))
    }

    pub fn fallback() -> Self {
        Self::new(
            Rgb::new(0x7C, 0x3A, 0xED),
            Rgb::new(0x0E, 0xA5, 0xE9),
            Rgb::new(0xFB, 0x71, 0x85),
        )
    }
}

impl Default for ThemeSeeds {
    fn default() -> Self {
        Self::fallback()
    }
}

mod hex_rgb {
    use super::Rgb;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Derive every palette role from three seeds.
///
/// Pure and deterministic: equal inputs always produce identical palettes.
pub fn generate_palette(seeds: &ThemeSeeds, mode: PaletteMode) -> Palette {
    use structural::*;

    let ThemeSeeds {
        primary,
        secondary,
        accent,
    } = *seeds;
    let dark = mode.is_dark();
    let high_contrast = mode.is_high_contrast();

    let (background, foreground, border) = match mode {
        PaletteMode::Light => (LIGHT_BACKGROUND, LIGHT_FOREGROUND, LIGHT_BORDER),
        PaletteMode::Dark => (DARK_BACKGROUND, DARK_FOREGROUND, DARK_BORDER),
        PaletteMode::HighContrastLight => (WHITE, BLACK, BLACK),
        PaletteMode::HighContrastDark => (BLACK, WHITE, WHITE),
    };

    let (card, muted, muted_foreground) = match mode {
        PaletteMode::Light => (WHITE, LIGHT_MUTED, LIGHT_MUTED_FOREGROUND),
        PaletteMode::Dark => (
            background.lighten(0.04),
            DARK_MUTED,
            DARK_MUTED_FOREGROUND,
        ),
        PaletteMode::HighContrastLight | PaletteMode::HighContrastDark => {
            (background, background.mix(foreground, 0.1), foreground)
        }
    };

    let destructive = if dark { DARK_DESTRUCTIVE } else { LIGHT_DESTRUCTIVE };
    let input = if dark && !high_contrast {
        background.lighten(0.12)
    } else {
        border
    };
    let sidebar = if high_contrast {
        background
    } else {
        background.mix(primary, 0.04)
    };
    let sidebar_accent = if high_contrast {
        accent
    } else {
        background.mix(accent, if dark { 0.2 } else { 0.12 })
    };

    Palette {
        background: background.to_hex(),
        foreground: foreground.to_hex(),
        card: card.to_hex(),
        card_foreground: foreground.to_hex(),
        popover: background.to_hex(),
        popover_foreground: foreground.to_hex(),
        primary: primary.to_hex(),
        primary_foreground: WHITE.to_hex(),
        secondary: secondary.to_hex(),
        secondary_foreground: WHITE.to_hex(),
        accent: accent.to_hex(),
        accent_foreground: WHITE.to_hex(),
        muted: muted.to_hex(),
        muted_foreground: muted_foreground.to_hex(),
        destructive: destructive.to_hex(),
        destructive_foreground: WHITE.to_hex(),
        border: border.to_hex(),
        input: input.to_hex(),
        ring: primary.to_hex(),
        chart_1: primary.to_hex(),
        chart_2: secondary.to_hex(),
        chart_3: accent.to_hex(),
        chart_4: primary.mix(secondary, 0.5).to_hex(),
        chart_5: secondary.mix(accent, 0.5).to_hex(),
        sidebar: sidebar.to_hex(),
        sidebar_foreground: foreground.to_hex(),
        sidebar_primary: primary.to_hex(),
        sidebar_accent: sidebar_accent.to_hex(),
        sidebar_border: border.to_hex(),
    }
}

/// Build the `(light, dark)` pair for a theme. Pairs are never generated independently.
pub fn generate_palette_pair(seeds: &ThemeSeeds, high_contrast: bool) -> (Palette, Palette) {
    let base = if high_contrast {
        PaletteMode::HighContrastLight
    } else {
        PaletteMode::Light
    };
    (
        generate_palette(seeds, base.with_dark(false)),
        generate_palette(seeds, base.with_dark(true)),
    )
}

/// Lenient, string-based entry point.
///
/// Never fails: a missing or malformed seed, or a blank mode string, yields the
/// light palette built from [`fallback_seeds`]. Palette generation must never
/// block rendering.
pub fn generate_palette_from_strs(
    primary: &str,
    secondary: &str,
    accent: &str,
    mode: &str,
) -> Palette {
    let Some(mode) = PaletteMode::from_mode_str(mode) else {
        log::warn!("Palette requested without a mode, using fallback palette");
        return generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light);
    };

    match ThemeSeeds::parse(primary, secondary, accent) {
        Ok(seeds) => generate_palette(&seeds, mode),
        Err(e) => {
            log::warn!(
                "Invalid palette seeds ({primary:?}, {secondary:?}, {accent:?}): {e}; using fallback palette"
            );
            generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::types::PaletteRole;

    fn seeds() -> ThemeSeeds {
        ThemeSeeds::parse("#2563EB", "#16A34A", "#F59E0B").unwrap()
    }

    #[test]
    fn every_role_is_filled() {
        for mode in [
            PaletteMode::Light,
            PaletteMode::Dark,
            PaletteMode::HighContrastLight,
            PaletteMode::HighContrastDark,
        ] {
            let palette = generate_palette(&seeds(), mode);
            for role in PaletteRole::ALL {
                assert!(!palette.get(*role).is_empty(), "{role} empty in {mode:?}");
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(
            generate_palette(&seeds(), PaletteMode::Dark),
            generate_palette(&seeds(), PaletteMode::Dark)
        );
    }

    #[test]
    fn primary_foreground_is_always_white() {
        for mode in [PaletteMode::Light, PaletteMode::Dark] {
            assert_eq!(generate_palette(&seeds(), mode).primary_foreground, "#FFFFFF");
        }
    }

    #[test]
    fn light_and_dark_flip_background_and_foreground() {
        let (light, dark) = generate_palette_pair(&seeds(), false);
        assert_eq!(light.background, dark.foreground);
        assert_eq!(light.foreground, dark.background);
        assert_eq!(light.primary, dark.primary);
    }

    #[test]
    fn high_contrast_forces_pure_extremes() {
        let light = generate_palette_from_strs("#2563EB", "#16A34A", "#F59E0B", "high-contrast-light");
        assert_eq!(light.background, "#FFFFFF");
        assert_eq!(light.foreground, "#000000");
        assert_eq!(light.border, "#000000");

        let dark = generate_palette_from_strs("#2563EB", "#16A34A", "#F59E0B", "dark-high-contrast");
        assert_eq!(dark.background, "#000000");
        assert_eq!(dark.foreground, "#FFFFFF");
        assert_eq!(dark.border, "#FFFFFF");
    }

    #[test]
    fn blank_input_falls_back_to_default_seeds() {
        let expected = generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light);
        assert_eq!(generate_palette_from_strs("", "", "", ""), expected);
        assert_eq!(generate_palette_from_strs("#2563EB", "", "#F59E0B", "dark"), expected);
        assert_eq!(generate_palette_from_strs("#2563EB", "#16A34A", "#F59E0B", ""), expected);
        assert_eq!(expected.primary, fallback_seeds::PRIMARY);
        assert_eq!(expected.secondary, fallback_seeds::SECONDARY);
        assert_eq!(expected.accent, fallback_seeds::ACCENT);
    }

    #[test]
    fn seeds_round_trip_through_json() {
        let json = serde_json::to_string(&seeds()).unwrap();
        assert_eq!(json, r##"{"primary":"#2563EB","secondary":"#16A34A","accent":"#F59E0B"}"##);
        let back: ThemeSeeds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seeds());
    }
}
