use engine::palette::{
    Palette, PaletteMode, PaletteRole, PaletteValidator, Rgb, ThemeSeeds, generate_palette,
    generate_palette_from_strs,
};
use engine::providers::{default_organization_palettes, organization_palette_index};
use engine::validation::Validator;
use proptest::prelude::*;

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn seeds() -> impl Strategy<Value = ThemeSeeds> {
    (rgb(), rgb(), rgb()).prop_map(|(p, s, a)| ThemeSeeds::new(p, s, a))
}

fn mode() -> impl Strategy<Value = PaletteMode> {
    prop_oneof![
        Just(PaletteMode::Light),
        Just(PaletteMode::Dark),
        Just(PaletteMode::HighContrastLight),
        Just(PaletteMode::HighContrastDark),
    ]
}

fn fallback_light() -> Palette {
    generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light)
}

#[cfg(test)]
mod palette_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_palettes_are_complete(seeds in seeds(), mode in mode()) {
            let palette = generate_palette(&seeds, mode);

            prop_assert!(PaletteValidator.validate(&palette).is_ok());
            for role in PaletteRole::ALL {
                prop_assert!(!palette.get(*role).is_empty());
            }
            prop_assert_eq!(palette.to_map().len(), PaletteRole::ALL.len());
        }

        #[test]
        fn generation_is_deterministic(seeds in seeds(), mode in mode()) {
            prop_assert_eq!(generate_palette(&seeds, mode), generate_palette(&seeds, mode));
        }

        #[test]
        fn seeds_pass_through(seeds in seeds(), mode in mode()) {
            let palette = generate_palette(&seeds, mode);

            prop_assert_eq!(&palette.primary, &seeds.primary.to_hex());
            prop_assert_eq!(&palette.secondary, &seeds.secondary.to_hex());
            prop_assert_eq!(&palette.accent, &seeds.accent.to_hex());
            prop_assert_eq!(&palette.ring, &palette.primary);
            prop_assert_eq!(palette.primary_foreground.as_str(), "#FFFFFF");
        }

        #[test]
        fn high_contrast_uses_pure_extremes(seeds in seeds()) {
            let light = generate_palette(&seeds, PaletteMode::HighContrastLight);
            let dark = generate_palette(&seeds, PaletteMode::HighContrastDark);

            prop_assert_eq!(light.background.as_str(), "#FFFFFF");
            prop_assert_eq!(light.foreground.as_str(), "#000000");
            prop_assert_eq!(light.border.as_str(), "#000000");
            prop_assert_eq!(dark.background.as_str(), "#000000");
            prop_assert_eq!(dark.foreground.as_str(), "#FFFFFF");
            prop_assert_eq!(dark.border.as_str(), "#FFFFFF");
        }

        #[test]
        fn mode_strings_map_consistently(prefix in "[a-z]{0,6}", suffix in "[a-z]{0,6}") {
            let high_contrast_dark = format!("{prefix}high-contrast{suffix}dark");
            prop_assert_eq!(
                PaletteMode::from_mode_str(&high_contrast_dark),
                Some(PaletteMode::HighContrastDark)
            );

            let parsed = PaletteMode::from_mode_str(&format!("{prefix}-{suffix}"));
            let expected = if format!("{prefix}-{suffix}").contains("dark") {
                PaletteMode::Dark
            } else {
                PaletteMode::Light
            };
            prop_assert_eq!(parsed, Some(expected));
        }

        #[test]
        fn malformed_seeds_fall_back(garbage in "[g-z]{1,8}") {
            let palette = generate_palette_from_strs(&garbage, "#0EA5E9", "#FB7185", "dark");
            prop_assert_eq!(palette, fallback_light());
        }
    }
}

#[cfg(test)]
mod organization_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn bucket_is_stable_and_in_range(org_id in ".{0,40}") {
            let buckets = default_organization_palettes().len();
            let first = organization_palette_index(&org_id, buckets);
            let second = organization_palette_index(&org_id, buckets);

            prop_assert!(first < buckets);
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn blank_mode_falls_back_to_light_defaults() {
    let palette = generate_palette_from_strs("#112233", "#445566", "#778899", "  ");
    assert_eq!(palette, fallback_light());
}

#[test]
fn light_and_high_contrast_orderings_are_equivalent() {
    assert_eq!(
        PaletteMode::from_mode_str("light-high-contrast"),
        PaletteMode::from_mode_str("high-contrast-light")
    );
}
