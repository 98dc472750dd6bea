use crate::common::PaletteValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// Generates the role enum, the palette struct and the role <-> field plumbing
// from a single table so the three can never drift apart.
macro_rules! palette_roles {
    ($( $variant:ident => $field:ident, $key:literal, $css:literal; )+) => {
        /// A named color role inside a [`Palette`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PaletteRole {
            $($variant),+
        }

        impl PaletteRole {
            /// Every role, in presentation order.
            pub const ALL: &'static [PaletteRole] = &[$(PaletteRole::$variant),+];

            /// Serialized (camelCase) role name.
            pub fn key(self) -> &'static str {
                match self {
                    $(PaletteRole::$variant => $key),+
                }
            }

            /// Presentation variable the role is written to.
            pub fn css_variable(self) -> &'static str {
                match self {
                    $(PaletteRole::$variant => $css),+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(PaletteRole::$variant),)+
                    _ => None,
                }
            }
        }

        /// A complete set of color role values for one mode of a theme.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Palette {
            $(pub $field: String),+
        }

        impl Palette {
            pub fn get(&self, role: PaletteRole) -> &str {
                match role {
                    $(PaletteRole::$variant => &self.$field),+
                }
            }

            pub fn set(&mut self, role: PaletteRole, value: impl Into<String>) {
                let value = value.into();
                match role {
                    $(PaletteRole::$variant => self.$field = value),+
                }
            }

            /// Build a palette from a role-keyed map, failing on the first missing role.
            pub fn from_map(colors: &HashMap<String, String>) -> Result<Self, PaletteValidationError> {
                let lookup = |key: &str| {
                    colors
                        .get(key)
                        .cloned()
                        .ok_or_else(|| PaletteValidationError::MissingRole {
                            role: key.to_string(),
                        })
                };
                Ok(Self {
                    $($field: lookup($key)?),+
                })
            }
        }
    };
}

palette_roles! {
    Background => background, "background", "--background";
    Foreground => foreground, "foreground", "--foreground";
    Card => card, "card", "--card";
    CardForeground => card_foreground, "cardForeground", "--card-foreground";
    Popover => popover, "popover", "--popover";
    PopoverForeground => popover_foreground, "popoverForeground", "--popover-foreground";
    Primary => primary, "primary", "--primary";
    PrimaryForeground => primary_foreground, "primaryForeground", "--primary-foreground";
    Secondary => secondary, "secondary", "--secondary";
    SecondaryForeground => secondary_foreground, "secondaryForeground", "--secondary-foreground";
    Accent => accent, "accent", "--accent";
    AccentForeground => accent_foreground, "accentForeground", "--accent-foreground";
    Muted => muted, "muted", "--muted";
    MutedForeground => muted_foreground, "mutedForeground", "--muted-foreground";
    Destructive => destructive, "destructive", "--destructive";
    DestructiveForeground => destructive_foreground, "destructiveForeground", "--destructive-foreground";
    Border => border, "border", "--border";
    Input => input, "input", "--input";
    Ring => ring, "ring", "--ring";
    Chart1 => chart_1, "chart1", "--chart-1";
    Chart2 => chart_2, "chart2", "--chart-2";
    Chart3 => chart_3, "chart3", "--chart-3";
    Chart4 => chart_4, "chart4", "--chart-4";
    Chart5 => chart_5, "chart5", "--chart-5";
    Sidebar => sidebar, "sidebar", "--sidebar";
    SidebarForeground => sidebar_foreground, "sidebarForeground", "--sidebar-foreground";
    SidebarPrimary => sidebar_primary, "sidebarPrimary", "--sidebar-primary";
    SidebarAccent => sidebar_accent, "sidebarAccent", "--sidebar-accent";
    SidebarBorder => sidebar_border, "sidebarBorder", "--sidebar-border";
}

impl Palette {
    /// Iterate `(role, value)` pairs in presentation order.
    pub fn entries(&self) -> impl Iterator<Item = (PaletteRole, &str)> + '_ {
        PaletteRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries()
            .map(|(role, value)| (role.key().to_string(), value.to_string()))
            .collect()
    }
}

impl fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Palette generation mode.
///
/// Legacy callers passed free-form strings such as `"light-high-contrast"`;
/// [`PaletteMode::from_mode_str`] is the one place that maps those onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteMode {
    Light,
    Dark,
    HighContrastLight,
    HighContrastDark,
}

impl PaletteMode {
    /// Map a legacy mode string by substring containment.
    ///
    /// `"light-high-contrast"` and `"high-contrast-light"` are the same mode.
    /// Returns `None` for a blank string.
    pub fn from_mode_str(mode: &str) -> Option<Self> {
        let mode = mode.trim().to_ascii_lowercase();
        if mode.is_empty() {
            return None;
        }

        let high_contrast = mode.contains("high-contrast");
        let dark = mode.contains("dark");

        Some(match (high_contrast, dark) {
            (true, true) => PaletteMode::HighContrastDark,
            (true, false) => PaletteMode::HighContrastLight,
            (false, true) => PaletteMode::Dark,
            (false, false) => PaletteMode::Light,
        })
    }

    pub fn is_dark(self) -> bool {
        matches!(self, PaletteMode::Dark | PaletteMode::HighContrastDark)
    }

    pub fn is_high_contrast(self) -> bool {
        matches!(
            self,
            PaletteMode::HighContrastLight | PaletteMode::HighContrastDark
        )
    }

    /// The same contrast level in the requested brightness.
    pub fn with_dark(self, dark: bool) -> Self {
        match (self.is_high_contrast(), dark) {
            (true, true) => PaletteMode::HighContrastDark,
            (true, false) => PaletteMode::HighContrastLight,
            (false, true) => PaletteMode::Dark,
            (false, false) => PaletteMode::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_table_has_expected_shape() {
        assert_eq!(PaletteRole::ALL.len(), 29);
        for role in PaletteRole::ALL {
            assert_eq!(PaletteRole::from_key(role.key()), Some(*role));
            assert!(role.css_variable().starts_with("--"));
        }
    }

    #[test]
    fn mode_strings_match_by_substring() {
        assert_eq!(
            PaletteMode::from_mode_str("light-high-contrast"),
            PaletteMode::from_mode_str("high-contrast-light")
        );
        assert_eq!(
            PaletteMode::from_mode_str("high-contrast-dark"),
            Some(PaletteMode::HighContrastDark)
        );
        assert_eq!(
            PaletteMode::from_mode_str("dark-high-contrast"),
            Some(PaletteMode::HighContrastDark)
        );
        assert_eq!(PaletteMode::from_mode_str("Dark"), Some(PaletteMode::Dark));
        assert_eq!(PaletteMode::from_mode_str("light"), Some(PaletteMode::Light));
        assert_eq!(PaletteMode::from_mode_str("sepia"), Some(PaletteMode::Light));
        assert_eq!(PaletteMode::from_mode_str(""), None);
        assert_eq!(PaletteMode::from_mode_str("   "), None);
    }

    #[test]
    fn with_dark_keeps_contrast_level() {
        assert_eq!(
            PaletteMode::HighContrastLight.with_dark(true),
            PaletteMode::HighContrastDark
        );
        assert_eq!(PaletteMode::Dark.with_dark(false), PaletteMode::Light);
    }

    #[test]
    fn serializes_roles_in_camel_case() {
        let mut colors = HashMap::new();
        for role in PaletteRole::ALL {
            colors.insert(role.key().to_string(), "#FFFFFF".to_string());
        }
        let palette = Palette::from_map(&colors).unwrap();
        let json = serde_json::to_value(&palette).unwrap();

        assert!(json.get("primaryForeground").is_some());
        assert!(json.get("chart1").is_some());
        assert!(json.get("sidebarBorder").is_some());
        assert_eq!(palette.to_map(), colors);
    }

    #[test]
    fn from_map_reports_missing_role() {
        let mut colors = HashMap::new();
        colors.insert("background".to_string(), "#FFFFFF".to_string());
        assert_eq!(
            Palette::from_map(&colors),
            Err(PaletteValidationError::MissingRole {
                role: "foreground".to_string()
            })
        );
    }
}
