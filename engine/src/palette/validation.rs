use super::color::is_valid_hex;
use super::types::{Palette, PaletteRole};
use crate::common::PaletteValidationError;
use crate::validation::Validator;
use std::collections::HashMap;

/// Checks the palette invariant: every role present, non-empty and well-formed.
pub struct PaletteValidator;

impl PaletteValidator {
    fn check_role(role: PaletteRole, value: &str) -> Result<(), PaletteValidationError> {
        if value.trim().is_empty() {
            return Err(PaletteValidationError::EmptyRole {
                role: role.key().to_string(),
            });
        }
        if !is_valid_hex(value) {
            return Err(PaletteValidationError::MalformedColor {
                role: role.key().to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

impl Validator<Palette> for PaletteValidator {
    type Error = PaletteValidationError;

    fn validate(&self, input: &Palette) -> Result<(), Self::Error> {
        input
            .entries()
            .try_for_each(|(role, value)| Self::check_role(role, value))
    }
}

/// Validator for loose, role-keyed color sets such as admin form input.
///
/// Unknown keys are ignored; every required role must be present.
pub struct ColorSetValidator;

impl Validator<HashMap<String, String>> for ColorSetValidator {
    type Error = PaletteValidationError;

    fn validate(&self, input: &HashMap<String, String>) -> Result<(), Self::Error> {
        for role in PaletteRole::ALL {
            let value = input
                .get(role.key())
                .ok_or_else(|| PaletteValidationError::MissingRole {
                    role: role.key().to_string(),
                })?;
            PaletteValidator::check_role(*role, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteMode, ThemeSeeds, generate_palette};

    fn palette() -> Palette {
        generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light)
    }

    #[test]
    fn generated_palettes_pass() {
        assert!(PaletteValidator.validate(&palette()).is_ok());
        assert!(ColorSetValidator.validate(&palette().to_map()).is_ok());
    }

    #[test]
    fn empty_role_is_rejected() {
        let mut broken = palette();
        broken.set(PaletteRole::Ring, "");
        assert_eq!(
            PaletteValidator.validate(&broken),
            Err(PaletteValidationError::EmptyRole {
                role: "ring".to_string()
            })
        );
    }

    #[test]
    fn malformed_role_is_rejected() {
        let mut broken = palette();
        broken.set(PaletteRole::Chart3, "blue");
        assert!(matches!(
            PaletteValidator.validate(&broken),
            Err(PaletteValidationError::MalformedColor { role, .. }) if role == "chart3"
        ));
    }

    #[test]
    fn partial_color_sets_are_rejected() {
        let mut colors = palette().to_map();
        colors.remove("sidebarAccent");
        colors.insert("unused".to_string(), "whatever".to_string());
        assert_eq!(
            ColorSetValidator.validate(&colors),
            Err(PaletteValidationError::MissingRole {
                role: "sidebarAccent".to_string()
            })
        );
    }
}
