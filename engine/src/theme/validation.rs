use super::types::Theme;
use crate::common::PaletteValidationError;
use crate::palette::PaletteValidator;
use crate::validation::Validator;

/// Validator for complete themes: identity fields plus both palettes.
pub struct ThemeValidator;

impl Validator<Theme> for ThemeValidator {
    type Error = PaletteValidationError;

    fn validate(&self, input: &Theme) -> Result<(), Self::Error> {
        if input.id.trim().is_empty() {
            return Err(PaletteValidationError::InvalidThemeField {
                field: "id".to_string(),
                reason: "Theme id cannot be empty".to_string(),
            });
        }

        if input.name.trim().is_empty() {
            return Err(PaletteValidationError::InvalidThemeField {
                field: "name".to_string(),
                reason: "Theme name cannot be empty".to_string(),
            });
        }

        PaletteValidator.validate(&input.light)?;
        PaletteValidator.validate(&input.dark)
    }
}

/// Validator for the palette of a single mode, used before a theme is applied.
pub struct ActivePaletteValidator {
    pub dark: bool,
}

impl Validator<Theme> for ActivePaletteValidator {
    type Error = PaletteValidationError;

    fn validate(&self, input: &Theme) -> Result<(), Self::Error> {
        PaletteValidator.validate(input.palette(self.dark))
    }
}
