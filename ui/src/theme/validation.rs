use crate::error::AppError;
use engine::palette::{Rgb, ThemeSeeds};
use engine::theme::{NewTheme, ThemeUpdate};
use engine::validation::Validator;

const MAX_THEME_NAME_LEN: usize = 50;

/// Validation errors for admin theme input
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValidationError {
    InvalidThemeName { name: String, reason: String },
    InvalidSeedColor { role: String, value: String },
    EmptyUpdate,
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::InvalidThemeName { name, reason } => {
                format!(
                    "Invalid theme name: '{name}'\n\n\
                    Reason: {reason}\n\n\
                    Please use letters, digits, spaces, hyphens, underscores or parentheses."
                )
            }
            ThemeValidationError::InvalidSeedColor { role, value } => {
                format!(
                    "Invalid {role} color: '{value}'\n\n\
                    Please use a hex color such as #7C3AED or #7CE."
                )
            }
            ThemeValidationError::EmptyUpdate => {
                "Nothing to update.\n\nPlease change at least one theme field.".to_string()
            }
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(error: ThemeValidationError) -> Self {
        AppError::Validation(error.user_message())
    }
}

/// Validator for human-facing theme names
pub struct ThemeNameValidator;

impl Validator<str> for ThemeNameValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ThemeValidationError::InvalidThemeName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid("Name cannot be empty"));
        }

        if input.chars().count() > MAX_THEME_NAME_LEN {
            return Err(invalid("Name too long (max 50 characters)"));
        }

        if !input
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '(' | ')'))
        {
            return Err(invalid("Name contains invalid characters"));
        }

        if input.starts_with(char::is_whitespace) || input.ends_with(char::is_whitespace) {
            return Err(invalid("Name cannot start or end with whitespace"));
        }

        Ok(())
    }
}

/// Validator for a single `#RGB`/`#RRGGBB` seed color
pub struct SeedColorValidator<'a> {
    pub role: &'a str,
}

impl Validator<str> for SeedColorValidator<'_> {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if engine::palette::color::is_valid_hex(input.trim()) {
            Ok(())
        } else {
            Err(ThemeValidationError::InvalidSeedColor {
                role: self.role.to_string(),
                value: input.to_string(),
            })
        }
    }
}

pub struct NewThemeValidator;

impl Validator<NewTheme> for NewThemeValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &NewTheme) -> Result<(), Self::Error> {
        ThemeNameValidator.validate(&input.name)
    }
}

pub struct ThemeUpdateValidator;

impl Validator<ThemeUpdate> for ThemeUpdateValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &ThemeUpdate) -> Result<(), Self::Error> {
        if input.is_empty() {
            return Err(ThemeValidationError::EmptyUpdate);
        }
        match &input.name {
            Some(name) => ThemeNameValidator.validate(name),
            None => Ok(()),
        }
    }
}

/// Build a [`NewTheme`] from user-entered hex seeds.
pub fn new_theme_from_hex(
    name: &str,
    primary: &str,
    secondary: &str,
    accent: &str,
) -> Result<NewTheme, ThemeValidationError> {
    let parse = |role: &str, value: &str| -> Result<Rgb, ThemeValidationError> {
        SeedColorValidator { role }.validate(value)?;
        Rgb::parse_hex(value.trim()).map_err(|_| ThemeValidationError::InvalidSeedColor {
            role: role.to_string(),
            value: value.to_string(),
        })
    };

    let theme = NewTheme {
        name: name.to_string(),
        description: None,
        seeds: ThemeSeeds::new(
            parse("primary", primary)?,
            parse("secondary", secondary)?,
            parse("accent", accent)?,
        ),
        high_contrast: false,
    };
    NewThemeValidator.validate(&theme)?;
    Ok(theme)
}
