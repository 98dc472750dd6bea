/// A check that either accepts an input or explains why it is rejected.
///
/// Palette, theme and admin-input validators all implement this so callers
/// can run them uniformly before a theme reaches the presentation layer.
///
/// ```
/// use engine::palette::{PaletteMode, PaletteValidator, ThemeSeeds, generate_palette};
/// use engine::validation::Validator;
///
/// let palette = generate_palette(&ThemeSeeds::fallback(), PaletteMode::Light);
/// assert!(PaletteValidator.is_valid(&palette));
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    fn validate(&self, input: &T) -> Result<(), Self::Error>;

    /// `true` when [`validate`](Self::validate) succeeds.
    fn is_valid(&self, input: &T) -> bool {
        self.validate(input).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShortId;

    impl Validator<str> for ShortId {
        type Error = usize;

        fn validate(&self, input: &str) -> Result<(), usize> {
            if input.len() <= 8 { Ok(()) } else { Err(input.len()) }
        }
    }

    #[test]
    fn is_valid_follows_validate() {
        assert!(ShortId.is_valid("classic"));
        assert!(!ShortId.is_valid("modern-lavender-mint"));
        assert_eq!(ShortId.validate("modern-lavender-mint"), Err(20));
    }
}
