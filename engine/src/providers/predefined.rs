use super::response::ProviderResponse;
use crate::theme::{Theme, predefined_themes};

/// The hardcoded themes shipped with the app.
///
/// Never makes a call and never fails. Used as the last non-emergency source.
#[derive(Debug, Clone)]
pub struct PredefinedThemes {
    themes: Vec<Theme>,
}

impl PredefinedThemes {
    pub fn new() -> Self {
        Self::from_themes(predefined_themes())
    }

    pub fn from_themes(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    pub fn fetch_themes(&self) -> ProviderResponse<Vec<Theme>> {
        ProviderResponse::success(self.themes.clone())
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn find(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.id == id)
    }

    /// The theme flagged `is_default`, else the first one.
    pub fn default_theme(&self) -> Option<&Theme> {
        self.themes
            .iter()
            .find(|theme| theme.is_default)
            .or_else(|| self.themes.first())
    }
}

impl Default for PredefinedThemes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DEFAULT_THEME_ID;

    #[test]
    fn always_succeeds_with_four_themes() {
        let provider = PredefinedThemes::new();
        let themes = provider.fetch_themes().into_result().unwrap();
        assert_eq!(themes.len(), 4);
    }

    #[test]
    fn default_theme_is_flagged() {
        let provider = PredefinedThemes::new();
        assert_eq!(provider.default_theme().unwrap().id, DEFAULT_THEME_ID);
        assert!(provider.find("schoolhub-ocean").is_some());
        assert!(provider.find("missing").is_none());
    }
}
