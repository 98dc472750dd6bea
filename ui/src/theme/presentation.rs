use engine::palette::{Palette, PaletteRole};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The presentation layer as seen by the theme controller.
///
/// Implementations receive one `set_variable` call per palette role, named
/// after the role's CSS custom property (`--primary-foreground`), followed by
/// the dark flag.
pub trait PresentationAdapter: Send + Sync {
    fn set_variable(&self, name: &str, value: &str);

    fn set_dark_mode(&self, dark: bool);
}

/// Push every role of `palette` into `adapter`.
pub fn apply_palette(adapter: &dyn PresentationAdapter, palette: &Palette, dark: bool) {
    for (role, value) in palette.entries() {
        adapter.set_variable(role.css_variable(), value);
    }
    adapter.set_dark_mode(dark);
}

#[derive(Debug, Default)]
struct CssState {
    variables: BTreeMap<String, String>,
    dark: bool,
    writes: usize,
}

/// In-memory stand-in for the document root's CSS custom properties.
#[derive(Debug, Default)]
pub struct CssVariableStore {
    state: RwLock<CssState>,
}

impl CssVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CssState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CssState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn variable(&self, name: &str) -> Option<String> {
        self.read().variables.get(name).cloned()
    }

    /// Value currently bound to a palette role.
    pub fn role(&self, role: PaletteRole) -> Option<String> {
        self.variable(role.css_variable())
    }

    pub fn variables(&self) -> BTreeMap<String, String> {
        self.read().variables.clone()
    }

    pub fn is_dark(&self) -> bool {
        self.read().dark
    }

    /// Number of variable writes so far.
    pub fn write_count(&self) -> usize {
        self.read().writes
    }

    /// Render the store as a `:root` rule.
    pub fn render_css(&self) -> String {
        let state = self.read();
        let mut css = String::from(":root {\n");
        for (name, value) in &state.variables {
            let _ = writeln!(css, "  {name}: {value};");
        }
        let scheme = if state.dark { "dark" } else { "light" };
        let _ = writeln!(css, "  color-scheme: {scheme};");
        css.push_str("}\n");
        css
    }
}

impl PresentationAdapter for CssVariableStore {
    fn set_variable(&self, name: &str, value: &str) {
        let mut state = self.write();
        state.variables.insert(name.to_string(), value.to_string());
        state.writes += 1;
    }

    fn set_dark_mode(&self, dark: bool) {
        self.write().dark = dark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some_eq};
    use engine::palette::{PaletteMode, ThemeSeeds, generate_palette};

    #[test]
    fn applying_a_palette_writes_every_role() {
        let store = CssVariableStore::new();
        let palette = generate_palette(&ThemeSeeds::fallback(), PaletteMode::Dark);

        apply_palette(&store, &palette, true);

        assert_eq!(store.write_count(), PaletteRole::ALL.len());
        assert_eq!(store.variables().len(), PaletteRole::ALL.len());
        assert_some_eq!(store.variable("--primary"), "#7C3AED".to_string());
        assert_some_eq!(store.role(PaletteRole::Chart1), palette.chart_1.clone());
        assert!(store.is_dark());
    }

    #[test]
    fn renders_root_block() {
        let store = CssVariableStore::new();
        assert_none!(store.variable("--background"));

        store.set_variable("--background", "#FAFAFA");
        let css = store.render_css();

        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --background: #FAFAFA;\n"));
        assert!(css.contains("color-scheme: light;"));
        assert!(css.ends_with("}\n"));
    }
}
