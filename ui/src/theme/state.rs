use crate::error::AppError;
use engine::resolver::ThemeSource;
use engine::theme::Theme;

/// Controller lifecycle.
///
/// There is no separate error phase: a failed startup or update leaves the
/// controller `Ready` with [`ThemeState::last_error`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePhase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Observable theme state.
///
/// `is_loading` and `is_theme_update_in_progress` are filled in from the
/// controller's guards when a snapshot is taken.
#[derive(Debug, Clone, Default)]
pub struct ThemeState {
    pub phase: ThemePhase,
    pub current_theme: Option<Theme>,
    pub available_themes: Vec<Theme>,
    pub is_dark_mode: bool,
    pub is_loading: bool,
    pub last_error: Option<AppError>,
    pub is_theme_update_in_progress: bool,
    pub source: Option<ThemeSource>,
    pub follows_environment: bool,
}

impl ThemeState {
    pub fn is_ready(&self) -> bool {
        self.phase == ThemePhase::Ready
    }

    pub fn current_theme_id(&self) -> Option<&str> {
        self.current_theme.as_ref().map(|theme| theme.id.as_str())
    }
}
