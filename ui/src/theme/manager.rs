use super::environment::EnvironmentSignal;
use super::preference::{MemoryPreferenceStore, PreferenceStore};
use super::presentation::{CssVariableStore, PresentationAdapter, apply_palette};
use super::state::{ThemePhase, ThemeState};
use super::validation::{NewThemeValidator, ThemeUpdateValidator};
use crate::error::{AppError, AppResult, ErrorContext, ErrorReporter, ErrorSeverity};
use engine::palette::ColorSetValidator;
use engine::resolver::{SessionContext, ThemeResolver, ThemeSource, emergency_theme, select_default};
use engine::theme::{ActivePaletteValidator, NewTheme, Theme, ThemeUpdate};
use engine::validation::Validator;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;

const COMPONENT: &str = "ThemeController";

/// Owns the active theme and pushes it to the presentation layer.
///
/// Cloning is cheap and every clone drives the same state. The controller
/// starts [`Uninitialized`](ThemePhase::Uninitialized); call
/// [`init`](Self::init) once and [`dispose`](Self::dispose) when done.
///
/// Overlapping [`apply_theme`](Self::apply_theme) calls are allowed. Every
/// call takes a request generation and only the most recently issued call may
/// commit, so a slow earlier lookup can never overwrite a newer choice.
#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    resolver: Arc<ThemeResolver>,
    session: SessionContext,
    preferences: Arc<dyn PreferenceStore>,
    presentation: Arc<dyn PresentationAdapter>,
    environment: EnvironmentSignal,
    reporter: ErrorReporter,
    state: RwLock<ThemeState>,
    generation: AtomicU64,
    in_flight: AtomicUsize,
    loading: AtomicBool,
    disposed: AtomicBool,
    environment_watch: Mutex<Option<CancellationToken>>,
}

impl ControllerInner {
    fn stop_environment_watch(&self) {
        let token = self
            .environment_watch
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(token) = token {
            token.cancel();
            log::debug!("Stopped following the environment color scheme");
        }
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.stop_environment_watch();
    }
}

/// Raises a flag for the lifetime of the guard.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Counts one in-flight theme update.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Builder for [`ThemeController`].
///
/// Anything not set falls back to an in-memory preference store, a
/// [`CssVariableStore`], a light environment signal and a silent reporter.
pub struct ThemeControllerBuilder {
    resolver: Arc<ThemeResolver>,
    session: SessionContext,
    preferences: Option<Arc<dyn PreferenceStore>>,
    presentation: Option<Arc<dyn PresentationAdapter>>,
    environment: Option<EnvironmentSignal>,
    reporter: Option<ErrorReporter>,
}

impl ThemeControllerBuilder {
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn presentation(mut self, presentation: Arc<dyn PresentationAdapter>) -> Self {
        self.presentation = Some(presentation);
        self
    }

    pub fn environment(mut self, environment: EnvironmentSignal) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> ThemeController {
        let inner = ControllerInner {
            resolver: self.resolver,
            session: self.session,
            preferences: self
                .preferences
                .unwrap_or_else(|| Arc::new(MemoryPreferenceStore::new())),
            presentation: self
                .presentation
                .unwrap_or_else(|| Arc::new(CssVariableStore::new())),
            environment: self.environment.unwrap_or_default(),
            reporter: self.reporter.unwrap_or_else(ErrorReporter::silent),
            state: RwLock::new(ThemeState::default()),
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            loading: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            environment_watch: Mutex::new(None),
        };
        ThemeController {
            inner: Arc::new(inner),
        }
    }
}

impl ThemeController {
    pub fn builder(resolver: Arc<ThemeResolver>) -> ThemeControllerBuilder {
        ThemeControllerBuilder {
            resolver,
            session: SessionContext::anonymous(),
            preferences: None,
            presentation: None,
            environment: None,
            reporter: None,
        }
    }

    /// Resolve and apply the startup theme.
    ///
    /// Never leaves the controller without a theme: when every source fails the
    /// emergency theme is applied and the failure is kept in
    /// [`error`](Self::error). Fails only when called twice.
    pub async fn init(&self) -> AppResult<()> {
        {
            let mut state = self.inner.state.write().await;
            if state.phase != ThemePhase::Uninitialized {
                return Err(AppError::State(
                    "Theme controller is already initialized".to_string(),
                ));
            }
            state.phase = ThemePhase::Loading;
        }
        let _loading = FlagGuard::raise(&self.inner.loading);

        let stored = match self.inner.preferences.load_dark_mode() {
            Ok(stored) => stored,
            Err(e) => {
                self.report(e, "init", ErrorSeverity::Warning);
                None
            }
        };

        // Subscribe first so a change between the read and the watch start is not lost.
        let environment = stored.is_none().then(|| self.inner.environment.subscribe());
        let dark = stored.unwrap_or_else(|| self.inner.environment.current());

        let resolution = self.inner.resolver.resolve_initial(&self.inner.session).await;
        let mut errors = resolution.errors;

        let available = match self.inner.resolver.fetch_available_themes().await {
            Ok(themes) => themes,
            Err(e) => {
                log::warn!("Available themes unavailable, listing predefined themes: {e}");
                if errors.is_empty() {
                    errors.push(e);
                }
                self.inner.resolver.predefined().themes().to_vec()
            }
        };

        let (theme, source) = match (ActivePaletteValidator { dark }).validate(&resolution.theme) {
            Ok(()) => (resolution.theme, resolution.source),
            Err(e) => {
                log::error!(
                    "Resolved theme {} is not displayable, using emergency theme: {e}",
                    resolution.theme.id
                );
                errors.push(e.into());
                (emergency_theme(), ThemeSource::Emergency)
            }
        };

        let last_error = errors.pop().map(AppError::from);
        {
            let mut state = self.inner.state.write().await;
            apply_palette(self.inner.presentation.as_ref(), theme.palette(dark), dark);
            log::info!("Initialized theme {} from {source:?} source", theme.id);

            state.current_theme = Some(theme);
            state.source = Some(source);
            state.available_themes = available;
            state.is_dark_mode = dark;
            state.follows_environment = environment.is_some();
            state.last_error = last_error.clone();
            state.phase = ThemePhase::Ready;
        }

        if let Some(error) = last_error {
            self.report(error, "init", ErrorSeverity::Warning);
        }
        if let Some(receiver) = environment {
            self.start_environment_watch(receiver);
        }
        Ok(())
    }

    /// Apply the theme with `theme_id`.
    ///
    /// Returns `false` and keeps the current theme when the lookup fails, the
    /// palette for the active mode is invalid, or a newer call superseded this
    /// one. Only the first two record an error.
    pub async fn apply_theme(&self, theme_id: &str) -> bool {
        let generation = self.next_generation();
        let _in_flight = InFlightGuard::enter(&self.inner.in_flight);

        if let Err(e) = self.require_ready("apply a theme").await {
            return self.reject(generation, e, "apply_theme").await;
        }

        match self.inner.resolver.fetch_theme(theme_id).await {
            Ok(theme) => self.commit_theme(generation, theme, "apply_theme").await,
            Err(e) => self.reject(generation, e.into(), "apply_theme").await,
        }
    }

    /// Apply a generated time-of-day theme through the same gate as
    /// [`apply_theme`](Self::apply_theme).
    pub async fn apply_dynamic_theme(&self, seed: Option<u64>) -> bool {
        let generation = self.next_generation();
        let _in_flight = InFlightGuard::enter(&self.inner.in_flight);

        if let Err(e) = self.require_ready("apply a dynamic theme").await {
            return self.reject(generation, e, "apply_dynamic_theme").await;
        }

        match self.inner.resolver.fetch_dynamic_theme(seed).await {
            Ok(theme) => self.commit_theme(generation, theme, "apply_dynamic_theme").await,
            Err(e) => self.reject(generation, e.into(), "apply_dynamic_theme").await,
        }
    }

    /// Flip between light and dark. Returns the new mode.
    pub async fn toggle_dark_mode(&self) -> AppResult<bool> {
        let dark = !self.inner.state.read().await.is_dark_mode;
        self.set_dark_mode(dark).await?;
        Ok(dark)
    }

    /// Switch mode explicitly and persist the choice.
    ///
    /// The theme itself does not change. From now on the environment signal is
    /// ignored. The mode is applied even when persisting it fails.
    pub async fn set_dark_mode(&self, dark: bool) -> AppResult<()> {
        self.require_ready("change the color mode").await?;
        self.inner.stop_environment_watch();

        {
            let mut state = self.inner.state.write().await;
            state.follows_environment = false;

            let invalid = state
                .current_theme
                .as_ref()
                .and_then(|theme| (ActivePaletteValidator { dark }).validate(theme).err());
            if let Some(e) = invalid {
                let error = AppError::from(e);
                state.last_error = Some(error.clone());
                drop(state);
                self.report(error.clone(), "set_dark_mode", ErrorSeverity::Error);
                return Err(error);
            }

            if let Some(theme) = &state.current_theme {
                apply_palette(self.inner.presentation.as_ref(), theme.palette(dark), dark);
            }
            state.is_dark_mode = dark;
        }
        log::info!("Dark mode {}", if dark { "enabled" } else { "disabled" });

        if let Err(e) = self.inner.preferences.save_dark_mode(dark) {
            self.report(e.clone(), "set_dark_mode", ErrorSeverity::Warning);
            return Err(e);
        }
        Ok(())
    }

    /// Refetch the available themes, bypassing the cache.
    pub async fn refresh_themes(&self) -> AppResult<()> {
        self.inner.resolver.invalidate_available().await;
        match self.inner.resolver.fetch_available_themes().await {
            Ok(themes) => {
                log::debug!("Refreshed {} available themes", themes.len());
                self.inner.state.write().await.available_themes = themes;
                Ok(())
            }
            Err(e) => Err(self.record(e.into(), "refresh_themes").await),
        }
    }

    /// Create a custom theme. Admin only.
    pub async fn create_custom_theme(&self, theme: NewTheme) -> AppResult<Theme> {
        self.require_admin("create themes")?;
        NewThemeValidator.validate(&theme)?;

        let created = match self.inner.resolver.create_theme(theme).await {
            Ok(created) => created,
            Err(e) => return Err(self.record(e.into(), "create_custom_theme").await),
        };
        log::info!("Created custom theme {} ({})", created.name, created.id);

        self.refresh_themes().await?;
        Ok(created)
    }

    /// Update a theme. Admin only. The active theme is re-applied.
    pub async fn update_theme(&self, theme_id: &str, update: ThemeUpdate) -> AppResult<Theme> {
        self.require_admin("edit themes")?;
        ThemeUpdateValidator.validate(&update)?;

        let updated = match self.inner.resolver.update_theme(theme_id, update).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.record(e.into(), "update_theme").await),
        };
        log::info!("Updated theme {theme_id}");

        let refreshed = self.refresh_themes().await;
        if self.is_current(theme_id).await {
            let generation = self.next_generation();
            self.commit_theme(generation, updated.clone(), "update_theme")
                .await;
        }
        self.keep_refresh_error(refreshed).await?;
        Ok(updated)
    }

    /// Delete a theme. Admin only.
    ///
    /// Deleting the active theme switches to the default theme.
    pub async fn delete_theme(&self, theme_id: &str) -> AppResult<()> {
        self.require_admin("delete themes")?;

        if let Err(e) = self.inner.resolver.delete_theme(theme_id).await {
            return Err(self.record(e.into(), "delete_theme").await);
        }
        log::info!("Deleted theme {theme_id}");

        let refreshed = self.refresh_themes().await;
        if refreshed.is_err() {
            self.inner
                .state
                .write()
                .await
                .available_themes
                .retain(|theme| theme.id != theme_id);
        }

        if self.is_current(theme_id).await {
            let replacement = {
                let state = self.inner.state.read().await;
                select_default(
                    &state.available_themes,
                    self.inner.resolver.config().default_theme_id.as_deref(),
                )
                .cloned()
            }
            .unwrap_or_else(emergency_theme);

            log::info!(
                "Active theme {theme_id} was deleted, switching to {}",
                replacement.id
            );
            let generation = self.next_generation();
            self.commit_theme(generation, replacement, "delete_theme")
                .await;
        }
        self.keep_refresh_error(refreshed).await
    }

    /// Whether a role-keyed color set is complete and well-formed.
    pub fn validate_theme(&self, colors: &HashMap<String, String>) -> bool {
        match ColorSetValidator.validate(colors) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Color set rejected: {e}");
                false
            }
        }
    }

    /// Store the active theme as the session user's preference.
    pub async fn save_user_preference(&self) -> AppResult<()> {
        let Some(user_id) = self.inner.session.user() else {
            return Err(AppError::Permission(
                "Sign in to save a theme preference".to_string(),
            ));
        };
        let Some(theme) = self.current_theme().await else {
            return Err(AppError::State("No theme is active yet".to_string()));
        };

        let theme_id = theme.id.clone();
        match self
            .inner
            .resolver
            .save_user_preference(user_id, theme)
            .await
        {
            Ok(()) => {
                log::info!("Saved theme {theme_id} as preference for {user_id}");
                Ok(())
            }
            Err(e) => Err(self.record(e.into(), "save_user_preference").await),
        }
    }

    /// Stop following the environment. Safe to call more than once.
    pub fn dispose(&self) {
        self.inner.stop_environment_watch();
        if !self.inner.disposed.swap(true, Ordering::SeqCst) {
            log::debug!("Theme controller disposed");
        }
    }

    pub async fn current_theme(&self) -> Option<Theme> {
        self.inner.state.read().await.current_theme.clone()
    }

    pub async fn available_themes(&self) -> Vec<Theme> {
        self.inner.state.read().await.available_themes.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// The most recent error, cleared by the next successful apply.
    pub async fn error(&self) -> Option<AppError> {
        self.inner.state.read().await.last_error.clone()
    }

    pub async fn is_dark_mode(&self) -> bool {
        self.inner.state.read().await.is_dark_mode
    }

    pub fn is_theme_update_in_progress(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn phase(&self) -> ThemePhase {
        self.inner.state.read().await.phase
    }

    pub async fn follows_environment(&self) -> bool {
        self.inner.state.read().await.follows_environment
    }

    pub async fn snapshot(&self) -> ThemeState {
        let mut state = self.inner.state.read().await.clone();
        state.is_loading = self.is_loading();
        state.is_theme_update_in_progress = self.is_theme_update_in_progress();
        state
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    pub fn resolver(&self) -> &Arc<ThemeResolver> {
        &self.inner.resolver
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    async fn is_current(&self, theme_id: &str) -> bool {
        self.inner.state.read().await.current_theme_id() == Some(theme_id)
    }

    async fn require_ready(&self, action: &str) -> AppResult<()> {
        if self.inner.state.read().await.is_ready() {
            Ok(())
        } else {
            Err(AppError::State(format!(
                "Cannot {action} before the theme controller is initialized"
            )))
        }
    }

    fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.inner.session.is_admin {
            Ok(())
        } else {
            log::warn!("Rejected non-admin attempt to {action}");
            Err(AppError::Permission(format!(
                "Only administrators can {action}"
            )))
        }
    }

    /// Swap in `theme` if `generation` is still the latest request.
    async fn commit_theme(&self, generation: u64, theme: Theme, operation: &str) -> bool {
        let mut state = self.inner.state.write().await;
        if !self.is_latest(generation) {
            log::debug!("Dropping superseded theme {} (request {generation})", theme.id);
            return false;
        }

        let dark = state.is_dark_mode;
        if let Err(e) = (ActivePaletteValidator { dark }).validate(&theme) {
            log::warn!("Theme {} failed validation, keeping current theme", theme.id);
            let error = AppError::from(e);
            state.last_error = Some(error.clone());
            drop(state);
            self.report(error, operation, ErrorSeverity::Error);
            return false;
        }

        apply_palette(self.inner.presentation.as_ref(), theme.palette(dark), dark);
        log::info!("Applied theme {} ({})", theme.name, theme.id);
        state.current_theme = Some(theme);
        state.last_error = None;
        true
    }

    /// Record a failed request unless a newer one has been issued since.
    async fn reject(&self, generation: u64, error: AppError, operation: &str) -> bool {
        {
            let mut state = self.inner.state.write().await;
            if !self.is_latest(generation) {
                log::debug!("Ignoring failure of superseded request {generation}: {error}");
                return false;
            }
            state.last_error = Some(error.clone());
        }
        self.report(error, operation, ErrorSeverity::Error);
        false
    }

    /// A successful re-apply clears `last_error`; put a failed refresh back.
    async fn keep_refresh_error(&self, refreshed: AppResult<()>) -> AppResult<()> {
        if let Err(e) = &refreshed {
            self.inner.state.write().await.last_error = Some(e.clone());
        }
        refreshed
    }

    async fn record(&self, error: AppError, operation: &str) -> AppError {
        self.inner.state.write().await.last_error = Some(error.clone());
        self.report(error.clone(), operation, ErrorSeverity::Error);
        error
    }

    fn report(&self, error: AppError, operation: &str, severity: ErrorSeverity) {
        let context = ErrorContext::new(COMPONENT, operation)
            .with_message(&error.to_string())
            .with_severity(severity);
        self.inner.reporter.report(error, context);
    }

    fn start_environment_watch(&self, mut receiver: watch::Receiver<bool>) {
        let token = CancellationToken::new();
        {
            let mut slot = self
                .inner
                .environment_watch
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
        }

        let weak: Weak<ControllerInner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    changed = receiver.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let dark = *receiver.borrow_and_update();
                        let Some(inner) = weak.upgrade() else {
                            break;
                        };
                        ThemeController { inner }.follow_environment(dark).await;
                    }
                }
            }
            log::debug!("Environment watch finished");
        });
        log::debug!("Following the environment color scheme");
    }

    async fn follow_environment(&self, dark: bool) {
        let mut state = self.inner.state.write().await;
        if !state.follows_environment || state.is_dark_mode == dark {
            return;
        }

        if let Some(theme) = &state.current_theme {
            if !(ActivePaletteValidator { dark }).is_valid(theme) {
                log::warn!("Ignoring environment color scheme change for {}", theme.id);
                return;
            }
            apply_palette(self.inner.presentation.as_ref(), theme.palette(dark), dark);
        }
        state.is_dark_mode = dark;
        log::info!(
            "Environment switched to {} mode",
            if dark { "dark" } else { "light" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_matches, assert_none, assert_ok, assert_some};
    use engine::providers::Latency;
    use engine::resolver::{ResolverConfig, ResolverProviders};

    fn resolver() -> Arc<ThemeResolver> {
        Arc::new(ThemeResolver::new(
            ResolverProviders::simulated_with_roll(
                Latency::none(),
                0.3,
                engine::providers::fixed_roll(0.99),
            ),
            ResolverConfig::default(),
        ))
    }

    #[tokio::test]
    async fn operations_before_init_are_rejected() {
        let controller = ThemeController::builder(resolver()).build();

        assert_eq!(controller.phase().await, ThemePhase::Uninitialized);
        assert!(!controller.apply_theme("modern-lavender-mint").await);
        assert_matches!(controller.error().await, Some(AppError::State(_)));
        assert_matches!(controller.set_dark_mode(true).await, Err(AppError::State(_)));
        assert_none!(controller.current_theme().await);
    }

    #[tokio::test]
    async fn init_runs_once() {
        let controller = ThemeController::builder(resolver()).build();

        assert_ok!(controller.init().await);
        assert!(!controller.is_loading());
        assert_some!(controller.current_theme().await);
        assert_matches!(controller.init().await, Err(AppError::State(_)));
        controller.dispose();
    }

    #[test]
    fn guards_reset_flags() {
        let flag = AtomicBool::new(false);
        let counter = AtomicUsize::new(0);
        {
            let _flag = FlagGuard::raise(&flag);
            let _a = InFlightGuard::enter(&counter);
            let _b = InFlightGuard::enter(&counter);
            assert!(flag.load(Ordering::SeqCst));
            assert_eq!(counter.load(Ordering::SeqCst), 2);
        }
        assert!(!flag.load(Ordering::SeqCst));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn color_sets_are_checked_for_completeness() {
        let controller = ThemeController::builder(resolver()).build();
        let theme = emergency_theme();

        assert!(controller.validate_theme(&theme.light.to_map()));

        let mut partial = theme.light.to_map();
        partial.remove("ring");
        assert!(!controller.validate_theme(&partial));
    }
}
