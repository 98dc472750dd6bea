use anyhow::{Context, Result, anyhow};
use clap::Parser;
use engine::resolver::{ResolverProviders, ThemeResolver};
use schoolhub::config::AppConfig;
use schoolhub::logger::setup_logger;
use schoolhub::theme::{CssVariableStore, FilePreferenceStore, ThemeController};
use std::path::PathBuf;
use std::sync::Arc;

/// SchoolHub theme resolver and preview tool
#[derive(Parser, Debug)]
#[command(name = "schoolhub-theme")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a schoolhub.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Signed-in user id
    #[arg(long)]
    user: Option<String>,

    /// Organization id
    #[arg(long)]
    org: Option<String>,

    /// Run the session as an administrator
    #[arg(long)]
    admin: bool,

    /// Apply this theme after startup resolution
    #[arg(short, long)]
    theme: Option<String>,

    /// Force dark mode
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Force light mode
    #[arg(long)]
    light: bool,

    /// Apply the time-of-day theme
    #[arg(long, conflicts_with = "theme")]
    dynamic: bool,

    /// List available themes and exit
    #[arg(long)]
    list: bool,

    /// Print JSON instead of CSS
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    schoolhub::config::load_config(path)
        .into_result()
        .map_err(|message| anyhow!(message))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    if let Err(e) = setup_logger(config.logging()) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    let mut session = config.session().to_context();
    if cli.user.is_some() {
        session.user_id = cli.user.clone();
    }
    if cli.org.is_some() {
        session.org_id = cli.org.clone();
    }
    session.is_admin |= cli.admin;

    let theme_settings = config.theme();
    let resolver = Arc::new(ThemeResolver::new(
        ResolverProviders::simulated(theme_settings.latency(), theme_settings.user_theme_chance()),
        theme_settings.resolver_config(),
    ));

    let preferences = match theme_settings.preference_file() {
        Some(path) => FilePreferenceStore::new(path),
        None => FilePreferenceStore::default_location()
            .context("Failed to locate the preference file")?,
    };
    log::debug!("Using preference file {}", preferences.path().display());

    let css = Arc::new(CssVariableStore::new());
    let controller = ThemeController::builder(resolver)
        .session(session)
        .preferences(Arc::new(preferences))
        .presentation(css.clone())
        .build();

    controller
        .init()
        .await
        .context("Failed to initialize the theme controller")?;

    if cli.list {
        let themes = controller.available_themes().await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&themes)?);
        } else {
            for theme in themes {
                println!("{:<32} {}", theme.id, theme.name);
            }
        }
        controller.dispose();
        return Ok(());
    }

    if cli.dark || cli.light {
        controller
            .set_dark_mode(cli.dark)
            .await
            .context("Failed to change the color mode")?;
    }

    if let Some(theme_id) = &cli.theme {
        if !controller.apply_theme(theme_id).await {
            let reason = controller
                .error()
                .await
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            controller.dispose();
            return Err(anyhow!("Failed to apply theme '{theme_id}': {reason}"));
        }
    } else if cli.dynamic && !controller.apply_dynamic_theme(None).await {
        log::warn!("Dynamic theme could not be applied, keeping the current theme");
    }

    if let Some(error) = controller.error().await {
        eprintln!("Warning: {error}");
    }

    if cli.json {
        let snapshot = controller.snapshot().await;
        let output = serde_json::json!({
            "theme": snapshot.current_theme,
            "source": snapshot.source,
            "darkMode": snapshot.is_dark_mode,
            "variables": css.variables(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", css.render_css());
    }

    controller.dispose();
    Ok(())
}
