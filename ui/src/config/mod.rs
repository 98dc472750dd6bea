use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod limits;
pub mod session;
pub mod setup;
pub mod theme;
pub mod validation;

pub use app::AppConfig;
pub use session::SessionSettings;
pub use theme::ThemeSettings;
pub use validation::{ConfigLoadResult, ConfigValidationError};

fn env_source() -> Environment {
    Environment::with_prefix("SCHOOLHUB")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file and `SCHOOLHUB__*` environment variables.
///
/// An explicit `path` must exist. Without one, `schoolhub.toml` is looked up in
/// the working directory and then the config directory, and may be absent.
/// Environment entries override file values.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    match path {
        Some(path) => builder = builder.add_source(File::from(path).required(true)),
        None => {
            if let Some(found) = setup::find_config_file() {
                log::debug!("Using config file {}", found.display());
                builder = builder.add_source(File::from(found).required(false));
            }
        }
    }

    finish(builder.add_source(env_source()))
}

/// Load configuration from an in-memory TOML document.
pub fn load_config_from_str(toml: &str) -> ConfigLoadResult {
    finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> ConfigLoadResult {
    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your schoolhub.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => match app_config.validate() {
            Ok(()) => ConfigLoadResult::Success(Box::new(app_config)),
            Err(errors) => ConfigLoadResult::ValidationError(errors),
        },
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// `[logging]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
