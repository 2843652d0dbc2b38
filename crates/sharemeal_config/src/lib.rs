//! Configuration loading for ShareMeal.
//!
//! Sources, later ones winning:
//!
//! 1. `<config dir>/default.toml`
//! 2. `<config dir>/<RUN_ENV>.toml` (`RUN_ENV` defaults to `debug`)
//! 3. Environment variables prefixed with `SHAREMEAL__`, sections separated
//!    by `__` (e.g. `SHAREMEAL__SERVER__PORT=9000`)
//!
//! A `.env` file is loaded into the process environment once before the
//! environment source is read.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// The prefix for configuration environment variables
pub const ENV_PREFIX: &str = "SHAREMEAL";

/// The separator for configuration environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Environment variable overriding the directory holding the TOML files
pub const CONFIG_DIR_VAR: &str = "SHAREMEAL_CONFIG_DIR";

/// Upper bound for `registry.max_freshness_hours` (one year)
pub const MAX_FRESHNESS_HOURS_LIMIT: u32 = 24 * 365;

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// `DOTENV_OVERRIDE` names an alternative file; otherwise `.env` in the
/// working directory is used. A missing file is not an error. Returns the
/// path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Loads the application configuration from the default locations.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var(CONFIG_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
///
/// Both TOML files are optional; the environment source is always applied.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

/// Convert a configuration path to an environment variable name
///
/// `"server.host"` becomes `"SHAREMEAL__SERVER__HOST"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', ENV_SEPARATOR);
    format!("{}{}{}", ENV_PREFIX, ENV_SEPARATOR, path).to_uppercase()
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let registry = &config.registry;
    if registry.sweep_interval_secs == 0 {
        return Err(ConfigError::Message(
            "registry.sweep_interval_secs must be positive".to_string(),
        ));
    }
    if !(registry.min_distance_km >= 0.0 && registry.min_distance_km <= registry.max_distance_km) {
        return Err(ConfigError::Message(format!(
            "registry distance range is invalid: {} to {} km",
            registry.min_distance_km, registry.max_distance_km
        )));
    }
    if registry.max_freshness_hours == 0
        || registry.max_freshness_hours > MAX_FRESHNESS_HOURS_LIMIT
    {
        return Err(ConfigError::Message(format!(
            "registry.max_freshness_hours must be between 1 and {}",
            MAX_FRESHNESS_HOURS_LIMIT
        )));
    }
    Ok(())
}
