// --- File: crates/sharemeal_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Mount the session-less `/admin/...` operator endpoints.
    #[serde(default)]
    pub admin_routes: bool,
}

// --- Registry Config ---
// Tunables of the donation lifecycle. Every field has a default so the
// section can be omitted from the config files entirely.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Seconds between two expiration sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Lower bound of the simulated donor distance, in km.
    #[serde(default = "default_min_distance_km")]
    pub min_distance_km: f64,
    /// Upper bound of the simulated donor distance, in km.
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    /// Longest freshness window a donor may choose.
    #[serde(default = "default_max_freshness_hours")]
    pub max_freshness_hours: u32,
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_min_distance_km() -> f64 {
    0.5
}

fn default_max_distance_km() -> f64 {
    15.0
}

fn default_max_freshness_hours() -> u32 {
    48
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            min_distance_km: default_min_distance_km(),
            max_distance_km: default_max_distance_km(),
            max_freshness_hours: default_max_freshness_hours(),
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily rolling log files; stdout only when absent.
    #[serde(default)]
    pub file_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Load the demo listings and accounts at startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                admin_routes: false,
            },
            registry: RegistryConfig::default(),
            logging: LoggingConfig::default(),
            seed_demo_data: false,
        }
    }
}
