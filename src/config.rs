use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{EmptyFilterPolicy, SearchOptions, DEFAULT_MAX_DISTANCE_METERS};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            redis_url: None,
            ttl_secs: None,
            l1_cache_size: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSettings {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
    pub token: Option<String>,
    #[serde(default = "default_github_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            token: None,
            timeout_secs: default_github_timeout_secs(),
        }
    }
}

fn default_true() -> bool { true }
fn default_github_api_url() -> String { "https://api.github.com".to_string() }
fn default_github_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_distance_meters")]
    pub max_distance_meters: f64,
    #[serde(default)]
    pub empty_filter: EmptyFilterPolicy,
    pub max_results: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_distance_meters: default_max_distance_meters(),
            empty_filter: EmptyFilterPolicy::default(),
            max_results: None,
        }
    }
}

impl From<&SearchSettings> for SearchOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            max_distance_meters: settings.max_distance_meters,
            empty_filter: settings.empty_filter,
            max_results: settings.max_results,
        }
    }
}

fn default_max_distance_meters() -> f64 { DEFAULT_MAX_DISTANCE_METERS }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DEVRADAR__)
    /// 5. `DATABASE_URL`, `GITHUB_TOKEN`, `LOG_LEVEL` and `LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DEVRADAR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("DEVRADAR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Unprefixed variables and the keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("GITHUB_TOKEN", "github.token"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

/// Apply the conventional unprefixed variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    apply_overrides(settings, |name| std::env::var(name).ok())
}

fn apply_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (name, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(name) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()
}
