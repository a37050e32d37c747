//! Settings / Configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Names of environments for jobtracker-server.
/// Overrides serialization to force lower case in settings and
/// environment variables
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local environment (local testing).
    Local,
    /// Official Develop environment.
    Dev,
    /// Official environment.
    Staging,
    /// Official Production environment.
    Prod,
}

/// Implement display to force environment to lower case
impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

/// Database settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    /// Database URL
    pub url: String,
    /// Connect Timeout in seconds
    pub connect_timeout: u64,
}

/// Which [ApplicationStore](crate::setups::ApplicationStore) the server runs against.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL, configured through [Database].
    Postgres,
    /// Process-local map, lost on restart.
    Memory,
}

/// Storage settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
    /// Storage backend
    pub backend: StorageBackend,
}

/// Server settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    /// Server [AppEnvironment].
    pub environment: AppEnvironment,
    /// Server port.
    pub port: u16,
    /// Server metrics port.
    pub metrics_port: u16,
    /// Server timeout in milliseconds.
    pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
/// Application settings.
pub struct Settings {
    /// Server settings
    pub server: Server,
    /// Database settings
    pub database: Database,
    /// Storage settings
    pub storage: Storage,
    /// The path where the settings file resides.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, Self::environment())
    }

    fn load_with_env(
        config_path: Option<PathBuf>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(Self::default_path);
        // inject environment variables naming them properly on the settings
        // e.g. [database] url="foo"
        // would be injected with environment variable JOBTRACKER_DATABASE__URL="foo"
        let s = Config::builder()
            .add_source(File::with_name(&path.as_path().display().to_string()))
            .add_source(environment)
            .build()?;
        let mut settings: Self = s.try_deserialize()?;
        settings.path = Some(path);
        Ok(settings)
    }

    fn environment() -> Environment {
        Environment::with_prefix("JOBTRACKER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// The settings file shipped next to the crate manifest.
    pub fn default_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/settings.toml")
    }
}
