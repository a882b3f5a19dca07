use std::path::{Path, PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{defaults, validate};

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

/// Loads a `.env` file into the process environment, searching the working
/// directory and its parents before the package root. Returns the file used.
pub fn load_dotenv() -> Result<PathBuf, dotenvy::Error> {
    dotenvy::dotenv().or_else(|_| {
        dotenvy::from_filename(Path::new(env!("CARGO_MANIFEST_DIR")).join(".env"))
    })
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Reads `APP_<SECTION>__<KEY>` variables, e.g. `APP_DATABASE__URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config_rs::Environment::default())
    }

    fn from_environment(env: config_rs::Environment) -> Result<Self> {
        let settings = config_rs::Config::builder()
            .add_source(
                env.prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read APP_* environment variables")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize APP_* environment variables")?;

        validate::validate(&cfg)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
    /// Static assets served under `/static`. Resolved next to the working
    /// directory or the executable when unset.
    pub public_dir: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
            public_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub sync_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DATABASE_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS as u32,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE as u32,
            sync_schema: defaults::DEFAULT_DB_SYNC_SCHEMA,
        }
    }
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use ::config as config_rs;

    use super::AppConfig;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_environment(config_rs::Environment::default().source(Some(source)))
    }

    #[test]
    fn nested_keys_override_defaults() {
        let cfg = load(&[
            ("APP_GENERAL__PORT", "8080"),
            ("APP_DATABASE__URL", "sqlite::memory:"),
            ("APP_DATABASE__SYNC_SCHEMA", "false"),
            ("OTHER_GENERAL__PORT", "9090"),
        ])
        .expect("config should load");
        assert_eq!(cfg.general.port, 8080);
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert!(!cfg.database.sync_schema);
        assert_eq!(cfg.logging.rust_log, AppConfig::default().logging.rust_log);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = load(&[]).expect("config should load");
        assert_eq!(cfg.general.host, AppConfig::default().general.host);
        assert_eq!(cfg.database.max_connections, AppConfig::default().database.max_connections);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load(&[("APP_DATABASE__MAX_CONNECTIONS", "0")]).expect_err("zero pool");
        assert!(format!("{err:#}").contains("max_connections"));
    }
}
