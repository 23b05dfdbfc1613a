//! Loading [`JdbcConfig`] from TOML files and the environment.
//!
//! ```toml
//! url = "jdbc:postgres://${DB_HOST:-localhost}:5432/events"
//! username = "reporter"
//! password = "${DB_PASSWORD}"
//! table = "page_views"
//! data-source = "warehouse"
//! max-connection = 8
//!
//! [connection]
//! disable-pool = false
//! max-life-time = 1800000
//! max-idle-timeout = 60000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::env::{EnvExpander, EnvSource, ProcessEnv};
use crate::error::{ConfigError, ConfigResult};
use crate::jdbc::JdbcConfig;

/// Environment variable read by [`JdbcConfig::from_env`].
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// On-disk layout of a data source file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct JdbcConfigFile {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    table: Option<String>,
    data_source: Option<String>,
    max_connection: Option<u32>,
    #[serde(default)]
    connection: ConnectionSection,
}

/// The `[connection]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConnectionSection {
    #[serde(default)]
    disable_pool: bool,
    /// Milliseconds.
    max_life_time: Option<u64>,
    /// Milliseconds.
    max_idle_timeout: Option<u64>,
}

impl JdbcConfigFile {
    fn into_config<S: EnvSource>(self, env: &EnvExpander<S>) -> ConfigResult<JdbcConfig> {
        let mut config = JdbcConfig::new();

        // URL first: explicit credentials below override the ones it carries.
        if let Some(url) = self.url {
            config.set_url(env.expand(&url)?)?;
        }
        if let Some(username) = self.username {
            config.set_username(env.expand(&username)?);
        }
        if let Some(password) = self.password {
            config.set_password(env.expand(&password)?);
        }
        if let Some(table) = self.table {
            config.set_table(env.expand(&table)?);
        }
        if let Some(data_source) = self.data_source {
            config.set_data_source(env.expand(&data_source)?);
        }
        if let Some(max) = self.max_connection {
            config.set_max_connections(max);
        }

        config.set_pool_disabled(self.connection.disable_pool);
        if let Some(ms) = self.connection.max_life_time {
            config.set_connection_max_lifetime(Duration::from_millis(ms));
        }
        if let Some(ms) = self.connection.max_idle_timeout {
            config.set_connection_idle_timeout(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

impl JdbcConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), config = %config, "JdbcConfig loaded from file");
        Ok(config)
    }

    /// Parse configuration from a TOML string, expanding variables from the
    /// process environment.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::from_toml_str_with_env(content, &EnvExpander::<ProcessEnv>::new())
    }

    /// Parse configuration from a TOML string with a custom environment.
    pub fn from_toml_str_with_env<S: EnvSource>(
        content: &str,
        env: &EnvExpander<S>,
    ) -> ConfigResult<Self> {
        let file: JdbcConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Toml { source: e })?;
        file.into_config(env)
    }

    /// Create configuration from the `DATABASE_URL` environment variable.
    pub fn from_env() -> ConfigResult<Self> {
        info!("Loading connection configuration from {}", DATABASE_URL_VAR);
        let url = std::env::var(DATABASE_URL_VAR)
            .map_err(|_| ConfigError::EnvNotFound(DATABASE_URL_VAR.to_string()))?;
        Self::from_url(&url)
    }
}
