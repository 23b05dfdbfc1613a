//! Key-value property binding for [`JdbcConfig`].
//!
//! Property names follow the flat `key=value` layout used by data source
//! configuration files:
//!
//! ```text
//! url=jdbc:postgres://localhost:5432/events
//! username=reporter
//! max-connection=8
//! connection.disable-pool=false
//! connection.max-life-time=1800000
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::jdbc::JdbcConfig;

/// Property key for the connection URL.
pub const URL: &str = "url";
/// Property key for the username.
pub const USERNAME: &str = "username";
/// Property key for the password.
pub const PASSWORD: &str = "password";
/// Property key for the table name.
pub const TABLE: &str = "table";
/// Property key for the data source name.
pub const DATA_SOURCE: &str = "data-source";
/// Property key for the pool size.
pub const MAX_CONNECTION: &str = "max-connection";
/// Property key that disables pooling.
pub const DISABLE_POOL: &str = "connection.disable-pool";
/// Property key for the connection lifetime, in milliseconds.
pub const MAX_LIFE_TIME: &str = "connection.max-life-time";
/// Property key for the idle timeout, in milliseconds.
pub const MAX_IDLE_TIMEOUT: &str = "connection.max-idle-timeout";

/// Every property key understood by [`JdbcConfig::apply_property`].
pub const KNOWN_KEYS: &[&str] = &[
    URL,
    USERNAME,
    PASSWORD,
    TABLE,
    DATA_SOURCE,
    MAX_CONNECTION,
    DISABLE_POOL,
    MAX_LIFE_TIME,
    MAX_IDLE_TIMEOUT,
];

impl JdbcConfig {
    /// Apply a single property.
    pub fn apply_property(&mut self, key: &str, value: &str) -> ConfigResult<&mut Self> {
        debug!(key = key, "JdbcConfig::apply_property()");

        match key {
            URL => return self.set_url(value),
            USERNAME => self.set_username(value),
            PASSWORD => self.set_password(value),
            TABLE => self.set_table(value),
            DATA_SOURCE => self.set_data_source(value),
            MAX_CONNECTION => self.set_max_connections(parse_u32(key, value)?),
            DISABLE_POOL => self.set_pool_disabled(parse_bool(key, value)?),
            MAX_LIFE_TIME => self.set_connection_max_lifetime(parse_millis(key, value)?),
            MAX_IDLE_TIMEOUT => self.set_connection_idle_timeout(parse_millis(key, value)?),
            other => return Err(ConfigError::UnknownProperty(other.to_string())),
        };

        Ok(self)
    }

    /// Build a configuration from key-value pairs.
    ///
    /// The `url` key is applied first so that explicit `username` and
    /// `password` keys win over credentials embedded in the URL.
    ///
    /// ```rust
    /// use dbkit_config::JdbcConfig;
    ///
    /// let config = JdbcConfig::from_properties([
    ///     ("username", "reporter"),
    ///     ("url", "postgres://admin:pw@localhost/events"),
    ///     ("max-connection", "8"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(config.username(), Some("reporter"));
    /// assert_eq!(config.max_connections(), Some(8));
    /// ```
    pub fn from_properties<I, K, V>(properties: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (url, rest): (Vec<_>, Vec<_>) = properties
            .into_iter()
            .partition(|(key, _)| key.as_ref() == URL);

        let mut config = Self::new();
        for (key, value) in url.iter().chain(rest.iter()) {
            config.apply_property(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }

    /// Build a configuration from the properties under `prefix.`.
    ///
    /// Keys outside the prefix are ignored, so one property set can hold
    /// several data sources.
    pub fn from_properties_with_prefix<I, K, V>(prefix: &str, properties: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, V)> = properties
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref();
                match key
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('.'))
                {
                    Some(stripped) => Some((stripped.to_string(), value)),
                    None => {
                        warn!(key = key, prefix = prefix, "Ignoring property outside prefix");
                        None
                    }
                }
            })
            .collect();

        Self::from_properties(scoped)
    }
}

fn parse_u32(key: &str, value: &str) -> ConfigResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid_value(key, format!("expected an unsigned integer, got `{value}`")))
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::invalid_value(
            key,
            format!("expected `true` or `false`, got `{value}`"),
        )),
    }
}

fn parse_millis(key: &str, value: &str) -> ConfigResult<Duration> {
    value
        .trim()
        .parse()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::invalid_value(key, format!("expected milliseconds, got `{value}`")))
}
