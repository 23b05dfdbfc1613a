//! Error types for connection configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building a [`JdbcConfig`](crate::JdbcConfig).
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// The connection string could not be parsed as a URI.
    #[error("invalid connection URI `{input}`: {reason}")]
    #[diagnostic(
        code(dbkit::config::invalid_uri),
        help("expected [jdbc:]scheme://[user[:password]@]host[:port]/database[?query]")
    )]
    InvalidUri {
        input: String,
        reason: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required field was never set.
    #[error("missing required field: {0}")]
    #[diagnostic(code(dbkit::config::missing_field))]
    MissingField(String),

    /// A property key that does not map to any field.
    #[error("unknown configuration property `{0}`")]
    #[diagnostic(code(dbkit::config::unknown_property))]
    UnknownProperty(String),

    /// A property value that could not be converted to the field's type.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(dbkit::config::invalid_value))]
    InvalidValue { key: String, message: String },

    /// Environment variable not found.
    #[error("environment variable not found: {0}")]
    #[diagnostic(code(dbkit::config::env_not_found))]
    EnvNotFound(String),

    /// Invalid environment variable reference or value.
    #[error("invalid environment variable `{name}`: {message}")]
    #[diagnostic(code(dbkit::config::invalid_env_value))]
    InvalidEnvValue { name: String, message: String },

    /// Error reading a configuration file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(dbkit::config::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(dbkit::config::toml_error))]
    Toml {
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create an invalid URI error without an underlying parser error.
    pub fn invalid_uri(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUri {
            input: input.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from parsing the connection URI.
    pub fn is_invalid_uri(&self) -> bool {
        matches!(self, Self::InvalidUri { .. })
    }
}
