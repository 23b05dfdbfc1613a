//! Environment variable expansion for configuration values.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ConfigError, ConfigResult};

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment backed by a map, for tests and embedded configuration.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty map environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Expands environment variable references in strings.
///
/// Supported syntax:
/// - `${VAR}` - required variable
/// - `${VAR:-default}` - variable with a fallback when unset or empty
/// - `${VAR:?message}` - required, failing with `message`
/// - `$VAR` - simple reference
/// - `$$` - a literal `$`
#[derive(Debug, Clone, Default)]
pub struct EnvExpander<S: EnvSource = ProcessEnv> {
    source: S,
}

impl EnvExpander<ProcessEnv> {
    /// Create an expander over the process environment.
    pub fn new() -> Self {
        Self { source: ProcessEnv }
    }
}

impl<S: EnvSource> EnvExpander<S> {
    /// Create an expander over a custom source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Expand every variable reference in `input`.
    ///
    /// ```rust
    /// use dbkit_config::{EnvExpander, MapEnv};
    ///
    /// let expander = EnvExpander::with_source(MapEnv::new().set("DB_HOST", "db.internal"));
    /// assert_eq!(
    ///     expander.expand("postgres://${DB_HOST}:${DB_PORT:-5432}/events").unwrap(),
    ///     "postgres://db.internal:5432/events"
    /// );
    /// ```
    pub fn expand(&self, input: &str) -> ConfigResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }

            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    result.push_str(&self.expand_braced(&mut chars)?);
                }
                Some(next) if next.is_alphabetic() || *next == '_' => {
                    result.push_str(&self.expand_simple(&mut chars)?);
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    fn expand_braced(&self, chars: &mut Peekable<Chars<'_>>) -> ConfigResult<String> {
        let mut body = String::new();
        let mut closed = false;

        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            body.push(c);
        }

        let (name, modifier) = match body.split_once(':') {
            Some((name, modifier)) => (name.to_string(), Some(modifier)),
            None => (body.clone(), None),
        };

        if !closed {
            return Err(ConfigError::InvalidEnvValue {
                name,
                message: "unterminated `${`".to_string(),
            });
        }
        if name.is_empty() {
            return Err(ConfigError::InvalidEnvValue {
                name,
                message: "empty variable name".to_string(),
            });
        }

        let (kind, text) = split_modifier(modifier);

        match self.source.get(&name) {
            Some(value) if kind.is_none() || !value.is_empty() => Ok(value),
            _ => match kind {
                Some('-') => Ok(text.to_string()),
                Some('?') => Err(ConfigError::InvalidEnvValue {
                    message: if text.is_empty() {
                        format!("required variable `{name}` is not set")
                    } else {
                        text.to_string()
                    },
                    name,
                }),
                _ => Err(ConfigError::EnvNotFound(name)),
            },
        }
    }

    fn expand_simple(&self, chars: &mut Peekable<Chars<'_>>) -> ConfigResult<String> {
        let mut name = String::new();

        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                chars.next();
            } else {
                break;
            }
        }

        self.source
            .get(&name)
            .ok_or(ConfigError::EnvNotFound(name))
    }
}

/// Split `-default` / `?message` into the modifier char and its text.
fn split_modifier(modifier: Option<&str>) -> (Option<char>, &str) {
    let Some(raw) = modifier else {
        return (None, "");
    };
    let mut chars = raw.chars();
    match chars.next() {
        Some(kind) => (Some(kind), chars.as_str()),
        None => (None, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander() -> EnvExpander<MapEnv> {
        EnvExpander::with_source(
            MapEnv::new()
                .set("HOST", "localhost")
                .set("PORT", "5432")
                .set("USER", "reporter")
                .set("EMPTY", ""),
        )
    }

    #[test]
    fn test_expand_simple() {
        assert_eq!(
            expander().expand("postgres://$HOST/db").unwrap(),
            "postgres://localhost/db"
        );
    }

    #[test]
    fn test_expand_braced() {
        assert_eq!(
            expander().expand("postgres://${USER}@${HOST}:${PORT}/db").unwrap(),
            "postgres://reporter@localhost:5432/db"
        );
    }

    #[test]
    fn test_expand_default() {
        let expander = expander();
        assert_eq!(expander.expand("${HOST:-other}").unwrap(), "localhost");
        assert_eq!(expander.expand("${MISSING:-other}").unwrap(), "other");
        assert_eq!(expander.expand("${EMPTY:-other}").unwrap(), "other");
        assert_eq!(expander.expand("${EMPTY}").unwrap(), "");
        assert_eq!(expander.expand("${MISSING:-a:b}").unwrap(), "a:b");
    }

    #[test]
    fn test_expand_required() {
        let err = expander().expand("${MISSING:?set MISSING first}").unwrap_err();
        assert!(err.to_string().contains("set MISSING first"));

        let err = expander().expand("${MISSING:?}").unwrap_err();
        assert!(err.to_string().contains("required variable `MISSING`"));
    }

    #[test]
    fn test_expand_missing() {
        assert!(matches!(
            expander().expand("${MISSING}"),
            Err(ConfigError::EnvNotFound(name)) if name == "MISSING"
        ));
        assert!(matches!(
            expander().expand("$MISSING"),
            Err(ConfigError::EnvNotFound(_))
        ));
    }

    #[test]
    fn test_literal_dollars() {
        let expander = expander();
        assert_eq!(expander.expand("cost: $5").unwrap(), "cost: $5");
        assert_eq!(expander.expand("pa$$word").unwrap(), "pa$word");
        assert_eq!(expander.expand("trailing $").unwrap(), "trailing $");
    }

    #[test]
    fn test_malformed_references() {
        assert!(matches!(
            expander().expand("${HOST"),
            Err(ConfigError::InvalidEnvValue { .. })
        ));
        assert!(matches!(
            expander().expand("${}"),
            Err(ConfigError::InvalidEnvValue { .. })
        ));
    }
}
