//! JDBC scheme normalization.

/// Scheme aliases rewritten to the name the JDBC driver registers.
///
/// Schemes not listed here are passed through unchanged.
const SCHEME_ALIASES: &[(&str, &str)] = &[("postgres", "postgresql")];

/// Map a URI scheme to its JDBC driver scheme.
///
/// ```rust
/// use dbkit_config::convert_scheme;
///
/// assert_eq!(convert_scheme("postgres"), "postgresql");
/// assert_eq!(convert_scheme("mysql"), "mysql");
/// ```
pub fn convert_scheme(scheme: &str) -> &str {
    SCHEME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == scheme)
        .map_or(scheme, |(_, canonical)| *canonical)
}
