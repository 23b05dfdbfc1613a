//! Structured fuzz target for JDBC URLs.
//!
//! Builds URLs from well-formed parts so the fuzzer spends its time past
//! the scheme check.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_jdbc_url_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use dbkit_config::{JdbcConfig, convert_scheme};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzScheme {
    Postgres,
    Postgresql,
    Mysql,
    Other(String),
}

#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    jdbc_prefix: bool,
    scheme: FuzzScheme,
    user: Option<String>,
    password: Option<String>,
    host: String,
    port: Option<u16>,
    database: String,
    query: Option<String>,
}

impl FuzzUrl {
    fn scheme(&self) -> String {
        match &self.scheme {
            FuzzScheme::Postgres => "postgres".into(),
            FuzzScheme::Postgresql => "postgresql".into(),
            FuzzScheme::Mysql => "mysql".into(),
            FuzzScheme::Other(s) => {
                let s: String = s.chars().filter(char::is_ascii_alphanumeric).take(16).collect();
                format!("x{}", s.to_ascii_lowercase())
            }
        }
    }

    fn to_url(&self) -> String {
        let mut url = String::new();
        if self.jdbc_prefix {
            url.push_str("jdbc:");
        }
        url.push_str(&self.scheme());
        url.push_str("://");
        if let Some(user) = &self.user {
            url.push_str(&sanitize(user));
            if let Some(password) = &self.password {
                url.push(':');
                url.push_str(&sanitize(password));
            }
            url.push('@');
        }
        url.push_str(&sanitize(&self.host));
        if let Some(port) = self.port {
            url.push_str(&format!(":{port}"));
        }
        url.push('/');
        url.push_str(&sanitize(&self.database));
        if let Some(query) = &self.query {
            url.push('?');
            url.push_str(&sanitize(query));
        }
        url
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .take(64)
        .collect()
}

fuzz_target!(|input: FuzzUrl| {
    let url = input.to_url();
    let Ok(config) = JdbcConfig::from_url(&url) else {
        return;
    };

    let normalized = config.normalized_url().unwrap_or_default();
    let expected_prefix = format!("jdbc:{}://", convert_scheme(&input.scheme()));
    assert!(normalized.starts_with(&expected_prefix), "{url} -> {normalized}");
    assert!(!normalized.contains('@'), "credentials leaked into {normalized}");

    if let Some(port) = input.port {
        if config.host().is_some() {
            assert_eq!(config.port(), Some(port));
        }
    }
});
