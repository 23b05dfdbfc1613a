//! Fuzz target for JDBC URL parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_jdbc_url
//! ```

#![no_main]

use dbkit_config::JdbcConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let mut config = JdbcConfig::new();
    config.set_username("before").set_password("before");

    match config.set_url(input) {
        Ok(_) => {
            // A normalized URL always parses back to itself.
            let normalized = config.normalized_url().unwrap_or_default().to_string();
            let reparsed = JdbcConfig::from_url(&normalized)
                .unwrap_or_else(|e| panic!("normalized URL {normalized:?} rejected: {e}"));
            assert_eq!(reparsed.normalized_url(), Some(normalized.as_str()));
            assert_eq!(reparsed.host(), config.host());
            assert_eq!(reparsed.port(), config.port());
            assert_eq!(reparsed.database(), config.database());
        }
        Err(_) => {
            // A rejected URL leaves the configuration untouched.
            assert_eq!(config.raw_url(), None);
            assert_eq!(config.username(), Some("before"));
            assert_eq!(config.password(), "before");
        }
    }
});
