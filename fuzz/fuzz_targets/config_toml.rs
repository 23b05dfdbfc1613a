//! Fuzz target for TOML data source files.
//!
//! Feeds arbitrary text through the loader, including `${...}` expansion.
//! The loader should only ever return errors, never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_toml
//! ```

#![no_main]

use dbkit_config::{EnvExpander, JdbcConfig, MapEnv};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let env = EnvExpander::with_source(
        MapEnv::new()
            .set("PGHOST", "db.example.com")
            .set("PGDATABASE", "mydb"),
    );

    let _ = env.expand(input);
    if let Ok(config) = JdbcConfig::from_toml_str_with_env(input, &env) {
        let _ = config.validate();
        let _ = format!("{config} {config:?}");
    }
});
