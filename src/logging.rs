//! Logging setup for dbkit.
//!
//! dbkit emits `tracing` events and installs no subscriber unless asked to.
//! Applications that already configure `tracing` need nothing from this
//! module.
//!
//! # Environment Variables
//!
//! - `DBKIT_DEBUG=true|1|yes` - enable debug logging
//! - `DBKIT_LOG_LEVEL=trace|debug|info|warn|error` - set a specific level
//! - `DBKIT_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! // Call once at startup; needs the `tracing-subscriber` feature to print.
//! dbkit::logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Enables debug logging.
pub const DEBUG_VAR: &str = "DBKIT_DEBUG";
/// Overrides the log level.
pub const LEVEL_VAR: &str = "DBKIT_LOG_LEVEL";
/// Selects the output format.
pub const FORMAT_VAR: &str = "DBKIT_LOG_FORMAT";

/// Check if `DBKIT_DEBUG` is set to "true", "1" or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).is_ok_and(|v| parse_flag(&v))
}

/// The configured log level. Defaults to "debug" with `DBKIT_DEBUG`,
/// otherwise "warn".
pub fn get_log_level() -> &'static str {
    resolve_level(env::var(LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// The configured log format. Defaults to "json".
pub fn get_log_format() -> &'static str {
    resolve_format(env::var(FORMAT_VAR).ok().as_deref())
}

/// Install a `tracing-subscriber` registry for the dbkit crates.
///
/// Does nothing unless `DBKIT_DEBUG` or `DBKIT_LOG_LEVEL` is set, and only
/// the first call to any `init*` function has an effect.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    init_inner(get_log_level());
}

/// Initialize logging at a specific level, ignoring `DBKIT_LOG_LEVEL`.
///
/// Unknown levels fall back to the `DBKIT_DEBUG` default.
pub fn init_with_level(level: &str) {
    init_inner(resolve_level(Some(level), is_debug_enabled()));
}

/// Initialize debug logging, as if `DBKIT_DEBUG=true` were set.
///
/// An explicit `DBKIT_LOG_LEVEL` still wins.
pub fn init_debug() {
    init_inner(resolve_level(env::var(LEVEL_VAR).ok().as_deref(), true));
}

#[cfg_attr(not(feature = "tracing-subscriber"), allow(unused_variables))]
fn init_inner(level: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let format = get_log_format();
            let filter = EnvFilter::try_new(format!(
                "dbkit={level},dbkit_config={level},dbkit_resources={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            match format {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(level = level, format = format, "dbkit logging initialized");
        }
    });
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn resolve_level(requested: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match requested.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn resolve_format(requested: Option<&str>) -> &'static str {
    match requested.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}
