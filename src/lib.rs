//! # dbkit
//!
//! JDBC-style connection configuration and bundled resource loading.
//!
//! dbkit provides:
//! - [`JdbcConfig`], which parses `[jdbc:]scheme://[user[:password]@]host[:port]/database[?query]`
//!   into its parts and rebuilds a normalized `jdbc:` URL
//! - [`BundledResources`], which reads files shipped with the program from a
//!   directory or from a zip archive
//! - opt-in [`logging`] setup on top of `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbkit::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dbkit::logging::init();
//!
//!     let config = JdbcConfig::from_file("datasource.toml")?;
//!     config.validate()?;
//!     println!("connecting as {config}");
//!
//!     let resources = BundledResources::detect()?;
//!     for name in resources.list_directory_entries("sql")? {
//!         let query = resources.read_text(&format!("sql/{name}"))?;
//!         println!("{name}: {query}");
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod logging;

/// Connection configuration.
pub mod config {
    pub use dbkit_config::*;
}

/// Bundled resources.
pub mod resources {
    pub use dbkit_resources::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ConfigError, JdbcConfig, convert_scheme};
    pub use crate::resources::{BundledResources, ResourceError, ResourceRoot};
}

// Re-export key types at the crate root
pub use config::{ConfigError, JdbcConfig};
pub use resources::{BundledResources, ResourceError};
