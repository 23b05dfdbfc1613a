//! # dbkit-resources
//!
//! Bundled resource loading for dbkit.
//!
//! Resources are files shipped with the program: SQL templates, report
//! definitions, default configuration. They live under a
//! [`ResourceRoot`], either a plain directory or a zip archive, and are
//! addressed by slash-separated relative paths.
//!
//! This crate provides:
//! - [`BundledResources`] to read a resource as text or list a directory
//! - [`ResourceLocation`], the `file:` / `jar:` URL a path resolves to
//! - the [`ResourceBackend`] trait with a [`PlainDirectory`] and a
//!   [`PackedArchive`] implementation
//!
//! All reads and listings in a process are serialized on one lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dbkit_resources::{BundledResources, ResourceRoot};
//!
//! let resources = BundledResources::new(ResourceRoot::archive("dist/app.jar")?);
//! for name in resources.list_directory_entries("sql")? {
//!     let query = resources.read_text(&format!("sql/{name}"))?;
//!     println!("{name}: {} bytes", query.len());
//! }
//! # Ok::<(), dbkit_resources::ResourceError>(())
//! ```

pub mod backend;
pub mod error;
pub mod location;
pub mod path;
pub mod reader;
pub mod root;

pub use backend::{PackedArchive, PlainDirectory, ResourceBackend, backend_for};
pub use error::{ResourceError, ResourceResult};
pub use location::{LocationScheme, ResourceLocation};
pub use reader::BundledResources;
pub use root::ResourceRoot;
