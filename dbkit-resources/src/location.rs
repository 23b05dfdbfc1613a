//! Resolved resource locations.
//!
//! A resource path is resolved against a [`ResourceRoot`] into a URL whose
//! scheme tells how to reach it:
//!
//! ```text
//! file:///opt/app/resources/sql/daily.sql
//! jar:file:///opt/app/app.jar!/sql/daily.sql
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{ResourceError, ResourceResult};
use crate::path::normalize;
use crate::root::ResourceRoot;

/// URL scheme of resources in a plain directory.
pub const FILE_SCHEME: &str = "file";

/// URL scheme of resources packed in an archive.
pub const JAR_SCHEME: &str = "jar";

/// Separator between the archive URL and the entry inside it.
const ARCHIVE_SEPARATOR: &str = "!/";

/// How a location is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationScheme {
    /// A file or directory on disk.
    File,
    /// An entry inside a packed archive.
    Archive,
}

/// A resource path resolved against a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    url: Url,
    resource_path: String,
    archive: Option<PathBuf>,
}

impl ResourceLocation {
    /// Resolve `path` against `root`.
    pub fn resolve(root: &ResourceRoot, path: &str) -> ResourceResult<Self> {
        let resource_path = normalize(path)?;

        let (url, archive) = match root {
            ResourceRoot::Directory(dir) => {
                let target = if resource_path.is_empty() {
                    dir.clone()
                } else {
                    dir.join(&resource_path)
                };
                let url = Url::from_file_path(&target).map_err(|()| {
                    ResourceError::invalid_path(path, "root directory is not an absolute path")
                })?;
                (url, None)
            }
            ResourceRoot::Archive(archive) => {
                let archive_url = Url::from_file_path(archive).map_err(|()| {
                    ResourceError::invalid_path(path, "archive is not an absolute path")
                })?;
                let jar_url = format!("{JAR_SCHEME}:{archive_url}{ARCHIVE_SEPARATOR}{resource_path}");
                let url = Url::parse(&jar_url)
                    .map_err(|e| ResourceError::invalid_path(path, e.to_string()))?;
                (url, Some(archive.clone()))
            }
        };

        Ok(Self {
            url,
            resource_path,
            archive,
        })
    }

    /// The location URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The normalized resource path, relative to the root.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Inspect the URL scheme.
    pub fn scheme(&self) -> ResourceResult<LocationScheme> {
        match self.url.scheme() {
            FILE_SCHEME => Ok(LocationScheme::File),
            JAR_SCHEME => Ok(LocationScheme::Archive),
            other => Err(ResourceError::invalid_path(
                self.url.as_str(),
                format!("unsupported location scheme `{other}`"),
            )),
        }
    }

    /// Filesystem path of a `file:` location.
    pub fn file_path(&self) -> ResourceResult<PathBuf> {
        if self.url.scheme() != FILE_SCHEME {
            return Err(ResourceError::invalid_path(
                self.url.as_str(),
                "not a file location",
            ));
        }
        self.url
            .to_file_path()
            .map_err(|()| ResourceError::invalid_path(self.url.as_str(), "not a local file path"))
    }

    /// Archive path and entry name of a `jar:` location.
    ///
    /// The entry is the normalized resource path; the empty string is the
    /// archive root. The archive path is the one the location was resolved
    /// against, never re-read from the URL, which may contain `!/` inside
    /// the archive's own path.
    pub fn archive_entry(&self) -> ResourceResult<(&Path, &str)> {
        match (&self.archive, self.url.scheme()) {
            (Some(archive), JAR_SCHEME) => Ok((archive.as_path(), self.resource_path.as_str())),
            _ => Err(ResourceError::invalid_path(
                self.url.as_str(),
                "not an archive location",
            )),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
