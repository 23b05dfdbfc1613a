//! Storage backends for bundled resources.
//!
//! A [`ResourceLocation`] is served by one of two backends, chosen by the
//! location's URL scheme: [`PlainDirectory`] for `file:` locations and
//! [`PackedArchive`] for `jar:` locations.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zip::ZipArchive;

use crate::error::{ResourceError, ResourceResult};
use crate::location::{LocationScheme, ResourceLocation};

/// Access to resources in one kind of storage.
pub trait ResourceBackend {
    /// Names of the immediate children of a directory, in enumeration
    /// order, without the directory itself and without trailing slashes.
    ///
    /// A location naming a regular file has no children.
    fn list_direct_children(&self, location: &ResourceLocation) -> ResourceResult<Vec<String>>;

    /// Read a file as UTF-8 text.
    fn read_text(&self, location: &ResourceLocation) -> ResourceResult<String>;

    /// Whether the location names an existing file or directory.
    fn exists(&self, location: &ResourceLocation) -> ResourceResult<bool>;
}

/// Pick the backend that serves `location`.
pub fn backend_for(location: &ResourceLocation) -> ResourceResult<&'static dyn ResourceBackend> {
    Ok(match location.scheme()? {
        LocationScheme::File => &PlainDirectory,
        LocationScheme::Archive => &PackedArchive,
    })
}

/// Resources unpacked on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDirectory;

impl ResourceBackend for PlainDirectory {
    fn list_direct_children(&self, location: &ResourceLocation) -> ResourceResult<Vec<String>> {
        let dir = location.file_path()?;
        let display = location.resource_path();

        let meta = std::fs::metadata(&dir).map_err(|e| ResourceError::from_io(display, e))?;
        if !meta.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| ResourceError::from_io(display, e))? {
            let entry = entry.map_err(|e| ResourceError::read(display, e))?;
            let name = entry.file_name().to_string_lossy().trim_end_matches('/').to_string();
            names.push(name);
        }

        debug!(dir = %dir.display(), count = names.len(), "Listed directory");
        Ok(names)
    }

    fn read_text(&self, location: &ResourceLocation) -> ResourceResult<String> {
        let file = location.file_path()?;
        std::fs::read_to_string(&file)
            .map_err(|e| ResourceError::from_io(location.resource_path(), e))
    }

    fn exists(&self, location: &ResourceLocation) -> ResourceResult<bool> {
        Ok(location.file_path()?.exists())
    }
}

/// Resources packed in a zip archive.
///
/// The archive is opened for a single call and closed when the call
/// returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedArchive;

impl ResourceBackend for PackedArchive {
    fn list_direct_children(&self, location: &ResourceLocation) -> ResourceResult<Vec<String>> {
        let (archive_path, dir) = location.archive_entry()?;
        let handle = ArchiveHandle::open(archive_path, dir)?;

        let names = direct_children(handle.archive.file_names(), dir)
            .ok_or_else(|| ResourceError::not_found(dir))?;

        debug!(
            archive = %archive_path.display(),
            dir = dir,
            count = names.len(),
            "Listed archive directory"
        );
        Ok(names)
    }

    fn read_text(&self, location: &ResourceLocation) -> ResourceResult<String> {
        let (archive_path, entry) = location.archive_entry()?;
        let mut handle = ArchiveHandle::open(archive_path, entry)?;

        let mut file = handle
            .archive
            .by_name(entry)
            .map_err(|e| ResourceError::from_zip(entry, e))?;
        if file.is_dir() {
            return Err(ResourceError::not_found(entry));
        }

        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| ResourceError::read(entry, e))?;
        Ok(text)
    }

    fn exists(&self, location: &ResourceLocation) -> ResourceResult<bool> {
        let (archive_path, entry) = location.archive_entry()?;
        let handle = match ArchiveHandle::open(archive_path, entry) {
            Ok(handle) => handle,
            Err(e) if e.is_not_found() => return Ok(false),
            Err(e) => return Err(e),
        };
        Ok(direct_children(handle.archive.file_names(), entry).is_some())
    }
}

/// An open archive, closed when dropped.
struct ArchiveHandle {
    archive: ZipArchive<File>,
    path: PathBuf,
}

impl ArchiveHandle {
    fn open(path: &Path, entry: &str) -> ResourceResult<Self> {
        let file = File::open(path).map_err(|e| ResourceError::from_io(entry, e))?;
        let archive = ZipArchive::new(file).map_err(|e| ResourceError::from_zip(entry, e))?;
        trace!(archive = %path.display(), "Archive opened");
        Ok(Self {
            archive,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for ArchiveHandle {
    fn drop(&mut self) {
        trace!(archive = %self.path.display(), "Archive closed");
    }
}

/// Immediate children of `dir` among archive entry names.
///
/// Returns `None` when nothing in the archive is at or below `dir`. An
/// entry equal to `dir` (a file) yields an empty list. Children known only
/// through deeper entries are reported once, where they first appear.
fn direct_children<'a>(names: impl Iterator<Item = &'a str>, dir: &str) -> Option<Vec<String>> {
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{dir}/")
    };

    let mut found = dir.is_empty();
    let mut seen = HashSet::new();
    let mut children = Vec::new();

    for name in names {
        if name == dir {
            found = true;
            continue;
        }
        let Some(rest) = name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        found = true;

        let child = rest.split('/').next().unwrap_or_default();
        if !child.is_empty() && seen.insert(child) {
            children.push(child.to_string());
        }
    }

    found.then_some(children)
}
