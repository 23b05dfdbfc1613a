//! Resource roots: where bundled resources live.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ResourceError, ResourceResult};

/// Environment variable that overrides resource root detection.
pub const RESOURCES_ENV_VAR: &str = "DBKIT_RESOURCES";

/// Directory name looked up next to the executable.
pub const DEFAULT_DIR_NAME: &str = "resources";

/// Archive name looked up next to the executable.
pub const DEFAULT_ARCHIVE_NAME: &str = "resources.zip";

/// The place bundled resources are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoot {
    /// Resources unpacked in a directory.
    Directory(PathBuf),
    /// Resources packed in a zip archive (`.zip` or `.jar`).
    Archive(PathBuf),
}

impl ResourceRoot {
    /// A directory root. Relative paths are made absolute against the
    /// current directory.
    pub fn directory(path: impl AsRef<Path>) -> ResourceResult<Self> {
        Ok(Self::Directory(absolute(path.as_ref())?))
    }

    /// An archive root. Relative paths are made absolute against the
    /// current directory.
    pub fn archive(path: impl AsRef<Path>) -> ResourceResult<Self> {
        Ok(Self::Archive(absolute(path.as_ref())?))
    }

    /// Pick the root kind from what exists on disk: a directory becomes a
    /// [`ResourceRoot::Directory`], a file a [`ResourceRoot::Archive`].
    pub fn from_path(path: impl AsRef<Path>) -> ResourceResult<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)
            .map_err(|e| ResourceError::from_io(path.display().to_string(), e))?;

        if meta.is_dir() {
            Self::directory(path)
        } else {
            Self::archive(path)
        }
    }

    /// Find the resource root of the running program.
    ///
    /// Checked in order:
    /// 1. the `DBKIT_RESOURCES` environment variable
    /// 2. a `resources` directory next to the executable
    /// 3. a `resources.zip` archive next to the executable
    pub fn detect() -> ResourceResult<Self> {
        if let Ok(path) = std::env::var(RESOURCES_ENV_VAR) {
            debug!(path = %path, "Resource root from {}", RESOURCES_ENV_VAR);
            return Self::from_path(path);
        }

        let exe = std::env::current_exe()
            .map_err(|e| ResourceError::read("<current executable>", e))?;
        let exe_dir = exe
            .parent()
            .ok_or_else(|| ResourceError::not_found(exe.display().to_string()))?;

        let root = Self::detect_in(exe_dir)?;
        info!(root = %root, "Resource root detected");
        Ok(root)
    }

    /// Look for `resources/` then `resources.zip` inside `dir`.
    pub fn detect_in(dir: impl AsRef<Path>) -> ResourceResult<Self> {
        let dir = dir.as_ref();

        let unpacked = dir.join(DEFAULT_DIR_NAME);
        if unpacked.is_dir() {
            return Self::directory(unpacked);
        }

        let packed = dir.join(DEFAULT_ARCHIVE_NAME);
        if packed.is_file() {
            return Self::archive(packed);
        }

        Err(ResourceError::not_found(unpacked.display().to_string()))
    }

    /// The filesystem path of the directory or archive.
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    /// Whether resources are packed in an archive.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

impl fmt::Display for ResourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "dir:{}", path.display()),
            Self::Archive(path) => write!(f, "archive:{}", path.display()),
        }
    }
}

fn absolute(path: &Path) -> ResourceResult<PathBuf> {
    std::path::absolute(path).map_err(|e| ResourceError::read(path.display().to_string(), e))
}
