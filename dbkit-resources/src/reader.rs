//! Reading bundled resources.

use parking_lot::Mutex;
use tracing::debug;

use crate::backend::backend_for;
use crate::error::{ResourceError, ResourceResult};
use crate::location::ResourceLocation;
use crate::path::join_namespace;
use crate::root::ResourceRoot;

/// Serializes every read and listing in the process.
static RESOURCE_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Reads resources bundled with the program.
///
/// Works the same whether the resources sit in a directory or are packed in
/// a zip archive.
///
/// ```rust,no_run
/// use dbkit_resources::BundledResources;
///
/// let resources = BundledResources::detect()?;
/// let query = resources.read_text("sql/daily_report.sql")?;
/// let templates = resources.list_directory_entries("templates")?;
/// # Ok::<(), dbkit_resources::ResourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BundledResources {
    root: ResourceRoot,
}

impl BundledResources {
    /// Read resources from `root`.
    pub fn new(root: ResourceRoot) -> Self {
        Self { root }
    }

    /// Read resources from the root detected for the running program.
    pub fn detect() -> ResourceResult<Self> {
        ResourceRoot::detect().map(Self::new)
    }

    /// The resource root.
    pub fn root(&self) -> &ResourceRoot {
        &self.root
    }

    /// Resolve a resource path to its location.
    pub fn resolve(&self, path: &str) -> ResourceResult<ResourceLocation> {
        ResourceLocation::resolve(&self.root, path)
    }

    /// Read a resource as UTF-8 text.
    ///
    /// A missing resource is an error, never an empty string.
    pub fn read_text(&self, path: &str) -> ResourceResult<String> {
        let location = self.resolve(path)?;
        if location.resource_path().is_empty() {
            return Err(ResourceError::invalid_path(path, "the resource root is not a file"));
        }

        let _guard = RESOURCE_LOCK.lock();
        debug!(location = %location, "BundledResources::read_text()");
        backend_for(&location)?.read_text(&location)
    }

    /// Read a resource relative to `namespace`.
    ///
    /// The namespace is slash-separated (`reports/sql`) or a module path
    /// (`my_app::reports`). A `path` starting with `/` ignores it.
    pub fn read_text_in(&self, namespace: &str, path: &str) -> ResourceResult<String> {
        let joined = join_namespace(namespace, path)?;
        self.read_text(&joined)
    }

    /// Names of the immediate children of a bundled directory.
    ///
    /// Names come back in the order the directory or archive enumerates
    /// them; callers must not rely on any sorting.
    pub fn list_directory_entries(&self, path: &str) -> ResourceResult<Vec<String>> {
        let location = self.resolve(path)?;

        let _guard = RESOURCE_LOCK.lock();
        debug!(location = %location, "BundledResources::list_directory_entries()");
        backend_for(&location)?.list_direct_children(&location)
    }

    /// Whether a resource file or directory exists.
    pub fn exists(&self, path: &str) -> ResourceResult<bool> {
        let location = self.resolve(path)?;

        let _guard = RESOURCE_LOCK.lock();
        backend_for(&location)?.exists(&location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn directory_resources() -> (tempfile::TempDir, BundledResources) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sql/nested")).unwrap();
        fs::write(dir.path().join("sql/daily.sql"), "SELECT 1").unwrap();
        fs::write(dir.path().join("sql/empty.sql"), "").unwrap();
        fs::write(dir.path().join("sql/nested/deep.sql"), "SELECT 2").unwrap();

        let resources = BundledResources::new(ResourceRoot::directory(dir.path()).unwrap());
        (dir, resources)
    }

    #[test]
    fn test_read_text() {
        let (_dir, resources) = directory_resources();
        assert_eq!(resources.read_text("sql/daily.sql").unwrap(), "SELECT 1");
        assert_eq!(resources.read_text("/sql/daily.sql").unwrap(), "SELECT 1");
    }

    #[test]
    fn test_read_empty_file() {
        let (_dir, resources) = directory_resources();
        assert_eq!(resources.read_text("sql/empty.sql").unwrap(), "");
    }

    #[test]
    fn test_read_missing() {
        let (_dir, resources) = directory_resources();
        assert!(resources.read_text("sql/missing.sql").unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_root_rejected() {
        let (_dir, resources) = directory_resources();
        assert!(matches!(
            resources.read_text("/"),
            Err(ResourceError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_read_text_in_namespace() {
        let (_dir, resources) = directory_resources();
        assert_eq!(resources.read_text_in("sql::nested", "deep.sql").unwrap(), "SELECT 2");
        assert_eq!(resources.read_text_in("sql/nested", "/sql/daily.sql").unwrap(), "SELECT 1");
    }

    #[test]
    fn test_list_directory_entries() {
        let (_dir, resources) = directory_resources();
        let mut names = resources.list_directory_entries("sql").unwrap();
        names.sort();
        assert_eq!(names, vec!["daily.sql", "empty.sql", "nested"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let (_dir, resources) = directory_resources();
        assert!(
            resources
                .list_directory_entries("templates")
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_list_file_has_no_children() {
        let (_dir, resources) = directory_resources();
        assert!(resources.list_directory_entries("sql/daily.sql").unwrap().is_empty());
    }

    #[test]
    fn test_exists() {
        let (_dir, resources) = directory_resources();
        assert!(resources.exists("sql").unwrap());
        assert!(resources.exists("sql/daily.sql").unwrap());
        assert!(!resources.exists("sql/missing.sql").unwrap());
    }

    #[test]
    fn test_path_escape_rejected() {
        let (_dir, resources) = directory_resources();
        assert!(matches!(
            resources.read_text("../outside.txt"),
            Err(ResourceError::InvalidPath { .. })
        ));
    }
}
