//! Integration tests for bundled resources.
//!
//! The same resource tree is laid out once as a directory and once as a zip
//! archive; both roots must behave identically.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use dbkit::prelude::*;
use dbkit::resources::{LocationScheme, ResourceLocation};
use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;

const FILES: &[(&str, &str)] = &[
    ("sql/daily.sql", "SELECT count(*) FROM events"),
    ("sql/weekly.sql", "SELECT 7"),
    ("sql/monthly.sql", "SELECT 30"),
    ("templates/report.html", "<h1>{{ title }}</h1>"),
    ("templates/partials/row.html", "<tr></tr>"),
    ("empty.txt", ""),
];

fn write_directory(root: &Path) {
    for (name, content) in FILES {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn write_archive(path: &Path, with_directory_entries: bool) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();

    if with_directory_entries {
        for dir in ["sql/", "templates/", "templates/partials/"] {
            writer.add_directory(dir, options).unwrap();
        }
    }
    for (name, content) in FILES {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// One directory-backed and two archive-backed readers over the same tree.
fn all_roots(tmp: &Path) -> Vec<(&'static str, BundledResources)> {
    let dir = tmp.join("unpacked");
    write_directory(&dir);

    let jar = tmp.join("app.jar");
    write_archive(&jar, true);

    let bare_zip = tmp.join("bare.zip");
    write_archive(&bare_zip, false);

    vec![
        ("directory", BundledResources::new(ResourceRoot::directory(&dir).unwrap())),
        ("archive", BundledResources::new(ResourceRoot::archive(&jar).unwrap())),
        ("archive without dir entries", BundledResources::new(ResourceRoot::archive(&bare_zip).unwrap())),
    ]
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

/// Test listing three files in every kind of root
#[test]
fn test_list_three_files() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        let names = resources.list_directory_entries("sql").unwrap();
        assert_eq!(names.len(), 3, "{kind}");
        assert!(!names.iter().any(|n| n == "sql"), "{kind}");
        assert_eq!(
            sorted(names),
            vec!["daily.sql", "monthly.sql", "weekly.sql"],
            "{kind}"
        );
    }
}

/// Test only immediate children are listed, directories without a slash
#[test]
fn test_list_is_not_recursive() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        let names = sorted(resources.list_directory_entries("templates").unwrap());
        assert_eq!(names, vec!["partials", "report.html"], "{kind}");
    }
}

/// Test listing the root itself
#[test]
fn test_list_root() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        let names = sorted(resources.list_directory_entries("").unwrap());
        assert_eq!(names, vec!["empty.txt", "sql", "templates"], "{kind}");
    }
}

/// Test archive enumeration order is preserved
#[test]
fn test_archive_order_is_enumeration_order() {
    let tmp = tempfile::tempdir().unwrap();
    let jar = tmp.path().join("app.jar");
    write_archive(&jar, true);

    let resources = BundledResources::new(ResourceRoot::archive(&jar).unwrap());
    assert_eq!(
        resources.list_directory_entries("sql").unwrap(),
        vec!["daily.sql", "weekly.sql", "monthly.sql"]
    );
}

/// Test reading text from every kind of root
#[test]
fn test_read_text() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        assert_eq!(
            resources.read_text("sql/daily.sql").unwrap(),
            "SELECT count(*) FROM events",
            "{kind}"
        );
        assert_eq!(
            resources.read_text_in("templates::partials", "row.html").unwrap(),
            "<tr></tr>",
            "{kind}"
        );
        assert_eq!(resources.read_text("empty.txt").unwrap(), "", "{kind}");
    }
}

/// Test missing resources are errors, not empty strings
#[test]
fn test_missing_resources() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        let err = resources.read_text("sql/missing.sql").unwrap_err();
        assert!(err.is_not_found(), "{kind}: {err}");

        let err = resources.list_directory_entries("migrations").unwrap_err();
        assert!(err.is_not_found(), "{kind}: {err}");

        assert!(!resources.exists("migrations").unwrap(), "{kind}");
        assert!(resources.exists("sql").unwrap(), "{kind}");
    }
}

/// Test locations carry the scheme that selects the backend
#[test]
fn test_location_schemes() {
    let tmp = tempfile::tempdir().unwrap();
    for (kind, resources) in all_roots(tmp.path()) {
        let location: ResourceLocation = resources.resolve("sql/daily.sql").unwrap();
        let expected = if resources.root().is_archive() {
            LocationScheme::Archive
        } else {
            LocationScheme::File
        };
        assert_eq!(location.scheme().unwrap(), expected, "{kind}");
    }
}

/// Test an archive whose own path contains `!/`
#[test]
fn test_archive_under_bang_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let release = tmp.path().join("release!");
    fs::create_dir(&release).unwrap();
    let jar = release.join("app.jar");
    write_archive(&jar, false);

    let resources = BundledResources::new(ResourceRoot::archive(&jar).unwrap());
    assert_eq!(
        resources.read_text("sql/weekly.sql").unwrap(),
        "SELECT 7"
    );
    assert_eq!(resources.list_directory_entries("sql").unwrap().len(), 3);
    assert!(resources.exists("sql/daily.sql").unwrap());
}

/// Test a missing archive answers existence checks like a missing directory
#[test]
fn test_exists_with_missing_root() {
    let tmp = tempfile::tempdir().unwrap();
    let packed = BundledResources::new(ResourceRoot::archive(tmp.path().join("gone.jar")).unwrap());
    let unpacked = BundledResources::new(ResourceRoot::directory(tmp.path().join("gone")).unwrap());

    assert!(!packed.exists("sql").unwrap());
    assert!(!unpacked.exists("sql").unwrap());
}

/// Test a corrupt archive surfaces a read error
#[test]
fn test_corrupt_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let jar = tmp.path().join("broken.jar");
    fs::write(&jar, b"definitely not a zip file").unwrap();

    let resources = BundledResources::new(ResourceRoot::archive(&jar).unwrap());
    let err = resources.list_directory_entries("sql").unwrap_err();
    assert!(matches!(err, ResourceError::Read { .. }), "{err}");

    // The failed call must not leave the archive locked or open.
    let err = resources.read_text("sql/daily.sql").unwrap_err();
    assert!(matches!(err, ResourceError::Read { .. }), "{err}");
}

/// Test concurrent callers are serialized without deadlock
#[test]
fn test_concurrent_reads() {
    let tmp = tempfile::tempdir().unwrap();
    let jar = tmp.path().join("app.jar");
    write_archive(&jar, true);
    let resources = BundledResources::new(ResourceRoot::archive(&jar).unwrap());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..10 {
                    assert_eq!(resources.list_directory_entries("sql").unwrap().len(), 3);
                    assert_eq!(resources.read_text("sql/weekly.sql").unwrap(), "SELECT 7");
                }
            });
        }
    });
}
