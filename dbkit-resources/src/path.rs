//! Resource path normalization.

use crate::error::{ResourceError, ResourceResult};

/// Normalize a slash-separated resource path.
///
/// Leading slashes re-root the path at the resource root, empty and `.`
/// segments are dropped and trailing slashes trimmed. `..` segments and
/// backslashes are rejected so a path can never leave the root.
///
/// The empty string denotes the root itself.
pub fn normalize(path: &str) -> ResourceResult<String> {
    if path.contains('\\') {
        return Err(ResourceError::invalid_path(path, "backslashes are not allowed"));
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(ResourceError::invalid_path(
                    path,
                    "parent segments are not allowed",
                ));
            }
            other => segments.push(other),
        }
    }

    Ok(segments.join("/"))
}

/// Join `path` onto a namespace such as `reports/sql` or a module path
/// like `my_crate::reports`.
///
/// A `path` starting with `/` ignores the namespace.
pub fn join_namespace(namespace: &str, path: &str) -> ResourceResult<String> {
    if path.starts_with('/') {
        return normalize(path);
    }
    let namespace = namespace.replace("::", "/");
    normalize(&format!("{namespace}/{path}"))
}
