//! Server identity resolution.
//!
//! Alerts are tagged with a label naming the server instance. The label is
//! the name of the host's data directory, except when that directory uses
//! the generic [`PLACEHOLDER_DIR_NAME`], in which case the parent directory
//! names the server.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Generic data-directory name that does not identify a server.
pub const PLACEHOLDER_DIR_NAME: &str = "worlddata";

/// Label identifying the server instance emitting alerts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerIdentity(String);

impl ServerIdentity {
    /// Wrap an already-resolved label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resolve the identity from the host's data directory.
    pub fn resolve(world_container: &Path) -> Self {
        let path = normalize(world_container);
        let name = file_name(&path);
        if name.eq_ignore_ascii_case(PLACEHOLDER_DIR_NAME) {
            let parent = path.parent().map(file_name).unwrap_or_default();
            tracing::debug!(
                "Data directory is '{}', using parent name '{}'",
                name,
                parent
            );
            Self(parent)
        } else {
            Self(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Absolute form of `path` with `.` and `..` resolved.
///
/// Existing paths are canonicalized. Otherwise `..` is applied lexically.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
