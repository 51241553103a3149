//! Request path resolution against the served root.
//!
//! Resolution is purely lexical: the request path is percent-decoded, joined
//! onto the root, and `.`/`..` segments are folded without touching the
//! filesystem. Only paths that stay under the root are handed back for file
//! access.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// File served for `/`.
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The root was requested; serve this index file if it exists.
    Index(PathBuf),
    /// A contained path; still has to be checked on disk.
    Target(PathBuf),
    /// The path climbs out of the served root.
    Escape,
}

/// The single directory tree the file server may expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRoot {
    path: PathBuf,
    index_file: String,
}

impl ServedRoot {
    /// Root at `dir`, made absolute against `cwd` when relative.
    #[must_use]
    pub fn new(dir: &Path, cwd: &Path) -> Self {
        let absolute = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            cwd.join(dir)
        };
        Self {
            path: normalize_lexically(&absolute),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    #[must_use]
    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the path component of a request URI.
    #[must_use]
    pub fn resolve(&self, uri_path: &str) -> Resolution {
        let decoded = percent_decode_str(uri_path).decode_utf8_lossy();

        if decoded == "/" {
            return Resolution::Index(self.path.join(&self.index_file));
        }

        let relative = decoded.trim_start_matches('/');
        let candidate = normalize_lexically(&self.path.join(relative));

        if candidate.starts_with(&self.path) {
            Resolution::Target(candidate)
        } else {
            Resolution::Escape
        }
    }
}

/// Fold `.` and `..` segments without consulting the filesystem.
///
/// `..` at the filesystem root stays at the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
