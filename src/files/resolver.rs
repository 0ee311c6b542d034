//! Maps request targets onto the document root.

use std::path::{Path, PathBuf};

use crate::files::normalize::normalize_bytes;
use crate::http::codec;
use crate::http::request::split_query;

/// Index files tried, in order, when a directory is requested.
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// What a request target refers to under the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A regular file named directly by the request.
    File(PathBuf),
    /// A directory, with the first index file found inside it, if any.
    Directory { path: PathBuf, index: Option<PathBuf> },
    /// Nothing usable at that location.
    NotFound,
}

/// Returns the decoded, normalized logical path of a raw request target as
/// bytes, query string excluded. Always starts with `/`.
pub fn logical_path_bytes(raw_path: &str) -> Vec<u8> {
    let (path, _query) = split_query(raw_path.trim_start_matches('/'));
    normalize_bytes(&codec::decode_bytes(path))
}

/// [`logical_path_bytes`] as display text.
///
/// # Example
///
/// ```
/// # use dirserve::files::resolver::logical_path;
/// assert_eq!(logical_path("/a%20b/../c?x=1"), "/c");
/// ```
pub fn logical_path(raw_path: &str) -> String {
    String::from_utf8_lossy(&logical_path_bytes(raw_path)).into_owned()
}

/// Returns the root-relative filesystem candidate for a raw request target.
/// The root itself is `.`.
///
/// Decoded bytes are used as-is, so names that are not UTF-8 still resolve
/// on platforms whose paths are byte strings.
pub fn candidate(raw_path: &str) -> PathBuf {
    let mut logical = logical_path_bytes(raw_path);
    logical.remove(0);

    if logical.is_empty() {
        PathBuf::from(".")
    } else {
        bytes_to_path(logical)
    }
}

#[cfg(unix)]
fn bytes_to_path(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Resolves request targets against a document root.
///
/// The root is usually `.`, the process having changed into the served
/// directory at startup.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `raw_path` to a file, a directory, or nothing.
    ///
    /// A directory's index files are looked up here, but whether they are
    /// served depends on the trailing slash of the raw path, which is the
    /// response side's decision.
    pub async fn resolve(&self, raw_path: &str) -> Target {
        let candidate = candidate(raw_path);
        let path = if candidate == Path::new(".") {
            self.root.clone()
        } else {
            self.root.join(&candidate)
        };

        if is_file(&path).await {
            tracing::debug!(path = %path.display(), "resolved to file");
            return Target::File(path);
        }

        if !is_dir(&path).await {
            tracing::debug!(path = %path.display(), "nothing to serve");
            return Target::NotFound;
        }

        let mut index = None;
        for name in INDEX_FILES {
            let index_path = path.join(name);
            if is_file(&index_path).await {
                index = Some(index_path);
                break;
            }
        }

        tracing::debug!(
            path = %path.display(),
            has_index = index.is_some(),
            "resolved to directory"
        );
        Target::Directory { path, index }
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
