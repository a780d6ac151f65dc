//! Static asset resolution.
//!
//! Maps request paths onto files in the output artifact directory. A path
//! that names no regular file resolves to nothing, which the server turns
//! into the shell fallback.

use std::path::{Component, Path, PathBuf};

/// Read-only view of the output artifact directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Create a view rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a request path to an existing regular file under the root.
    ///
    /// Returns `None` for the root path, for paths naming no file, and for
    /// paths whose components would escape the root.
    pub async fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = sanitize(request_path)?;
        let candidate = self.root.join(relative);

        match tokio::fs::metadata(&candidate).await {
            Ok(meta) if meta.is_file() => Some(candidate),
            _ => None,
        }
    }
}

/// Normalize a request path into a relative path confined to the root.
///
/// Rejects parent and root components outright rather than resolving them.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let mut out = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}
