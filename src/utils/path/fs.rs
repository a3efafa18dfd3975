//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// Paths that do not exist yet (such as the output directory before the
/// first build) take the fallback.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_missing_absolute_path() {
        let path = Path::new("/definitely/not/here/routes.json");
        assert_eq!(normalize_path(path), path);
    }

    #[test]
    fn test_normalize_relative_path() {
        let normalized = normalize_path(Path::new("missing/output"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("missing/output"));
    }

    #[test]
    fn test_normalize_resolves_dots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let dotted = dir.path().join("docs/../docs/.");
        assert_eq!(normalize_path(&dotted), normalize_path(&dir.path().join("docs")));
    }
}
