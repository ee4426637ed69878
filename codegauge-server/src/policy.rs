//! Scan-path policy for project analysis requests.

use std::path::{Path, PathBuf};

/// Allow-list of directories the server may scan.
///
/// An empty list leaves scanning unrestricted, the default for a local
/// single-user deployment.
#[derive(Clone, Debug, Default)]
pub struct ScanPolicy {
    roots: Vec<PathBuf>,
}

impl ScanPolicy {
    /// Build the policy from `CODEGAUGE_SCAN_ROOTS` (comma-separated paths).
    pub fn from_env() -> Self {
        let raw = std::env::var("CODEGAUGE_SCAN_ROOTS").unwrap_or_default();
        let roots = raw
            .split(',')
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .map(PathBuf::from)
            .collect();
        Self::from_roots(roots)
    }

    /// Build the policy from an explicit list of roots.
    pub fn from_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Whether the given path may be scanned.
    ///
    /// Paths are canonicalized before the prefix check so traversal segments
    /// cannot escape a configured root. A path that does not exist is allowed
    /// through; the analyzer reports it as not found with more context.
    pub fn allows(&self, path: &Path) -> bool {
        if self.roots.is_empty() {
            return true;
        }
        let Ok(resolved) = path.canonicalize() else {
            return true;
        };
        self.roots.iter().any(|root| {
            let root = root.canonicalize().unwrap_or_else(|_| root.clone());
            resolved.starts_with(&root)
        })
    }
}
