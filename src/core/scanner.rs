//! Directory scanner that builds the file registry
//!
//! Walks the root with `ignore::WalkBuilder`, prunes excluded folder names,
//! and classifies every remaining regular file.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Component, Path};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::core::FileRegistry;
use crate::core::classifier::classify_file;
use crate::error::AnalyzeError;

/// Folder names that are always excluded
pub const DEFAULT_EXCLUDED_FOLDERS: &[&str] = &[
    // Version control
    ".git",
    // Dependency / tool caches
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    // Virtual environments
    "venv",
    "env",
    // Build output
    "dist",
    "build",
];

/// Scans a directory tree into a [`FileRegistry`]
#[derive(Debug, Clone)]
pub struct TreeScanner {
    excluded: Arc<BTreeSet<String>>,
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl TreeScanner {
    /// Create a scanner excluding the defaults plus `extra` folder names.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut excluded: BTreeSet<String> = DEFAULT_EXCLUDED_FOLDERS
            .iter()
            .map(|s| s.to_string())
            .collect();
        excluded.extend(extra.into_iter().map(Into::into));
        Self {
            excluded: Arc::new(excluded),
        }
    }

    /// Walk `root` and classify every non-excluded regular file.
    pub fn scan(&self, root: &Path) -> Result<FileRegistry, AnalyzeError> {
        if !root.exists() {
            return Err(AnalyzeError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AnalyzeError::NotADirectory(root.to_path_buf()));
        }

        let excluded = Arc::clone(&self.excluded);
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                // The root's own name is not part of any relative path.
                entry.depth() == 0 || !is_excluded_segment(&excluded, entry.file_name())
            })
            .build();

        let mut registry = FileRegistry::new();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                debug!(path = %entry.path().display(), "skipping symbolic link");
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                warn!(path = %entry.path().display(), "entry outside scan root");
                continue;
            };
            let Some(key) = relative_key(relative) else {
                warn!(path = %entry.path().display(), "skipping path that is not valid UTF-8");
                continue;
            };

            let file = classify_file(entry.path(), &key);
            registry.insert(key, file);
        }

        info!(
            root = %root.display(),
            files = registry.len(),
            "scan complete"
        );
        Ok(registry)
    }
}

/// Exact match of one path segment against the excluded names.
fn is_excluded_segment(excluded: &BTreeSet<String>, segment: &OsStr) -> bool {
    segment.to_str().is_some_and(|name| excluded.contains(name))
}

/// Root-relative path joined with `/`.
///
/// `None` for an empty path or any segment that is not valid UTF-8, so two
/// distinct names can never collapse onto the same key.
fn relative_key(relative: &Path) -> Option<String> {
    let segments = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<&str>>>()?;

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
