//! File classification
//!
//! Turns one file on disk into a [`FileEntry`]. Classification never fails:
//! a Python file that cannot be read or parsed is still registered, just
//! without imports.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{FileEntry, UNKNOWN_FILE_TYPE};
use crate::utils::imports::extract_python_imports;

/// Extension that marks a file as Python source
pub const SOURCE_EXTENSION: &str = "py";

/// Substrings of a relative path that mark an entry point.
/// Matched anywhere in the path, so `utils_main.py` counts too.
pub const ENTRY_POINT_MARKERS: &[&str] = &["main.py", "app.py"];

/// Classify a single file.
///
/// `absolute` is used for reading, `relative` is the registry key.
pub fn classify_file(absolute: &Path, relative: &str) -> FileEntry {
    let extension = absolute.extension().and_then(|s| s.to_str());

    let imports = if extension == Some(SOURCE_EXTENSION) {
        python_imports(absolute, relative)
    } else {
        BTreeSet::new()
    };

    let entry = FileEntry {
        path: relative.to_string(),
        file_type: file_type_of(absolute),
        imports,
        is_entry_point: is_entry_point(relative),
        is_test: is_test(relative),
    };

    debug!(
        path = %entry.path,
        file_type = %entry.file_type,
        imports = entry.imports.len(),
        "classified file"
    );
    entry
}

/// Lowercase extension without the dot, or `"unknown"`.
pub fn file_type_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| UNKNOWN_FILE_TYPE.to_string())
}

pub fn is_entry_point(relative: &str) -> bool {
    ENTRY_POINT_MARKERS
        .iter()
        .any(|marker| relative.contains(marker))
}

pub fn is_test(relative: &str) -> bool {
    relative.to_lowercase().contains("test")
}

fn python_imports(absolute: &Path, relative: &str) -> BTreeSet<String> {
    let content = match fs::read(absolute).map(String::from_utf8) {
        Ok(Ok(content)) => content,
        Ok(Err(e)) => {
            warn!(path = %relative, error = %e, "python file is not valid UTF-8");
            return BTreeSet::new();
        }
        Err(e) => {
            warn!(path = %relative, error = %e, "failed to read python file");
            return BTreeSet::new();
        }
    };

    match extract_python_imports(&content) {
        Ok(imports) => imports,
        Err(e) => {
            warn!(path = %relative, error = %e, "failed to parse python file");
            BTreeSet::new()
        }
    }
}
