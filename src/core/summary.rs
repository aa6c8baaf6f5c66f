//! Structure summaries derived from a file registry

use std::collections::{BTreeMap, BTreeSet};

use crate::core::{DirNode, FileRegistry, ROOT_SENTINEL};

/// Distinct parent directories of all files, root sentinel excluded.
///
/// Only directories that directly own a file appear here.
pub fn directories(registry: &FileRegistry) -> BTreeSet<String> {
    registry
        .values()
        .map(|entry| entry.directory())
        .filter(|dir| *dir != ROOT_SENTINEL)
        .map(str::to_string)
        .collect()
}

/// Count of files per file type
pub fn file_type_counts(registry: &FileRegistry) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in registry.values() {
        *counts.entry(entry.file_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// Nested directory tree, built from paths in lexicographic order.
pub fn directory_structure(registry: &FileRegistry) -> DirNode {
    let mut root = DirNode::default();

    let mut paths: Vec<&String> = registry.keys().collect();
    paths.sort();

    for path in paths {
        let segments: Vec<&str> = path.split('/').collect();
        if let Some((filename, parents)) = segments.split_last() {
            let mut current = &mut root;
            for dir in parents {
                current = current.directories.entry(dir.to_string()).or_default();
            }
            current.files.push(filename.to_string());
        }
    }

    root
}
