//! Core types shared across projviz modules

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::render::ExportFormat;

/// Directory value for files that sit directly under the scan root
pub const ROOT_SENTINEL: &str = ".";

/// File type recorded when a file has no extension
pub const UNKNOWN_FILE_TYPE: &str = "unknown";

/// Registry of analyzed files keyed by root-relative, forward-slash path
pub type FileRegistry = BTreeMap<String, FileEntry>;

/// One analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub file_type: String,
    pub imports: BTreeSet<String>,
    pub is_entry_point: bool,
    pub is_test: bool,
}

impl FileEntry {
    /// Last path segment
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Parent path, or [`ROOT_SENTINEL`] for top-level files
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => ROOT_SENTINEL,
        }
    }
}

/// A directory in the nested structure view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirNode {
    /// Filenames in sorted-path order
    pub files: Vec<String>,
    /// Child directories by name
    pub directories: BTreeMap<String, DirNode>,
}

/// Encoded image produced by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGraph {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Output of a full analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub total_files: usize,
    pub total_directories: usize,
    pub file_type_counts: BTreeMap<String, usize>,
    pub structure: DirNode,
    #[serde(skip)]
    pub rendered_graph: RenderedGraph,
}
