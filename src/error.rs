//! Error types for projviz
//!
//! Only conditions that abort a whole analysis live here. Per-file problems
//! are logged and degrade into the result instead.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The root path does not exist
    #[error("directory does not exist: {0}")]
    NotFound(PathBuf),

    /// The root path exists but is a file
    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Rendering the graph failed
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors surfaced by a [`crate::render::GraphRenderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid graph description: {0}")]
    InvalidGraph(String),

    #[error("layout engine `{engine}` could not be started")]
    EngineUnavailable {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    #[error("layout engine exited with {status}: {stderr}")]
    EngineFailed { status: ExitStatus, stderr: String },

    #[error("I/O error while rendering")]
    Io(#[from] std::io::Error),

    #[error("failed to post-process rendered image")]
    Image(#[from] image::ImageError),
}
