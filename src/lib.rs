pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod render;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{RenderConfig, VisualizerConfig};
pub use self::core::{AnalysisResult, DirNode, FileEntry, FileRegistry, TreeScanner};
pub use error::{AnalyzeError, RenderError};
pub use graph::{GraphModel, GraphModelBuilder, StyleTable};
pub use render::{ExportFormat, GraphRenderer, GraphvizRenderer};
pub use runner::{ProjectAnalyzer, RunOptions, analyze, run};
