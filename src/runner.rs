//! Analysis pipeline: scan, summarize, build the graph, render.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::VisualizerConfig;
use crate::core::summary::{directories, directory_structure, file_type_counts};
use crate::core::{AnalysisResult, DirNode, FileRegistry, RenderedGraph, TreeScanner};
use crate::error::AnalyzeError;
use crate::graph::{GraphModel, GraphModelBuilder, StyleTable};
use crate::render::dot::to_dot;
use crate::render::{ExportFormat, GraphRenderer, GraphvizRenderer};

/// Scan output plus the graph built from it, before rendering
#[derive(Debug, Clone)]
pub struct ProjectModel {
    pub files: FileRegistry,
    pub directories: BTreeSet<String>,
    pub graph: GraphModel,
}

/// Runs the full pipeline with an injected renderer.
///
/// Holds no per-run state: every call builds its own registry, so a shared
/// analyzer never exposes a partially rebuilt one.
pub struct ProjectAnalyzer<R> {
    builder: GraphModelBuilder,
    exclude_folders: Vec<String>,
    format: ExportFormat,
    renderer: R,
}

impl ProjectAnalyzer<GraphvizRenderer> {
    /// Analyzer wired to Graphviz using `config`.
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self::with_renderer(config, GraphvizRenderer::new(config.render.clone()))
    }
}

impl<R: GraphRenderer> ProjectAnalyzer<R> {
    pub fn with_renderer(config: &VisualizerConfig, renderer: R) -> Self {
        Self {
            builder: GraphModelBuilder::new(StyleTable::with_overrides(&config.styles)),
            exclude_folders: config.exclude_folders.clone(),
            format: config.format,
            renderer,
        }
    }

    /// Scan `root` and build the graph model without rendering.
    pub fn model(&self, root: &Path, exclude: &[String]) -> Result<ProjectModel, AnalyzeError> {
        let scanner = TreeScanner::new(self.exclude_folders.iter().chain(exclude).cloned());
        let files = scanner.scan(root)?;
        let directories = directories(&files);
        let graph = self.builder.build(&directories, &files);

        Ok(ProjectModel {
            files,
            directories,
            graph,
        })
    }

    /// Full analysis: statistics, nested structure and rendered graph.
    pub fn analyze(&self, root: &Path, exclude: &[String]) -> Result<AnalysisResult, AnalyzeError> {
        let model = self.model(root, exclude)?;
        let bytes = self.renderer.render(&model.graph, self.format)?;

        let result = AnalysisResult {
            total_files: model.files.len(),
            total_directories: model.directories.len(),
            file_type_counts: file_type_counts(&model.files),
            structure: directory_structure(&model.files),
            rendered_graph: RenderedGraph {
                format: self.format,
                bytes,
            },
        };

        info!(
            root = %root.display(),
            files = result.total_files,
            directories = result.total_directories,
            format = %self.format,
            "analysis complete"
        );
        Ok(result)
    }
}

/// Analyze `root` with the default configuration and Graphviz.
pub fn analyze(root: &Path, exclude: &[String]) -> Result<AnalysisResult, AnalyzeError> {
    ProjectAnalyzer::from_config(&VisualizerConfig::default()).analyze(root, exclude)
}

/// What the command line asked for besides the defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print DOT and skip the layout engine
    pub dot_only: bool,
    /// Print statistics and structure as JSON
    pub json: bool,
}

#[derive(Serialize)]
struct Stats<'a> {
    total_files: usize,
    total_directories: usize,
    file_types: &'a BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct Report<'a> {
    stats: Stats<'a>,
    structure: &'a DirNode,
}

/// JSON document with statistics and the nested structure
pub fn report_json(result: &AnalysisResult) -> Result<String> {
    let report = Report {
        stats: Stats {
            total_files: result.total_files,
            total_directories: result.total_directories,
            file_types: &result.file_type_counts,
        },
        structure: &result.structure,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize analysis report")
}

/// Main entry point for the command line.
pub fn run(config: VisualizerConfig, options: RunOptions) -> Result<()> {
    config.validate()?;
    let analyzer = ProjectAnalyzer::from_config(&config);

    if options.dot_only {
        let model = analyzer
            .model(&config.path, &[])
            .with_context(|| format!("Failed to analyze {:?}", config.path))?;
        let dot = to_dot(&model.graph, &config.render);
        std::io::stdout().write_all(dot.as_bytes())?;
        return Ok(());
    }

    let result = analyzer
        .analyze(&config.path, &[])
        .with_context(|| format!("Failed to analyze {:?}", config.path))?;

    let output = config.output_path();
    fs::write(&output, &result.rendered_graph.bytes)
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!(
        output = %output.display(),
        mime = result.rendered_graph.format.mime_type(),
        bytes = result.rendered_graph.bytes.len(),
        "wrote visualization"
    );

    if options.json {
        println!("{}", report_json(&result)?);
    } else {
        println!(
            "{} files in {} directories -> {}",
            result.total_files,
            result.total_directories,
            output.display()
        );
        for (file_type, count) in &result.file_type_counts {
            println!("  {file_type:<12} {count}");
        }
    }

    Ok(())
}
