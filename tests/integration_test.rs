use projviz::core::summary::directories;
use projviz::graph::NodeKind;
use projviz::{
    AnalyzeError, DirNode, ExportFormat, GraphModel, GraphRenderer, ProjectAnalyzer, RenderError,
    VisualizerConfig,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Renders node and edge counts instead of an image.
struct CountingRenderer;

impl GraphRenderer for CountingRenderer {
    fn render(&self, graph: &GraphModel, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        graph.validate()?;
        Ok(format!("{}:{}:{}", format, graph.nodes.len(), graph.edges.len()).into_bytes())
    }
}

struct FailingRenderer;

impl GraphRenderer for FailingRenderer {
    fn render(&self, _graph: &GraphModel, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::UnsupportedFormat(format.to_string()))
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "main.py", "import os\nfrom collections import OrderedDict\n");
    write(root, "README.md", "# demo\n");
    write(root, ".gitignore", "venv/\n");
    write(root, "pkg/__init__.py", "");
    write(root, "pkg/utils_main.py", "from . import helpers\n");
    write(root, "pkg/helpers.py", "def broken(:\n");
    write(root, "pkg/static/site.css", "body {}\n");
    write(root, "tests/test_pkg.py", "import pkg\n");
    write(root, "node_modules/left-pad/index.js", "");
    write(root, "build/output.js", "");
    temp
}

fn analyzer() -> ProjectAnalyzer<CountingRenderer> {
    ProjectAnalyzer::with_renderer(&VisualizerConfig::default(), CountingRenderer)
}

fn structure_dirs(node: &DirNode, prefix: &str, out: &mut BTreeSet<String>, with_files: bool) {
    for (name, child) in &node.directories {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        if !with_files || !child.files.is_empty() {
            out.insert(path.clone());
        }
        structure_dirs(child, &path, out, with_files);
    }
}

#[test]
fn test_end_to_end_analysis() -> anyhow::Result<()> {
    let project = sample_project();
    let result = analyzer().analyze(project.path(), &[])?;

    assert_eq!(result.total_files, 8);
    assert_eq!(result.total_directories, 3);
    assert_eq!(result.file_type_counts["py"], 5);
    assert_eq!(result.file_type_counts["md"], 1);
    assert_eq!(result.file_type_counts["css"], 1);
    assert_eq!(result.file_type_counts["unknown"], 1);
    assert_eq!(
        result.file_type_counts.values().sum::<usize>(),
        result.total_files
    );

    assert_eq!(result.rendered_graph.format, ExportFormat::Png);
    // 3 folders + 8 files, one edge per file outside the root
    assert_eq!(result.rendered_graph.bytes, b"png:11:5".to_vec());

    assert_eq!(result.structure.files, vec![".gitignore", "README.md", "main.py"]);
    assert_eq!(
        result.structure.directories["pkg"].files,
        vec!["__init__.py", "helpers.py", "utils_main.py"]
    );
    assert!(!result.structure.directories.contains_key("node_modules"));
    assert!(!result.structure.directories.contains_key("build"));
    Ok(())
}

#[test]
fn test_registry_classification() -> anyhow::Result<()> {
    let project = sample_project();
    let model = analyzer().model(project.path(), &[])?;
    let files = &model.files;

    let main = &files["main.py"];
    assert!(main.is_entry_point);
    let expected: BTreeSet<String> = ["os", "collections"].iter().map(|s| s.to_string()).collect();
    assert_eq!(main.imports, expected);

    let utils_main = &files["pkg/utils_main.py"];
    assert!(utils_main.is_entry_point);
    assert_eq!(utils_main.imports, BTreeSet::from([String::new()]));

    let broken = &files["pkg/helpers.py"];
    assert_eq!(broken.file_type, "py");
    assert!(broken.imports.is_empty());

    let test = &files["tests/test_pkg.py"];
    assert!(test.is_test);
    assert!(!test.is_entry_point);
    Ok(())
}

#[test]
fn test_structure_matches_directory_set() -> anyhow::Result<()> {
    let project = sample_project();
    write(project.path(), "deep/only/leaf.txt", "");
    let analyzer = analyzer();

    let model = analyzer.model(project.path(), &[])?;
    let result = analyzer.analyze(project.path(), &[])?;

    let mut owning = BTreeSet::new();
    structure_dirs(&result.structure, "", &mut owning, true);
    assert_eq!(owning, model.directories);
    assert!(!model.directories.contains("."));

    let mut all = BTreeSet::new();
    structure_dirs(&result.structure, "", &mut all, false);
    assert!(all.is_superset(&model.directories));
    assert!(all.contains("deep"));
    Ok(())
}

#[test]
fn test_analysis_is_deterministic() -> anyhow::Result<()> {
    let project = sample_project();
    let analyzer = analyzer();

    let first = analyzer.analyze(project.path(), &[])?;
    let second = analyzer.analyze(project.path(), &[])?;

    assert_eq!(first.structure, second.structure);
    assert_eq!(first.file_type_counts, second.file_type_counts);
    assert_eq!(
        analyzer.model(project.path(), &[])?.graph,
        analyzer.model(project.path(), &[])?.graph
    );
    Ok(())
}

#[test]
fn test_exclusions_from_config_and_caller() -> anyhow::Result<()> {
    let project = sample_project();
    write(project.path(), "build.py", "");
    write(project.path(), "project/build/output.js", "");

    let config = VisualizerConfig {
        exclude_folders: vec!["static".to_string()],
        ..VisualizerConfig::default()
    };
    let analyzer = ProjectAnalyzer::with_renderer(&config, CountingRenderer);
    let model = analyzer.model(project.path(), &["tests".to_string()])?;

    assert!(model.files.contains_key("build.py"));
    assert!(!model.files.contains_key("project/build/output.js"));
    assert!(!model.files.contains_key("pkg/static/site.css"));
    assert!(!model.files.contains_key("tests/test_pkg.py"));
    assert!(model.files.contains_key("pkg/helpers.py"));
    Ok(())
}

#[test]
fn test_graph_shape_for_nested_directories() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    write(temp.path(), "a/x.py", "");
    write(temp.path(), "a/b/y.py", "");

    let model = analyzer().model(temp.path(), &[])?;
    assert_eq!(directories(&model.files), model.directories);

    let graph = &model.graph;
    assert_eq!(graph.nodes_of_kind(NodeKind::Folder).count(), 2);
    assert_eq!(graph.nodes_of_kind(NodeKind::File).count(), 2);

    let edges: BTreeSet<(String, String)> = graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    let expected: BTreeSet<(String, String)> = [
        ("dir_a".to_string(), "file_a/x.py".to_string()),
        ("dir_a/b".to_string(), "file_a/b/y.py".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(edges, expected);
    Ok(())
}

#[test]
fn test_file_named_like_folder_node_still_renders() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    write(temp.path(), "pkg/x.py", "");
    write(temp.path(), "dir_pkg", "");

    let result = analyzer().analyze(temp.path(), &[])?;
    assert_eq!(result.total_files, 2);
    assert_eq!(result.rendered_graph.bytes, b"png:3:1".to_vec());
    Ok(())
}

#[test]
fn test_invalid_roots_are_fatal() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "file.txt", "");

    let err = analyzer()
        .analyze(&temp.path().join("missing"), &[])
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::NotFound(_)));

    let err = analyzer()
        .analyze(&temp.path().join("file.txt"), &[])
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::NotADirectory(_)));
}

#[test]
fn test_render_failure_surfaces_as_render_error() {
    let project = sample_project();
    let analyzer = ProjectAnalyzer::with_renderer(&VisualizerConfig::default(), FailingRenderer);

    let err = analyzer.analyze(project.path(), &[]).unwrap_err();
    assert!(matches!(
        err,
        AnalyzeError::Render(RenderError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_report_json_shape() -> anyhow::Result<()> {
    let project = sample_project();
    let result = analyzer().analyze(project.path(), &[])?;

    let json: serde_json::Value = serde_json::from_str(&projviz::runner::report_json(&result)?)?;
    assert_eq!(json["stats"]["total_files"], 8);
    assert_eq!(json["stats"]["file_types"]["py"], 5);
    assert_eq!(json["structure"]["files"][0], ".gitignore");
    assert_eq!(
        json["structure"]["directories"]["pkg"]["directories"]["static"]["files"][0],
        "site.css"
    );
    Ok(())
}
