use std::collections::BTreeSet;

use crate::core::{FileRegistry, ROOT_SENTINEL};
use crate::graph::{
    GraphEdge, GraphModel, GraphNode, NodeKind, NodeStyle, StyleTable, dir_node_id,
    file_node_id,
};

/// Builds a [`GraphModel`] from scan results.
///
/// Directories become folder nodes, files become styled file nodes, and each
/// file is linked from the directory that directly owns it. Imports are not
/// drawn.
#[derive(Debug, Clone, Default)]
pub struct GraphModelBuilder {
    styles: StyleTable,
}

impl GraphModelBuilder {
    pub fn new(styles: StyleTable) -> Self {
        Self { styles }
    }

    pub fn build(&self, directories: &BTreeSet<String>, files: &FileRegistry) -> GraphModel {
        let mut graph = GraphModel::default();
        self.add_directory_nodes(&mut graph, directories);
        self.add_file_nodes(&mut graph, files);
        graph
    }

    fn add_directory_nodes(&self, graph: &mut GraphModel, directories: &BTreeSet<String>) {
        let folder = self.styles.folder();

        for directory in directories {
            let display_name = directory.rsplit('/').next().unwrap_or(directory);
            graph.nodes.push(GraphNode {
                id: dir_node_id(directory),
                kind: NodeKind::Folder,
                glyph: folder.glyph.clone(),
                label: display_name.to_string(),
                style: NodeStyle {
                    border: folder.border,
                    fill: folder.fill,
                    gradient: None,
                    font: Some(folder.font),
                    pen_width: folder.pen_width,
                },
            });
        }
    }

    fn add_file_nodes(&self, graph: &mut GraphModel, files: &FileRegistry) {
        let mut sorted: Vec<_> = files.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        for (path, file) in sorted {
            let style = self.styles.for_file(file);
            graph.nodes.push(GraphNode {
                id: file_node_id(path),
                kind: NodeKind::File,
                glyph: style.glyph.clone(),
                label: file.filename().to_string(),
                style: NodeStyle {
                    border: style.border,
                    fill: style.fill,
                    gradient: Some(style.fill.gradient_shade()),
                    font: None,
                    pen_width: 1.2,
                },
            });

            let directory = file.directory();
            if directory != ROOT_SENTINEL {
                graph.edges.push(GraphEdge {
                    source: dir_node_id(directory),
                    target: file_node_id(path),
                    style: self.styles.edge().clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileEntry;
    use crate::core::summary::directories;
    use crate::graph::Color;

    fn entry(path: &str, file_type: &str) -> FileEntry {
        FileEntry {
            path: path.to_string(),
            file_type: file_type.to_string(),
            imports: BTreeSet::new(),
            is_entry_point: crate::core::classifier::is_entry_point(path),
            is_test: crate::core::classifier::is_test(path),
        }
    }

    fn registry(entries: &[FileEntry]) -> FileRegistry {
        entries.iter().map(|e| (e.path.clone(), e.clone())).collect()
    }

    #[test]
    fn test_nested_directories_edges_only_from_owner() {
        let dirs: BTreeSet<String> = ["a", "a/b"].iter().map(|s| s.to_string()).collect();
        let files = registry(&[entry("a/x.py", "py"), entry("a/b/y.py", "py")]);

        let graph = GraphModelBuilder::default().build(&dirs, &files);

        assert_eq!(graph.nodes_of_kind(NodeKind::Folder).count(), 2);
        assert_eq!(graph.nodes_of_kind(NodeKind::File).count(), 2);
        let edges: Vec<(&str, &str)> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(edges, vec![("dir_a/b", "file_a/b/y.py"), ("dir_a", "file_a/x.py")]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_root_files_have_no_edges() {
        let files = registry(&[entry("setup.py", "py"), entry("README.md", "md")]);
        let graph = GraphModelBuilder::default().build(&directories(&files), &files);

        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_folder_labels_use_last_segment() {
        let dirs: BTreeSet<String> = ["src", "src/deep/pkg"].iter().map(|s| s.to_string()).collect();
        let graph = GraphModelBuilder::default().build(&dirs, &FileRegistry::new());

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["src", "pkg"]);
        assert!(graph.nodes.iter().all(|n| n.glyph == "📁"));
        assert_eq!(graph.node("dir_src/deep/pkg").unwrap().kind, NodeKind::Folder);
    }

    #[test]
    fn test_file_node_styles() {
        let files = registry(&[
            entry("app/main.py", "py"),
            entry("app/tests/test_api.py", "py"),
            entry("app/models.py", "py"),
            entry("app/.gitignore", "unknown"),
            entry("app/Cargo.lock", "lock"),
        ]);
        let graph = GraphModelBuilder::default().build(&directories(&files), &files);

        let glyph = |id: &str| graph.node(id).unwrap().glyph.clone();
        assert_eq!(glyph("file_app/main.py"), "🚀");
        assert_eq!(glyph("file_app/tests/test_api.py"), "🧪");
        assert_eq!(glyph("file_app/models.py"), "🐍");
        assert_eq!(glyph("file_app/.gitignore"), "🔒");
        assert_eq!(glyph("file_app/Cargo.lock"), "📄");

        let models = graph.node("file_app/models.py").unwrap();
        assert_eq!(models.label, "models.py");
        assert_eq!(models.style.fill, Color::rgb(0xeb, 0xf4, 0xfa));
        assert_eq!(models.style.gradient, Some(Color::rgb(0xe1, 0xea, 0xf0)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let files = registry(&[
            entry("z/a.txt", "txt"),
            entry("a/z.txt", "txt"),
            entry("m.md", "md"),
        ]);
        let dirs = directories(&files);
        let builder = GraphModelBuilder::default();
        assert_eq!(builder.build(&dirs, &files), builder.build(&dirs, &files));
    }

    #[test]
    fn test_file_named_like_folder_id_keeps_graph_valid() {
        let files = registry(&[entry("pkg/x.py", "py"), entry("dir_pkg", "unknown")]);
        let graph = GraphModelBuilder::default().build(&directories(&files), &files);

        assert!(graph.validate().is_ok());
        assert_eq!(graph.node("dir_pkg").unwrap().kind, NodeKind::Folder);
        assert_eq!(graph.node("file_dir_pkg").unwrap().kind, NodeKind::File);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target, "file_pkg/x.py");
    }
}
