use std::collections::BTreeSet;

use streaming_iterator::StreamingIterator;
use thiserror::Error;
use tree_sitter::{Node, Parser, Query, QueryCursor};

const PYTHON_IMPORT_QUERY: &str = r#"
    (import_statement name: (dotted_name) @import)
    (import_statement name: (aliased_import name: (dotted_name) @import))
    (import_from_statement module_name: (dotted_name) @import)
    (import_from_statement module_name: (relative_import) @relative)
    (future_import_statement) @future
"#;

/// Why a Python source could not be turned into an import set
#[derive(Debug, Error)]
pub enum ImportParseError {
    #[error("python grammar could not be loaded: {0}")]
    Grammar(String),
    #[error("parser produced no syntax tree")]
    NoTree,
    #[error("syntax error near line {line}")]
    Syntax { line: usize },
}

/// Extracts imported module names from Python source.
///
/// `import a.b as c` yields `a.b`, `from x import y` yields `x`, and a bare
/// relative `from . import y` yields the empty string.
pub fn extract_python_imports(content: &str) -> Result<BTreeSet<String>, ImportParseError> {
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ImportParseError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(content, None)
        .ok_or(ImportParseError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or(1);
        return Err(ImportParseError::Syntax { line });
    }

    let query = Query::new(&language, PYTHON_IMPORT_QUERY)
        .map_err(|e| ImportParseError::Grammar(e.to_string()))?;

    let source = content.as_bytes();
    let mut imports = BTreeSet::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source);

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let module = match query.capture_names()[capture.index as usize] {
                "import" => dotted_text(node, source),
                "relative" => relative_module(node, source),
                "future" => "__future__".to_string(),
                _ => continue,
            };
            imports.insert(module);
        }
    }

    Ok(imports)
}

/// Module part of `.pkg.mod`, or empty for a bare `.`/`..`
fn relative_module(node: Node<'_>, source: &[u8]) -> String {
    let mut walker = node.walk();
    node.named_children(&mut walker)
        .find(|child| child.kind() == "dotted_name")
        .map(|child| dotted_text(child, source))
        .unwrap_or_default()
}

fn dotted_text(node: Node<'_>, source: &[u8]) -> String {
    node.utf8_text(source)
        .map(|text| text.chars().filter(|c| !c.is_whitespace()).collect())
        .unwrap_or_default()
}

fn first_error_line(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut walker = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut walker).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}
