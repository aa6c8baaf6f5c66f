//! Abstract graph description of a project
//!
//! The model is independent of any layout engine: nodes carry an id, a label
//! and a resolved style; edges carry endpoints and a style.

pub mod builder;
pub mod style;

use std::collections::HashSet;

pub use builder::GraphModelBuilder;
pub use style::{Color, EdgeStyle, FileStyle, FolderStyle, StyleTable};

use crate::error::RenderError;

/// Prefix for directory node ids
pub const DIR_ID_PREFIX: &str = "dir_";

/// Prefix for file node ids; never shared with [`DIR_ID_PREFIX`]
pub const FILE_ID_PREFIX: &str = "file_";

/// Node id for a directory
pub fn dir_node_id(directory: &str) -> String {
    format!("{DIR_ID_PREFIX}{directory}")
}

/// Node id for a file
pub fn file_node_id(path: &str) -> String {
    format!("{FILE_ID_PREFIX}{path}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// Resolved visual attributes of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub border: Color,
    pub fill: Color,
    /// Second fill shade for a two-tone gradient
    pub gradient: Option<Color>,
    pub font: Option<Color>,
    pub pen_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub glyph: String,
    pub label: String,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Reject duplicate node ids and dangling edges.
    pub fn validate(&self) -> Result<(), RenderError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(RenderError::InvalidGraph(format!(
                    "duplicate node id `{}`",
                    node.id
                )));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(RenderError::InvalidGraph(format!(
                        "edge {} -> {} references unknown node `{}`",
                        edge.source, edge.target, endpoint
                    )));
                }
            }
        }

        Ok(())
    }
}
