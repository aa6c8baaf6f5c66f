//! Rendering of graph models into encoded images
//!
//! The layout engine is a black box behind [`GraphRenderer`]. The shipped
//! implementation serializes the model to DOT and runs Graphviz.

pub mod dot;
pub mod graphviz;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::graph::GraphModel;

pub use graphviz::GraphvizRenderer;

/// Image formats a renderer can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Pdf, ExportFormat::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.extension() == lower)
            .ok_or_else(|| RenderError::UnsupportedFormat(s.to_string()))
    }
}

/// Capability to turn a graph description into image bytes
pub trait GraphRenderer {
    fn render(&self, graph: &GraphModel, format: ExportFormat) -> Result<Vec<u8>, RenderError>;
}

impl<R: GraphRenderer + ?Sized> GraphRenderer for Box<R> {
    fn render(&self, graph: &GraphModel, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        (**self).render(graph, format)
    }
}
