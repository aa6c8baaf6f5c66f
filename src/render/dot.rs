//! DOT serialization of a [`GraphModel`].

use std::fmt::Write;

use crate::config::RenderConfig;
use crate::graph::{GraphEdge, GraphModel, GraphNode};

/// Fill gradient angle for two-tone file nodes
pub const GRADIENT_ANGLE: &str = "315";

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape text placed inside an HTML-like label.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Quoted DOT identifier; paths contain `/` and `.`.
pub fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape_label(id))
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Statement depth inside the top-level graph
const STATEMENT_INDENT: usize = 1;

/// Incremental builder for DOT text
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    /// Create a new directed graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, STATEMENT_INDENT);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// Add default attributes for `node` or `edge` statements.
    pub fn defaults(&mut self, target: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, STATEMENT_INDENT);
        let _ = write!(self.output, "{target} [");
        self.write_attrs(attrs);
        self.output.push_str("];\n");
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node whose label is an HTML-like table.
    pub fn node_html(&mut self, id: &str, html: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, STATEMENT_INDENT);
        let _ = write!(self.output, "{}[label=<{}>", quote_id(id), html);
        if !attrs.is_empty() {
            self.output.push_str(", ");
            self.write_attrs(attrs);
        }
        self.output.push_str("];\n");
        self
    }

    /// Add an edge with attributes.
    pub fn edge_with_attrs(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, STATEMENT_INDENT);
        let _ = write!(self.output, "{} -> {}", quote_id(from), quote_id(to));
        if !attrs.is_empty() {
            self.output.push_str(" [");
            self.write_attrs(attrs);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{}=\"{}\"", key, escape_label(value));
        }
    }
}

/// Glyph cell plus left-aligned text cell
fn label_table(glyph: &str, text: &str) -> String {
    format!(
        "<TABLE BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"2\" CELLPADDING=\"4\">\
         <TR><TD WIDTH=\"24\" FIXEDSIZE=\"TRUE\">{}</TD>\
         <TD ALIGN=\"LEFT\" BALIGN=\"LEFT\">{}</TD></TR></TABLE>",
        escape_html(glyph),
        escape_html(text)
    )
}

fn write_node(dot: &mut DotBuilder, node: &GraphNode) {
    let style = &node.style;
    let fill = match style.gradient {
        Some(shade) => format!("{}:{}", style.fill, shade),
        None => style.fill.to_string(),
    };
    let border = style.border.to_string();
    let pen_width = format!("{:.1}", style.pen_width);
    let font = style.font.map(|c| c.to_string());

    let mut attrs: Vec<(&str, &str)> = vec![
        ("fillcolor", fill.as_str()),
        ("color", border.as_str()),
        ("penwidth", pen_width.as_str()),
    ];
    if style.gradient.is_some() {
        attrs.push(("gradientangle", GRADIENT_ANGLE));
    }
    if let Some(font) = &font {
        attrs.push(("fontcolor", font.as_str()));
    }

    dot.node_html(&node.id, &label_table(&node.glyph, &node.label), &attrs);
}

fn write_edge(dot: &mut DotBuilder, edge: &GraphEdge) {
    let style = &edge.style;
    let color = match style.accent {
        Some(accent) => format!("{}:{}", style.color, accent),
        None => style.color.to_string(),
    };
    let pen_width = format!("{:.1}", style.pen_width);

    dot.edge_with_attrs(
        &edge.source,
        &edge.target,
        &[
            ("color", color.as_str()),
            ("penwidth", pen_width.as_str()),
            ("arrowhead", style.arrow_head),
        ],
    );
}

/// Serialize `graph` to DOT using the canvas and font settings in `render`.
pub fn to_dot(graph: &GraphModel, render: &RenderConfig) -> String {
    let mut dot = DotBuilder::new("project");

    let dpi = render.effective_dpi().to_string();
    let (width, height) = render.size_inches();
    let size = format!("{width},{height}!");
    let node_font_size = render.node_font_size.to_string();
    let edge_font_size = render.edge_font_size.to_string();

    dot.attr("comment", "Project Structure")
        .attr("rankdir", "LR")
        .attr("splines", "polyline")
        .attr("nodesep", "0.5")
        .attr("ranksep", "1.2")
        .attr("fontname", render.font_name.as_str())
        .attr("dpi", &dpi)
        .attr("bgcolor", "transparent")
        .attr("size", &size)
        .defaults(
            "node",
            &[
                ("shape", "box"),
                ("style", "rounded,filled"),
                ("fontname", render.font_name.as_str()),
                ("fontsize", node_font_size.as_str()),
                ("margin", "0.3,0.1"),
                ("height", "0.5"),
            ],
        )
        .defaults(
            "edge",
            &[
                ("color", "#666666"),
                ("penwidth", "1.2"),
                ("arrowsize", "0.8"),
                ("fontsize", edge_font_size.as_str()),
            ],
        )
        .blank();

    for node in &graph.nodes {
        write_node(&mut dot, node);
    }
    if !graph.edges.is_empty() {
        dot.blank();
    }
    for edge in &graph.edges {
        write_edge(&mut dot, edge);
    }

    dot.build()
}
