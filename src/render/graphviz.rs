//! Graphviz-backed renderer.
//!
//! Pipes DOT into the configured engine binary and returns its stdout.

use std::io::{self, Cursor, Write};
use std::process::{Command, Stdio};
use std::thread;

use image::GenericImageView;
use image::imageops::FilterType;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::graph::GraphModel;
use crate::render::dot::to_dot;
use crate::render::{ExportFormat, GraphRenderer};

#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    config: RenderConfig,
}

impl GraphvizRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn run_engine(&self, dot: &str, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        let engine = &self.config.engine;
        debug!(engine = %engine, format = %format, bytes = dot.len(), "invoking layout engine");

        let mut child = Command::new(engine)
            .arg(format!("-T{}", format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::EngineUnavailable {
                engine: engine.clone(),
                source,
            })?;

        // Feed stdin on its own thread while stdout and stderr drain, and
        // always wait on the child so it is reaped even if the write fails.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(dot.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output = output?;
        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(output.stdout)
    }

    /// Downscale a PNG that exceeds the configured maximum dimensions.
    fn fit_png(&self, bytes: Vec<u8>) -> Result<Vec<u8>, RenderError> {
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?;
        let (width, height) = img.dimensions();
        let (max_width, max_height) = (self.config.max_width, self.config.max_height);

        if width <= max_width && height <= max_height {
            return Ok(bytes);
        }

        let resized = img.resize(max_width, max_height, FilterType::Lanczos3);
        info!(
            from = %format!("{width}x{height}"),
            to = %format!("{}x{}", resized.width(), resized.height()),
            "downscaled rendered graph"
        );

        let mut buffer = Cursor::new(Vec::new());
        resized.write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, graph: &GraphModel, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        graph.validate()?;

        let dot = to_dot(graph, &self.config);
        let bytes = self.run_engine(&dot, format)?;

        match format {
            ExportFormat::Png => self.fit_png(bytes),
            ExportFormat::Pdf | ExportFormat::Svg => Ok(bytes),
        }
    }
}
