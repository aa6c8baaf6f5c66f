use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::graph::FileStyle;
use crate::render::ExportFormat;

/// File name looked up in the current directory by [`VisualizerConfig::load_from_file`]
pub const CONFIG_FILE: &str = "projviz.toml";

/// Settings consumed by the DOT serializer and the Graphviz renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Layout engine executable
    pub engine: String,
    pub dpi: u32,
    pub max_dpi: u32,
    /// Canvas width in pixels (100 px per inch of DOT `size`)
    pub width: u32,
    pub height: u32,
    /// Rendered PNGs larger than this are downscaled
    pub max_width: u32,
    pub max_height: u32,
    pub font_name: String,
    pub node_font_size: u32,
    pub edge_font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: "dot".to_string(),
            dpi: 150,
            max_dpi: 300,
            width: 1200,
            height: 800,
            max_width: 3000,
            max_height: 2000,
            font_name: "Arial".to_string(),
            node_font_size: 10,
            edge_font_size: 8,
        }
    }
}

impl RenderConfig {
    pub fn effective_dpi(&self) -> u32 {
        self.dpi.min(self.max_dpi)
    }

    /// Canvas size in inches for the DOT `size` attribute
    pub fn size_inches(&self) -> (f32, f32) {
        (self.width as f32 / 100.0, self.height as f32 / 100.0)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.engine.trim().is_empty() {
            anyhow::bail!("render.engine must not be empty");
        }
        if self.dpi == 0 || self.max_dpi == 0 {
            anyhow::bail!("render.dpi and render.max_dpi must be positive");
        }
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("render.width and render.height must be positive");
        }
        if self.width > self.max_width || self.height > self.max_height {
            anyhow::bail!(
                "canvas {}x{} exceeds maximum {}x{}",
                self.width,
                self.height,
                self.max_width,
                self.max_height
            );
        }
        Ok(())
    }
}

/// Main configuration for projviz
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Directory to analyze
    pub path: PathBuf,
    /// Image destination; defaults to `project_structure.<format>`
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    /// Folder names excluded in addition to the built-in set
    pub exclude_folders: Vec<String>,
    /// Enable debug-level logging
    pub verbose: bool,
    pub render: RenderConfig,
    /// Style overrides keyed by file type
    pub styles: BTreeMap<String, FileStyle>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            output: None,
            format: ExportFormat::default(),
            exclude_folders: Vec::new(),
            verbose: false,
            render: RenderConfig::default(),
            styles: BTreeMap::new(),
        }
    }
}

impl VisualizerConfig {
    /// Validates the configuration, ensuring the path exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            anyhow::bail!("Path does not exist: {:?}", self.path);
        }
        self.render.validate()
    }

    /// Where the rendered image is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("project_structure.{}", self.format)))
    }

    /// Attempts to load configuration from `projviz.toml` in the current directory.
    pub fn load_from_file() -> Option<Self> {
        std::fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Color;

    #[test]
    fn test_config_validation() {
        let config = VisualizerConfig {
            path: PathBuf::from("non_existent_path_xyz_123"),
            ..VisualizerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VisualizerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_render_validation() {
        let oversized = RenderConfig {
            width: 5000,
            ..RenderConfig::default()
        };
        assert!(oversized.validate().is_err());

        let zero_dpi = RenderConfig {
            dpi: 0,
            ..RenderConfig::default()
        };
        assert!(zero_dpi.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = VisualizerConfig::from_toml(
            r##"
format = "svg"
exclude_folders = ["docs", "fixtures"]

[render]
dpi = 96

[styles.rs]
glyph = "R"
border = "#DEA584"
fill = "#FFF5EE"
"##,
        )
        .unwrap();

        assert_eq!(config.format, ExportFormat::Svg);
        assert_eq!(config.exclude_folders, vec!["docs", "fixtures"]);
        assert_eq!(config.render.dpi, 96);
        assert_eq!(config.render.max_dpi, 300);
        assert_eq!(config.styles["rs"].border, Color::rgb(0xde, 0xa5, 0x84));
        assert_eq!(config.output_path(), PathBuf::from("project_structure.svg"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(VisualizerConfig::from_toml("format = \"gif\"").is_err());
    }
}
