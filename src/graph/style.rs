//! Presentation rules for graph nodes
//!
//! A [`StyleTable`] maps an effective file type to a glyph and a color pair.
//! Entry points and tests override the table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::core::{FileEntry, UNKNOWN_FILE_TYPE};

/// Per-channel delta used for the second gradient shade
pub const GRADIENT_DELTA: i16 = -10;

/// 24-bit RGB color written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by `delta`, clamped to `0..=255`.
    pub fn adjust(self, delta: i16) -> Self {
        let shift = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self::rgb(shift(self.r), shift(self.g), shift(self.b))
    }

    /// The darker companion shade for two-tone fills
    pub fn gradient_shade(self) -> Self {
        self.adjust(GRADIENT_DELTA)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color `{s}`, expected #rrggbb"));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Glyph plus border and fill colors for one category of node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStyle {
    pub glyph: String,
    pub border: Color,
    pub fill: Color,
}

impl FileStyle {
    pub fn new(glyph: &str, border: Color, fill: Color) -> Self {
        Self {
            glyph: glyph.to_string(),
            border,
            fill,
        }
    }
}

/// Folder node presentation
#[derive(Debug, Clone, PartialEq)]
pub struct FolderStyle {
    pub glyph: String,
    pub border: Color,
    pub fill: Color,
    pub font: Color,
    pub pen_width: f32,
}

/// Directory-to-file edge presentation
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    pub accent: Option<Color>,
    pub pen_width: f32,
    pub arrow_head: &'static str,
}

lazy_static! {
    static ref DEFAULT_FILE_STYLES: HashMap<&'static str, FileStyle> = {
        let gray = Color::rgb(0x4a, 0x4a, 0x4a);
        let light = Color::rgb(0xf8, 0xf8, 0xf8);
        let mut m = HashMap::new();
        m.insert("py", FileStyle::new("🐍", Color::rgb(0x38, 0x70, 0xa4), Color::rgb(0xeb, 0xf4, 0xfa)));
        m.insert("js", FileStyle::new("📜", Color::rgb(0xf7, 0xdf, 0x1e), Color::rgb(0xff, 0xfd, 0xf1)));
        m.insert("html", FileStyle::new("🌐", Color::rgb(0xe4, 0x4d, 0x26), Color::rgb(0xfd, 0xf2, 0xf1)));
        m.insert("css", FileStyle::new("🎨", Color::rgb(0x26, 0x4d, 0xe4), Color::rgb(0xf1, 0xf2, 0xfd)));
        m.insert("md", FileStyle::new("📝", Color::rgb(0x08, 0x3f, 0xa1), Color::rgb(0xf1, 0xf4, 0xfc)));
        m.insert("json", FileStyle::new("📋", Color::BLACK, light));
        m.insert("txt", FileStyle::new("📄", gray, light));
        m.insert("yml", FileStyle::new("⚙️", gray, light));
        m.insert("gitignore", FileStyle::new("🔒", gray, light));
        m.insert(UNKNOWN_FILE_TYPE, FileStyle::new("📄", gray, light));
        m
    };
}

/// Style lookup for files, folders and edges
#[derive(Debug, Clone)]
pub struct StyleTable {
    by_type: HashMap<String, FileStyle>,
    fallback: FileStyle,
    entry_point: FileStyle,
    test: FileStyle,
    folder: FolderStyle,
    edge: EdgeStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        let by_type: HashMap<String, FileStyle> = DEFAULT_FILE_STYLES
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let fallback = by_type[UNKNOWN_FILE_TYPE].clone();

        Self {
            by_type,
            fallback,
            entry_point: FileStyle::new("🚀", Color::rgb(0x05, 0x96, 0x69), Color::rgb(0xec, 0xfd, 0xf5)),
            test: FileStyle::new("🧪", Color::rgb(0xdc, 0x26, 0x26), Color::rgb(0xfe, 0xf2, 0xf2)),
            folder: FolderStyle {
                glyph: "📁".to_string(),
                border: Color::rgb(0x25, 0x63, 0xeb),
                fill: Color::rgb(0xf0, 0xf7, 0xff),
                font: Color::rgb(0x1e, 0x40, 0xaf),
                pen_width: 1.5,
            },
            edge: EdgeStyle {
                color: Color::rgb(0x6b, 0x72, 0x80),
                accent: Some(Color::BLACK),
                pen_width: 1.0,
                arrow_head: "vee",
            },
        }
    }
}

impl StyleTable {
    /// Default table with `overrides` replacing or adding file type styles.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a FileStyle)>,
    {
        let mut table = Self::default();
        for (file_type, style) in overrides {
            table.set(file_type.to_lowercase(), style.clone());
        }
        table
    }

    /// Insert or replace the style for `file_type`.
    pub fn set(&mut self, file_type: impl Into<String>, style: FileStyle) {
        let file_type = file_type.into();
        if file_type == UNKNOWN_FILE_TYPE {
            self.fallback = style.clone();
        }
        self.by_type.insert(file_type, style);
    }

    /// Table lookup, falling back to the neutral style.
    pub fn for_type(&self, file_type: &str) -> &FileStyle {
        self.by_type.get(file_type).unwrap_or(&self.fallback)
    }

    /// Style for a file: entry point, then test, then effective type.
    pub fn for_file(&self, file: &FileEntry) -> &FileStyle {
        if file.is_entry_point {
            &self.entry_point
        } else if file.is_test {
            &self.test
        } else {
            self.for_type(effective_file_type(file))
        }
    }

    pub fn folder(&self) -> &FolderStyle {
        &self.folder
    }

    pub fn edge(&self) -> &EdgeStyle {
        &self.edge
    }
}

/// Styling key for a file; `.gitignore` paths get their own category.
pub fn effective_file_type(file: &FileEntry) -> &str {
    if file.path.ends_with(".gitignore") {
        "gitignore"
    } else {
        &file.file_type
    }
}
