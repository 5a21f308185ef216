use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from `.ganttscape.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub glyphs: GlyphConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// `auto`, `ms`, `second`, `minute` or `hour`
    #[serde(default = "default_scale")]
    pub scale: String,
    #[serde(default = "default_true")]
    pub color: bool,
    /// Draw the current-time column
    #[serde(default = "default_true")]
    pub marker: bool,
    /// Cap on the label column; longer labels get an ellipsis
    #[serde(default)]
    pub max_label_width: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            scale: default_scale(),
            color: true,
            marker: true,
            max_label_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphConfig {
    #[serde(default = "default_filled")]
    pub filled: String,
    #[serde(default = "default_empty")]
    pub empty: String,
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        GlyphConfig {
            filled: default_filled(),
            empty: default_empty(),
            marker: default_marker(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Replaces the tag palette when non-empty
    #[serde(default)]
    pub palette: Vec<String>,
    /// Pins specific tags to a color (`#RRGGBB` or a color name)
    #[serde(default)]
    pub tags: IndexMap<String, String>,
}

fn default_scale() -> String {
    "auto".to_string()
}

fn default_true() -> bool {
    true
}

fn default_filled() -> String {
    "\u{2588}".to_string()
}

fn default_empty() -> String {
    "\u{2591}".to_string()
}

fn default_marker() -> String {
    "\u{2502}".to_string()
}
