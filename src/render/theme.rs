use crossterm::style::{Color, Stylize};
use indexmap::{IndexMap, IndexSet};

use crate::layout::grid::Row;
use crate::model::config::Config;

/// Default tag palette, assigned to tags in first-seen order
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::DarkGreen,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::DarkYellow,
    Color::DarkRed,
    Color::Grey,
    Color::DarkGrey,
];

/// Glyphs and colors for chart output
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Emit ANSI escapes
    pub color: bool,
    pub filled: String,
    pub empty: String,
    pub marker: String,
    /// Bar color for rows without tags
    pub bar: Color,
    pub empty_color: Color,
    pub marker_color: Color,
    pub palette: Vec<Color>,
    /// Tags pinned to a color regardless of palette order
    pub tag_colors: IndexMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            color: true,
            filled: "\u{2588}".into(),
            empty: "\u{2591}".into(),
            marker: "\u{2502}".into(),
            bar: Color::DarkGreen,
            empty_color: Color::DarkGrey,
            marker_color: Color::White,
            palette: DEFAULT_PALETTE.to_vec(),
            tag_colors: IndexMap::new(),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Parse `#RRGGBB` or one of the basic terminal color names
pub fn parse_color(value: &str) -> Option<Color> {
    if value.starts_with('#') {
        return parse_hex_color(value);
    }
    let color = match value.trim().to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" => Color::Grey,
        "gray" | "grey" => Color::DarkGrey,
        "bright_red" => Color::Red,
        "bright_green" => Color::Green,
        "bright_yellow" => Color::Yellow,
        "bright_blue" => Color::Blue,
        "bright_magenta" => Color::Magenta,
        "bright_cyan" => Color::Cyan,
        "bright_white" => Color::White,
        _ => return None,
    };
    Some(color)
}

impl Theme {
    /// Create a theme from the config file, falling back to defaults.
    /// Unparseable colors are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut theme = Theme {
            color: config.render.color,
            filled: config.glyphs.filled.clone(),
            empty: config.glyphs.empty.clone(),
            marker: config.glyphs.marker.clone(),
            ..Theme::default()
        };

        let palette: Vec<Color> = config
            .colors
            .palette
            .iter()
            .filter_map(|value| {
                let color = parse_color(value);
                if color.is_none() {
                    tracing::warn!(value = %value, "ignoring unknown palette color");
                }
                color
            })
            .collect();
        if !palette.is_empty() {
            theme.palette = palette;
        }

        for (tag, value) in &config.colors.tags {
            match parse_color(value) {
                Some(color) => {
                    theme.tag_colors.insert(tag.clone(), color);
                }
                None => tracing::warn!(tag = %tag, value = %value, "ignoring unknown tag color"),
            }
        }

        theme
    }

    /// Wrap `text` in `color` when color output is on
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Dim `text` when color output is on
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dim().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Tag-to-color assignment for one render call.
///
/// Tags are numbered in the order they first appear across rows (row order,
/// then tag order within a row) and index into the palette, wrapping around.
#[derive(Debug)]
pub struct TagColors<'a> {
    theme: &'a Theme,
    order: IndexSet<&'a str>,
}

impl<'a> TagColors<'a> {
    pub fn new(theme: &'a Theme, rows: &'a [Row]) -> Self {
        let order = rows
            .iter()
            .flat_map(|row| row.tags.iter().map(String::as_str))
            .collect();
        TagColors { theme, order }
    }

    /// Color for a single tag
    pub fn tag_color(&self, tag: &str) -> Option<Color> {
        if let Some(color) = self.theme.tag_colors.get(tag) {
            return Some(*color);
        }
        let index = self.order.get_index_of(tag)?;
        let palette = &self.theme.palette;
        if palette.is_empty() {
            return None;
        }
        Some(palette[index % palette.len()])
    }

    /// Bar color for a row: its first tag's color, or the theme default
    pub fn row_color(&self, row: &Row) -> Color {
        row.tags
            .first()
            .and_then(|tag| self.tag_color(tag))
            .unwrap_or(self.theme.bar)
    }
}
