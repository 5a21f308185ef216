pub mod theme;

use chrono::{DateTime, Utc};

use crate::layout::grid::{Grid, INDENT_WIDTH, LayoutError, generate_grid};
use crate::layout::scale::infer_schedule_resolution;
use crate::model::scale::Scale;
use crate::model::task::Schedule;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

pub use theme::{TagColors, Theme};

/// Options for one render call
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Fixed scale; inferred from the span when `None`
    pub scale: Option<Scale>,
    /// Keep only the first N time points
    pub width: Option<usize>,
    /// Reference time for the marker column; no marker when `None`
    pub now: Option<DateTime<Utc>>,
    /// Cap on the label column
    pub max_label_width: Option<usize>,
    pub theme: Theme,
}

/// Render a schedule as a Gantt chart. An empty schedule renders as "".
pub fn render_schedule(schedule: &Schedule, opts: &RenderOptions) -> Result<String, LayoutError> {
    let scale = match opts.scale {
        Some(scale) => scale,
        None => infer_schedule_resolution(&schedule.tasks, None)?,
    };
    let grid = generate_grid(&schedule.tasks, scale)?;
    Ok(render_grid(grid, scale, opts))
}

/// Format an already laid-out grid.
pub fn render_grid(mut grid: Grid, scale: Scale, opts: &RenderOptions) -> String {
    if let Some(width) = opts.width {
        grid.truncate(width);
    }
    if grid.dates.is_empty() {
        return String::new();
    }

    let theme = &opts.theme;
    let label_width = match opts.max_label_width {
        Some(max) => grid.label_width.min(max),
        None => grid.label_width,
    };
    let marker = opts.now.and_then(|now| marker_column(&grid.dates, scale, now));
    let colors = TagColors::new(theme, &grid.rows);

    let mut lines = Vec::with_capacity(grid.rows.len() + 1);
    lines.push(format!(
        "{} {}",
        " ".repeat(label_width),
        theme.dim(&header_axis(&grid.dates, scale))
    ));

    for row in &grid.rows {
        let bar_color = colors.row_color(row);
        let bar: String = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, on)| {
                if Some(i) == marker {
                    theme.paint(&theme.marker, theme.marker_color)
                } else if *on {
                    theme.paint(&theme.filled, bar_color)
                } else {
                    theme.paint(&theme.empty, theme.empty_color)
                }
            })
            .collect();
        lines.push(format!(
            "{} {}",
            format_label(&row.label, label_width, row.depth),
            bar
        ));
    }

    lines.join("\n")
}

/// Indent by depth, then truncate with `…` and pad so the result is exactly
/// `width` cells.
pub fn format_label(label: &str, width: usize, depth: usize) -> String {
    let indent = (INDENT_WIDTH * depth).min(width);
    let available = width - indent;
    let text = truncate_to_width(label, available);
    format!("{}{}", " ".repeat(indent), pad_to_width(&text, available))
}

/// Format one time point for the header
pub fn format_time(date: &DateTime<Utc>, scale: Scale) -> String {
    date.format(scale.label_format()).to_string()
}

/// Time labels laid over the axis, exactly one cell per time point.
///
/// A label starts at the column of its time point and needs one blank cell
/// after the previous label. Later labels that would run past the last column
/// are skipped; the first label is clipped to the axis instead so the start
/// time is always shown. Time labels are ASCII, so chars and cells coincide.
pub fn header_axis(dates: &[DateTime<Utc>], scale: Scale) -> String {
    let columns = dates.len();
    let mut cells = vec![' '; columns];
    let mut free_from = 0;
    for (i, date) in dates.iter().enumerate() {
        if i < free_from {
            continue;
        }
        let label = format_time(date, scale);
        let room = columns - i;
        if i > 0 && label.len() > room {
            continue;
        }
        for (cell, ch) in cells[i..].iter_mut().zip(label.chars()) {
            *cell = ch;
        }
        free_from = i + label.len() + 1;
    }
    cells.into_iter().collect()
}

/// Column whose time point falls in the same scale step as `now`
pub fn marker_column(dates: &[DateTime<Utc>], scale: Scale, now: DateTime<Utc>) -> Option<usize> {
    let step = scale.step_ms();
    let bucket = |t: &DateTime<Utc>| t.timestamp_millis().div_euclid(step);
    let target = bucket(&now);
    dates.iter().position(|d| bucket(d) == target)
}
