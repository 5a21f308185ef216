use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::model::scale::Scale;
use crate::model::task::{Task, schedule_bounds};
use crate::util::unicode::display_width;

/// Upper bound on time points in one grid
pub const MAX_COLUMNS: u64 = 100_000;

/// Columns reserved per nesting level in the label column
pub const INDENT_WIDTH: usize = 2;

/// Error type for grid layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("parent chain of '{label}' loops back on itself")]
    ParentCycle { label: String },
    #[error(
        "time axis would need {columns} columns at scale '{scale}' (limit {limit}); use a coarser scale"
    )]
    TooManyColumns {
        columns: u64,
        scale: Scale,
        limit: u64,
    },
}

/// One task laid out against the time axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    /// Nesting depth (0 = top-level)
    pub depth: usize,
    /// `cells[i]` is true when `dates[i]` falls inside the task
    pub cells: Vec<bool>,
    pub tags: Vec<String>,
}

/// Time axis plus one row per task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub dates: Vec<DateTime<Utc>>,
    pub rows: Vec<Row>,
    /// Widest label plus its indentation, in terminal cells
    pub label_width: usize,
}

impl Grid {
    /// Keep only the first `width` time points of the axis and of every row.
    pub fn truncate(&mut self, width: usize) {
        self.dates.truncate(width);
        for row in &mut self.rows {
            row.cells.truncate(width);
        }
    }
}

/// Number of time points between two instants `span_ms` apart, both ends included
pub fn column_count(span_ms: i64, scale: Scale) -> u64 {
    (span_ms.max(0) / scale.step_ms()) as u64 + 1
}

/// Nesting depth of every task, in input order.
///
/// Follows `parent` labels until a task has no parent or names a label that
/// does not exist. When several tasks share a label, the last one wins.
pub fn task_depths(tasks: &[Task]) -> Result<Vec<usize>, LayoutError> {
    let by_label: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.label.as_str(), i))
        .collect();

    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let mut visited = HashSet::from([i]);
            let mut depth = 0;
            let mut current = task;
            while let Some(&parent) = current.parent.as_deref().and_then(|p| by_label.get(p)) {
                if !visited.insert(parent) {
                    return Err(LayoutError::ParentCycle {
                        label: task.label.clone(),
                    });
                }
                depth += 1;
                current = &tasks[parent];
            }
            Ok(depth)
        })
        .collect()
}

/// Widest `label + indentation` across tasks, 0 when there are none
pub fn label_width(tasks: &[Task], depths: &[usize]) -> usize {
    tasks
        .iter()
        .zip(depths)
        .map(|(t, depth)| display_width(&t.label) + INDENT_WIDTH * depth)
        .max()
        .unwrap_or(0)
}

/// Build the time axis and per-task occupancy rows at the given scale.
pub fn generate_grid(tasks: &[Task], scale: Scale) -> Result<Grid, LayoutError> {
    let Some((min, max)) = schedule_bounds(tasks) else {
        return Ok(Grid::default());
    };

    let span_ms = (max - min).num_milliseconds();
    let columns = column_count(span_ms, scale);
    if columns > MAX_COLUMNS {
        return Err(LayoutError::TooManyColumns {
            columns,
            scale,
            limit: MAX_COLUMNS,
        });
    }

    let step = scale.step_ms();
    let dates: Vec<DateTime<Utc>> = (0..columns as i64)
        .map(|i| min + TimeDelta::milliseconds(i * step))
        .collect();

    let depths = task_depths(tasks)?;
    let label_width = label_width(tasks, &depths);

    let rows = tasks
        .iter()
        .zip(depths)
        .map(|(task, depth)| Row {
            label: task.label.clone(),
            depth,
            cells: dates
                .iter()
                .map(|d| *d >= task.start && *d <= task.end)
                .collect(),
            tags: task.tags.clone(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        scale = %scale,
        columns = dates.len(),
        rows = rows.len(),
        label_width,
        "generated grid"
    );

    Ok(Grid {
        dates,
        rows,
        label_width,
    })
}
