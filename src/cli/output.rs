use chrono::SecondsFormat;
use serde::Serialize;

use crate::layout::grid::{Grid, Row};
use crate::model::scale::Scale;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct GridJson {
    pub scale: Scale,
    pub label_width: usize,
    pub dates: Vec<String>,
    pub rows: Vec<RowJson>,
}

#[derive(Serialize)]
pub struct RowJson {
    pub label: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub cells: Vec<bool>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Pair grid rows with the tasks they came from (same order, same length).
pub fn grid_to_json(grid: &Grid, tasks: &[Task], scale: Scale) -> GridJson {
    GridJson {
        scale,
        label_width: grid.label_width,
        dates: grid
            .dates
            .iter()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
            .collect(),
        rows: grid
            .rows
            .iter()
            .zip(tasks)
            .map(|(row, task)| row_to_json(row, task))
            .collect(),
    }
}

fn row_to_json(row: &Row, task: &Task) -> RowJson {
    RowJson {
        label: row.label.clone(),
        depth: row.depth,
        parent: task.parent.clone(),
        description: task.description.clone(),
        tags: row.tags.clone(),
        cells: row.cells.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::generate_grid;
    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;

    #[test]
    fn test_grid_json_shape() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 1).unwrap();
        let tasks = vec![
            Task::new("deploy", t0, t1).with_tags(["ops"]),
            Task::new("verify", t1, t1)
                .with_parent("deploy")
                .with_description("smoke tests"),
        ];
        let grid = generate_grid(&tasks, Scale::Second).unwrap();
        let json = serde_json::to_string_pretty(&grid_to_json(&grid, &tasks, Scale::Second)).unwrap();
        assert_snapshot!(json, @r#"
        {
          "scale": "second",
          "label_width": 8,
          "dates": [
            "2024-05-01T09:00:00.000Z",
            "2024-05-01T09:00:01.000Z"
          ],
          "rows": [
            {
              "label": "deploy",
              "depth": 0,
              "tags": [
                "ops"
              ],
              "cells": [
                true,
                true
              ]
            },
            {
              "label": "verify",
              "depth": 1,
              "parent": "deploy",
              "description": "smoke tests",
              "cells": [
                false,
                true
              ]
            }
          ]
        }
        "#);
    }
}
