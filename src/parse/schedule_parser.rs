use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::model::task::{Schedule, Task};
use crate::parse::date::parse_flexible_date;

/// Error type for schedule parsing and validation
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported file extension '{0}'. Only .yaml, .yml, .json are supported.")]
    UnsupportedExtension(String),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid schedule format: expected an array of tasks or object with tasks property")]
    InvalidFormat,
    #[error("Invalid task at index {index}: {message}")]
    InvalidTask { index: usize, message: String },
    #[error("Invalid task at index {index}: parent '{parent}' not found")]
    ParentNotFound { index: usize, parent: String },
    #[error("Invalid task at index {index}: parent chain of '{label}' loops back on itself")]
    ParentCycle { index: usize, label: String },
}

/// Serialization format of a schedule file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Format, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ if ext.is_empty() => Err(ParseError::UnsupportedExtension(String::new())),
            _ => Err(ParseError::UnsupportedExtension(format!(".{}", ext))),
        }
    }
}

/// Parse a schedule file (`.json`, `.yaml`, `.yml`) into a validated schedule.
pub fn parse_schedule(path: &Path) -> Result<Schedule, ParseError> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| ParseError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let schedule = parse_schedule_str(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        tasks = schedule.tasks.len(),
        "parsed schedule"
    );
    Ok(schedule)
}

/// Parse schedule text in the given format.
///
/// Validation runs in two passes: each task on its own (fields, types, date
/// order), then cross-task references (parents exist, no parent cycles).
pub fn parse_schedule_str(content: &str, format: Format) -> Result<Schedule, ParseError> {
    let data: Value = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };

    let raw_tasks = match data {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return Err(ParseError::InvalidFormat),
        },
        _ => return Err(ParseError::InvalidFormat),
    };

    let tasks = raw_tasks
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_task(raw, index))
        .collect::<Result<Vec<_>, _>>()?;

    validate_parents(&tasks)?;
    Ok(Schedule::new(tasks))
}

fn invalid(index: usize, message: impl Into<String>) -> ParseError {
    ParseError::InvalidTask {
        index,
        message: message.into(),
    }
}

/// Optional string field: absent and `null` are both "not set".
fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<Option<String>, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(index, format!("'{}' must be a string", key))),
    }
}

fn validate_task(raw: &Value, index: usize) -> Result<Task, ParseError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| invalid(index, "not an object"))?;

    let label = match obj.get("label") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            return Err(invalid(
                index,
                "'label' is required and must be a non-empty string",
            ));
        }
    };

    let start_raw = obj.get("start").and_then(Value::as_str);
    let start = start_raw
        .and_then(parse_flexible_date)
        .ok_or_else(|| invalid(index, "'start' must be a valid date string"))?;
    let end_raw = obj.get("end").and_then(Value::as_str);
    let end = end_raw
        .and_then(parse_flexible_date)
        .ok_or_else(|| invalid(index, "'end' must be a valid date string"))?;

    let description = optional_string(obj, "description", index)?;
    let parent = optional_string(obj, "parent", index)?;

    let tags = match obj.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|t| t.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid(index, "'tags' must be an array of strings"))?,
        Some(_) => return Err(invalid(index, "'tags' must be an array of strings")),
    };

    if end < start {
        return Err(invalid(
            index,
            format!(
                "'end' date ({}) is before 'start' date ({})",
                end_raw.unwrap_or_default(),
                start_raw.unwrap_or_default()
            ),
        ));
    }

    Ok(Task {
        label,
        start,
        end,
        description,
        parent,
        tags,
    })
}

/// Every parent must name an existing label, and no parent chain may loop.
///
/// Labels resolve to the last task carrying them, matching grid layout.
fn validate_parents(tasks: &[Task]) -> Result<(), ParseError> {
    let by_label: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.label.as_str(), i))
        .collect();

    for (index, task) in tasks.iter().enumerate() {
        if let Some(parent) = &task.parent {
            if !by_label.contains_key(parent.as_str()) {
                return Err(ParseError::ParentNotFound {
                    index,
                    parent: parent.clone(),
                });
            }
        }
    }

    for (index, task) in tasks.iter().enumerate() {
        let mut visited = HashSet::from([index]);
        let mut current = task;
        while let Some(&next) = current.parent.as_deref().and_then(|p| by_label.get(p)) {
            if !visited.insert(next) {
                return Err(ParseError::ParentCycle {
                    index,
                    label: task.label.clone(),
                });
            }
            current = &tasks[next];
        }
    }
    Ok(())
}
