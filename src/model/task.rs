use chrono::{DateTime, Utc};

/// A single labeled time interval in a schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Row label, also the key other tasks use as `parent`
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    /// Label of the enclosing task
    pub parent: Option<String>,
    /// Tags in source order (the first one picks the row color)
    pub tags: Vec<String>,
}

impl Task {
    /// Create a top-level task with no metadata
    pub fn new(label: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Task {
            label: label.into(),
            start,
            end,
            description: None,
            parent: None,
            tags: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An ordered collection of tasks forming one chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub tasks: Vec<Task>,
}

impl Schedule {
    pub fn new(tasks: Vec<Task>) -> Self {
        Schedule { tasks }
    }
}

/// Earliest start and latest end across `tasks`, `None` when empty
pub fn schedule_bounds(tasks: &[Task]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = tasks.first()?;
    let bounds = tasks
        .iter()
        .fold((first.start, first.end), |(min, max), t| {
            (min.min(t.start), max.max(t.end))
        });
    Some(bounds)
}
