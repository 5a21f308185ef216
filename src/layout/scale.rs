use crate::layout::grid::{LayoutError, column_count, label_width, task_depths};
use crate::model::scale::Scale;
use crate::model::task::{Task, schedule_bounds};

/// Scale used when there is nothing to measure
pub const DEFAULT_SCALE: Scale = Scale::Second;

/// Pick a resolution from the total span alone.
///
/// Each scale covers spans up to the step of the next coarser one, boundary
/// included: 1000 ms is still `ms`, 1001 ms is `second`.
pub fn infer_resolution(span_ms: i64) -> Scale {
    Scale::all()
        .find(|scale| match scale.next_coarser() {
            Some(next) => span_ms <= next.step_ms(),
            None => true,
        })
        .unwrap_or(Scale::Hour)
}

/// Pick a resolution for a whole schedule.
///
/// With `available_columns`, the finest scale whose time axis fits beside the
/// label column (and its one-cell gap) wins. When nothing fits, or no width
/// is given, the span-only choice is used.
pub fn infer_schedule_resolution(
    tasks: &[Task],
    available_columns: Option<usize>,
) -> Result<Scale, LayoutError> {
    let Some((min, max)) = schedule_bounds(tasks) else {
        return Ok(DEFAULT_SCALE);
    };
    let span_ms = (max - min).num_milliseconds();

    let Some(columns) = available_columns else {
        return Ok(infer_resolution(span_ms));
    };

    let depths = task_depths(tasks)?;
    let labels = label_width(tasks, &depths);
    let budget = columns.saturating_sub(labels + 1) as u64;

    let scale = Scale::all()
        .find(|scale| column_count(span_ms, *scale) <= budget)
        .unwrap_or_else(|| {
            tracing::debug!(columns, labels, "no scale fits the terminal; using span only");
            infer_resolution(span_ms)
        });
    tracing::debug!(span_ms, columns, scale = %scale, "inferred scale");
    Ok(scale)
}
