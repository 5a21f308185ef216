pub mod grid;
pub mod scale;

pub use grid::{Grid, LayoutError, MAX_COLUMNS, Row, generate_grid};
pub use scale::{DEFAULT_SCALE, infer_resolution, infer_schedule_resolution};
