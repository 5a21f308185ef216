//! Render schedules of time-bounded tasks as Gantt charts in the terminal.
//!
//! The pipeline is parse → infer scale → lay out grid → render:
//!
//! ```no_run
//! use ganttscape::{RenderOptions, parse_schedule, render_schedule};
//!
//! let schedule = parse_schedule("plan.yaml".as_ref()).unwrap();
//! println!("{}", render_schedule(&schedule, &RenderOptions::default()).unwrap());
//! ```

pub mod cli;
pub mod io;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parse;
pub mod render;
pub mod util;

pub use layout::{Grid, LayoutError, Row, generate_grid, infer_resolution, infer_schedule_resolution};
pub use model::{Config, Scale, Schedule, Task};
pub use parse::{ParseError, parse_schedule, parse_schedule_str};
pub use render::{RenderOptions, Theme, render_schedule};
