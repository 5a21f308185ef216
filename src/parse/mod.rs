pub mod date;
pub mod schedule_parser;

pub use date::parse_flexible_date;
pub use schedule_parser::{Format, ParseError, parse_schedule, parse_schedule_str};
