use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Time-axis resolution of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[serde(rename = "ms", alias = "millisecond")]
    Millisecond,
    Second,
    Minute,
    Hour,
}

/// Every scale, finest first, with its name and step in milliseconds.
/// Adding a resolution means adding a row here.
const SCALES: [(Scale, &str, i64); 4] = [
    (Scale::Millisecond, "ms", 1),
    (Scale::Second, "second", 1_000),
    (Scale::Minute, "minute", 60_000),
    (Scale::Hour, "hour", 3_600_000),
];

impl Scale {
    /// All scales ordered from finest to coarsest
    pub fn all() -> impl Iterator<Item = Scale> {
        SCALES.iter().map(|(scale, _, _)| *scale)
    }

    fn entry(self) -> &'static (Scale, &'static str, i64) {
        // The table covers every variant.
        &SCALES[self as usize]
    }

    /// Step between two consecutive time points, in milliseconds
    pub fn step_ms(self) -> i64 {
        self.entry().2
    }

    /// The next resolution up the table, `None` for the coarsest
    pub fn next_coarser(self) -> Option<Scale> {
        SCALES.get(self as usize + 1).map(|(scale, _, _)| *scale)
    }

    /// Canonical name as accepted on the command line
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// `strftime` pattern for header labels at this resolution
    pub fn label_format(self) -> &'static str {
        match self {
            Scale::Hour => "%H",
            Scale::Minute => "%H:%M",
            Scale::Second => "%H:%M:%S",
            Scale::Millisecond => "%H:%M:%S%.3f",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a scale name outside the table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported scale: {0}")]
pub struct UnknownScale(pub String);

impl FromStr for Scale {
    type Err = UnknownScale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "millisecond" {
            return Ok(Scale::Millisecond);
        }
        SCALES
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(scale, _, _)| *scale)
            .ok_or_else(|| UnknownScale(s.to_string()))
    }
}

/// A scale choice that may be left to inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleChoice {
    #[default]
    Auto,
    Fixed(Scale),
}

impl FromStr for ScaleChoice {
    type Err = UnknownScale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(ScaleChoice::Auto)
        } else {
            s.parse().map(ScaleChoice::Fixed)
        }
    }
}
