use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::model::scale::ScaleChoice;
use crate::parse::parse_flexible_date;

#[derive(Parser, Debug)]
#[command(
    name = "ganttscape",
    about = "Render project timelines as Gantt-style ASCII charts in Unix terminals",
    version
)]
pub struct Cli {
    /// Path to schedule file (YAML or JSON)
    pub file: PathBuf,

    /// Time scale: auto | ms | second | minute | hour
    #[arg(long, value_parser = parse_scale)]
    pub scale: Option<ScaleChoice>,

    /// Truncate timeline width (number of time slots)
    #[arg(short = 'w', long, value_name = "NUMBER", value_parser = parse_width)]
    pub width: Option<usize>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Print the computed grid as JSON instead of a chart
    #[arg(long)]
    pub json: bool,

    /// Reference time for the current-time marker (default: now)
    #[arg(long, value_name = "TIME", value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Do not draw the current-time marker
    #[arg(long, conflicts_with = "now")]
    pub no_marker: bool,

    /// Config file (default: .ganttscape.toml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_scale(s: &str) -> Result<ScaleChoice, String> {
    s.parse().map_err(|e: crate::model::scale::UnknownScale| e.to_string())
}

fn parse_width(s: &str) -> Result<usize, String> {
    match s.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        _ => Err(format!("Invalid width: {}", s)),
    }
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    parse_flexible_date(s).ok_or_else(|| format!("Invalid time: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scale::Scale;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ganttscape", "plan.yaml"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("plan.yaml"));
        assert_eq!(cli.scale, None);
        assert_eq!(cli.width, None);
        assert!(!cli.no_color);
        assert!(!cli.json);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "ganttscape",
            "plan.json",
            "--scale",
            "minute",
            "-w",
            "40",
            "--no-color",
            "--now",
            "2024-05-01T00:00:00Z",
        ])
        .unwrap();
        assert_eq!(cli.scale, Some(ScaleChoice::Fixed(Scale::Minute)));
        assert_eq!(cli.width, Some(40));
        assert!(cli.no_color);
        assert!(cli.now.is_some());
    }

    #[test]
    fn test_missing_file_argument() {
        assert!(Cli::try_parse_from(["ganttscape"]).is_err());
    }

    #[test]
    fn test_bad_scale() {
        let err = Cli::try_parse_from(["ganttscape", "p.json", "--scale", "day"]).unwrap_err();
        assert!(err.to_string().contains("Unsupported scale: day"));
    }

    #[test]
    fn test_bad_width() {
        for bad in ["0", "-3", "abc"] {
            let arg = format!("--width={}", bad);
            let err = Cli::try_parse_from(["ganttscape", "p.json", arg.as_str()]).unwrap_err();
            assert!(err.to_string().contains("Invalid width"), "{}", err);
        }
    }

    #[test]
    fn test_now_conflicts_with_no_marker() {
        assert!(
            Cli::try_parse_from([
                "ganttscape",
                "p.json",
                "--no-marker",
                "--now",
                "2024-05-01"
            ])
            .is_err()
        );
    }
}
