use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::cli::commands::Cli;
use crate::cli::output::grid_to_json;
use crate::io::config_io::{self, ConfigError};
use crate::layout::grid::{LayoutError, generate_grid};
use crate::layout::scale::infer_schedule_resolution;
use crate::model::config::Config;
use crate::model::scale::{Scale, ScaleChoice};
use crate::model::task::Schedule;
use crate::parse::{ParseError, parse_schedule};
use crate::render::{RenderOptions, Theme, render_grid};

/// Error type for a CLI run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Error loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("Error parsing schedule: {0}")]
    Parse(#[from] ParseError),
    #[error("Error rendering schedule: {0}")]
    Render(#[from] LayoutError),
    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), RunError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let output = render_output(&cli, &cwd, Terminal::detect(), Utc::now())?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

/// What stdout is connected to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terminal {
    /// Colors are only emitted to a terminal
    pub is_tty: bool,
    /// Width for automatic scale selection, when it could be read
    pub columns: Option<usize>,
}

impl Terminal {
    pub fn detect() -> Self {
        if !io::stdout().is_terminal() {
            return Terminal::default();
        }
        let columns = match crossterm::terminal::size() {
            Ok((cols, _)) => Some(cols as usize),
            Err(e) => {
                tracing::warn!(error = %e, "could not read terminal size");
                None
            }
        };
        Terminal {
            is_tty: true,
            columns,
        }
    }
}

/// Produce everything the CLI prints on success.
///
/// `now` is the marker time used when `--now` is not given.
pub fn render_output(
    cli: &Cli,
    cwd: &Path,
    terminal: Terminal,
    now: DateTime<Utc>,
) -> Result<String, RunError> {
    let config = config_io::load_config(cli.config.as_deref(), cwd)?;
    let schedule = parse_schedule(&cli.file)?;
    let scale = resolve_scale(cli, &config, &schedule, terminal.columns)?;

    if cli.json {
        let mut grid = generate_grid(&schedule.tasks, scale)?;
        if let Some(width) = cli.width {
            grid.truncate(width);
        }
        return Ok(serde_json::to_string_pretty(&grid_to_json(
            &grid,
            &schedule.tasks,
            scale,
        ))?);
    }

    let opts = render_options(cli, &config, scale, terminal, now);
    let grid = generate_grid(&schedule.tasks, scale)?;
    let chart = render_grid(grid, scale, &opts);

    let banner = format!("ganttscape v{}", env!("CARGO_PKG_VERSION"));
    if chart.is_empty() {
        Ok(banner)
    } else {
        Ok(format!("{}\n{}", banner, chart))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// CLI flag, then config, then auto
fn resolve_scale(
    cli: &Cli,
    config: &Config,
    schedule: &Schedule,
    terminal_columns: Option<usize>,
) -> Result<Scale, LayoutError> {
    let choice = cli.scale.unwrap_or_else(|| config.scale_choice());
    let scale = match choice {
        ScaleChoice::Fixed(scale) => scale,
        ScaleChoice::Auto => infer_schedule_resolution(&schedule.tasks, terminal_columns)?,
    };
    tracing::debug!(?choice, scale = %scale, "resolved scale");
    Ok(scale)
}

fn render_options(
    cli: &Cli,
    config: &Config,
    scale: Scale,
    terminal: Terminal,
    now: DateTime<Utc>,
) -> RenderOptions {
    let mut theme = Theme::from_config(config);
    if cli.no_color || !terminal.is_tty {
        theme.color = false;
    }
    let marker_time = match cli.now {
        Some(t) => Some(t),
        None if cli.no_marker || !config.render.marker => None,
        None => Some(now),
    };
    RenderOptions {
        scale: Some(scale),
        width: cli.width,
        now: marker_time,
        max_label_width: config.render.max_label_width,
        theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const SCHEDULE: &str = r#"[
        {"label":"A","start":"2024-05-01T00:00:00Z","end":"2024-05-01T00:00:03Z","tags":["core"]},
        {"label":"B","parent":"A","start":"2024-05-01T00:00:01Z","end":"2024-05-01T00:00:03Z"}
    ]"#;

    fn setup(schedule: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plan.json");
        fs::write(&file, schedule).unwrap();
        (tmp, file)
    }

    fn cli(file: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["ganttscape".to_string(), file.display().to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    fn piped() -> Terminal {
        Terminal::default()
    }

    fn tty(columns: Option<usize>) -> Terminal {
        Terminal {
            is_tty: true,
            columns,
        }
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(0, 0).unwrap()
    }

    #[test]
    fn test_banner_then_chart() {
        let (tmp, file) = setup(SCHEDULE);
        let out = render_output(&cli(&file, &["--no-color"]), tmp.path(), piped(), epoch()).unwrap();
        let expected = format!(
            "ganttscape v{}\n    00:0\nA   ████\n  B ░███",
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_marker_from_now_flag() {
        let (tmp, file) = setup(SCHEDULE);
        let args = ["--no-color", "--now", "2024-05-01T00:00:01.500Z"];
        let out = render_output(&cli(&file, &args), tmp.path(), piped(), epoch()).unwrap();
        assert!(out.ends_with("A   █│██\n  B ░│██"), "{}", out);
    }

    #[test]
    fn test_terminal_width_drives_auto_scale() {
        let (tmp, file) = setup(SCHEDULE);
        let out = render_output(&cli(&file, &["--no-color"]), tmp.path(), tty(Some(6)), epoch()).unwrap();
        // 3 label cells + gap leave 2 columns: only `minute` fits
        assert!(out.contains("\nA   █\n"), "{}", out);
        // one axis cell leaves room for a single character of "00:00"
        assert!(out.contains("\n    0\n"), "{}", out);
    }

    #[test]
    fn test_explicit_scale_and_width() {
        let (tmp, file) = setup(SCHEDULE);
        let args = ["--no-color", "--scale", "ms", "--width", "5"];
        let out = render_output(&cli(&file, &args), tmp.path(), piped(), epoch()).unwrap();
        let last = out.lines().last().unwrap();
        assert_eq!(last, "  B ░░░░░");
    }

    #[test]
    fn test_config_sets_defaults() {
        let (tmp, file) = setup(SCHEDULE);
        fs::write(
            tmp.path().join(".ganttscape.toml"),
            "[render]\nscale = \"minute\"\ncolor = false\n\n[glyphs]\nfilled = \"#\"\n",
        )
        .unwrap();
        let out = render_output(&cli(&file, &[]), tmp.path(), piped(), epoch()).unwrap();
        assert!(out.ends_with("A   #\n  B ░"), "{}", out);
    }

    #[test]
    fn test_json_output() {
        let (tmp, file) = setup(SCHEDULE);
        let out = render_output(&cli(&file, &["--json", "-w", "2"]), tmp.path(), piped(), epoch()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["scale"], "second");
        assert_eq!(parsed["dates"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["rows"][1]["depth"], 1);
        assert_eq!(parsed["rows"][0]["tags"][0], "core");
    }

    #[test]
    fn test_piped_output_has_no_escapes() {
        let (tmp, file) = setup(SCHEDULE);
        let out = render_output(&cli(&file, &[]), tmp.path(), piped(), epoch()).unwrap();
        assert!(!out.contains('\x1b'), "{:?}", out);
        assert!(out.ends_with("A   ████\n  B ░███"), "{}", out);
    }

    #[test]
    fn test_color_follows_terminal_and_flag() {
        let (_tmp, file) = setup(SCHEDULE);
        let config = Config::default();
        let opts = render_options(&cli(&file, &[]), &config, Scale::Second, tty(None), epoch());
        assert!(opts.theme.color);
        let opts = render_options(&cli(&file, &[]), &config, Scale::Second, piped(), epoch());
        assert!(!opts.theme.color);
        let opts = render_options(
            &cli(&file, &["--no-color"]),
            &config,
            Scale::Second,
            tty(None),
            epoch(),
        );
        assert!(!opts.theme.color);
    }

    #[test]
    fn test_empty_schedule_prints_banner_only() {
        let (tmp, file) = setup("[]");
        let out = render_output(&cli(&file, &[]), tmp.path(), piped(), epoch()).unwrap();
        assert_eq!(out, format!("ganttscape v{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_parse_error_is_prefixed() {
        let (tmp, file) = setup(r#"[{"label":""}]"#);
        let err = render_output(&cli(&file, &[]), tmp.path(), piped(), epoch()).unwrap_err();
        assert!(
            err.to_string().starts_with("Error parsing schedule: Invalid task at index 0"),
            "{}",
            err
        );
    }

    #[test]
    fn test_oversized_grid_is_render_error() {
        let (tmp, file) = setup(
            r#"[{"label":"year","start":"2024-01-01","end":"2025-01-01"}]"#,
        );
        let err = render_output(&cli(&file, &["--scale", "ms"]), tmp.path(), piped(), epoch())
            .unwrap_err();
        assert!(matches!(err, RunError::Render(LayoutError::TooManyColumns { .. })));
    }
}
