use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;
use crate::model::scale::{ScaleChoice, UnknownScale};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = ".ganttscape.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{path}: {source}")]
    ScaleError { path: PathBuf, source: UnknownScale },
}

/// Read and validate a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    config
        .render
        .scale
        .parse::<ScaleChoice>()
        .map_err(|e| ConfigError::ScaleError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load the explicit config file, else `.ganttscape.toml` in `dir` if it
/// exists, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let fallback = dir.join(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        read_config(&fallback)
    } else {
        Ok(Config::default())
    }
}

impl Config {
    /// The configured scale choice; `read_config` has already validated it
    pub fn scale_choice(&self) -> ScaleChoice {
        self.render.scale.parse().unwrap_or_default()
    }
}
