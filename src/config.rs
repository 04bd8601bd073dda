use crate::placement::PlacementOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, e.g. "warn" or "wordcloud_layout=debug".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub placement: PlacementOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    eccentricity: Option<f64>,
    radius_step: Option<f64>,
    angle_step: Option<f64>,
    remove_outside: Option<bool>,
    seed: Option<u64>,
    logging: Option<LoggingFile>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingFile {
    level: Option<String>,
}

/// Parse config text as strict JSON, falling back to JSON5 (comments,
/// trailing commas, unquoted keys).
fn parse_config_file(contents: &str) -> Result<ConfigFile, String> {
    match serde_json::from_str::<ConfigFile>(contents) {
        Ok(parsed) => Ok(parsed),
        Err(json_err) => json5::from_str::<ConfigFile>(contents)
            .map_err(|json5_err| format!("{json_err}; as json5: {json5_err}")),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_config_file(&contents).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    if let Some(v) = parsed.eccentricity {
        config.placement.eccentricity = v;
    }
    if let Some(v) = parsed.radius_step {
        config.placement.radius_step = v;
    }
    if let Some(v) = parsed.angle_step {
        config.placement.angle_step = v;
    }
    if let Some(v) = parsed.remove_outside {
        config.placement.remove_outside = v;
    }
    if parsed.seed.is_some() {
        config.placement.seed = parsed.seed;
    }
    if let Some(level) = parsed.logging.and_then(|l| l.level) {
        config.logging.level = level;
    }
    Ok(config)
}
