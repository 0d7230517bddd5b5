//! Configuration initialization and hierarchy management
//!
//! Precedence, highest first: CLI > environment (`STITCHX_*`) > TOML file > defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::adapters::clip_name::DEFAULT_NAME_FORMAT;
use crate::adapters::toml_config::TomlConfigAdapter;
use crate::error::{StitchError, StitchResult};
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Default name of the stitched output, written to the working directory
pub const DEFAULT_OUTPUT: &str = "final_output_no_audio.avi";

/// Effective configuration of a run
#[derive(Debug, Clone, PartialEq)]
pub struct StitchConfig {
    /// Directory holding the source clips
    pub clips_dir: PathBuf,
    /// Final output file
    pub output: PathBuf,
    /// Directory for trimmed segments and the concat manifest
    pub work_dir: PathBuf,
    /// Extensions recognised as clips
    pub extensions: Vec<String>,
    /// chrono format of the timestamp field in clip names
    pub name_format: String,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// Parallel probes while building the catalog, 0 = CPU count
    pub probe_jobs: usize,
    /// Keep trimmed segments after a successful concat
    pub keep_scratch: bool,
    /// Probe the output and compare its duration to the plan
    pub verify_output: bool,
    /// Allowed duration mismatch in seconds
    pub verify_tolerance: f64,
    pub logging: LoggingConfig,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            clips_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            work_dir: PathBuf::from("."),
            extensions: vec!["avi".to_string()],
            name_format: DEFAULT_NAME_FORMAT.to_string(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            probe_jobs: 1,
            keep_scratch: false,
            verify_output: true,
            verify_tolerance: 0.5,
            logging: LoggingConfig::default(),
        }
    }
}

/// One configuration layer; unset fields fall through to the layer below
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub clips_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub name_format: Option<String>,
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    pub probe_jobs: Option<usize>,
    pub keep_scratch: Option<bool>,
    pub verify_output: Option<bool>,
    pub verify_tolerance: Option<f64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl StitchConfig {
    /// Apply a layer on top of this configuration
    pub fn apply(&mut self, layer: ConfigOverrides) -> StitchResult<()> {
        if let Some(v) = layer.clips_dir {
            self.clips_dir = v;
        }
        if let Some(v) = layer.output {
            self.output = v;
        }
        if let Some(v) = layer.work_dir {
            self.work_dir = v;
        }
        if let Some(v) = layer.extensions {
            self.extensions = v;
        }
        if let Some(v) = layer.name_format {
            self.name_format = v;
        }
        if let Some(v) = layer.ffmpeg_path {
            self.ffmpeg_path = v;
        }
        if let Some(v) = layer.ffprobe_path {
            self.ffprobe_path = v;
        }
        if let Some(v) = layer.probe_jobs {
            self.probe_jobs = v;
        }
        if let Some(v) = layer.keep_scratch {
            self.keep_scratch = v;
        }
        if let Some(v) = layer.verify_output {
            self.verify_output = v;
        }
        if let Some(v) = layer.verify_tolerance {
            self.verify_tolerance = v;
        }
        if let Some(v) = layer.log_level {
            self.logging.level = LogLevel::parse(&v)?;
        }
        if let Some(v) = layer.log_format {
            self.logging.format = LogFormat::parse(&v)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> StitchResult<()> {
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            return Err(StitchError::Config {
                message: "At least one clip extension is required".to_string(),
            });
        }
        if !self.verify_tolerance.is_finite() || self.verify_tolerance < 0.0 {
            return Err(StitchError::Config {
                message: format!(
                    "verify_tolerance must be a non-negative number, got {}",
                    self.verify_tolerance
                ),
            });
        }
        if self.name_format.is_empty() {
            return Err(StitchError::Config {
                message: "name_format cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Number of probe workers to run
    pub fn effective_probe_jobs(&self) -> usize {
        match self.probe_jobs {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }
}

/// Build the effective configuration from every layer
pub fn initialize_configuration_hierarchy(
    config_file: Option<&Path>,
    cli_overrides: ConfigOverrides,
) -> StitchResult<StitchConfig> {
    let mut config = StitchConfig::default();

    if let Some(file_layer) = load_config_file(config_file)? {
        config.apply(file_layer)?;
    }

    config.apply(overrides_from_env(|key| std::env::var(key).ok())?)?;
    config.apply(cli_overrides)?;
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Load configuration from file
///
/// An explicitly named file must exist; the default file is optional.
fn load_config_file(config_file: Option<&Path>) -> StitchResult<Option<ConfigOverrides>> {
    match config_file {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load(path).map(Some)
        }
        None => {
            let default_path = TomlConfigAdapter::default_config_path();
            if default_path.exists() {
                info!("Loading configuration from: {}", default_path.display());
                TomlConfigAdapter::load(&default_path).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}

/// Read the `STITCHX_*` environment layer through `lookup`
///
/// Values that are set but cannot be parsed are rejected, the same as in a
/// config file.
pub fn overrides_from_env<F>(lookup: F) -> StitchResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    Ok(ConfigOverrides {
        clips_dir: path("STITCHX_CLIPS_DIR"),
        output: path("STITCHX_OUTPUT"),
        work_dir: path("STITCHX_WORK_DIR"),
        extensions: lookup("STITCHX_EXTENSIONS").map(|v| {
            v.split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect()
        }),
        name_format: lookup("STITCHX_NAME_FORMAT"),
        ffmpeg_path: path("STITCHX_FFMPEG"),
        ffprobe_path: path("STITCHX_FFPROBE"),
        probe_jobs: env_value("STITCHX_PROBE_JOBS", &lookup, |v| v.parse().ok())?,
        keep_scratch: env_value("STITCHX_KEEP_SCRATCH", &lookup, parse_flag)?,
        verify_output: env_value("STITCHX_VERIFY_OUTPUT", &lookup, parse_flag)?,
        verify_tolerance: env_value("STITCHX_VERIFY_TOLERANCE", &lookup, |v| v.parse().ok())?,
        log_level: lookup("STITCHX_LOG_LEVEL"),
        log_format: lookup("STITCHX_LOG_FORMAT"),
    })
}

fn env_value<T, F, P>(key: &str, lookup: &F, parse: P) -> StitchResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => parse(raw.trim()).map(Some).ok_or_else(|| StitchError::Config {
            message: format!("Invalid value for {}: '{}'", key, raw),
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
