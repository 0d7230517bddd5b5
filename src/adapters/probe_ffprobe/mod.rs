//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` as a child process and reads its JSON output.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeEntry>,
    format: Option<ProbeEntry>,
}

#[derive(Debug, Deserialize)]
struct ProbeEntry {
    duration: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    fn probe_args(file_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-select_streams".to_string(),
            "v:0".to_string(),
            "-show_entries".to_string(),
            "stream=duration:format=duration".to_string(),
            "-of".to_string(),
            "json".to_string(),
            file_path.to_string_lossy().to_string(),
        ]
    }

    /// Duration from ffprobe JSON: first video stream, else the container
    pub fn parse_probe_output(json: &str) -> Result<f64, DomainError> {
        let output: ProbeOutput = serde_json::from_str(json)
            .map_err(|e| DomainError::ProbeFail(format!("unreadable ffprobe output: {}", e)))?;

        let stream_duration = output
            .streams
            .first()
            .and_then(|s| s.duration.as_deref())
            .and_then(|d| d.trim().parse::<f64>().ok());
        let format_duration = output
            .format
            .as_ref()
            .and_then(|f| f.duration.as_deref())
            .and_then(|d| d.trim().parse::<f64>().ok());

        stream_duration
            .or(format_duration)
            .filter(|d| d.is_finite())
            .ok_or_else(|| DomainError::ProbeFail("no duration reported".to_string()))
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl ProbePort for FFprobeAdapter {
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let args = Self::probe_args(file_path);
        debug!("Running {} {}", self.ffprobe_path.display(), args.join(" "));

        let output = Command::new(&self.ffprobe_path)
            .args(&args)
            .output()
            .map_err(|e| {
                DomainError::ProbeFail(format!(
                    "failed to run {}: {}",
                    self.ffprobe_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "{}: ffprobe exited with {}: {}",
                file_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_probe_output(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| DomainError::ProbeFail(format!("{}: {}", file_path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stream_duration() {
        let json = r#"{"programs": [], "streams": [{"duration": "600.040000"}], "format": {"duration": "601.000000"}}"#;
        assert_eq!(FFprobeAdapter::parse_probe_output(json).unwrap(), 600.04);
    }

    #[test]
    fn test_parse_falls_back_to_format_duration() {
        let json = r#"{"streams": [{}], "format": {"duration": "12.5"}}"#;
        assert_eq!(FFprobeAdapter::parse_probe_output(json).unwrap(), 12.5);

        let json = r#"{"streams": [{"duration": "N/A"}], "format": {"duration": "3.0"}}"#;
        assert_eq!(FFprobeAdapter::parse_probe_output(json).unwrap(), 3.0);
    }

    #[test]
    fn test_parse_missing_duration() {
        let json = r#"{"streams": [], "format": {}}"#;
        assert!(matches!(
            FFprobeAdapter::parse_probe_output(json),
            Err(DomainError::ProbeFail(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(FFprobeAdapter::parse_probe_output("not json").is_err());
    }

    #[test]
    fn test_probe_args_select_first_video_stream() {
        let args = FFprobeAdapter::probe_args(Path::new("/clips/a.avi"));
        assert!(args.windows(2).any(|w| w[0] == "-select_streams" && w[1] == "v:0"));
        assert_eq!(args.last().unwrap(), "/clips/a.avi");
    }
}
