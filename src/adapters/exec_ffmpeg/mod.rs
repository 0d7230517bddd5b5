//! FFmpeg execution adapter
//!
//! Trims and concatenates through the `ffmpeg` binary. Both operations drop
//! audio (`-an`) and copy the video stream without re-encoding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::time::format_encoder_seconds;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg_path: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    fn base_args() -> Vec<OsString> {
        ["-hide_banner", "-loglevel", "error", "-y"]
            .iter()
            .map(OsString::from)
            .collect()
    }

    /// Arguments for a video-only, stream-copied trim
    pub fn trim_args(request: &TrimRequest) -> Vec<OsString> {
        let mut args = Self::base_args();
        args.push("-i".into());
        args.push(request.source.clone().into_os_string());
        args.push("-ss".into());
        args.push(format_encoder_seconds(request.offset_seconds).into());
        args.push("-t".into());
        args.push(format_encoder_seconds(request.duration_seconds).into());
        args.extend(["-an", "-c:v", "copy"].iter().map(OsString::from));
        args.push(request.destination.clone().into_os_string());
        args
    }

    /// Arguments for a video-only, stream-copied concat of a manifest
    pub fn concat_args(manifest_path: &Path, dest_path: &Path) -> Vec<OsString> {
        let mut args = Self::base_args();
        args.extend(["-f", "concat", "-safe", "0", "-i"].iter().map(OsString::from));
        args.push(manifest_path.as_os_str().to_owned());
        args.extend(["-an", "-c:v", "copy"].iter().map(OsString::from));
        args.push(dest_path.as_os_str().to_owned());
        args
    }

    fn run(&self, args: &[OsString]) -> Result<(), DomainError> {
        debug!(
            "Running {} {}",
            self.ffmpeg_path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .output()
            .map_err(|e| {
                DomainError::ExecFail(format!(
                    "failed to run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ExecFail(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl ExecutePort for FFmpegAdapter {
    fn trim_video(&self, request: &TrimRequest) -> Result<(), DomainError> {
        self.run(&Self::trim_args(request))
            .map_err(|e| DomainError::ExecFail(format!("{}: {}", request.source.display(), e)))
    }

    fn concatenate_videos(&self, manifest_path: &Path, dest_path: &Path) -> Result<(), DomainError> {
        self.run(&Self::concat_args(manifest_path, dest_path))
    }
}
