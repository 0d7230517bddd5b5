//! Concatenation of built segments

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::segments::BuiltSegment;
use crate::error::{StitchError, StitchResult};
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Writes the concat manifest and merges the segments into one file
pub struct Concatenator {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    work_dir: PathBuf,
    keep_scratch: bool,
}

impl Concatenator {
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        work_dir: impl Into<PathBuf>,
        keep_scratch: bool,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            work_dir: work_dir.into(),
            keep_scratch,
        }
    }

    /// Manifest text for `segments`, one line per segment in playback order
    pub fn manifest(&self, segments: &[BuiltSegment]) -> StitchResult<String> {
        let path_utils = PathUtils::new();
        let mut manifest = String::new();
        for segment in segments {
            let absolute = self.fs_port.resolve_path(&segment.path)?;
            manifest.push_str(&path_utils.manifest_line(&absolute));
            manifest.push('\n');
        }
        Ok(manifest)
    }

    /// Merge `segments` into `output`
    ///
    /// Any failure here ends the run. Scratch files are removed only after a
    /// successful merge; original clips are never touched.
    pub fn concatenate(&self, segments: &[BuiltSegment], output: &Path) -> StitchResult<()> {
        if segments.is_empty() {
            return Err(StitchError::NoSegmentsProduced);
        }

        let manifest_path = PathUtils::new().manifest_path(&self.work_dir);
        let manifest = self.manifest(segments)?;
        self.fs_port.create_directory(&self.work_dir)?;
        self.fs_port.write_file(&manifest_path, &manifest)?;
        debug!("Wrote manifest {}:\n{}", manifest_path.display(), manifest);

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs_port.create_directory(parent)?;
        }

        info!(
            "Concatenating {} segments into {}",
            segments.len(),
            output.display()
        );
        self.execute_port
            .concatenate_videos(&manifest_path, output)
            .map_err(|e| StitchError::ConcatenationFailed {
                message: e.to_string(),
            })?;

        self.cleanup(&manifest_path, segments);
        Ok(())
    }

    fn cleanup(&self, manifest_path: &Path, segments: &[BuiltSegment]) {
        let mut scratch = vec![manifest_path.to_path_buf()];
        if !self.keep_scratch {
            scratch.extend(segments.iter().filter(|s| s.trimmed).map(|s| s.path.clone()));
        }

        for path in scratch {
            if let Err(e) = self.fs_port.delete_file(&path) {
                warn!("Could not remove scratch file {}: {}", path.display(), e);
            }
        }
    }
}
