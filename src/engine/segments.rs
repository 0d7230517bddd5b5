//! Segment building

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::model::*;
use crate::error::{StitchError, StitchResult};
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Segment produced for concatenation
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSegment {
    pub path: PathBuf,
    /// True when the file is scratch output rather than an original clip
    pub trimmed: bool,
    pub duration: f64,
}

/// Result of building segments
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    /// Segments in playback order
    pub segments: Vec<BuiltSegment>,
    pub skipped: Vec<SkippedItem>,
}

impl BuildResult {
    /// Seconds of footage across all built segments
    pub fn total_seconds(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

/// Trims straddling clips and passes inside clips through untouched
pub struct SegmentBuilder {
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    work_dir: PathBuf,
}

impl SegmentBuilder {
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            execute_port,
            fs_port,
            work_dir: work_dir.into(),
        }
    }

    /// Produce one segment per plan, in plan order
    ///
    /// A failed trim drops that segment and the run continues. Returns
    /// [`StitchError::NoSegmentsProduced`] when nothing is left.
    pub fn build(&self, plans: &[SegmentPlan]) -> StitchResult<BuildResult> {
        let trims = plans.iter().filter(|p| p.needs_trim).count();
        info!(
            "Building {} segments ({} trimmed, {} passed through)",
            plans.len(),
            trims,
            plans.len() - trims
        );

        if trims > 0 {
            self.fs_port.create_directory(&self.work_dir)?;
        }

        let path_utils = PathUtils::new();
        let mut result = BuildResult::default();

        for (index, plan) in plans.iter().enumerate() {
            if !plan.needs_trim {
                debug!("Pass-through: {}", plan.source_path().display());
                result.segments.push(BuiltSegment {
                    path: plan.source.path.clone(),
                    trimmed: false,
                    duration: plan.trim_duration,
                });
                continue;
            }

            let request = TrimRequest {
                source: plan.source.path.clone(),
                offset_seconds: plan.trim_offset,
                duration_seconds: plan.trim_duration,
                destination: path_utils.trimmed_segment_path(&self.work_dir, index, plan.source_path()),
            };

            match self.execute_port.trim_video(&request) {
                Ok(()) => {
                    debug!(
                        "Trimmed {} -> {}",
                        request.source.display(),
                        request.destination.display()
                    );
                    result.segments.push(BuiltSegment {
                        path: request.destination,
                        trimmed: true,
                        duration: plan.trim_duration,
                    });
                }
                Err(e) => {
                    warn!(stage = "build", path = %request.source.display(), reason = %e, "Segment dropped");
                    result
                        .skipped
                        .push(SkippedItem::new(Stage::Build, request.source, &e));
                }
            }
        }

        if result.segments.is_empty() {
            return Err(StitchError::NoSegmentsProduced);
        }
        Ok(result)
    }
}
