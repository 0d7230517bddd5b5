//! Run report

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::model::*;
use crate::output::verifier::DurationCheck;
use crate::utils::time::TimeParser;

/// Summary of a plan or stitch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub interval: Interval,
    pub catalogued: usize,
    pub selected: usize,
    pub planned: usize,
    /// Plans in playback order
    pub segments: Vec<SegmentPlan>,
    pub skipped: Vec<SkippedItem>,
    /// Stitched file; `None` for dry runs
    pub output: Option<PathBuf>,
    /// Sum of retained spans, seconds
    pub expected_duration: f64,
    pub verification: Option<DurationCheck>,
}

impl RunReport {
    /// True when nothing was skipped and verification (if any) passed
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self
                .verification
                .as_ref()
                .map_or(true, |v| v.within_tolerance)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = TimeParser::new();

        writeln!(f, "Interval: {}", self.interval)?;
        writeln!(
            f,
            "Clips: {} catalogued, {} selected, {} planned",
            self.catalogued, self.selected, self.planned
        )?;

        if !self.segments.is_empty() {
            writeln!(f, "Segments:")?;
            for (index, plan) in self.segments.iter().enumerate() {
                let action = if plan.needs_trim { "trim" } else { "keep" };
                writeln!(
                    f,
                    "  {:>3}. {} {} (from {} for {})",
                    index + 1,
                    action,
                    plan.source.path.display(),
                    time.format_time(plan.trim_offset),
                    time.format_time(plan.trim_duration)
                )?;
            }
        }

        if !self.skipped.is_empty() {
            writeln!(f, "Skipped:")?;
            for item in &self.skipped {
                writeln!(f, "  {}", item)?;
            }
        }

        writeln!(f, "Expected duration: {}", time.format_time(self.expected_duration))?;

        if let Some(output) = &self.output {
            writeln!(f, "Output: {}", output.display())?;
        }

        if let Some(check) = &self.verification {
            match (&check.warning, check.measured) {
                (Some(warning), _) => writeln!(f, "Verification: WARNING {}", warning)?,
                (None, Some(measured)) => {
                    writeln!(f, "Verification: OK ({})", time.format_time(measured))?
                }
                (None, None) => writeln!(f, "Verification: OK")?,
            }
        }

        Ok(())
    }
}
