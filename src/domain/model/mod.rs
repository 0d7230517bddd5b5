// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::utils::time::{add_seconds, seconds_between};

/// One source video file with its position on the wall clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub path: PathBuf,
    pub start_time: NaiveDateTime,
    /// Seconds, as reported by the prober
    pub duration: f64,
    /// `start_time + duration`, exclusive
    pub end_time: NaiveDateTime,
}

impl Clip {
    /// Create a clip, rejecting durations that cannot contribute footage
    pub fn new(
        path: impl Into<PathBuf>,
        start_time: NaiveDateTime,
        duration: f64,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::ProbeFail(format!(
                "{}: unusable duration {}",
                path.display(),
                duration
            )));
        }
        let end_time = add_seconds(&start_time, duration).ok_or_else(|| {
            DomainError::ProbeFail(format!(
                "{}: duration {} overflows the timeline",
                path.display(),
                duration
            ))
        })?;

        Ok(Self {
            path,
            start_time,
            duration,
            end_time,
        })
    }

    /// Half-open overlap with an interval
    pub fn overlaps(&self, interval: &Interval) -> bool {
        self.end_time > interval.start && self.start_time < interval.end
    }

    /// Seconds from the clip's own start to `timestamp`
    pub fn offset_of(&self, timestamp: &NaiveDateTime) -> f64 {
        seconds_between(&self.start_time, timestamp)
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {})",
            self.path.display(),
            self.start_time.format("%Y-%m-%d %H:%M:%S"),
            self.end_time.format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

/// Requested half-open span `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Create an interval; `start` must be strictly before `end`
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::BadArgs(format!(
                "End time must be after start time (start: {}, end: {})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Length in seconds
    pub fn length_seconds(&self) -> f64 {
        seconds_between(&self.start, &self.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} - {})",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// How a selected clip sits relative to the interval boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Entirely inside the interval; passes through untouched
    Inside,
    /// Starts before the interval start and ends inside it
    StraddlesStart,
    /// Starts inside the interval and ends after its end
    StraddlesEnd,
    /// Covers the whole interval on its own
    ContainsInterval,
}

/// Planning record for one selected clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub source: Clip,
    /// Seconds from the clip's own start
    pub trim_offset: f64,
    /// Seconds to retain
    pub trim_duration: f64,
    pub needs_trim: bool,
    pub boundary: Boundary,
}

impl SegmentPlan {
    /// Pass-through plan for a clip fully inside the interval
    pub fn pass_through(source: Clip) -> Self {
        let trim_duration = source.duration;
        Self {
            source,
            trim_offset: 0.0,
            trim_duration,
            needs_trim: false,
            boundary: Boundary::Inside,
        }
    }

    /// Source file of the plan
    pub fn source_path(&self) -> &Path {
        &self.source.path
    }
}

/// Request handed to the trimming collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRequest {
    pub source: PathBuf,
    pub offset_seconds: f64,
    pub duration_seconds: f64,
    pub destination: PathBuf,
}

/// Pipeline stage at which an item was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Catalog,
    Planning,
    Build,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Catalog => write!(f, "catalog"),
            Stage::Planning => write!(f, "planning"),
            Stage::Build => write!(f, "build"),
        }
    }
}

/// A file or clip excluded from the run, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub stage: Stage,
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedItem {
    /// Record a recovered error
    pub fn new(stage: Stage, path: impl Into<PathBuf>, reason: &DomainError) -> Self {
        Self {
            stage,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.path.display(), self.reason)
    }
}
