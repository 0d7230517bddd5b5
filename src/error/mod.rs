//! Error handling module for StitchX

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Run-level error type for StitchX operations
///
/// Every variant ends the run. Per-file and per-clip problems are reported as
/// skipped items instead and never surface here.
#[derive(Error, Debug)]
pub enum StitchError {
    /// Timestamp could not be parsed
    #[error("Invalid time format: '{time}'. Expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimeFormat { time: String },

    /// Interval is empty or inverted
    #[error("End time must be after start time (start: {start}, end: {end})")]
    InvalidInterval { start: String, end: String },

    /// Catalog ended up empty
    #[error("No valid video files found in {dir}")]
    NoClipsFound { dir: String },

    /// No clip overlaps the requested interval
    #[error("No videos found overlapping with the desired interval ({start} - {end})")]
    NoOverlap { start: String, end: String },

    /// Every plan or every build step failed
    #[error("No segments produced; nothing to concatenate")]
    NoSegmentsProduced,

    /// Merge collaborator failed
    #[error("Concatenation failed: {message}")]
    ConcatenationFailed { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Domain error that could not be recovered locally
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for StitchX operations
pub type StitchResult<T> = std::result::Result<T, StitchError>;
