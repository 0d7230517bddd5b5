//! File-name timestamp adapter
//!
//! Clips are named `<prefix>_<timestamp>_<suffix>.<ext>`, e.g.
//! `1_20241031-080000_0800h.avi`. The timestamp is the second
//! underscore-separated field of the file stem.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::domain::errors::*;
use crate::ports::*;

/// Default chrono format of the timestamp field
pub const DEFAULT_NAME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Parses start timestamps out of clip file names
pub struct ClipNameAdapter {
    format: String,
}

impl ClipNameAdapter {
    /// Create adapter with a chrono format for the timestamp field
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for ClipNameAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_FORMAT)
    }
}

impl ClipNamePort for ClipNameAdapter {
    fn parse_start_time(&self, file_path: &Path) -> Result<NaiveDateTime, DomainError> {
        let stem = file_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .ok_or_else(|| DomainError::ParseFail(format!("{}: no file name", file_path.display())))?;

        let field = stem.split('_').nth(1).ok_or_else(|| {
            DomainError::ParseFail(format!(
                "{}: expected <prefix>_<timestamp>_<suffix>",
                file_path.display()
            ))
        })?;

        NaiveDateTime::parse_from_str(field, &self.format).map_err(|e| {
            DomainError::ParseFail(format!("{}: '{}' ({})", file_path.display(), field, e))
        })
    }
}
