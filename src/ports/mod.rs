// Ports - Interface definitions (contracts)
//
// Every port is synchronous: a call blocks until the collaborator finishes
// and reports success or failure through its `Result`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for turning a clip identifier into its start timestamp
pub trait ClipNamePort: Send + Sync {
    /// Parse the start timestamp encoded in the file name
    fn parse_start_time(&self, file_path: &Path) -> Result<NaiveDateTime, DomainError>;
}

/// Port for media file probing
pub trait ProbePort: Send + Sync {
    /// Duration of the clip's video in seconds
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError>;
}

/// Port for encoder execution
pub trait ExecutePort: Send + Sync {
    /// Cut `[offset, offset + duration)` out of the source, video only, stream copy
    fn trim_video(&self, request: &TrimRequest) -> Result<(), DomainError>;

    /// Merge the files listed in a concat manifest, video only, stream copy
    fn concatenate_videos(&self, manifest_path: &Path, dest_path: &Path) -> Result<(), DomainError>;
}

/// Port for file system operations
pub trait FsPort: Send + Sync {
    /// Regular files directly inside `dir_path`, sorted by name
    fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError>;

    /// Get file size
    fn file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Create directory (including parent directories)
    fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Create or truncate a file with the given contents
    fn write_file(&self, file_path: &Path, contents: &str) -> Result<(), DomainError>;

    /// Delete file
    fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Resolve relative path to absolute path
    fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError>;
}
