// Local filesystem adapter - File system operations

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FsPort for FsLocalAdapter {
    fn list_files(&self, dir_path: &Path) -> Result<Vec<PathBuf>, DomainError> {
        if !dir_path.is_dir() {
            return Err(DomainError::FsFail(format!(
                "Not a directory: {}",
                dir_path.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir_path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to list {}: {}", dir_path.display(), e))
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to get file size: {}", e)))?;
        Ok(metadata.len())
    }

    fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to create directory: {}", e)))?;
        Ok(())
    }

    fn write_file(&self, file_path: &Path, contents: &str) -> Result<(), DomainError> {
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_directory(parent)?;
        }
        fs::write(file_path, contents).map_err(|e| {
            DomainError::FsFail(format!("Failed to write {}: {}", file_path.display(), e))
        })
    }

    fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        fs::remove_file(file_path).map_err(|e| {
            DomainError::FsFail(format!("Failed to delete {}: {}", file_path.display(), e))
        })
    }

    fn resolve_path(&self, file_path: &Path) -> Result<PathBuf, DomainError> {
        if file_path.is_absolute() {
            return Ok(file_path.to_path_buf());
        }
        let cwd = std::env::current_dir()
            .map_err(|e| DomainError::FsFail(format!("Failed to read current directory: {}", e)))?;
        Ok(cwd.join(file_path))
    }
}
