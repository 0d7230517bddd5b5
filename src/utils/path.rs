//! Path utilities for scratch files and the concat manifest

use std::path::{Path, PathBuf};

/// Name of the concat manifest written into the work directory
pub const MANIFEST_FILE_NAME: &str = "files_to_concat.txt";

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Create a new path utils instance
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PathUtils {
    fn default() -> Self {
        Self::new()
    }
}

impl PathUtils {
    /// Get file extension from path, lowercased
    pub fn get_extension(&self, path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Get file stem (name without extension) from path
    pub fn get_stem(&self, path: &Path) -> Option<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    }

    /// Check whether the path carries one of the given extensions (case-insensitive)
    pub fn has_extension(&self, path: &Path, extensions: &[String]) -> bool {
        match self.get_extension(path) {
            Some(ext) => extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }

    /// Deterministic destination for the trimmed copy of `source`
    ///
    /// The same plan index and source always map to the same name, so a rerun
    /// overwrites whatever an interrupted run left behind.
    pub fn trimmed_segment_path(&self, work_dir: &Path, index: usize, source: &Path) -> PathBuf {
        let stem = self.get_stem(source).unwrap_or_else(|| "segment".to_string());
        let file_name = match source.extension() {
            Some(ext) => format!("trimmed_{:03}_{}.{}", index, stem, ext.to_string_lossy()),
            None => format!("trimmed_{:03}_{}", index, stem),
        };
        work_dir.join(file_name)
    }

    /// Location of the concat manifest inside the work directory
    pub fn manifest_path(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(MANIFEST_FILE_NAME)
    }

    /// One concat-demuxer line: `file '<path>'` with single quotes escaped
    pub fn manifest_line(&self, absolute_path: &Path) -> String {
        let escaped = absolute_path.to_string_lossy().replace('\'', "'\\''");
        format!("file '{}'", escaped)
    }
}
