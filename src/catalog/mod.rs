//! Clip catalog
//!
//! Turns a directory listing into [`Clip`] values. Files that cannot be
//! parsed or probed are skipped and reported; they never stop the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;

/// Result of cataloguing a directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogResult {
    /// Usable clips, in directory enumeration order
    pub clips: Vec<Clip>,
    /// Files excluded at the catalog stage
    pub skipped: Vec<SkippedItem>,
}

/// Builds the clip catalog of a directory
pub struct ClipCatalog {
    fs_port: Arc<dyn FsPort>,
    name_port: Arc<dyn ClipNamePort>,
    probe_port: Arc<dyn ProbePort>,
    extensions: Vec<String>,
    probe_jobs: usize,
}

impl ClipCatalog {
    pub fn new(
        fs_port: Arc<dyn FsPort>,
        name_port: Arc<dyn ClipNamePort>,
        probe_port: Arc<dyn ProbePort>,
        extensions: Vec<String>,
        probe_jobs: usize,
    ) -> Self {
        Self {
            fs_port,
            name_port,
            probe_port,
            extensions,
            probe_jobs: probe_jobs.max(1),
        }
    }

    /// Catalog every matching file directly inside `dir`
    ///
    /// Only a failure to list the directory itself is an error.
    pub fn build(&self, dir: &Path) -> Result<CatalogResult, DomainError> {
        info!("Cataloguing clips in {}", dir.display());

        let path_utils = PathUtils::new();
        let mut seen = HashSet::new();
        let candidates: Vec<PathBuf> = self
            .fs_port
            .list_files(dir)?
            .into_iter()
            .filter(|path| path_utils.has_extension(path, &self.extensions))
            .filter(|path| seen.insert(path.clone()))
            .collect();
        debug!("{} candidate files", candidates.len());

        let named: Vec<_> = candidates
            .into_iter()
            .map(|path| {
                let start = self.name_port.parse_start_time(&path);
                (path, start)
            })
            .collect();

        let mut result = CatalogResult::default();
        for (path, outcome) in self.probe_all(named) {
            match outcome {
                Ok(clip) => {
                    debug!(clip = %clip, "Catalogued");
                    result.clips.push(clip);
                }
                Err(e) => Self::skip(&mut result, path, e),
            }
        }

        info!(
            "Catalogued {} clips, skipped {} files",
            result.clips.len(),
            result.skipped.len()
        );
        Ok(result)
    }

    fn skip(result: &mut CatalogResult, path: PathBuf, error: DomainError) {
        warn!(stage = "catalog", path = %path.display(), reason = %error, "File skipped");
        result.skipped.push(SkippedItem::new(Stage::Catalog, path, &error));
    }

    fn probe_one(
        &self,
        path: &Path,
        start: &Result<NaiveDateTime, DomainError>,
    ) -> Result<Clip, DomainError> {
        let start = start.clone()?;
        let duration = self.probe_port.probe_duration(path)?;
        Clip::new(path, start, duration)
    }

    /// Probe every file whose name parsed; results keep input order and are
    /// returned only after all workers have finished
    fn probe_all(
        &self,
        named: Vec<(PathBuf, Result<NaiveDateTime, DomainError>)>,
    ) -> Vec<(PathBuf, Result<Clip, DomainError>)> {
        if self.probe_jobs <= 1 || named.len() <= 1 {
            return named
                .into_iter()
                .map(|(path, start)| {
                    let outcome = self.probe_one(&path, &start);
                    (path, outcome)
                })
                .collect();
        }

        let chunk_size = named.len().div_ceil(self.probe_jobs);
        debug!(
            "Probing {} files on {} workers",
            named.len(),
            named.len().div_ceil(chunk_size)
        );

        thread::scope(|scope| {
            let workers: Vec<_> = named
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|(path, start)| (path.clone(), self.probe_one(path, start)))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            let mut results = Vec::with_capacity(named.len());
            for (worker, chunk) in workers.into_iter().zip(named.chunks(chunk_size)) {
                match worker.join() {
                    Ok(outcomes) => results.extend(outcomes),
                    Err(_) => results.extend(chunk.iter().map(|(path, _)| {
                        (
                            path.clone(),
                            Err(DomainError::ProbeFail(format!(
                                "{}: probe worker panicked",
                                path.display()
                            ))),
                        )
                    })),
                }
            }
            results
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ClipNameAdapter, FsLocalAdapter, MockProbeAdapter};
    use std::fs;
    use tempfile::TempDir;

    fn catalog(probe: MockProbeAdapter, jobs: usize) -> ClipCatalog {
        ClipCatalog::new(
            Arc::new(FsLocalAdapter::new()),
            Arc::new(ClipNameAdapter::default()),
            Arc::new(probe),
            vec!["avi".to_string()],
            jobs,
        )
    }

    fn populate(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"x").unwrap();
        }
    }

    #[test]
    fn test_build_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        populate(
            dir.path(),
            &[
                "1_20241031-080000_0800h.avi",
                "2_20241031-081000_0810h.AVI",
                "garbage.avi",
                "3_20241031-082000_0820h.avi",
                "notes.txt",
            ],
        );

        let probe = MockProbeAdapter::new()
            .with_duration("1_20241031-080000_0800h.avi", 600.0)
            .with_duration("2_20241031-081000_0810h.AVI", 600.0);
        let result = catalog(probe, 1).build(dir.path()).unwrap();

        assert_eq!(result.clips.len(), 2);
        assert_eq!(result.skipped.len(), 2);
        assert!(result.skipped.iter().all(|s| s.stage == Stage::Catalog));
        assert!(result.skipped[0].path.ends_with("3_20241031-082000_0820h.avi"));
        assert!(result.skipped[1].path.ends_with("garbage.avi"));
    }

    #[test]
    fn test_zero_duration_is_skipped() {
        let dir = TempDir::new().unwrap();
        populate(dir.path(), &["1_20241031-080000_a.avi"]);

        let probe = MockProbeAdapter::new().with_duration("1_20241031-080000_a.avi", 0.0);
        let result = catalog(probe, 1).build(dir.path()).unwrap();

        assert!(result.clips.is_empty());
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_parallel_probe_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let names: Vec<String> = (0..9)
            .map(|i| format!("{}_20241031-08{:02}00_x.avi", i, i * 5))
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        populate(dir.path(), &refs);

        let probe = || {
            names
                .iter()
                .skip(1)
                .fold(MockProbeAdapter::new(), |p, n| p.with_duration(n.clone(), 300.0))
        };

        let sequential = catalog(probe(), 1).build(dir.path()).unwrap();
        let parallel = catalog(probe(), 4).build(dir.path()).unwrap();

        assert_eq!(sequential.clips, parallel.clips);
        assert_eq!(sequential.skipped, parallel.skipped);
        assert_eq!(parallel.clips.len(), 8);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = catalog(MockProbeAdapter::new(), 1).build(&dir.path().join("nope"));
        assert!(matches!(result, Err(DomainError::FsFail(_))));
    }
}
