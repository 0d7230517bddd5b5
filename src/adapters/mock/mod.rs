//! In-memory collaborators for tests and dry runs
//!
//! The probe answers from a table keyed by file name. The executor records
//! every call, writes a small placeholder file for each destination and can be
//! told to fail for chosen sources.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Probe adapter backed by a table of durations
#[derive(Default)]
pub struct MockProbeAdapter {
    durations: HashMap<String, f64>,
}

impl MockProbeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `seconds` for any file named `file_name`
    pub fn with_duration(mut self, file_name: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(file_name.into(), seconds);
        self
    }
}

impl ProbePort for MockProbeAdapter {
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.durations
            .get(&name)
            .copied()
            .ok_or_else(|| DomainError::ProbeFail(format!("{}: no duration", file_path.display())))
    }
}

/// One recorded executor call
#[derive(Debug, Clone, PartialEq)]
pub enum ExecCall {
    Trim(TrimRequest),
    Concat { manifest: PathBuf, dest: PathBuf },
}

#[derive(Default)]
struct ExecState {
    calls: Vec<ExecCall>,
    manifests: Vec<String>,
}

/// Execution adapter that records calls instead of running an encoder
#[derive(Default)]
pub struct MockExecutionAdapter {
    failing_sources: HashSet<String>,
    fail_concat: bool,
    state: Mutex<ExecState>,
}

impl MockExecutionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every trim whose source file is named `file_name`
    pub fn failing_trim(mut self, file_name: impl Into<String>) -> Self {
        self.failing_sources.insert(file_name.into());
        self
    }

    /// Fail the concat call
    pub fn failing_concat(mut self) -> Self {
        self.fail_concat = true;
        self
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> Vec<ExecCall> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    /// Trim requests in the order they were made
    pub fn trims(&self) -> Vec<TrimRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ExecCall::Trim(request) => Some(request),
                ExecCall::Concat { .. } => None,
            })
            .collect()
    }

    /// Manifest contents as seen by each concat call
    pub fn manifests(&self) -> Vec<String> {
        self.state.lock().map(|s| s.manifests.clone()).unwrap_or_default()
    }

    fn record(&self, call: ExecCall) -> Result<(), DomainError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DomainError::ExecFail("mock executor state poisoned".to_string()))?;
        state.calls.push(call);
        Ok(())
    }

    fn touch(path: &Path, contents: &str) -> Result<(), DomainError> {
        fs::write(path, contents)
            .map_err(|e| DomainError::FsFail(format!("{}: {}", path.display(), e)))
    }
}

impl ExecutePort for MockExecutionAdapter {
    fn trim_video(&self, request: &TrimRequest) -> Result<(), DomainError> {
        self.record(ExecCall::Trim(request.clone()))?;

        let name = request
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.failing_sources.contains(&name) {
            return Err(DomainError::ExecFail(format!("{}: simulated trim failure", name)));
        }

        Self::touch(&request.destination, "trimmed")
    }

    fn concatenate_videos(&self, manifest_path: &Path, dest_path: &Path) -> Result<(), DomainError> {
        self.record(ExecCall::Concat {
            manifest: manifest_path.to_path_buf(),
            dest: dest_path.to_path_buf(),
        })?;

        let manifest = fs::read_to_string(manifest_path)
            .map_err(|e| DomainError::ExecFail(format!("{}: {}", manifest_path.display(), e)))?;
        if let Ok(mut state) = self.state.lock() {
            state.manifests.push(manifest);
        }

        if self.fail_concat {
            return Err(DomainError::ExecFail("simulated concat failure".to_string()));
        }

        Self::touch(dest_path, "stitched")
    }
}
