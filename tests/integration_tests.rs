use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stitchx_cli::adapters::{ClipNameAdapter, ExecCall, FsLocalAdapter, MockExecutionAdapter, MockProbeAdapter};
use stitchx_cli::app::{StitchInteractor, StitchRequest};
use stitchx_cli::config_initialization::StitchConfig;
use stitchx_cli::domain::model::Stage;
use stitchx_cli::*;
use tempfile::TempDir;

/// Test utilities for running the pipeline against mock collaborators
mod test_utils {
    use super::*;

    pub const A: &str = "1_20241031-080000_0800h.avi";
    pub const B: &str = "2_20241031-081000_0810h.avi";
    pub const C: &str = "3_20241031-082000_0820h.avi";

    pub struct Fixture {
        pub clips: TempDir,
        pub work: TempDir,
    }

    impl Fixture {
        pub fn new(names: &[&str]) -> Self {
            let clips = TempDir::new().unwrap();
            let work = TempDir::new().unwrap();
            for name in names {
                fs::write(clips.path().join(name), b"original").unwrap();
            }
            Self { clips, work }
        }

        pub fn output(&self) -> PathBuf {
            self.work.path().join("final_output_no_audio.avi")
        }

        pub fn config(&self) -> StitchConfig {
            StitchConfig {
                clips_dir: self.clips.path().to_path_buf(),
                work_dir: self.work.path().to_path_buf(),
                output: self.output(),
                ..StitchConfig::default()
            }
        }

        pub fn interactor(
            &self,
            probe: MockProbeAdapter,
            exec: Arc<MockExecutionAdapter>,
            config: StitchConfig,
        ) -> StitchInteractor {
            StitchInteractor::new(
                Arc::new(FsLocalAdapter::new()),
                Arc::new(ClipNameAdapter::default()),
                Arc::new(probe),
                exec,
                config,
            )
        }
    }

    pub fn ten_minute_clips() -> MockProbeAdapter {
        MockProbeAdapter::new()
            .with_duration(A, 600.0)
            .with_duration(B, 600.0)
            .with_duration(C, 600.0)
    }

    pub fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().to_string()
    }
}

use test_utils::*;

#[test]
fn test_stitch_straddle_and_inside() {
    let fixture = Fixture::new(&[C, A, B]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let probe = ten_minute_clips().with_duration("final_output_no_audio.avi", 900.0);
    let interactor = fixture.interactor(probe, exec.clone(), fixture.config());

    let report = interactor
        .execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:20:00"))
        .unwrap();

    assert_eq!(report.catalogued, 3);
    assert_eq!(report.selected, 2);
    assert_eq!(report.expected_duration, 900.0);
    assert!(report.is_clean());
    assert!(report.verification.as_ref().unwrap().within_tolerance);

    let trims = exec.trims();
    assert_eq!(trims.len(), 1);
    assert_eq!(file_name(&trims[0].source), A);
    assert_eq!(trims[0].offset_seconds, 300.0);
    assert_eq!(trims[0].duration_seconds, 300.0);

    let manifest = &exec.manifests()[0];
    let lines: Vec<_> = manifest.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("trimmed_000_1_20241031-080000_0800h.avi"));
    assert!(lines[1].contains(B));

    assert!(fixture.output().exists());
    assert_eq!(interactor.output_size().unwrap(), "stitched".len() as u64);
    assert!(!fixture.work.path().join("files_to_concat.txt").exists());
    assert!(fixture.clips.path().join(A).exists());
}

#[test]
fn test_stitch_trims_both_ends_in_playback_order() {
    let fixture = Fixture::new(&[A, B, C]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let report = interactor
        .execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:25:00"))
        .unwrap();

    assert_eq!(report.expected_duration, 1200.0);
    let sources: Vec<_> = report.segments.iter().map(|p| file_name(p.source_path())).collect();
    assert_eq!(sources, vec![A, B, C]);

    let trims = exec.trims();
    assert_eq!(trims.len(), 2);
    assert_eq!(file_name(&trims[1].source), C);
    assert_eq!(trims[1].offset_seconds, 0.0);
    assert_eq!(trims[1].duration_seconds, 300.0);

    // output was never probed successfully, which is only a warning
    assert!(!report.verification.unwrap().within_tolerance);
}

#[test]
fn test_single_clip_containing_interval() {
    let fixture = Fixture::new(&[A]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let report = interactor
        .execute(&StitchRequest::new("2024-10-31 08:02:00", "2024-10-31 08:07:30"))
        .unwrap();

    assert_eq!(report.expected_duration, 330.0);
    let trims = exec.trims();
    assert_eq!(trims[0].offset_seconds, 120.0);
    assert_eq!(trims[0].duration_seconds, 330.0);
}

#[test]
fn test_rerun_reuses_segment_names() {
    let fixture = Fixture::new(&[A, B]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let config = StitchConfig {
        keep_scratch: true,
        ..fixture.config()
    };
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), config);
    let request = StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:15:00");

    interactor.execute(&request).unwrap();
    interactor.execute(&request).unwrap();

    let trims = exec.trims();
    assert_eq!(trims.len(), 4);
    assert_eq!(trims[0].destination, trims[2].destination);
    assert_eq!(trims[1].destination, trims[3].destination);

    let manifests = exec.manifests();
    assert_eq!(manifests[0], manifests[1]);

    let leftovers: Vec<_> = fs::read_dir(fixture.work.path())
        .unwrap()
        .map(|e| file_name(&e.unwrap().path()))
        .filter(|n| n.starts_with("trimmed_"))
        .collect();
    assert_eq!(leftovers.len(), 2);
}

#[test]
fn test_bad_files_are_skipped() {
    let fixture = Fixture::new(&[A, B, "camera.avi", "4_20241031-083000_x.avi"]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec, fixture.config());

    let report = interactor
        .execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:15:00"))
        .unwrap();

    assert_eq!(report.catalogued, 2);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|s| s.stage == Stage::Catalog));
}

#[test]
fn test_failed_trim_is_skipped() {
    let fixture = Fixture::new(&[A, B, C]);
    let exec = Arc::new(MockExecutionAdapter::new().failing_trim(A));
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let report = interactor
        .execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:25:00"))
        .unwrap();

    assert_eq!(report.expected_duration, 900.0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].stage, Stage::Build);
    assert!(!exec.manifests()[0].contains("0800h"));

    assert_eq!(report.planned, 3);
    let sources: Vec<_> = report.segments.iter().map(|p| file_name(p.source_path())).collect();
    assert_eq!(sources, vec![B, C]);
}

#[test]
fn test_all_trims_failing_skips_concat() {
    let fixture = Fixture::new(&[A]);
    let exec = Arc::new(MockExecutionAdapter::new().failing_trim(A));
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let result = interactor.execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:06:00"));

    assert!(matches!(result, Err(StitchError::NoSegmentsProduced)));
    assert!(!exec.calls().iter().any(|c| matches!(c, ExecCall::Concat { .. })));
}

#[test]
fn test_concat_failure_is_fatal() {
    let fixture = Fixture::new(&[A, B]);
    let exec = Arc::new(MockExecutionAdapter::new().failing_concat());
    let interactor = fixture.interactor(ten_minute_clips(), exec, fixture.config());

    let result = interactor.execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:15:00"));

    assert!(matches!(result, Err(StitchError::ConcatenationFailed { .. })));
    assert!(!fixture.output().exists());
}

#[test]
fn test_inverted_interval_touches_nothing() {
    let fixture = Fixture::new(&[A]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    for (start, end) in [
        ("2024-10-31 08:10:00", "2024-10-31 08:05:00"),
        ("2024-10-31 08:05:00", "2024-10-31 08:05:00"),
    ] {
        let result = interactor.execute(&StitchRequest::new(start, end));
        assert!(matches!(result, Err(StitchError::InvalidInterval { .. })));
    }

    let result = interactor.execute(&StitchRequest::new("yesterday", "2024-10-31 08:05:00"));
    assert!(matches!(result, Err(StitchError::InvalidTimeFormat { .. })));

    assert!(exec.calls().is_empty());
}

#[test]
fn test_no_overlap_is_reported() {
    let fixture = Fixture::new(&[A, B]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let result = interactor.execute(&StitchRequest::new("2024-10-31 09:00:00", "2024-10-31 09:30:00"));

    assert!(matches!(result, Err(StitchError::NoOverlap { .. })));
    assert!(exec.calls().is_empty());
}

#[test]
fn test_empty_directory() {
    let fixture = Fixture::new(&[]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(MockProbeAdapter::new(), exec, fixture.config());

    let result = interactor.execute(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:15:00"));
    assert!(matches!(result, Err(StitchError::NoClipsFound { .. })));
}

#[test]
fn test_plan_does_not_run_encoder() {
    let fixture = Fixture::new(&[A, B, C]);
    let exec = Arc::new(MockExecutionAdapter::new());
    let interactor = fixture.interactor(ten_minute_clips(), exec.clone(), fixture.config());

    let report = interactor
        .plan(&StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:25:00"))
        .unwrap();

    assert_eq!(report.planned, 3);
    assert_eq!(report.expected_duration, 1200.0);
    assert!(report.output.is_none());
    assert!(exec.calls().is_empty());
}

#[test]
fn test_parallel_probing_gives_same_plan() {
    let fixture = Fixture::new(&[A, B, C]);
    let request = StitchRequest::new("2024-10-31 08:05:00", "2024-10-31 08:25:00");

    let sequential = fixture
        .interactor(ten_minute_clips(), Arc::new(MockExecutionAdapter::new()), fixture.config())
        .plan(&request)
        .unwrap();
    let parallel = fixture
        .interactor(
            ten_minute_clips(),
            Arc::new(MockExecutionAdapter::new()),
            StitchConfig {
                probe_jobs: 0,
                ..fixture.config()
            },
        )
        .plan(&request)
        .unwrap();

    assert_eq!(sequential, parallel);
}
