use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use super::*;
use crate::adapters::{ExecCall, FsLocalAdapter, MockExecutionAdapter};
use crate::domain::model::*;
use crate::error::StitchError;

fn at(seconds: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 31)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(seconds)
}

fn clip(dir: &Path, name: &str, start: i64, duration: f64) -> Clip {
    let path = dir.join(name);
    fs::write(&path, b"original").unwrap();
    Clip::new(path, at(start), duration).unwrap()
}

fn trimmed(source: Clip, offset: f64, duration: f64) -> SegmentPlan {
    SegmentPlan {
        source,
        trim_offset: offset,
        trim_duration: duration,
        needs_trim: true,
        boundary: Boundary::StraddlesStart,
    }
}

#[test]
fn test_build_keeps_plan_order() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new());
    let builder = SegmentBuilder::new(exec.clone(), Arc::new(FsLocalAdapter::new()), work_dir.path());

    let plans = vec![
        trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 300.0, 300.0),
        SegmentPlan::pass_through(clip(clips_dir.path(), "b.avi", 600, 600.0)),
        trimmed(clip(clips_dir.path(), "c.avi", 1200, 600.0), 0.0, 60.0),
    ];

    let result = builder.build(&plans).unwrap();

    let paths: Vec<_> = result.segments.iter().map(|s| s.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            work_dir.path().join("trimmed_000_a.avi"),
            clips_dir.path().join("b.avi"),
            work_dir.path().join("trimmed_002_c.avi"),
        ]
    );
    assert_eq!(result.total_seconds(), 960.0);
    assert_eq!(exec.trims().len(), 2);
    assert_eq!(exec.trims()[0].offset_seconds, 300.0);
}

#[test]
fn test_build_skips_failed_trim() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new().failing_trim("a.avi"));
    let builder = SegmentBuilder::new(exec, Arc::new(FsLocalAdapter::new()), work_dir.path());

    let plans = vec![
        trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 300.0, 300.0),
        SegmentPlan::pass_through(clip(clips_dir.path(), "b.avi", 600, 600.0)),
    ];

    let result = builder.build(&plans).unwrap();
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].stage, Stage::Build);
}

#[test]
fn test_build_with_nothing_left_fails() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new().failing_trim("a.avi"));
    let builder = SegmentBuilder::new(exec, Arc::new(FsLocalAdapter::new()), work_dir.path());

    let plans = vec![trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 300.0, 300.0)];
    assert!(matches!(builder.build(&plans), Err(StitchError::NoSegmentsProduced)));
    assert!(matches!(builder.build(&[]), Err(StitchError::NoSegmentsProduced)));
}

#[test]
fn test_concatenate_writes_manifest_and_cleans_scratch() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new());
    let fs_port = Arc::new(FsLocalAdapter::new());

    let builder = SegmentBuilder::new(exec.clone(), fs_port.clone(), work_dir.path());
    let plans = vec![
        trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 300.0, 300.0),
        SegmentPlan::pass_through(clip(clips_dir.path(), "it's.avi", 600, 600.0)),
    ];
    let built = builder.build(&plans).unwrap();

    let output = work_dir.path().join("out").join("final.avi");
    Concatenator::new(exec.clone(), fs_port, work_dir.path(), false)
        .concatenate(&built.segments, &output)
        .unwrap();

    let manifests = exec.manifests();
    assert_eq!(manifests.len(), 1);
    let lines: Vec<_> = manifests[0].lines().collect();
    assert_eq!(
        lines[0],
        format!("file '{}'", work_dir.path().join("trimmed_000_a.avi").display())
    );
    assert!(lines[1].ends_with("it'\\''s.avi'"));

    assert!(output.exists());
    assert!(!work_dir.path().join("files_to_concat.txt").exists());
    assert!(!work_dir.path().join("trimmed_000_a.avi").exists());
    assert!(clips_dir.path().join("it's.avi").exists());
    assert!(clips_dir.path().join("a.avi").exists());

    match exec.calls().last() {
        Some(ExecCall::Concat { dest, .. }) => assert_eq!(dest, &output),
        other => panic!("expected concat call, got {:?}", other),
    }
}

#[test]
fn test_concatenate_keep_scratch() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new());
    let fs_port = Arc::new(FsLocalAdapter::new());

    let built = SegmentBuilder::new(exec.clone(), fs_port.clone(), work_dir.path())
        .build(&[trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 0.0, 10.0)])
        .unwrap();

    Concatenator::new(exec, fs_port, work_dir.path(), true)
        .concatenate(&built.segments, &work_dir.path().join("final.avi"))
        .unwrap();

    assert!(work_dir.path().join("trimmed_000_a.avi").exists());
    assert!(!work_dir.path().join("files_to_concat.txt").exists());
}

#[test]
fn test_concatenate_failure_is_terminal() {
    let clips_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let exec = Arc::new(MockExecutionAdapter::new().failing_concat());
    let fs_port = Arc::new(FsLocalAdapter::new());

    let built = SegmentBuilder::new(exec.clone(), fs_port.clone(), work_dir.path())
        .build(&[trimmed(clip(clips_dir.path(), "a.avi", 0, 600.0), 0.0, 10.0)])
        .unwrap();

    let result = Concatenator::new(exec, fs_port, work_dir.path(), false)
        .concatenate(&built.segments, &work_dir.path().join("final.avi"));

    assert!(matches!(result, Err(StitchError::ConcatenationFailed { .. })));
    assert!(work_dir.path().join("trimmed_000_a.avi").exists());
}
