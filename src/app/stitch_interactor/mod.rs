// Stitch interactor - Orchestrates the catalog, plan and stitch use cases

use std::sync::Arc;

use tracing::info;

use crate::catalog::{CatalogResult, ClipCatalog};
use crate::config_initialization::StitchConfig;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::engine::{Concatenator, SegmentBuilder};
use crate::error::{StitchError, StitchResult};
use crate::output::{OutputVerifier, RunReport};
use crate::ports::*;
use crate::utils::time::TimeParser;

/// Interval request as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchRequest {
    pub start: String,
    pub end: String,
}

impl StitchRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Catalog, selection and planning outcome shared by plan and stitch
struct Planned {
    catalogued: usize,
    selected: usize,
    plans: Vec<SegmentPlan>,
    skipped: Vec<SkippedItem>,
}

/// Interactor for the stitching use cases
pub struct StitchInteractor {
    fs_port: Arc<dyn FsPort>,
    name_port: Arc<dyn ClipNamePort>,
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    config: StitchConfig,
}

impl StitchInteractor {
    /// Create new stitch interactor with injected ports
    pub fn new(
        fs_port: Arc<dyn FsPort>,
        name_port: Arc<dyn ClipNamePort>,
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        config: StitchConfig,
    ) -> Self {
        Self {
            fs_port,
            name_port,
            probe_port,
            execute_port,
            config,
        }
    }

    /// Effective configuration
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Parse and validate the requested interval
    ///
    /// Pure: no collaborator is involved, so a bad request fails before any
    /// file is listed or probed.
    pub fn parse_interval(&self, request: &StitchRequest) -> StitchResult<Interval> {
        let parser = TimeParser::new();
        let start = parser.parse_timestamp(&request.start)?;
        let end = parser.parse_timestamp(&request.end)?;

        Interval::new(start, end).map_err(|_| StitchError::InvalidInterval {
            start: parser.format_timestamp(&start),
            end: parser.format_timestamp(&end),
        })
    }

    /// Catalog the configured clips directory
    pub fn catalog(&self) -> StitchResult<CatalogResult> {
        let catalog = ClipCatalog::new(
            Arc::clone(&self.fs_port),
            Arc::clone(&self.name_port),
            Arc::clone(&self.probe_port),
            self.config.extensions.clone(),
            self.config.effective_probe_jobs(),
        );
        Ok(catalog.build(&self.config.clips_dir)?)
    }

    /// Size in bytes of the stitched output
    pub fn output_size(&self) -> StitchResult<u64> {
        Ok(self.fs_port.file_size(&self.config.output)?)
    }

    /// Dry run: catalog, select and plan without invoking the encoder
    pub fn plan(&self, request: &StitchRequest) -> StitchResult<RunReport> {
        let interval = self.parse_interval(request)?;
        let planned = self.plan_interval(&interval)?;
        let expected_duration = TrimPlanner::retained_seconds(&planned.plans);

        Ok(RunReport {
            interval,
            catalogued: planned.catalogued,
            selected: planned.selected,
            planned: planned.plans.len(),
            segments: planned.plans,
            skipped: planned.skipped,
            output: None,
            expected_duration,
            verification: None,
        })
    }

    /// Full run: plan, build segments, concatenate and verify
    ///
    /// The report lists only the segments that made it into the output.
    pub fn execute(&self, request: &StitchRequest) -> StitchResult<RunReport> {
        let interval = self.parse_interval(request)?;
        info!("Starting stitch for interval {}", interval);

        let Planned {
            catalogued,
            selected,
            plans,
            mut skipped,
        } = self.plan_interval(&interval)?;

        let builder = SegmentBuilder::new(
            Arc::clone(&self.execute_port),
            Arc::clone(&self.fs_port),
            self.config.work_dir.clone(),
        );
        let built = builder.build(&plans)?;
        skipped.extend(built.skipped.iter().cloned());
        let planned = plans.len();
        let segments: Vec<SegmentPlan> = plans
            .into_iter()
            .filter(|plan| !built.skipped.iter().any(|s| s.path == plan.source.path))
            .collect();

        let concatenator = Concatenator::new(
            Arc::clone(&self.execute_port),
            Arc::clone(&self.fs_port),
            self.config.work_dir.clone(),
            self.config.keep_scratch,
        );
        concatenator.concatenate(&built.segments, &self.config.output)?;
        info!("Stitched output written to {}", self.config.output.display());

        let expected_duration = built.total_seconds();
        let verification = self.config.verify_output.then(|| {
            OutputVerifier::new(Arc::clone(&self.probe_port), self.config.verify_tolerance)
                .verify(&self.config.output, expected_duration)
        });

        Ok(RunReport {
            interval,
            catalogued,
            selected,
            planned,
            segments,
            skipped,
            output: Some(self.config.output.clone()),
            expected_duration,
            verification,
        })
    }

    fn plan_interval(&self, interval: &Interval) -> StitchResult<Planned> {
        let catalog = self.catalog()?;
        if catalog.clips.is_empty() {
            return Err(StitchError::NoClipsFound {
                dir: self.config.clips_dir.display().to_string(),
            });
        }

        let selected = IntervalSelector::select(&catalog.clips, interval);
        info!(
            "{} of {} clips overlap {}",
            selected.len(),
            catalog.clips.len(),
            interval
        );
        if selected.is_empty() {
            let parser = TimeParser::new();
            return Err(StitchError::NoOverlap {
                start: parser.format_timestamp(&interval.start),
                end: parser.format_timestamp(&interval.end),
            });
        }

        let (plans, plan_skipped) = TrimPlanner::plan(&selected, interval);
        if plans.is_empty() {
            return Err(StitchError::NoSegmentsProduced);
        }

        let mut skipped = catalog.skipped;
        skipped.extend(plan_skipped);

        Ok(Planned {
            catalogued: catalog.clips.len(),
            selected: selected.len(),
            plans,
            skipped,
        })
    }
}
