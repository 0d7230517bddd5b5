// Domain rules - Interval selection and trim planning

use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Slack allowed when checking a trim against the clip length
pub const DURATION_TOLERANCE: f64 = 1e-6;

/// Business rules for picking the clips that overlap an interval
pub struct IntervalSelector;

impl IntervalSelector {
    /// Clips overlapping `interval`, ascending by start time
    ///
    /// The sort is stable, so clips sharing a start time keep their catalog
    /// order. Selection is all-or-nothing per clip; trimming is decided later.
    pub fn select(clips: &[Clip], interval: &Interval) -> Vec<Clip> {
        let mut ordered: Vec<&Clip> = clips.iter().collect();
        ordered.sort_by_key(|clip| clip.start_time);

        ordered
            .into_iter()
            .filter(|clip| clip.overlaps(interval))
            .cloned()
            .collect()
    }
}

/// Business rules for deriving trim parameters
pub struct TrimPlanner;

impl TrimPlanner {
    /// Whether the clip straddles the interval start
    pub fn straddles_start(clip: &Clip, interval: &Interval) -> bool {
        clip.start_time < interval.start && interval.start < clip.end_time
    }

    /// Whether the clip straddles the interval end
    pub fn straddles_end(clip: &Clip, interval: &Interval) -> bool {
        clip.start_time < interval.end && interval.end < clip.end_time
    }

    /// Classify one clip against the interval and compute its trim
    pub fn classify_and_plan(clip: &Clip, interval: &Interval) -> Result<SegmentPlan, DomainError> {
        let cuts_start = Self::straddles_start(clip, interval);
        let cuts_end = Self::straddles_end(clip, interval);

        let (boundary, trim_offset, trim_duration) = match (cuts_start, cuts_end) {
            (false, false) => return Ok(SegmentPlan::pass_through(clip.clone())),
            (true, false) => {
                let offset = clip.offset_of(&interval.start);
                (Boundary::StraddlesStart, offset, clip.duration - offset)
            }
            (false, true) => (Boundary::StraddlesEnd, 0.0, clip.offset_of(&interval.end)),
            (true, true) => (
                Boundary::ContainsInterval,
                clip.offset_of(&interval.start),
                interval.length_seconds(),
            ),
        };

        if trim_offset < 0.0 {
            return Err(DomainError::PlanFail(format!(
                "{}: negative trim offset {:.6}s",
                clip.path.display(),
                trim_offset
            )));
        }
        if trim_duration <= 0.0 || !trim_duration.is_finite() {
            return Err(DomainError::PlanFail(format!(
                "{}: non-positive trim duration {:.6}s",
                clip.path.display(),
                trim_duration
            )));
        }
        if trim_duration > clip.duration - trim_offset + DURATION_TOLERANCE {
            return Err(DomainError::PlanFail(format!(
                "{}: trim of {:.6}s at {:.6}s runs past the clip end ({:.6}s)",
                clip.path.display(),
                trim_duration,
                trim_offset,
                clip.duration
            )));
        }

        Ok(SegmentPlan {
            source: clip.clone(),
            trim_offset,
            trim_duration,
            needs_trim: true,
            boundary,
        })
    }

    /// Plan every selected clip, keeping input order
    ///
    /// At most one clip may straddle each boundary. When several do, all of
    /// them are rejected for that boundary instead of picking one.
    pub fn plan(selected: &[Clip], interval: &Interval) -> (Vec<SegmentPlan>, Vec<SkippedItem>) {
        let start_straddlers = selected
            .iter()
            .filter(|clip| Self::straddles_start(clip, interval))
            .count();
        let end_straddlers = selected
            .iter()
            .filter(|clip| Self::straddles_end(clip, interval))
            .count();

        let mut plans = Vec::with_capacity(selected.len());
        let mut skipped = Vec::new();

        for clip in selected {
            let contested = if start_straddlers > 1 && Self::straddles_start(clip, interval) {
                Some(("start", start_straddlers))
            } else if end_straddlers > 1 && Self::straddles_end(clip, interval) {
                Some(("end", end_straddlers))
            } else {
                None
            };

            let outcome = match contested {
                Some((edge, count)) => Err(DomainError::PlanFail(format!(
                    "{}: {} clips straddle the interval {}",
                    clip.path.display(),
                    count,
                    edge
                ))),
                None => Self::classify_and_plan(clip, interval),
            };

            match outcome {
                Ok(plan) => {
                    debug!(
                        clip = %clip.path.display(),
                        boundary = ?plan.boundary,
                        offset = plan.trim_offset,
                        duration = plan.trim_duration,
                        "Planned segment"
                    );
                    plans.push(plan);
                }
                Err(e) => {
                    warn!(stage = "planning", clip = %clip.path.display(), reason = %e, "Clip excluded");
                    skipped.push(SkippedItem::new(Stage::Planning, clip.path.clone(), &e));
                }
            }
        }

        (plans, skipped)
    }

    /// Total seconds retained by a list of plans
    pub fn retained_seconds(plans: &[SegmentPlan]) -> f64 {
        plans.iter().map(|plan| plan.trim_duration).sum()
    }
}
