//! StitchX clip stitcher library
//!
//! Selects the clips of a directory that overlap a wall-clock interval,
//! trims the ones crossing the interval boundaries and concatenates the
//! result into a single video-only file using stream copy.
//!
//! The pipeline is catalog, select, plan, build, concatenate. Selection and
//! planning are pure functions in [`domain::rules`]; everything touching the
//! disk or an encoder goes through the traits in [`ports`].

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{Clip, Interval, SegmentPlan, SkippedItem};
pub use error::{StitchError, StitchResult};
