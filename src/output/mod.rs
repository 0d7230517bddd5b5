//! Run reporting and output verification module

pub mod report;
pub mod verifier;

pub use report::RunReport;
pub use verifier::{DurationCheck, OutputVerifier};
