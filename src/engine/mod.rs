//! Segment building and concatenation
//!
//! Everything here goes through [`crate::ports`]; the engine never spawns an
//! encoder or touches the disk directly.

pub mod concat;
pub mod segments;

pub use concat::Concatenator;
pub use segments::{BuildResult, BuiltSegment, SegmentBuilder};

#[cfg(test)]
mod tests;
