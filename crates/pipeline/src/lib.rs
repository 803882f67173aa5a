//! Region extraction pipeline.
//!
//! Turns a rectangle drawn over a page on the canvas into a persisted
//! transcript box carrying the transcribed text and its translation.

pub mod crop;
pub mod error;
pub mod region;

pub use error::PipelineError;
pub use region::{GenerateRegion, RegionPipeline};
