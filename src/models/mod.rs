//! Core data models for the importer.

mod dataset;
mod ids;
mod payload;

pub use dataset::*;
pub use ids::*;
pub use payload::*;
