//! Analysis modules.
//!
//! Pure aggregation and classification over the fetched payload; the
//! rendering and export code consumes these summaries.

pub mod aggregator;

pub use aggregator::*;
