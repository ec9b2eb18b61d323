//! Algorithms over parsed lab data

pub mod aggregate;

pub use aggregate::{BiomarkerAggregator, ResolvedRanges, aggregate};
