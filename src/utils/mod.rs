//! Utility functions shared by the loader, report and binary

pub mod filename;
pub mod logging;

pub use filename::generate_filename;
