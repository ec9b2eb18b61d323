//! Data model for lab exports and aggregated biomarkers

pub mod biomarker;
pub mod range;
pub mod row;
pub mod table;

pub use biomarker::{Biomarker, HistoryEntry};
pub use range::ReferenceRange;
pub use row::RawRow;
pub use table::BiomarkerTable;
