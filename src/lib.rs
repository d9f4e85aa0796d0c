// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod history;
pub mod io;
pub mod scoring;
pub mod store;

// Re-export commonly used types
pub use crate::config::ThresholdSet;

pub use crate::errors::{ParseError, RowIssue, StoreError};

pub use crate::scoring::{
    classify, normalize, AdviceTable, Assessment, Posture, PostureCategory, PostureWeightTable,
    RiskBand, ScoreBreakdown, ScoringEngine,
};

pub use crate::store::{AssessmentRecord, ImportSummary, LoadReport, RawTable, RecordStore};
