use crate::scoring::{Posture, ScoringEngine};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const COL_DATE: &str = "date";
pub const COL_TASK: &str = "task";
pub const COL_LOAD_KG: &str = "load_kg";
pub const COL_FREQUENCY: &str = "frequency_per_hour";
pub const COL_POSTURE: &str = "posture";
pub const COL_RISK_SCORE: &str = "risk_score";

/// Backing file column layout, in order.
pub const COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_TASK,
    COL_LOAD_KG,
    COL_FREQUENCY,
    COL_POSTURE,
    COL_RISK_SCORE,
];

/// Columns every import must supply; `risk_score` can be derived.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_DATE, COL_TASK, COL_LOAD_KG, COL_FREQUENCY, COL_POSTURE];

/// One observed task instance.
///
/// `load_kg` and `frequency_per_hour` are stored as observed; clamping
/// happens only inside the scoring formula. `risk_score` is stored
/// alongside the inputs and is not recomputed on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub date: NaiveDate,
    pub task: String,
    pub load_kg: f64,
    pub frequency_per_hour: u32,
    pub posture: Posture,
    pub risk_score: u8,
}

impl AssessmentRecord {
    /// Build a record, scoring it with `engine`.
    pub fn scored(
        engine: &ScoringEngine,
        date: NaiveDate,
        task: impl Into<String>,
        load_kg: f64,
        frequency_per_hour: u32,
        posture: Posture,
    ) -> Self {
        let risk_score = engine.compute_risk(load_kg, frequency_per_hour, &posture);
        Self {
            date,
            task: task.into(),
            load_kg,
            frequency_per_hour,
            posture,
            risk_score,
        }
    }

    /// Cells in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.date.format(DATE_FORMAT).to_string(),
            self.task.clone(),
            self.load_kg.to_string(),
            self.frequency_per_hour.to_string(),
            self.posture.label().to_string(),
            self.risk_score.to_string(),
        ]
    }
}
