// Common test utilities shared by the integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use std::path::PathBuf;
use tempfile::TempDir;
use worksafe::{AssessmentRecord, Posture, RecordStore, ScoringEngine};

pub const HEADER: &str = "date,task,load_kg,frequency_per_hour,posture,risk_score\n";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Store rooted in a fresh temp dir; keep the dir alive for the test.
pub fn temp_store() -> (TempDir, RecordStore) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = RecordStore::new(temp.path().join("risk_data.csv"), ScoringEngine::standard());
    (temp, store)
}

/// Write `content` to a named file inside `dir`.
pub fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

pub fn record(task: &str, day: u32, load_kg: f64, frequency: u32, posture: &str) -> AssessmentRecord {
    AssessmentRecord::scored(
        &ScoringEngine::standard(),
        date(2025, 11, day),
        task,
        load_kg,
        frequency,
        Posture::parse(posture),
    )
}
