//! CSV-backed assessment history.
//!
//! The store owns one flat file with the column layout in
//! [`record::COLUMNS`]. Every mutation reads the whole collection and
//! rewrites the whole file (temp file plus rename), so a write costs O(n)
//! in the number of records. There is no cross-process locking: two
//! processes writing at once can lose each other's rows.
//!
//! Rows that fail coercion are left out of the returned view but stay on
//! disk until the next rewrite.

pub mod coercion;
pub mod record;
pub mod seed;
pub mod table;

pub use record::{AssessmentRecord, COLUMNS, REQUIRED_COLUMNS};
pub use table::RawTable;

use crate::errors::{ParseError, RowIssue, StoreError, StoreResult};
use crate::io::{read_if_exists, write_atomically};
use crate::scoring::ScoringEngine;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Valid records plus the rows that were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub records: Vec<AssessmentRecord>,
    pub rejected: Vec<RowIssue>,
}

/// Outcome of a bulk replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub accepted: usize,
    /// Rows whose score was derived rather than taken from the input
    pub recomputed_scores: usize,
    pub rejected: Vec<RowIssue>,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    engine: ScoringEngine,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, engine: ScoringEngine) -> Self {
        Self {
            path: path.into(),
            engine,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Seed the backing file with demo records if it does not exist yet.
    fn read_or_seed(&self) -> StoreResult<Vec<u8>> {
        if let Some(bytes) = read_if_exists(&self.path)? {
            return Ok(bytes);
        }

        let demo = seed::demo_records(&self.engine);
        log::info!(
            "No data at {}; seeding {} demo records",
            self.path.display(),
            demo.len()
        );
        let bytes = table::encode_records(&demo)?;
        write_atomically(&self.path, &bytes)?;
        Ok(bytes)
    }

    pub fn load_with_report(&self) -> StoreResult<LoadReport> {
        let bytes = self.read_or_seed()?;
        self.parse_report(&bytes)
    }

    /// Like [`RecordStore::load_with_report`], but a missing file reads as
    /// empty and nothing is written.
    pub fn peek_with_report(&self) -> StoreResult<LoadReport> {
        match read_if_exists(&self.path)? {
            Some(bytes) => self.parse_report(&bytes),
            None => Ok(LoadReport::default()),
        }
    }

    fn parse_report(&self, bytes: &[u8]) -> StoreResult<LoadReport> {
        let raw = RawTable::from_reader(bytes)?;
        let columns = raw.columns(true)?;

        let mut report = LoadReport::default();
        for (row_number, row) in raw.rows() {
            let coerced = columns.coerce(row_number, row).and_then(|mut fields| {
                match fields.risk_score.take().unwrap_or(Err(ParseError::Missing)) {
                    Ok(score) => Ok(fields.into_record(score)),
                    Err(error) => Err(RowIssue {
                        row: row_number,
                        column: record::COL_RISK_SCORE,
                        error,
                    }),
                }
            });
            match coerced {
                Ok(record) => report.records.push(record),
                Err(issue) => report.rejected.push(issue),
            }
        }

        if !report.rejected.is_empty() {
            log::warn!(
                "Skipped {} invalid row(s) in {}",
                report.rejected.len(),
                self.path.display()
            );
            for issue in &report.rejected {
                log::debug!("  {}", issue);
            }
        }
        Ok(report)
    }

    /// Valid records in file order.
    pub fn load_all(&self) -> StoreResult<Vec<AssessmentRecord>> {
        Ok(self.load_with_report()?.records)
    }

    /// Add one record and rewrite the file.
    ///
    /// Rows that failed coercion are not carried into the rewrite.
    pub fn append(&self, record: AssessmentRecord) -> StoreResult<()> {
        let mut records = self.load_all()?;
        records.push(record);
        self.write_all(&records)
    }

    /// Replace the whole collection from imported rows.
    ///
    /// The column check runs before any row is touched; a schema failure
    /// leaves the backing file as it was. Rows that fail coercion are
    /// dropped. A missing or unusable `risk_score` is derived from the
    /// row's own fields.
    pub fn replace_all(&self, table: &RawTable) -> StoreResult<ImportSummary> {
        let columns = table.columns(false)?;

        let mut summary = ImportSummary::default();
        let mut records = Vec::with_capacity(table.len());
        for (row_number, row) in table.rows() {
            let fields = match columns.coerce(row_number, row) {
                Ok(fields) => fields,
                Err(issue) => {
                    log::debug!("Dropping import {}", issue);
                    summary.rejected.push(issue);
                    continue;
                }
            };

            let score = match fields.risk_score {
                Some(Ok(score)) => score,
                _ => {
                    summary.recomputed_scores += 1;
                    self.engine.compute_risk(
                        fields.load_kg,
                        fields.frequency_per_hour,
                        &fields.posture,
                    )
                }
            };
            records.push(fields.into_record(score));
        }

        self.write_all(&records)?;
        summary.accepted = records.len();
        log::info!(
            "Replaced {} with {} record(s), {} row(s) dropped",
            self.path.display(),
            summary.accepted,
            summary.rejected.len()
        );
        Ok(summary)
    }

    /// Write the current valid records as CSV; returns the record count.
    pub fn export_to<W: Write>(&self, writer: W) -> StoreResult<usize> {
        let records = self.load_all()?;
        table::write_records(writer, &records)?;
        Ok(records.len())
    }

    /// Export to a file. The store is read before `path` is created, so a
    /// failed load leaves nothing behind.
    pub fn export_to_path(&self, path: &Path) -> StoreResult<usize> {
        let records = self.load_all()?;
        let file = File::create(path).map_err(|e| StoreError::io("create", path, e))?;
        table::write_records(BufWriter::new(file), &records)?;
        Ok(records.len())
    }

    fn write_all(&self, records: &[AssessmentRecord]) -> StoreResult<()> {
        let bytes = table::encode_records(records)?;
        write_atomically(&self.path, &bytes)?;
        log::debug!("Wrote {} record(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> RecordStore {
        RecordStore::new(temp.path().join("risk_data.csv"), ScoringEngine::standard())
    }

    #[test]
    fn test_load_all_seeds_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let records = store.load_all().unwrap();

        assert_eq!(records.len(), 3);
        assert!(store.path().exists());
    }

    #[test]
    fn test_header_only_file_is_empty_not_reseeded() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "date,task,load_kg,frequency_per_hour,posture,risk_score\n")
            .unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_stored_file_without_score_column_is_schema_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "date,task,load_kg,frequency_per_hour,posture\n").unwrap();
        assert!(store.load_all().unwrap_err().is_schema());
    }

    #[test]
    fn test_bad_stored_score_rejects_row() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(
            store.path(),
            "date,task,load_kg,frequency_per_hour,posture,risk_score\n2025-01-02,Lift,5,5,Neutral,n/a\n",
        )
        .unwrap();
        let report = store.load_with_report().unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.rejected[0].column, "risk_score");
    }
}
