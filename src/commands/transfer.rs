use super::Session;
use crate::errors::StoreError;
use crate::store::{RawTable, REQUIRED_COLUMNS};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn handle_export(session: &Session, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let count = session
                .store
                .export_to_path(&path)
                .with_context(|| format!("Export to {} failed", path.display()))?;
            eprintln!("Exported {} record(s) to {}", count, path.display());
        }
        None => {
            session.store.export_to(std::io::stdout().lock())?;
        }
    }
    Ok(())
}

pub fn handle_import(session: &Session, file: &Path) -> Result<()> {
    let table = RawTable::from_path(file)
        .with_context(|| format!("Import failed: could not read {}", file.display()))?;
    log::debug!(
        "Importing {} row(s) with columns: {}",
        table.len(),
        table.headers().collect::<Vec<_>>().join(", ")
    );

    let summary = match session.store.replace_all(&table) {
        Ok(summary) => summary,
        Err(err @ StoreError::Schema { .. }) => {
            anyhow::bail!(
                "Import failed: {}. Must include columns: {}. If risk_score is missing, it will be auto-calculated.",
                err,
                REQUIRED_COLUMNS.join(", ")
            );
        }
        Err(err) => return Err(err).context("Import failed"),
    };

    println!(
        "Data replaced: {} record(s) imported into {}",
        summary.accepted,
        session.store.path().display()
    );
    if summary.recomputed_scores > 0 {
        println!("  {} risk score(s) calculated from the row fields", summary.recomputed_scores);
    }
    if !summary.rejected.is_empty() {
        println!("  {} row(s) skipped:", summary.rejected.len());
        for issue in &summary.rejected {
            println!("    {}", issue);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdSet;
    use crate::formatting::FormattingConfig;
    use crate::scoring::ScoringEngine;
    use crate::store::RecordStore;
    use tempfile::TempDir;

    fn session(temp: &TempDir) -> Session {
        Session {
            store: RecordStore::new(temp.path().join("data.csv"), ScoringEngine::standard()),
            thresholds: ThresholdSet::default(),
            formatting: FormattingConfig::plain(),
            verbosity: 0,
        }
    }

    #[test]
    fn test_export_then_import_file() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);
        let exported = temp.path().join("export.csv");

        handle_export(&session, Some(exported.clone())).unwrap();
        let before = session.store.load_all().unwrap();
        handle_import(&session, &exported).unwrap();

        assert_eq!(session.store.load_all().unwrap(), before);
    }

    #[test]
    fn test_import_schema_failure_message() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);
        let upload = temp.path().join("upload.csv");
        std::fs::write(&upload, "date,task,load_kg,frequency_per_hour\n2025-01-01,a,1,1\n").unwrap();

        let err = handle_import(&session, &upload).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Import failed: missing required columns: posture."));
        assert!(message.contains("Must include columns: date, task, load_kg, frequency_per_hour, posture"));
    }

    #[test]
    fn test_export_failure_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);
        std::fs::write(
            session.store.path(),
            "date,task,load_kg,frequency_per_hour,posture\n2025-01-01,a,1,1,Neutral\n",
        )
        .unwrap();
        let exported = temp.path().join("export.csv");

        let err = handle_export(&session, Some(exported.clone())).unwrap_err();

        assert!(err.to_string().starts_with("Export to"));
        assert!(!exported.exists());
    }

    #[test]
    fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);
        let err = handle_import(&session, &temp.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().starts_with("Import failed: could not read"));
    }
}
