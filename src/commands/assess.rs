use super::Session;
use crate::history::{filter_by_task, trend_points};
use crate::io::output::AssessmentReport;
use crate::io::{create_writer, OutputFormat};
use crate::scoring::Posture;
use crate::store::AssessmentRecord;
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub struct AssessConfig {
    pub date: NaiveDate,
    pub task: String,
    pub posture: String,
    pub load_kg: f64,
    pub frequency_per_hour: u32,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// Score and optionally persist one observation.
pub fn run_assessment(session: &Session, config: &AssessConfig) -> Result<AssessmentReport> {
    let task = config.task.trim();
    if task.is_empty() {
        anyhow::bail!("Please enter a task name.");
    }

    let posture = Posture::parse(&config.posture);
    if !posture.is_recognized() {
        log::warn!(
            "Unrecognized posture '{}'; using default weight and Neutral advice",
            posture
        );
    }

    let engine = session.store.engine();
    let assessment = engine.assess(
        config.load_kg,
        config.frequency_per_hour,
        &posture,
        &session.thresholds,
    );
    let record = AssessmentRecord {
        date: config.date,
        task: task.to_string(),
        load_kg: config.load_kg,
        frequency_per_hour: config.frequency_per_hour,
        posture,
        risk_score: assessment.score,
    };

    let trend = if config.dry_run {
        let mut history = filter_by_task(session.store.peek_with_report()?.records, Some(task));
        history.push(record.clone());
        trend_points(&history)
    } else {
        session
            .store
            .append(record.clone())
            .with_context(|| format!("Failed to save assessment to {}", session.store.path().display()))?;
        trend_points(&filter_by_task(session.store.load_all()?, Some(task)))
    };

    Ok(AssessmentReport {
        record,
        assessment,
        thresholds: session.thresholds,
        saved: !config.dry_run,
        trend,
    })
}

pub fn handle_assess(session: &Session, config: AssessConfig) -> Result<()> {
    let report = run_assessment(session, &config)?;
    let mut writer = create_writer(
        config.format,
        Box::new(std::io::stdout()),
        session.formatting,
        session.verbosity,
    );
    writer.write_assessment(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdSet;
    use crate::formatting::FormattingConfig;
    use crate::scoring::{RiskBand, ScoringEngine};
    use crate::store::RecordStore;
    use tempfile::TempDir;

    fn session(temp: &TempDir) -> Session {
        Session {
            store: RecordStore::new(temp.path().join("risk_data.csv"), ScoringEngine::standard()),
            thresholds: ThresholdSet::default(),
            formatting: FormattingConfig::plain(),
            verbosity: 0,
        }
    }

    fn config(task: &str, dry_run: bool) -> AssessConfig {
        AssessConfig {
            date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            task: task.to_string(),
            posture: "Bending".to_string(),
            load_kg: 15.0,
            frequency_per_hour: 20,
            dry_run,
            format: OutputFormat::Terminal,
        }
    }

    #[test]
    fn test_assessment_is_saved_after_seed() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        let report = run_assessment(&session, &config(" Lift boxes ", false)).unwrap();

        assert!(report.saved);
        assert_eq!(report.record.task, "Lift boxes");
        assert_eq!(report.assessment.score, 35);
        assert_eq!(report.assessment.band, RiskBand::Low);
        // seeded "Lift boxes" plus the new one
        assert_eq!(report.trend.len(), 2);
        assert_eq!(session.store.load_all().unwrap().len(), 4);
    }

    #[test]
    fn test_dry_run_leaves_store_unchanged() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);
        session.store.load_all().unwrap();

        let report = run_assessment(&session, &config("Lift boxes", true)).unwrap();

        assert!(!report.saved);
        assert_eq!(report.trend.len(), 2);
        assert_eq!(session.store.load_all().unwrap().len(), 3);
    }

    #[test]
    fn test_dry_run_does_not_seed_missing_store() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        let report = run_assessment(&session, &config("Lift boxes", true)).unwrap();

        assert_eq!(report.trend.len(), 1);
        assert!(!session.store.path().exists());
    }

    #[test]
    fn test_blank_task_rejected_before_saving() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp);

        let err = run_assessment(&session, &config("   ", false)).unwrap_err();

        assert_eq!(err.to_string(), "Please enter a task name.");
        assert!(!session.store.path().exists());
    }
}
