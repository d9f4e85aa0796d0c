//! Pure views over loaded assessment history: task filtering, date
//! ordering and trend series for charting.

use crate::store::AssessmentRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Keep records for one task; `None` keeps every task.
pub fn filter_by_task(records: Vec<AssessmentRecord>, task: Option<&str>) -> Vec<AssessmentRecord> {
    match task {
        Some(task) => records.into_iter().filter(|r| r.task == task).collect(),
        None => records,
    }
}

/// Stable sort by date; same-day records keep their file order.
pub fn sort_by_date(mut records: Vec<AssessmentRecord>, order: SortOrder) -> Vec<AssessmentRecord> {
    match order {
        SortOrder::Ascending => records.sort_by_key(|r| r.date),
        SortOrder::Descending => records.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    records
}

/// Distinct task names, sorted.
pub fn task_names(records: &[AssessmentRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.task.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: u8,
}

/// Score-over-time series in date order.
pub fn trend_points(records: &[AssessmentRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .map(|r| TrendPoint {
            date: r.date,
            score: r.risk_score,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Posture;

    fn record(day: u32, task: &str, score: u8) -> AssessmentRecord {
        AssessmentRecord {
            date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            task: task.to_string(),
            load_kg: 10.0,
            frequency_per_hour: 10,
            posture: Posture::parse("Neutral"),
            risk_score: score,
        }
    }

    #[test]
    fn test_filter_by_task() {
        let records = vec![record(1, "Lift", 20), record(2, "Push", 30), record(3, "Lift", 25)];
        let lift = filter_by_task(records.clone(), Some("Lift"));
        assert_eq!(lift.len(), 2);
        assert_eq!(filter_by_task(records, None).len(), 3);
    }

    #[test]
    fn test_sort_by_date_is_stable() {
        let records = vec![record(3, "a", 1), record(1, "b", 2), record(3, "c", 3)];
        let asc: Vec<_> = sort_by_date(records.clone(), SortOrder::Ascending)
            .into_iter()
            .map(|r| r.task)
            .collect();
        assert_eq!(asc, vec!["b", "a", "c"]);

        let desc: Vec<_> = sort_by_date(records, SortOrder::Descending)
            .into_iter()
            .map(|r| r.task)
            .collect();
        assert_eq!(desc, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_task_names_sorted_unique() {
        let records = vec![record(1, "Push", 1), record(2, "Lift", 1), record(3, "Push", 1)];
        assert_eq!(task_names(&records), vec!["Lift", "Push"]);
    }

    #[test]
    fn test_trend_points_in_date_order() {
        let records = vec![record(5, "Lift", 50), record(2, "Lift", 20)];
        let scores: Vec<u8> = trend_points(&records).iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![20, 50]);
    }
}
