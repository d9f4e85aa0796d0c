use super::record::AssessmentRecord;
use crate::scoring::{PostureCategory, ScoringEngine};
use chrono::NaiveDate;

/// Three illustrative records written on first use.
///
/// Scores come from `engine` at seed time so they always agree with the
/// active posture weights.
pub fn demo_records(engine: &ScoringEngine) -> Vec<AssessmentRecord> {
    let demo = [
        ((2025, 10, 11), "Lift boxes", 15.0, 20, PostureCategory::Bending),
        ((2025, 10, 12), "Push cart", 10.0, 30, PostureCategory::Pushing),
        ((2025, 10, 13), "Assembly work", 5.0, 60, PostureCategory::RepetitiveUpperLimb),
    ];

    demo.into_iter()
        .filter_map(|((y, m, d), task, load_kg, frequency, posture)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(AssessmentRecord::scored(
                engine,
                date,
                task,
                load_kg,
                frequency,
                posture.into(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{AdviceTable, PostureWeightTable};

    #[test]
    fn test_demo_scores_match_engine() {
        let scores: Vec<u8> = demo_records(&ScoringEngine::standard())
            .iter()
            .map(|r| r.risk_score)
            .collect();
        assert_eq!(scores, vec![35, 33, 63]);
    }

    #[test]
    fn test_demo_scores_follow_injected_weights() {
        let weights =
            PostureWeightTable::standard().with_overrides([(PostureCategory::Bending, 2.0)]);
        let engine = ScoringEngine::new(weights, AdviceTable::standard());
        assert_eq!(demo_records(&engine)[0].risk_score, 56);
    }
}
