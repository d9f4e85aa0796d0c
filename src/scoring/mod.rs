//! Heuristic musculoskeletal risk scoring.
//!
//! The score is a weighted linear combination of normalized load and
//! frequency, multiplied by a posture weight, plus a fixed bonus for
//! high-frequency repetitive work:
//!
//! ```text
//! raw   = (0.55 * load_norm + 0.35 * freq_norm) * posture_weight + bonus
//! score = clamp(round_half_even(raw), 0, 100)
//! ```
//!
//! Lookup tables are injected through [`ScoringEngine::new`]; the engine
//! holds no other state and never fails on numeric input.
//!
//! ```rust
//! use worksafe::config::ThresholdSet;
//! use worksafe::scoring::{PostureCategory, RiskBand, ScoringEngine};
//!
//! let engine = ScoringEngine::standard();
//! let score = engine.compute_risk(15.0, 20, &PostureCategory::Bending.into());
//! assert_eq!(score, 35);
//! assert_eq!(engine.classify(score, &ThresholdSet::default()), RiskBand::Low);
//! ```

pub mod advice;
pub mod band;
pub mod posture;

pub use advice::AdviceTable;
pub use band::{classify, RiskBand};
pub use posture::{Posture, PostureCategory, PostureWeightTable};

use crate::config::ThresholdSet;
use serde::Serialize;

pub const LOAD_RANGE_KG: (f64, f64) = (0.0, 50.0);
pub const FREQUENCY_RANGE_PER_HOUR: (f64, f64) = (0.0, 60.0);

const LOAD_COEFFICIENT: f64 = 0.55;
const FREQUENCY_COEFFICIENT: f64 = 0.35;
const REPETITION_BONUS: f64 = 8.0;
const REPETITION_BONUS_MIN_FREQUENCY: u32 = 30;

/// Clamp `value` into `[min, max]` and rescale linearly onto `[0, 100]`.
///
/// A degenerate range (`min == max`) yields 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    let clamped = value.max(min).min(max);
    100.0 * (clamped - min) / (max - min)
}

/// Round half-to-even and clamp into the 0-100 score range.
///
/// NaN maps to 0.
pub fn to_score(raw: f64) -> u8 {
    let rounded = raw.round_ties_even();
    if rounded.is_nan() {
        0
    } else {
        rounded.clamp(0.0, 100.0) as u8
    }
}

/// Every intermediate value behind a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub load_norm: f64,
    pub freq_norm: f64,
    pub posture_weight: f64,
    pub bonus: f64,
    pub raw: f64,
    pub score: u8,
    /// False when the posture fell back to the default weight and advice
    pub posture_recognized: bool,
}

/// Score, band and advice for a single observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub score: u8,
    pub band: RiskBand,
    pub advice: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: PostureWeightTable,
    advice: AdviceTable,
}

impl ScoringEngine {
    pub fn new(weights: PostureWeightTable, advice: AdviceTable) -> Self {
        Self { weights, advice }
    }

    pub fn standard() -> Self {
        Self::new(PostureWeightTable::standard(), AdviceTable::standard())
    }

    pub fn weights(&self) -> &PostureWeightTable {
        &self.weights
    }

    pub fn advice_table(&self) -> &AdviceTable {
        &self.advice
    }

    pub fn explain_risk(
        &self,
        load_kg: f64,
        frequency_per_hour: u32,
        posture: &Posture,
    ) -> ScoreBreakdown {
        let load_norm = normalize(load_kg, LOAD_RANGE_KG.0, LOAD_RANGE_KG.1);
        let freq_norm = normalize(
            f64::from(frequency_per_hour),
            FREQUENCY_RANGE_PER_HOUR.0,
            FREQUENCY_RANGE_PER_HOUR.1,
        );
        let posture_weight = self.weights.weight(posture);
        let bonus = if posture.is_repetitive()
            && frequency_per_hour >= REPETITION_BONUS_MIN_FREQUENCY
        {
            REPETITION_BONUS
        } else {
            0.0
        };

        let raw = (LOAD_COEFFICIENT * load_norm + FREQUENCY_COEFFICIENT * freq_norm)
            * posture_weight
            + bonus;

        ScoreBreakdown {
            load_norm,
            freq_norm,
            posture_weight,
            bonus,
            raw,
            score: to_score(raw),
            posture_recognized: posture.is_recognized(),
        }
    }

    pub fn compute_risk(&self, load_kg: f64, frequency_per_hour: u32, posture: &Posture) -> u8 {
        self.explain_risk(load_kg, frequency_per_hour, posture).score
    }

    pub fn classify(&self, score: u8, thresholds: &ThresholdSet) -> RiskBand {
        classify(score, thresholds)
    }

    pub fn advice_for(&self, posture: &Posture, score: u8, thresholds: &ThresholdSet) -> Vec<String> {
        self.advice.advice(posture, classify(score, thresholds))
    }

    pub fn assess(
        &self,
        load_kg: f64,
        frequency_per_hour: u32,
        posture: &Posture,
        thresholds: &ThresholdSet,
    ) -> Assessment {
        let breakdown = self.explain_risk(load_kg, frequency_per_hour, posture);
        let band = classify(breakdown.score, thresholds);
        Assessment {
            score: breakdown.score,
            band,
            advice: self.advice.advice(posture, band),
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(load: f64, freq: u32, posture: &str) -> u8 {
        ScoringEngine::standard().compute_risk(load, freq, &Posture::parse(posture))
    }

    #[test]
    fn test_normalize_clamps_and_rescales() {
        assert_eq!(normalize(25.0, 0.0, 50.0), 50.0);
        assert_eq!(normalize(-3.0, 0.0, 50.0), 0.0);
        assert_eq!(normalize(120.0, 0.0, 50.0), 100.0);
    }

    #[test]
    fn test_normalize_degenerate_range_is_zero() {
        assert_eq!(normalize(10.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_to_score_rounds_half_to_even() {
        assert_eq!(to_score(5.5), 6);
        assert_eq!(to_score(16.5), 16);
        assert_eq!(to_score(22.5), 22);
        assert_eq!(to_score(35.2), 35);
    }

    #[test]
    fn test_to_score_clamps() {
        assert_eq!(to_score(129.5), 100);
        assert_eq!(to_score(-4.0), 0);
        assert_eq!(to_score(f64::NAN), 0);
    }

    #[test]
    fn test_zero_inputs_score_zero() {
        assert_eq!(score(0.0, 0, "Neutral"), 0);
    }

    #[test]
    fn test_maximum_repetitive_clamps_to_100() {
        let breakdown = ScoringEngine::standard().explain_risk(
            50.0,
            60,
            &PostureCategory::RepetitiveUpperLimb.into(),
        );
        assert_eq!(breakdown.bonus, 8.0);
        assert!((breakdown.raw - 129.5).abs() < 1e-9);
        assert_eq!(breakdown.score, 100);
    }

    #[test]
    fn test_pinned_fixtures() {
        assert_eq!(score(15.0, 20, "Bending"), 35);
        assert_eq!(score(10.0, 30, "Pushing"), 33);
        assert_eq!(score(5.0, 60, "Repetitive Upper Limb"), 63);
        assert_eq!(score(20.0, 30, "Twisting"), 51);
        assert_eq!(score(30.0, 45, "Pulling"), 68);
        assert_eq!(score(40.0, 40, "Bending"), 84);
    }

    #[test]
    fn test_half_scores_round_to_even() {
        assert_eq!(score(5.0, 0, "Neutral"), 6);
        assert_eq!(score(15.0, 0, "Neutral"), 16);
        assert_eq!(score(12.5, 15, "Kneeling"), 22);
    }

    #[test]
    fn test_repetition_bonus_starts_at_30_per_hour() {
        let engine = ScoringEngine::standard();
        let posture = PostureCategory::RepetitiveUpperLimb.into();
        assert_eq!(engine.explain_risk(10.0, 29, &posture).bonus, 0.0);
        assert_eq!(engine.explain_risk(10.0, 30, &posture).bonus, 8.0);
        assert_eq!(engine.compute_risk(10.0, 29, &posture), 38);
        assert_eq!(engine.compute_risk(10.0, 30, &posture), 46);
    }

    #[test]
    fn test_inputs_above_range_are_clamped() {
        assert_eq!(score(80.0, 200, "Neutral"), score(50.0, 60, "Neutral"));
        assert_eq!(score(80.0, 200, "Neutral"), 90);
    }

    #[test]
    fn test_unknown_posture_uses_default_weight_and_flags_it() {
        let breakdown =
            ScoringEngine::standard().explain_risk(12.5, 15, &Posture::parse("Kneeling"));
        assert_eq!(breakdown.posture_weight, 1.0);
        assert!(!breakdown.posture_recognized);
    }

    #[test]
    fn test_injected_weights_change_score() {
        let heavy = PostureWeightTable::standard()
            .with_overrides([(PostureCategory::Neutral, 2.0)]);
        let engine = ScoringEngine::new(heavy, AdviceTable::standard());
        assert_eq!(engine.compute_risk(0.0, 60, &PostureCategory::Neutral.into()), 70);
    }

    #[test]
    fn test_assess_bundles_band_and_advice() {
        let engine = ScoringEngine::standard();
        let assessment = engine.assess(
            40.0,
            40,
            &PostureCategory::Bending.into(),
            &ThresholdSet::default(),
        );
        assert_eq!(assessment.score, 84);
        assert_eq!(assessment.band, RiskBand::High);
        assert_eq!(assessment.advice[0], RiskBand::High.urgency_message());
        assert_eq!(
            assessment.advice[1],
            "Use adjustable workbenches or raise workpieces to reduce bending."
        );
    }

    #[test]
    fn test_advice_for_matches_band_wording() {
        let engine = ScoringEngine::standard();
        let th = ThresholdSet::default();
        let neutral = Posture::from(PostureCategory::Neutral);
        let firsts: Vec<String> = [10u8, 45, 65, 90]
            .into_iter()
            .map(|s| engine.advice_for(&neutral, s, &th).remove(0))
            .collect();
        assert_eq!(
            firsts,
            vec![
                RiskBand::Low.urgency_message(),
                RiskBand::Moderate.urgency_message(),
                RiskBand::MediumHigh.urgency_message(),
                RiskBand::High.urgency_message(),
            ]
        );
    }
}
