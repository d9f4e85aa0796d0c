use super::band::RiskBand;
use super::posture::{Posture, PostureCategory};
use std::collections::BTreeMap;

/// Ordered remediation suggestions per posture category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceTable {
    suggestions: BTreeMap<PostureCategory, Vec<String>>,
}

impl AdviceTable {
    pub fn standard() -> Self {
        let entry = |category: PostureCategory, items: [&str; 2]| -> (PostureCategory, Vec<String>) {
            (category, items.iter().map(|s| s.to_string()).collect())
        };
        let suggestions = BTreeMap::from([
            entry(
                PostureCategory::Neutral,
                [
                    "Maintain current methods and schedule micro breaks (stretch/relax).",
                    "Monitor changes in load and frequency, reassess if thresholds are exceeded.",
                ],
            ),
            entry(
                PostureCategory::Bending,
                [
                    "Use adjustable workbenches or raise workpieces to reduce bending.",
                    "Bend knees instead of waist; use lifting aids if necessary.",
                ],
            ),
            entry(
                PostureCategory::Twisting,
                [
                    "Reorganize layout to avoid torso twisting (turn feet instead).",
                    "Keep frequently used items directly in front to minimize reach.",
                ],
            ),
            entry(
                PostureCategory::Pushing,
                [
                    "Use carts with good wheels to reduce friction.",
                    "Work in pairs or divide the task if heavy.",
                ],
            ),
            entry(
                PostureCategory::Pulling,
                [
                    "Prefer pushing over pulling; reduce static friction at start.",
                    "Use handles or straps for better grip and leverage.",
                ],
            ),
            entry(
                PostureCategory::RepetitiveUpperLimb,
                [
                    "Schedule task rotation and micro breaks.",
                    "Use jigs or mechanical aids to reduce repetition.",
                ],
            ),
        ]);
        Self { suggestions }
    }

    /// Suggestions for a posture; unrecognized postures get the Neutral list.
    pub fn suggestions(&self, posture: &Posture) -> &[String] {
        let category = posture.category().unwrap_or(PostureCategory::Neutral);
        self.suggestions
            .get(&category)
            .or_else(|| self.suggestions.get(&PostureCategory::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Urgency message first, then the posture suggestions.
    pub fn advice(&self, posture: &Posture, band: RiskBand) -> Vec<String> {
        std::iter::once(band.urgency_message().to_string())
            .chain(self.suggestions(posture).iter().cloned())
            .collect()
    }
}

impl Default for AdviceTable {
    fn default() -> Self {
        Self::standard()
    }
}
