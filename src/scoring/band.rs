use crate::config::ThresholdSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered severity tier derived from a score and a [`ThresholdSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    MediumHigh,
    High,
}

impl RiskBand {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::MediumHigh => "Medium-High Risk",
            Self::High => "High Risk",
        }
    }

    /// Action message placed ahead of posture-specific advice.
    pub fn urgency_message(self) -> &'static str {
        match self {
            Self::High => {
                "Immediately apply engineering/organizational control: mechanical aids, teamwork, reduced load/frequency."
            }
            Self::MediumHigh => "Optimize workstation and methods soon; schedule short-term review.",
            Self::Moderate => "Fine-tune posture or pace, set reminders to avoid cumulative strain.",
            Self::Low => "Maintain current measures and continue monitoring.",
        }
    }

    /// Emoji marker with an ASCII fallback for plain terminals.
    pub fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::High => ("🔴", "[!!!]"),
            Self::MediumHigh => ("🟠", "[!! ]"),
            Self::Moderate => ("🟡", "[!  ]"),
            Self::Low => ("🟢", "[   ]"),
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Highest band whose cutoff the score meets, checked high to low.
///
/// Ties go to the higher band. The threshold set is not required to be
/// ascending; a misordered set simply shadows the lower bands.
pub fn classify(score: u8, thresholds: &ThresholdSet) -> RiskBand {
    let score = i32::from(score);
    if score >= thresholds.high {
        RiskBand::High
    } else if score >= thresholds.medium {
        RiskBand::MediumHigh
    } else if score >= thresholds.mild {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ThresholdSet {
        ThresholdSet::default()
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let th = defaults();
        assert_eq!(classify(80, &th), RiskBand::High);
        assert_eq!(classify(79, &th), RiskBand::MediumHigh);
        assert_eq!(classify(60, &th), RiskBand::MediumHigh);
        assert_eq!(classify(59, &th), RiskBand::Moderate);
        assert_eq!(classify(40, &th), RiskBand::Moderate);
        assert_eq!(classify(39, &th), RiskBand::Low);
        assert_eq!(classify(0, &th), RiskBand::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(classify(79, &defaults()).label(), "Medium-High Risk");
        assert_eq!(classify(80, &defaults()).label(), "High Risk");
    }

    #[test]
    fn test_misordered_thresholds_evaluate_high_first() {
        let th = ThresholdSet::new(50, 30, 70);
        // 55 clears medium (30) before mild is considered
        assert_eq!(classify(55, &th), RiskBand::MediumHigh);
        assert_eq!(classify(25, &th), RiskBand::Low);
    }

    #[test]
    fn test_bands_are_ordered_by_severity() {
        assert!(RiskBand::High > RiskBand::MediumHigh);
        assert!(RiskBand::MediumHigh > RiskBand::Moderate);
        assert!(RiskBand::Moderate > RiskBand::Low);
    }
}
