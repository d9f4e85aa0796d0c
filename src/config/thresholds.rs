use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Cut points partitioning the 0-100 score range into four risk bands.
///
/// Supplied per session and never persisted. Ascending order is expected
/// but not enforced; see [`ThresholdSet::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSet {
    #[serde(default = "default_mild")]
    pub mild: i32,

    #[serde(default = "default_medium")]
    pub medium: i32,

    #[serde(default = "default_high")]
    pub high: i32,
}

/// Adjustment ranges offered to operators for each cut point.
pub const HIGH_RANGE: RangeInclusive<i32> = 70..=95;
pub const MEDIUM_RANGE: RangeInclusive<i32> = 50..=89;
pub const MILD_RANGE: RangeInclusive<i32> = 20..=59;

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            mild: default_mild(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl ThresholdSet {
    pub fn new(mild: i32, medium: i32, high: i32) -> Self {
        Self { mild, medium, high }
    }

    /// Apply any per-session overrides on top of this set.
    pub fn with_overrides(self, mild: Option<i32>, medium: Option<i32>, high: Option<i32>) -> Self {
        Self {
            mild: mild.unwrap_or(self.mild),
            medium: medium.unwrap_or(self.medium),
            high: high.unwrap_or(self.high),
        }
    }

    /// Advisory warnings; none of these prevent classification.
    pub fn check(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(self.mild <= self.medium && self.medium <= self.high) {
            warnings.push(format!(
                "thresholds are not ascending (mild {} / medium {} / high {}); lower bands may be unreachable",
                self.mild, self.medium, self.high
            ));
        }
        for (name, value, range) in [
            ("high", self.high, HIGH_RANGE),
            ("medium", self.medium, MEDIUM_RANGE),
            ("mild", self.mild, MILD_RANGE),
        ] {
            if !range.contains(&value) {
                warnings.push(format!(
                    "{} threshold {} is outside the usual range {}-{}",
                    name,
                    value,
                    range.start(),
                    range.end()
                ));
            }
        }
        warnings
    }
}

fn default_mild() -> i32 {
    40
}
fn default_medium() -> i32 {
    60
}
fn default_high() -> i32 {
    80
}
