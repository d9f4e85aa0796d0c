use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Work-posture classification used to weight risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostureCategory {
    Neutral,
    Bending,
    Twisting,
    Pushing,
    Pulling,
    RepetitiveUpperLimb,
}

impl PostureCategory {
    pub const ALL: [PostureCategory; 6] = [
        Self::Neutral,
        Self::Bending,
        Self::Twisting,
        Self::Pushing,
        Self::Pulling,
        Self::RepetitiveUpperLimb,
    ];

    /// Display label, also the value written to the backing file.
    pub fn label(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Bending => "Bending",
            Self::Twisting => "Twisting",
            Self::Pushing => "Pushing",
            Self::Pulling => "Pulling",
            Self::RepetitiveUpperLimb => "Repetitive Upper Limb",
        }
    }

    /// Exact match against the display labels, ignoring surrounding
    /// whitespace. Any other spelling is not a known category.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label)
    }

    /// Repetitive categories earn the high-frequency bonus.
    pub fn is_repetitive(self) -> bool {
        matches!(self, Self::RepetitiveUpperLimb)
    }
}

impl fmt::Display for PostureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Posture as recorded on an assessment.
///
/// Labels outside the fixed category set are kept verbatim so they survive a
/// store rewrite; they score with the default weight and Neutral advice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Posture {
    Known(PostureCategory),
    Unrecognized(String),
}

impl Posture {
    pub fn parse(label: &str) -> Self {
        match PostureCategory::from_label(label) {
            Some(category) => Self::Known(category),
            None => Self::Unrecognized(label.trim().to_string()),
        }
    }

    pub fn category(&self) -> Option<PostureCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.category().is_some()
    }

    pub fn is_repetitive(&self) -> bool {
        self.category().is_some_and(PostureCategory::is_repetitive)
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Known(category) => category.label(),
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<PostureCategory> for Posture {
    fn from(category: PostureCategory) -> Self {
        Self::Known(category)
    }
}

impl From<String> for Posture {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for Posture {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<Posture> for String {
    fn from(posture: Posture) -> Self {
        match posture {
            Posture::Known(category) => category.label().to_string(),
            Posture::Unrecognized(label) => label,
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multiplicative weight applied per posture category.
#[derive(Debug, Clone, PartialEq)]
pub struct PostureWeightTable {
    weights: BTreeMap<PostureCategory, f64>,
    default_weight: f64,
}

impl PostureWeightTable {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn standard() -> Self {
        let weights = BTreeMap::from([
            (PostureCategory::Neutral, 1.00),
            (PostureCategory::Bending, 1.25),
            (PostureCategory::Twisting, 1.30),
            (PostureCategory::Pushing, 1.15),
            (PostureCategory::Pulling, 1.15),
            (PostureCategory::RepetitiveUpperLimb, 1.35),
        ]);
        Self {
            weights,
            default_weight: Self::DEFAULT_WEIGHT,
        }
    }

    /// Replace individual weights, keeping the rest of the table.
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (PostureCategory, f64)>,
    ) -> Self {
        self.weights.extend(overrides);
        self
    }

    pub fn weight(&self, posture: &Posture) -> f64 {
        posture
            .category()
            .and_then(|category| self.weights.get(&category).copied())
            .unwrap_or(self.default_weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostureCategory, f64)> + '_ {
        self.weights.iter().map(|(category, weight)| (*category, *weight))
    }
}

impl Default for PostureWeightTable {
    fn default() -> Self {
        Self::standard()
    }
}
