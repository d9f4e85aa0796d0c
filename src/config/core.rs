use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::thresholds::ThresholdSet;
use crate::scoring::{AdviceTable, PostureCategory, PostureWeightTable, ScoringEngine};

pub const DEFAULT_DATA_PATH: &str = "risk_data.csv";

/// Root configuration structure, read from `.worksafe.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorksafeConfig {
    /// Backing store location
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Default risk band cut points for this site
    #[serde(default)]
    pub thresholds: Option<ThresholdSet>,

    /// Scoring table overrides
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    /// Posture label to weight, e.g. `"Bending" = 1.3`
    #[serde(default)]
    pub posture_weights: BTreeMap<String, f64>,
}

impl ScoringConfig {
    // Pure function: a usable multiplier is finite and positive
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight > 0.0
    }

    /// Split configured weights into accepted overrides and warnings.
    pub fn weight_overrides(&self) -> (Vec<(PostureCategory, f64)>, Vec<String>) {
        let mut overrides = Vec::new();
        let mut warnings = Vec::new();
        for (label, &weight) in &self.posture_weights {
            match PostureCategory::from_label(label) {
                None => warnings.push(format!("unknown posture '{}' in posture_weights", label)),
                Some(_) if !Self::is_valid_weight(weight) => warnings.push(format!(
                    "posture weight for '{}' must be a positive number, got {}",
                    label, weight
                )),
                Some(category) => overrides.push((category, weight)),
            }
        }
        (overrides, warnings)
    }
}

impl WorksafeConfig {
    pub fn data_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_default().path
    }

    pub fn thresholds(&self) -> ThresholdSet {
        self.thresholds.unwrap_or_default()
    }

    /// Build the scoring engine with any configured weight overrides applied.
    pub fn scoring_engine(&self) -> ScoringEngine {
        let mut weights = PostureWeightTable::standard();
        if let Some(scoring) = &self.scoring {
            let (overrides, warnings) = scoring.weight_overrides();
            for warning in warnings {
                log::warn!("Ignoring configuration entry: {}", warning);
            }
            weights = weights.with_overrides(overrides);
        }
        ScoringEngine::new(weights, AdviceTable::standard())
    }
}
