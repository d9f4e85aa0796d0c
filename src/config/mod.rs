//! Site configuration: backing store location, default thresholds and
//! posture weight overrides, loaded from `.worksafe.toml`.

mod core;
mod loader;
mod thresholds;

pub use core::{ScoringConfig, StoreConfig, WorksafeConfig, DEFAULT_DATA_PATH};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use thresholds::{ThresholdSet, HIGH_RANGE, MEDIUM_RANGE, MILD_RANGE};
