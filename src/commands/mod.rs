//! CLI command implementations.
//!
//! Available commands:
//! - **assess**: score a new observation and save it
//! - **history / trend / tasks**: browse recorded assessments
//! - **export / import**: move the whole collection in and out as CSV
//! - **postures**: show the scoring tables
//! - **init**: write a default configuration file
//!
//! Every command runs against a [`Session`]: the record store, the
//! thresholds in force, and display settings.

pub mod assess;
pub mod history;
pub mod init;
pub mod postures;
pub mod transfer;

pub use assess::{handle_assess, AssessConfig};
pub use history::{handle_history, handle_tasks, handle_trend};
pub use init::init_config;
pub use postures::handle_postures;
pub use transfer::{handle_export, handle_import};

use crate::cli::SessionArgs;
use crate::config::{ThresholdSet, WorksafeConfig};
use crate::formatting::FormattingConfig;
use crate::store::RecordStore;

pub struct Session {
    pub store: RecordStore,
    pub thresholds: ThresholdSet,
    pub formatting: FormattingConfig,
    pub verbosity: u8,
}

impl Session {
    /// Command-line values win over the configuration file.
    pub fn from_args(args: &SessionArgs, config: &WorksafeConfig) -> Self {
        let thresholds = config
            .thresholds()
            .with_overrides(args.mild, args.medium, args.high);
        for warning in thresholds.check() {
            log::warn!("{}", warning);
        }

        let path = args.data.clone().unwrap_or_else(|| config.data_path());
        let formatting = if args.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };

        Self {
            store: RecordStore::new(path, config.scoring_engine()),
            thresholds,
            formatting,
            verbosity: args.verbosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_thresholds_override_config() {
        let config = WorksafeConfig {
            thresholds: Some(ThresholdSet::new(30, 50, 70)),
            ..Default::default()
        };
        let args = SessionArgs {
            high: Some(85),
            data: Some(PathBuf::from("custom.csv")),
            ..Default::default()
        };

        let session = Session::from_args(&args, &config);

        assert_eq!(session.thresholds, ThresholdSet::new(30, 50, 85));
        assert_eq!(session.store.path(), PathBuf::from("custom.csv").as_path());
    }

    #[test]
    fn test_defaults_without_args_or_config() {
        let session = Session::from_args(&SessionArgs::default(), &WorksafeConfig::default());
        assert_eq!(session.thresholds, ThresholdSet::default());
        assert_eq!(session.store.path(), PathBuf::from("risk_data.csv").as_path());
    }
}
