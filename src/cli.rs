use crate::store::coercion::parse_date;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with a trend chart
    Terminal,
    /// Pretty-printed JSON
    Json,
    /// CSV in the data file layout
    Csv,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => Self::Terminal,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "worksafe")]
#[command(about = "Musculoskeletal risk assessment with CSV-backed history", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Data file (defaults to the configured path, then risk_data.csv)
    #[arg(long = "data", env = "WORKSAFE_DATA", global = true)]
    pub data: Option<PathBuf>,

    /// High risk threshold (score at or above is High)
    #[arg(long, global = true)]
    pub high: Option<i32>,

    /// Medium-High risk threshold
    #[arg(long, global = true)]
    pub medium: Option<i32>,

    /// Moderate risk threshold
    #[arg(long, global = true)]
    pub mild: Option<i32>,

    /// Plain output: no colors, no emoji
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v: score breakdown and info logs, -vv: debug logs)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a new observation and save it
    Assess {
        /// Task name, e.g. "Lift boxes"
        #[arg(long)]
        task: String,

        /// Posture type (Neutral, Bending, Twisting, Pushing, Pulling, "Repetitive Upper Limb")
        #[arg(long, default_value = "Neutral")]
        posture: String,

        /// Load handled, in kilograms
        #[arg(long = "load-kg", value_parser = parse_non_negative)]
        load_kg: f64,

        /// Repetitions per hour
        #[arg(long)]
        frequency: u32,

        /// Assessment date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Show the result without saving it
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Show recorded assessments, newest first, with a trend chart
    History {
        /// Only show one task
        #[arg(long)]
        task: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Chart risk score over time
    Trend {
        /// Only chart one task
        #[arg(long)]
        task: Option<String>,

        /// Chart height in rows (1-100)
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
        height: u16,
    },

    /// List distinct task names
    Tasks,

    /// Write all records as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all records with the contents of a CSV file
    Import {
        /// CSV with date, task, load_kg, frequency_per_hour, posture and optionally risk_score
        file: PathBuf,
    },

    /// List posture categories, weights and suggestions
    Postures,

    /// Write a default .worksafe.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(Some(value)).map_err(|e| e.to_string())
}

fn parse_non_negative(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err(format!("'{}' must be a non-negative number", value)),
        Err(e) => Err(format!("'{}' is not a number: {}", value, e)),
    }
}
