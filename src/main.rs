use anyhow::Result;
use chrono::Local;
use clap::Parser;
use worksafe::cli::{Cli, Commands};
use worksafe::commands::{self, AssessConfig, Session};
use worksafe::config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.session.verbosity);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let config = load_config();
    let session = Session::from_args(&cli.session, &config);
    log::debug!("Using data file {}", session.store.path().display());

    match cli.command {
        Commands::Assess {
            task,
            posture,
            load_kg,
            frequency,
            date,
            dry_run,
            format,
        } => {
            let config = AssessConfig {
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                task,
                posture,
                load_kg,
                frequency_per_hour: frequency,
                dry_run,
                format: format.into(),
            };
            commands::handle_assess(&session, config)
        }
        Commands::History { task, format } => {
            commands::handle_history(&session, task, format.into())
        }
        Commands::Trend { task, height } => {
            commands::handle_trend(&session, task, usize::from(height))
        }
        Commands::Tasks => commands::handle_tasks(&session),
        Commands::Export { output } => commands::handle_export(&session, output),
        Commands::Import { file } => commands::handle_import(&session, &file),
        Commands::Postures => commands::handle_postures(&session),
        Commands::Init { force } => commands::init_config(force),
    }
}

// Side effect: RUST_LOG wins over -v
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
