pub mod fetch;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fetch::{process_actions_command, process_boards_command};
use report::{process_report_command, ReportCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    board::{cache::SnapshotCache, TrelloClient},
    settings::{Settings, DEFAULT_SETTINGS_FILE},
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "cardspend", version, long_about = None)]
#[command(about = "Daily time reports from plus! comments on a Trello board", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE, help = "Path to settings.json")]
    settings: PathBuf,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "List boards of the configured user and store them as a snapshot")]
    Boards,
    #[command(
        about = "Fetch comment actions and cards of the configured board \
                 and store them as snapshots"
    )]
    Actions,
    #[command(about = "Build the daily report. This is the default command")]
    Report {
        #[command(flatten)]
        command: ReportCommand,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Report {
            command: ReportCommand::default(),
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?.join("logs"),
        logging_level,
        args.log,
    )?;

    let settings = Settings::load(&args.settings).await?;
    let client = TrelloClient::new(settings.credentials());
    let cache = SnapshotCache::new(settings.snapshot_dir.clone())?;

    match args.commands.unwrap_or_default() {
        Commands::Boards => process_boards_command(&client, &cache, &settings).await,
        Commands::Actions => process_actions_command(&client, &cache, &settings).await,
        Commands::Report { command } => {
            process_report_command(command, &client, &cache, &settings, &DefaultClock).await
        }
    }
}
