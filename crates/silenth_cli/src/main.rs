//! Developer probe for the timeline core.
//!
//! Opens a database, runs one timeline query and prints the page as JSON.

use clap::{Parser, Subcommand};
use silenth_core::db::open_db;
use silenth_core::{
    core_version, init_logging, CoreConfig, EntryQueryService, PageRequest, SqliteEntryRepository,
};
use std::path::PathBuf;

const DEFAULT_PAGE_SIZE: i64 = 15;

#[derive(Parser)]
#[command(
    name = "silenth",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect the collective timeline stored in a silenth database",
    long_about = None
)]
struct Cli {
    /// Database file (overrides SILENTH_DB_PATH)
    #[arg(global = true, long = "db")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of entries for a time slot, newest first
    Timeline {
        /// EARLY_DAWN, LATE_DAWN, MORNING, AFTERNOON or EVENING
        slot: String,

        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, allow_negative_numbers = true)]
        size: i64,
    },

    /// Print the core library version
    Version,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // A missing `.env` is fine; real environment variables still win.
    dotenvy::dotenv().ok();
    let config = CoreConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    match cli.command {
        Commands::Version => {
            println!("silenth_core version={}", core_version());
        }
        Commands::Timeline { slot, page, size } => {
            let db_path = cli
                .db
                .or(config.db_path)
                .ok_or("no database given; pass --db or set SILENTH_DB_PATH")?;
            let conn = open_db(&db_path)?;
            let service = EntryQueryService::new(SqliteEntryRepository::new(&conn));
            let request = PageRequest::new(page, size);
            let result = service.find_by_time_slot_name(Some(slot.as_str()), &request)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            log::info!(
                "event=cli_timeline module=cli status=ok returned={}",
                result.number_of_elements
            );
        }
    }

    Ok(())
}
