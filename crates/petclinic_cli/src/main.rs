//! Pet clinic CLI
//!
//! Command-line front end over the owner repository.

use clap::{Args, Parser, Subcommand};
use petclinic_core::db::open_db;
use petclinic_core::{init_logging, ClinicConfig, ClinicService, SqliteOwnerRepository};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "petclinic")]
#[command(about = "Pet clinic owner records", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// SQLite database file (created when missing)
    #[arg(long, global = true, env = "PETCLINIC_DB")]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "PETCLINIC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (no file logging when unset)
    #[arg(long, global = true, env = "PETCLINIC_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Owner operations
    Owners(commands::owners::OwnersArgs),
    /// List pet types ordered by name
    PetTypes,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClinicConfig::from_parts(
        cli.global.db,
        cli.global.log_level.as_deref(),
        cli.global.log_dir,
    )?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let service = ClinicService::new(SqliteOwnerRepository::try_new(&conn)?);

    match cli.command {
        Commands::Owners(args) => commands::owners::execute(&service, args),
        Commands::PetTypes => commands::pet_types::execute(&service),
    }
}
