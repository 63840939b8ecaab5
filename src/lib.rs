//! rTutorlog library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (storage, core views, sync mirror, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Preview { .. } => cli::commands::preview::handle(&cli.command, cfg),
        Commands::Calc { .. } => cli::commands::calc::handle(&cli.command),
        Commands::Student { .. } => cli::commands::student::handle(&cli.command, cfg),
        Commands::Class { .. } => cli::commands::class::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Sync { .. } => cli::commands::sync::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    if cli.sync_dir.is_some() || cli.sync_code.is_some() {
        cfg.sync.enabled = true;
        if let Some(dir) = &cli.sync_dir {
            cfg.sync.dir = Some(dir.clone());
        }
        if let Some(code) = &cli.sync_code {
            cfg.sync.code = Some(code.clone());
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);

    dispatch(&cli, &cfg)
}
