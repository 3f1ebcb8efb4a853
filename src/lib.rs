//! rShiftboard library root.
//! Exposes the CLI parser, the high-level run() function, the scheduling
//! engine (`core`) and its storage (`db`).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod repository;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::Capability;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg),
        Commands::Shift { .. } => cli::commands::shift::handle(&cli.command, cfg),
        Commands::Bulk { .. } => cli::commands::bulk::handle(&cli.command, cfg),
        Commands::Grid { .. } => cli::commands::grid::handle(&cli.command, cfg),
        Commands::Conflicts { .. } => cli::commands::conflicts::handle(&cli.command, cfg),
        Commands::Snapshot { .. } => cli::commands::snapshot::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    if cli.read_only {
        let mut caps = cfg.capability_set();
        caps.revoke(Capability::SchedulingEdit);
        caps.revoke(Capability::EmployeeAdmin);
        cfg.capabilities = caps.names();
    }

    tracing::debug!(database = %cfg.database, read_only = cli.read_only, "configuration loaded");

    dispatch(&cli, &cfg)
}
