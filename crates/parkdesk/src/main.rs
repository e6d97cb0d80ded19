// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parkdesk - operator console for a parking facility.
//!
//! This is the binary entry point: it loads configuration, builds the HTTP
//! client once, and hands it to a desk driven by a subcommand or the shell.

mod console;
mod prompt;
mod shell;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use parkdesk_client::HttpParkingApi;
use parkdesk_config::ParkdeskConfig;
use parkdesk_core::ParkingApi;
use parkdesk_workflow::Desk;

use crate::console::Console;

/// Parkdesk - time vehicles in and out of a parking facility.
#[derive(Parser, Debug)]
#[command(name = "parkdesk", version, about, long_about = None)]
struct Cli {
    /// Load this file instead of the standard config locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List entry points and their ids.
    EntryPoints,
    /// Show the parking table.
    List {
        /// Output rows as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Time a vehicle in, registering it first if its plate is new.
    TimeIn {
        #[arg(long)]
        plate: String,
        /// small, medium or large.
        #[arg(long)]
        vehicle_type: String,
        /// Entry point id (see `entry-points`).
        #[arg(long)]
        entry_point: String,
    },
    /// Time a parking out and show its fee.
    TimeOut {
        parking_id: u64,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Launch an interactive shell.
    Shell,
}

fn load_config(path: Option<&PathBuf>) -> Option<ParkdeskConfig> {
    let loaded = match path {
        Some(path) => parkdesk_config::load_and_validate_path(path),
        None => parkdesk_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => Some(config),
        Err(errors) => {
            parkdesk_config::render_errors(&errors);
            None
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parkdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(config) = load_config(cli.config.as_ref()) else {
        return ExitCode::FAILURE;
    };
    init_tracing(&config.desk.log_level.to_ascii_lowercase());
    debug!(base_url = %config.api.base_url, "config loaded");

    let api = match HttpParkingApi::from_config(&config.api) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let desk = Desk::new(Arc::new(api) as Arc<dyn ParkingApi>, &config.desk);
    let console = Console::new(desk, &config.desk, cli.plain);

    let result = match cli.command {
        Some(Commands::EntryPoints) => console.entry_points().await,
        Some(Commands::List { json }) => console.list(json).await,
        Some(Commands::TimeIn {
            plate,
            vehicle_type,
            entry_point,
        }) => console.time_in(&plate, &vehicle_type, &entry_point).await,
        Some(Commands::TimeOut { parking_id, yes }) => console.time_out(parking_id, yes).await,
        Some(Commands::Shell) => shell::run_shell(&console).await,
        None => {
            println!("parkdesk: use --help for available commands");
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.report(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn time_out_parses_id_and_yes_flag() {
        let cli = Cli::try_parse_from(["parkdesk", "time-out", "7", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::TimeOut {
                parking_id: 7,
                yes: true
            })
        ));
    }

    #[test]
    fn time_in_requires_every_field() {
        let err = Cli::try_parse_from(["parkdesk", "time-in", "--plate", "ABC123"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["parkdesk", "list", "--json", "--config", "desk.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("desk.toml")));
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }
}
