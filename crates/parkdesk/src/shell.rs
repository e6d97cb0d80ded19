// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parkdesk shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! One desk is kept for the whole session, so the parking list survives
//! between commands and is refreshed after every time-in and time-out.

use colored::Colorize;
use rustyline::error::ReadlineError;

use parkdesk_core::ParkdeskError;

use crate::console::Console;

const HELP: &str = "\
Commands:
  list                                 show the parking table
  entry-points                         show entry points and their ids
  in <plate> <vehicle-type> <entry>    time a vehicle in
  out <parking-id> [-y]                time a parking out
  help                                 show this help
  quit                                 leave the shell";

/// A parsed shell line.
#[derive(Debug, PartialEq)]
enum ShellCommand {
    List,
    EntryPoints,
    TimeIn {
        plate_number: String,
        vehicle_type: String,
        entry_point: String,
    },
    TimeOut {
        parking_id: u64,
        assume_yes: bool,
    },
    Help,
    Quit,
}

/// Parse one line. The plate number may contain spaces: everything between
/// `in` and the last two words is the plate.
fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = words.split_first() else {
        return Err("empty command".to_string());
    };

    match (*verb, args) {
        ("list" | "ls", []) => Ok(ShellCommand::List),
        ("entry-points" | "entries", []) => Ok(ShellCommand::EntryPoints),
        ("in", args) if args.len() >= 3 => {
            let (plate, rest) = args.split_at(args.len() - 2);
            Ok(ShellCommand::TimeIn {
                plate_number: plate.join(" "),
                vehicle_type: rest[0].to_string(),
                entry_point: rest[1].to_string(),
            })
        }
        ("in", _) => Err("usage: in <plate> <vehicle-type> <entry-point>".to_string()),
        ("out", [id]) | ("out", [id, "-y" | "--yes"]) | ("out", ["-y" | "--yes", id]) => {
            let parking_id = id
                .parse()
                .map_err(|_| format!("`{id}` is not a parking id"))?;
            Ok(ShellCommand::TimeOut {
                parking_id,
                assume_yes: args.len() == 2,
            })
        }
        ("out", _) => Err("usage: out <parking-id> [-y]".to_string()),
        ("help" | "?", _) => Ok(ShellCommand::Help),
        ("quit" | "exit" | "/quit", _) => Ok(ShellCommand::Quit),
        (other, _) => Err(format!("unknown command `{other}`, try `help`")),
    }
}

async fn dispatch(console: &Console, command: ShellCommand) -> Result<(), ParkdeskError> {
    match command {
        ShellCommand::List => console.list(false).await,
        ShellCommand::EntryPoints => console.entry_points().await,
        ShellCommand::TimeIn {
            plate_number,
            vehicle_type,
            entry_point,
        } => {
            console
                .time_in(&plate_number, &vehicle_type, &entry_point)
                .await
        }
        ShellCommand::TimeOut {
            parking_id,
            assume_yes,
        } => console.time_out(parking_id, assume_yes).await,
        ShellCommand::Help => {
            println!("{HELP}");
            Ok(())
        }
        ShellCommand::Quit => Ok(()),
    }
}

/// Runs the `parkdesk shell` interactive REPL.
pub async fn run_shell(console: &Console) -> Result<(), ParkdeskError> {
    println!("{}", "parkdesk shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());

    if let Err(e) = console.list(false).await {
        console.report(&e);
    }

    let prompt = format!("{}> ", "parkdesk".green());
    loop {
        match console.terminal().read_line(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                console.terminal().add_history(trimmed);

                match parse_line(trimmed) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = dispatch(console, command).await {
                            console.report(&e);
                        }
                    }
                    Err(usage) => eprintln!("{}", usage.yellow()),
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}
