// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator actions shared by the one-shot subcommands and the shell.

use std::io::IsTerminal;

use chrono::{Local, Utc};
use colored::Colorize;

use parkdesk_config::model::DeskConfig;
use parkdesk_core::{DraftField, ParkdeskError};
use parkdesk_workflow::{ConfirmTimeOut, Desk, ExitOutcome};

use crate::prompt::Terminal;
use crate::table;

/// A desk plus the operator's display preferences.
pub struct Console {
    desk: Desk,
    time_format: String,
    use_color: bool,
    terminal: Terminal,
}

impl Console {
    /// Colors are used only when stdout is a terminal and `plain` is off.
    pub fn new(desk: Desk, config: &DeskConfig, plain: bool) -> Self {
        Self {
            desk,
            time_format: config.time_format.clone(),
            use_color: !plain && std::io::stdout().is_terminal(),
            terminal: Terminal::new(),
        }
    }

    /// The line editor the shell and time-out confirmations read from.
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub async fn entry_points(&self) -> Result<(), ParkdeskError> {
        let entry_points = self.desk.entry_points().await?;
        print!("{}", table::render_entry_points(&entry_points));
        Ok(())
    }

    /// Reload and print the parking table, or its rows as JSON.
    pub async fn list(&self, json: bool) -> Result<(), ParkdeskError> {
        self.desk.refresh().await?;
        if json {
            let rows = self.current_rows();
            let text = serde_json::to_string_pretty(&rows)
                .map_err(|e| ParkdeskError::Internal(format!("failed to encode rows: {e}")))?;
            println!("{text}");
        } else {
            self.print_table();
        }
        Ok(())
    }

    pub async fn time_in(
        &self,
        plate_number: &str,
        vehicle_type: &str,
        entry_point: &str,
    ) -> Result<(), ParkdeskError> {
        let mut form = self.desk.entry_form();
        form.load_entry_points().await?;
        form.set_field(DraftField::PlateNumber, plate_number)?;
        form.set_field(DraftField::VehicleType, vehicle_type)?;
        form.set_field(DraftField::EntryPointId, entry_point)?;

        let parking = form.submit().await?;
        let message = format!(
            "{} timed in at slot {} ({})",
            parking.plate_number(),
            parking.parking_slot.name,
            parking.parking_slot.parking_type
        );
        self.success(&message);
        self.print_table();
        Ok(())
    }

    /// Time out a listed parking. `assume_yes` skips the prompt.
    pub async fn time_out(&self, parking_id: u64, assume_yes: bool) -> Result<(), ParkdeskError> {
        let auto = |_: &parkdesk_core::Parking| true;
        let confirm: &dyn ConfirmTimeOut = if assume_yes { &auto } else { &self.terminal };

        match self.desk.time_out(parking_id, confirm).await? {
            ExitOutcome::Cancelled => println!("Time-out cancelled."),
            ExitOutcome::Completed(receipt) => {
                self.success("Parking details");
                print!("{}", table::render_receipt(&receipt, &Local, &self.time_format));
                println!();
                self.print_table();
            }
        }
        Ok(())
    }

    /// Print every operator-facing message carried by `err`.
    pub fn report(&self, err: &ParkdeskError) {
        for message in err.display_messages() {
            if self.use_color {
                eprintln!("{}: {message}", "error".red());
            } else {
                eprintln!("error: {message}");
            }
        }
    }

    fn success(&self, message: &str) {
        if self.use_color {
            println!("{}", message.green());
        } else {
            println!("{message}");
        }
    }

    fn current_rows(&self) -> Vec<table::ParkingRow> {
        table::rows(
            &self.desk.listing().snapshot(),
            Utc::now(),
            &Local,
            &self.time_format,
        )
    }

    fn print_table(&self) {
        print!("{}", table::render_table(&self.current_rows(), self.use_color));
    }
}
