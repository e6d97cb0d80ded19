// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text renderings of the parking table, the time-out details, and
//! the entry point options.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use colored::Colorize;
use serde::Serialize;

use tracing::warn;

use parkdesk_core::{EntryPoint, Parking};
use parkdesk_workflow::TimeOutReceipt;

const HEADERS: [&str; 8] = [
    "ID",
    "Plate Number",
    "Vehicle Type",
    "Parking Type",
    "Parking Duration",
    "Time In",
    "Time Out",
    "Action",
];

/// Relative duration in words: "a few seconds", "5 minutes", "a day", ...
pub fn humanize_duration(duration: TimeDelta) -> String {
    let secs = duration.num_seconds().unsigned_abs() as f64;
    let minutes = secs / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if secs < 45.0 {
        "a few seconds".to_string()
    } else if secs < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round().max(2.0))
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours.round().max(2.0))
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days.round().max(2.0))
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round().max(2.0))
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round().max(2.0))
    }
}

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingRow {
    pub id: u64,
    pub plate_number: String,
    pub vehicle_type: String,
    pub parking_type: String,
    pub parking_duration: String,
    pub time_in: String,
    pub time_out: String,
    pub action: String,
    pub fee: Option<f64>,
}

impl ParkingRow {
    fn cells(&self) -> [String; 8] {
        [
            self.id.to_string(),
            self.plate_number.clone(),
            self.vehicle_type.clone(),
            self.parking_type.clone(),
            self.parking_duration.clone(),
            self.time_in.clone(),
            self.time_out.clone(),
            self.action.clone(),
        ]
    }

    fn is_timed_out(&self) -> bool {
        self.action == "Timed Out"
    }
}

fn format_time<Tz>(time: DateTime<Utc>, tz: &Tz, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = time.with_timezone(tz);
    let mut out = String::new();
    if write!(out, "{}", local.format(time_format)).is_err() {
        warn!(time_format, "cannot render timestamp with time format, using RFC 3339");
        return local.to_rfc3339_opts(SecondsFormat::Secs, false);
    }
    out
}

/// Build display rows. Open sessions are measured up to `now`.
pub fn rows<Tz>(parkings: &[Parking], now: DateTime<Utc>, tz: &Tz, time_format: &str) -> Vec<ParkingRow>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    parkings
        .iter()
        .map(|p| {
            let end = p.time_out.unwrap_or(now);
            ParkingRow {
                id: p.id,
                plate_number: p.plate_number().to_string(),
                vehicle_type: p.vehicle.vehicle_type.to_string(),
                parking_type: p.parking_slot.parking_type.to_string(),
                parking_duration: humanize_duration(end - p.time_in),
                time_in: format_time(p.time_in, tz, time_format),
                time_out: p
                    .time_out
                    .map(|t| format_time(t, tz, time_format))
                    .unwrap_or_else(|| "NA".to_string()),
                action: if p.is_parked() { "Time Out" } else { "Timed Out" }.to_string(),
                fee: p.fee,
            }
        })
        .collect()
}

/// Render rows as an aligned table.
pub fn render_table(rows: &[ParkingRow], use_color: bool) -> String {
    if rows.is_empty() {
        return "No parkings yet.\n".to_string();
    }

    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = join_padded(&HEADERS.map(String::from), &widths);
    if use_color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');
    out.push_str(&widths.map(|w| "-".repeat(w)).join("  "));
    out.push('\n');

    for row in rows {
        let line = join_padded(&row.cells(), &widths);
        if use_color && row.is_timed_out() {
            out.push_str(&line.dimmed().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

fn join_padded(cells: &[String; 8], widths: &[usize; 8]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// The details shown after a completed time-out.
pub fn render_receipt<Tz>(receipt: &TimeOutReceipt, tz: &Tz, time_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let lines = [
        ("Plate Number", receipt.plate_number.clone()),
        ("Vehicle Type", receipt.vehicle_type.to_string()),
        ("Parking Slot", format!("{} ({})", receipt.slot_name, receipt.parking_type)),
        ("Time In", format_time(receipt.time_in, tz, time_format)),
        ("Time Out", format_time(receipt.time_out, tz, time_format)),
        ("Parking Duration", humanize_duration(receipt.duration())),
        ("Fee", format!("{:.2}", receipt.fee)),
    ];

    let mut out = String::new();
    for (label, value) in lines {
        out.push_str(&format!("  {label:<17} {value}\n"));
    }
    out
}

pub fn render_entry_points(entry_points: &[EntryPoint]) -> String {
    if entry_points.is_empty() {
        return "No entry points configured.\n".to_string();
    }
    entry_points
        .iter()
        .map(|e| format!("  {:>3}  {}\n", e.id, e.name))
        .collect()
}
