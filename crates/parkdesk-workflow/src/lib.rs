// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parking lifecycle workflows.
//!
//! - [`EntryWorkflow`] / [`EntryForm`]: time a vehicle in, registering it first if needed
//! - [`ExitWorkflow`]: time a vehicle out after confirmation and report the fee
//! - [`ParkingListing`] / [`RefreshCoordinator`]: the parking list, refetched after each change
//! - [`Desk`]: wires one [`parkdesk_core::ParkingApi`] into all of the above

pub mod desk;
pub mod entry;
pub mod exit;
pub mod guard;
pub mod listing;

pub use desk::Desk;
pub use entry::{EntryForm, EntryWorkflow};
pub use exit::{ConfirmTimeOut, ExitOutcome, ExitWorkflow, TIME_OUT_PROMPT, TimeOutReceipt};
pub use guard::{InFlight, InFlightGuard};
pub use listing::{ParkingListing, RefreshCoordinator};
