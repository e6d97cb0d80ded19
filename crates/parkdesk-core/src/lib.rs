// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Parkdesk parking console.
//!
//! This crate provides the backend entity types, the client-side entry
//! draft, the shared error type, and the trait seams ([`ParkingApi`],
//! [`LifecycleListener`]) that the workflows are written against.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ParkdeskError;
pub use traits::{LifecycleEvent, LifecycleListener, ParkingApi};
pub use types::{
    CreateParking, CreateVehicle, CreateVehicleParkingInput, DraftField, EntryPoint, Parking,
    ParkingAction, ParkingSlot, ValidatedEntry, Vehicle, VehicleLookup, VehicleType,
};

/// Entry point id submitted with every time-out; exits do not pass an entry point.
pub const EXIT_ENTRY_POINT_ID: u64 = 0;
