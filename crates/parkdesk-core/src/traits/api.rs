// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response contract of the parking backend.

use async_trait::async_trait;

use crate::error::ParkdeskError;
use crate::types::{CreateParking, CreateVehicle, EntryPoint, Parking, Vehicle, VehicleLookup};

/// The parking backend as seen by the lifecycle workflows.
///
/// Implemented over HTTP by `parkdesk-client` and in memory by
/// `parkdesk-test-utils`. Implementations never retry.
#[async_trait]
pub trait ParkingApi: Send + Sync + 'static {
    /// `GET /entrypoints`.
    async fn list_entry_points(&self) -> Result<Vec<EntryPoint>, ParkdeskError>;

    /// `GET /vehicles/plateNumber/{plateNumber}`.
    ///
    /// Never fails: a definitive "no such vehicle" is [`VehicleLookup::NotFound`]
    /// and every other failure is [`VehicleLookup::LookupFailed`].
    async fn find_vehicle_by_plate(&self, plate_number: &str) -> VehicleLookup;

    /// `POST /vehicles`.
    async fn create_vehicle(&self, vehicle: &CreateVehicle) -> Result<Vehicle, ParkdeskError>;

    /// `GET /parkings`.
    async fn list_parkings(&self) -> Result<Vec<Parking>, ParkdeskError>;

    /// `POST /parkings`. The backend owns the time-in/time-out transition.
    async fn create_parking(&self, parking: &CreateParking) -> Result<Parking, ParkdeskError>;
}
