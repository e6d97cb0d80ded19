// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made entities for tests that do not need a backend.

use chrono::{DateTime, Utc};

use parkdesk_core::{Parking, ParkingSlot, Vehicle, VehicleType};

pub fn vehicle(id: u64, plate_number: &str, vehicle_type: VehicleType) -> Vehicle {
    Vehicle {
        id,
        plate_number: plate_number.to_string(),
        vehicle_type,
        created_at: None,
        updated_at: None,
    }
}

pub fn slot(id: u64, parking_type: VehicleType, status: &str) -> ParkingSlot {
    ParkingSlot {
        id,
        name: format!("slot-{id}"),
        parking_type,
        status: status.to_string(),
        created_at: None,
        updated_at: None,
    }
}

/// An open session for `vehicle` in a slot of the same size.
pub fn open_parking(id: u64, vehicle: Vehicle, time_in: DateTime<Utc>) -> Parking {
    let parking_slot = slot(id, vehicle.vehicle_type, "occupied");
    Parking {
        id,
        parking_slot_id: parking_slot.id,
        vehicle_id: vehicle.id,
        time_in,
        time_out: None,
        fee: None,
        created_at: Some(time_in),
        updated_at: Some(time_in),
        vehicle,
        parking_slot,
    }
}

/// A session closed at `time_out` with `fee` charged.
pub fn closed_parking(
    id: u64,
    vehicle: Vehicle,
    time_in: DateTime<Utc>,
    time_out: DateTime<Utc>,
    fee: f64,
) -> Parking {
    let mut parking = open_parking(id, vehicle, time_in);
    parking.time_out = Some(time_out);
    parking.fee = Some(fee);
    parking.updated_at = Some(time_out);
    parking.parking_slot.status = "available".to_string();
    parking
}
