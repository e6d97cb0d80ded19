// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory parking backend for deterministic testing.
//!
//! `MockParkingApi` implements `ParkingApi` with the same contract as the
//! REST backend: plate uniqueness, slot allocation by size, time-out of the
//! open session for a vehicle, and fee computation. Failures can be queued
//! per endpoint and every call is counted.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use parkdesk_core::{
    CreateParking, CreateVehicle, EntryPoint, ParkdeskError, Parking, ParkingAction, ParkingApi,
    ParkingSlot, Vehicle, VehicleLookup, VehicleType,
};

/// Flat charge covering the first hours of any session.
pub const FLAT_RATE: f64 = 40.0;
/// Hours covered by [`FLAT_RATE`].
pub const FLAT_RATE_HOURS: i64 = 3;
/// Charge for every full 24 hours parked.
pub const DAILY_RATE: f64 = 5000.0;

/// Hourly rate after the flat period, by slot size.
pub fn hourly_rate(slot_type: VehicleType) -> f64 {
    match slot_type {
        VehicleType::Small => 20.0,
        VehicleType::Medium => 60.0,
        VehicleType::Large => 100.0,
    }
}

/// Fee for a session of `duration` in a slot of `slot_type`.
///
/// Every started hour is billed. Full days are billed at [`DAILY_RATE`]; the
/// remainder pays the flat rate for its first hours and the slot's hourly
/// rate after that.
pub fn standard_fee(slot_type: VehicleType, duration: TimeDelta) -> f64 {
    let minutes = duration.num_minutes().max(0);
    let hours = (minutes + 59) / 60;
    let days = hours / 24;
    let remainder = hours % 24;

    let mut fee = days as f64 * DAILY_RATE;
    if remainder > 0 || days == 0 {
        fee += FLAT_RATE;
        fee += (remainder - FLAT_RATE_HOURS).max(0) as f64 * hourly_rate(slot_type);
    }
    fee
}

fn size_rank(size: VehicleType) -> u8 {
    match size {
        VehicleType::Small => 0,
        VehicleType::Medium => 1,
        VehicleType::Large => 2,
    }
}

/// Per-endpoint call counters.
#[derive(Debug, Default)]
struct CallCounts {
    list_entry_points: AtomicUsize,
    lookups: AtomicUsize,
    create_vehicle: AtomicUsize,
    list_parkings: AtomicUsize,
    create_parking: AtomicUsize,
}

#[derive(Debug)]
struct BackendState {
    entry_points: Vec<EntryPoint>,
    vehicles: Vec<Vehicle>,
    slots: Vec<ParkingSlot>,
    parkings: Vec<Parking>,
    next_vehicle_id: u64,
    next_parking_id: u64,
    clock: Option<DateTime<Utc>>,
    lookup_failures: VecDeque<String>,
    vehicle_rejections: VecDeque<ParkdeskError>,
    parking_rejections: VecDeque<ParkdeskError>,
    list_rejections: VecDeque<ParkdeskError>,
}

impl BackendState {
    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}

/// A mock parking backend with in-memory state.
pub struct MockParkingApi {
    state: Mutex<BackendState>,
    calls: CallCounts,
    latency: Option<Duration>,
}

fn rejection(status: u16, message: impl Into<String>) -> ParkdeskError {
    ParkdeskError::Api {
        status,
        messages: vec![message.into()],
    }
}

impl MockParkingApi {
    /// Three entry points and two slots of each size, all free.
    pub fn new() -> Self {
        let entry_points = ["Entry A", "Entry B", "Entry C"]
            .iter()
            .zip(1..)
            .map(|(name, id)| EntryPoint {
                id,
                name: name.to_string(),
                created_at: None,
                updated_at: None,
            })
            .collect();

        let mut slots = Vec::new();
        for (prefix, size) in [
            ("S", VehicleType::Small),
            ("M", VehicleType::Medium),
            ("L", VehicleType::Large),
        ] {
            for n in 1..=2 {
                slots.push(ParkingSlot {
                    id: slots.len() as u64 + 1,
                    name: format!("{prefix}-{n}"),
                    parking_type: size,
                    status: "available".to_string(),
                    created_at: None,
                    updated_at: None,
                });
            }
        }

        Self::with_layout(entry_points, slots)
    }

    /// A backend with exactly these entry points and slots.
    pub fn with_layout(entry_points: Vec<EntryPoint>, slots: Vec<ParkingSlot>) -> Self {
        Self {
            state: Mutex::new(BackendState {
                entry_points,
                vehicles: Vec::new(),
                slots,
                parkings: Vec::new(),
                next_vehicle_id: 1,
                next_parking_id: 1,
                clock: None,
                lookup_failures: VecDeque::new(),
                vehicle_rejections: VecDeque::new(),
                parking_rejections: VecDeque::new(),
                list_rejections: VecDeque::new(),
            }),
            calls: CallCounts::default(),
            latency: None,
        }
    }

    /// Delay every write endpoint by `latency`, so submissions can overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register a vehicle directly, bypassing the API.
    pub async fn seed_vehicle(&self, plate_number: &str, vehicle_type: VehicleType) -> Vehicle {
        let mut state = self.state.lock().await;
        let vehicle = Vehicle {
            id: state.next_vehicle_id,
            plate_number: plate_number.to_string(),
            vehicle_type,
            created_at: Some(state.now()),
            updated_at: Some(state.now()),
        };
        state.next_vehicle_id += 1;
        state.vehicles.push(vehicle.clone());
        vehicle
    }

    /// Freeze the backend clock at `now`.
    pub async fn set_clock(&self, now: DateTime<Utc>) {
        self.state.lock().await.clock = Some(now);
    }

    /// Move the backend clock forward, freezing it first if needed.
    pub async fn advance_clock(&self, by: TimeDelta) {
        let mut state = self.state.lock().await;
        let now = state.now();
        state.clock = Some(now + by);
    }

    /// The next vehicle lookup fails with `reason` instead of answering.
    pub async fn fail_next_lookup(&self, reason: impl Into<String>) {
        self.state.lock().await.lookup_failures.push_back(reason.into());
    }

    /// The next `POST /vehicles` is rejected with `status` and `messages`.
    pub async fn reject_next_create_vehicle(&self, status: u16, messages: Vec<String>) {
        self.state
            .lock()
            .await
            .vehicle_rejections
            .push_back(ParkdeskError::Api { status, messages });
    }

    /// The next `POST /parkings` is rejected with `status` and `messages`.
    pub async fn reject_next_create_parking(&self, status: u16, messages: Vec<String>) {
        self.state
            .lock()
            .await
            .parking_rejections
            .push_back(ParkdeskError::Api { status, messages });
    }

    /// The next `GET /parkings` is rejected with `status` and `messages`.
    pub async fn reject_next_list_parkings(&self, status: u16, messages: Vec<String>) {
        self.state
            .lock()
            .await
            .list_rejections
            .push_back(ParkdeskError::Api { status, messages });
    }

    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.state.lock().await.vehicles.clone()
    }

    pub async fn parkings(&self) -> Vec<Parking> {
        self.state.lock().await.parkings.clone()
    }

    pub async fn slots(&self) -> Vec<ParkingSlot> {
        self.state.lock().await.slots.clone()
    }

    pub fn list_entry_points_calls(&self) -> usize {
        self.calls.list_entry_points.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.calls.lookups.load(Ordering::SeqCst)
    }

    pub fn create_vehicle_calls(&self) -> usize {
        self.calls.create_vehicle.load(Ordering::SeqCst)
    }

    pub fn list_parkings_calls(&self) -> usize {
        self.calls.list_parkings.load(Ordering::SeqCst)
    }

    pub fn create_parking_calls(&self) -> usize {
        self.calls.create_parking.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn time_in(state: &mut BackendState, request: &CreateParking) -> Result<Parking, ParkdeskError> {
        if !state.entry_points.iter().any(|e| e.id == request.entry_point_id) {
            return Err(rejection(404, "Entry point not found"));
        }
        let vehicle = state
            .vehicles
            .iter()
            .find(|v| v.id == request.vehicle_id)
            .cloned()
            .ok_or_else(|| rejection(404, "Vehicle not found"))?;
        if state
            .parkings
            .iter()
            .any(|p| p.vehicle_id == vehicle.id && p.is_parked())
        {
            return Err(rejection(400, "Vehicle is already parked"));
        }

        let now = state.now();
        let slot = state
            .slots
            .iter_mut()
            .filter(|s| s.status == "available")
            .filter(|s| size_rank(s.parking_type) >= size_rank(vehicle.vehicle_type))
            .min_by_key(|s| (size_rank(s.parking_type), s.id))
            .ok_or_else(|| rejection(400, "No available parking slot"))?;
        slot.status = "occupied".to_string();
        slot.updated_at = Some(now);
        let slot = slot.clone();

        let parking = Parking {
            id: state.next_parking_id,
            parking_slot_id: slot.id,
            vehicle_id: vehicle.id,
            time_in: now,
            time_out: None,
            fee: None,
            created_at: Some(now),
            updated_at: Some(now),
            vehicle,
            parking_slot: slot,
        };
        state.next_parking_id += 1;
        state.parkings.push(parking.clone());
        Ok(parking)
    }

    fn time_out(state: &mut BackendState, request: &CreateParking) -> Result<Parking, ParkdeskError> {
        let now = state.now();
        let parking = state
            .parkings
            .iter_mut()
            .find(|p| p.vehicle_id == request.vehicle_id && p.is_parked())
            .ok_or_else(|| rejection(400, "Vehicle has no active parking"))?;

        parking.time_out = Some(now);
        parking.fee = Some(standard_fee(
            parking.parking_slot.parking_type,
            now - parking.time_in,
        ));
        parking.updated_at = Some(now);
        parking.parking_slot.status = "available".to_string();
        let closed = parking.clone();

        if let Some(slot) = state.slots.iter_mut().find(|s| s.id == closed.parking_slot_id) {
            slot.status = "available".to_string();
            slot.updated_at = Some(now);
        }
        Ok(closed)
    }
}

impl Default for MockParkingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParkingApi for MockParkingApi {
    async fn list_entry_points(&self) -> Result<Vec<EntryPoint>, ParkdeskError> {
        self.calls.list_entry_points.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().await.entry_points.clone())
    }

    async fn find_vehicle_by_plate(&self, plate_number: &str) -> VehicleLookup {
        self.calls.lookups.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        if let Some(reason) = state.lookup_failures.pop_front() {
            return VehicleLookup::LookupFailed(reason);
        }
        match state.vehicles.iter().find(|v| v.plate_number == plate_number) {
            Some(vehicle) => VehicleLookup::Found(vehicle.clone()),
            None => VehicleLookup::NotFound,
        }
    }

    async fn create_vehicle(&self, request: &CreateVehicle) -> Result<Vehicle, ParkdeskError> {
        self.calls.create_vehicle.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        if let Some(err) = state.vehicle_rejections.pop_front() {
            return Err(err);
        }
        if state
            .vehicles
            .iter()
            .any(|v| v.plate_number == request.plate_number)
        {
            return Err(rejection(409, "Plate number already registered"));
        }

        let now = state.now();
        let vehicle = Vehicle {
            id: state.next_vehicle_id,
            plate_number: request.plate_number.clone(),
            vehicle_type: request.vehicle_type,
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.next_vehicle_id += 1;
        state.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn list_parkings(&self) -> Result<Vec<Parking>, ParkdeskError> {
        self.calls.list_parkings.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().await;
        if let Some(err) = state.list_rejections.pop_front() {
            return Err(err);
        }
        Ok(state.parkings.clone())
    }

    async fn create_parking(&self, request: &CreateParking) -> Result<Parking, ParkdeskError> {
        self.calls.create_parking.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.state.lock().await;
        if let Some(err) = state.parking_rejections.pop_front() {
            return Err(err);
        }
        match request.action {
            ParkingAction::TimeIn => Self::time_in(&mut state, request),
            ParkingAction::TimeOut => Self::time_out(&mut state, request),
        }
    }
}
