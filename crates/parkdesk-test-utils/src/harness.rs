// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end workflow testing.
//!
//! `TestHarness` wires a real [`Desk`] to a [`MockParkingApi`] so tests can
//! drive time-ins and time-outs and then inspect both the refreshed listing
//! and the backend state.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use parkdesk_config::model::{DeskConfig, LookupFailurePolicy};
use parkdesk_core::{
    CreateVehicleParkingInput, ParkdeskError, Parking, ParkingApi, VehicleType,
};
use parkdesk_workflow::{Desk, ExitOutcome};

use crate::mock_api::MockParkingApi;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    vehicles: Vec<(String, VehicleType)>,
    lookup_failure: LookupFailurePolicy,
    latency: Option<Duration>,
    clock: Option<DateTime<Utc>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            lookup_failure: LookupFailurePolicy::default(),
            latency: None,
            clock: None,
        }
    }

    /// Register a vehicle in the backend before the test starts.
    pub fn with_vehicle(mut self, plate_number: &str, vehicle_type: VehicleType) -> Self {
        self.vehicles.push((plate_number.to_string(), vehicle_type));
        self
    }

    pub fn with_lookup_failure(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failure = policy;
        self
    }

    /// Delay backend writes so concurrent submissions overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Freeze the backend clock.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub async fn build(self) -> TestHarness {
        let mut api = MockParkingApi::new();
        if let Some(latency) = self.latency {
            api = api.with_latency(latency);
        }
        if let Some(now) = self.clock {
            api.set_clock(now).await;
        }
        for (plate_number, vehicle_type) in &self.vehicles {
            api.seed_vehicle(plate_number, *vehicle_type).await;
        }
        let api = Arc::new(api);

        let config = DeskConfig {
            lookup_failure: self.lookup_failure,
            ..DeskConfig::default()
        };
        let desk = Desk::new(Arc::clone(&api) as Arc<dyn ParkingApi>, &config);
        tracing::debug!(vehicles = self.vehicles.len(), "test harness ready");

        TestHarness { api, desk }
    }
}

/// A desk wired to an in-memory backend.
pub struct TestHarness {
    api: Arc<MockParkingApi>,
    desk: Desk,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn api(&self) -> &MockParkingApi {
        &self.api
    }

    pub fn desk(&self) -> &Desk {
        &self.desk
    }

    /// Time a vehicle in from a complete draft.
    pub async fn time_in(
        &self,
        plate_number: &str,
        vehicle_type: VehicleType,
        entry_point_id: u64,
    ) -> Result<Parking, ParkdeskError> {
        let draft = CreateVehicleParkingInput {
            plate_number: Some(plate_number.to_string()),
            vehicle_type: Some(vehicle_type),
            entry_point_id: Some(entry_point_id),
        };
        self.desk.time_in(&draft).await
    }

    /// Time a parking out, confirming the prompt.
    pub async fn time_out(&self, parking_id: u64) -> Result<ExitOutcome, ParkdeskError> {
        self.desk.time_out(parking_id, &|_: &Parking| true).await
    }
}
