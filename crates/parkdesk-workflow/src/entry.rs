// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry workflow: register a vehicle if needed, then open a parking session.
//!
//! A submission resolves the vehicle by plate number first. An existing
//! vehicle of the same class is reused; one of a different class aborts the
//! submission before anything is created. An unknown plate creates the
//! vehicle, then the time-in is submitted for the resolved vehicle id.

use std::sync::Arc;

use tracing::{debug, info, warn};

use parkdesk_config::model::LookupFailurePolicy;
use parkdesk_core::{
    CreateParking, CreateVehicle, CreateVehicleParkingInput, DraftField, EntryPoint,
    LifecycleEvent, LifecycleListener, ParkdeskError, Parking, ParkingAction, ParkingApi,
    ValidatedEntry, Vehicle, VehicleLookup,
};

use crate::guard::InFlight;

/// Submits time-ins against the backend.
pub struct EntryWorkflow {
    api: Arc<dyn ParkingApi>,
    listener: Arc<dyn LifecycleListener>,
    lookup_failure: LookupFailurePolicy,
    in_flight: InFlight,
}

impl EntryWorkflow {
    pub fn new(
        api: Arc<dyn ParkingApi>,
        listener: Arc<dyn LifecycleListener>,
        lookup_failure: LookupFailurePolicy,
    ) -> Self {
        Self {
            api,
            listener,
            lookup_failure,
            in_flight: InFlight::new(),
        }
    }

    /// The options an operator may pick as entry point.
    pub async fn entry_points(&self) -> Result<Vec<EntryPoint>, ParkdeskError> {
        self.api.list_entry_points().await
    }

    /// Time a vehicle in from a complete draft.
    ///
    /// Returns the new open parking. The listener is notified only on success.
    pub async fn submit(&self, draft: &CreateVehicleParkingInput) -> Result<Parking, ParkdeskError> {
        let entry = draft.validate()?;
        let _guard = self
            .in_flight
            .try_acquire(&entry.plate_number)
            .ok_or_else(|| ParkdeskError::SubmissionInFlight {
                key: entry.plate_number.clone(),
            })?;

        let vehicle = self.resolve_vehicle(&entry).await?;
        let parking = self
            .api
            .create_parking(&CreateParking {
                entry_point_id: entry.entry_point_id,
                vehicle_id: vehicle.id,
                action: ParkingAction::TimeIn,
            })
            .await?;

        info!(
            parking_id = parking.id,
            plate_number = %entry.plate_number,
            slot = %parking.parking_slot.name,
            entry_point_id = entry.entry_point_id,
            "vehicle timed in"
        );
        self.listener
            .on_lifecycle_event(&LifecycleEvent::TimedIn(parking.clone()))
            .await;
        Ok(parking)
    }

    async fn resolve_vehicle(&self, entry: &ValidatedEntry) -> Result<Vehicle, ParkdeskError> {
        match self.api.find_vehicle_by_plate(&entry.plate_number).await {
            VehicleLookup::Found(vehicle) if vehicle.vehicle_type == entry.vehicle_type => {
                debug!(vehicle_id = vehicle.id, "reusing registered vehicle");
                Ok(vehicle)
            }
            VehicleLookup::Found(vehicle) => {
                debug!(
                    vehicle_id = vehicle.id,
                    registered = %vehicle.vehicle_type,
                    requested = %entry.vehicle_type,
                    "plate number registered with another vehicle type"
                );
                Err(ParkdeskError::VehicleConflict {
                    plate_number: entry.plate_number.clone(),
                })
            }
            VehicleLookup::NotFound => self.create_vehicle(entry).await,
            VehicleLookup::LookupFailed(reason) => match self.lookup_failure {
                LookupFailurePolicy::Abort => Err(ParkdeskError::LookupFailed {
                    plate_number: entry.plate_number.clone(),
                    reason,
                }),
                LookupFailurePolicy::TreatAsNotFound => {
                    warn!(
                        plate_number = %entry.plate_number,
                        reason = %reason,
                        "vehicle lookup failed, treating as not found"
                    );
                    self.create_vehicle(entry).await
                }
            },
        }
    }

    async fn create_vehicle(&self, entry: &ValidatedEntry) -> Result<Vehicle, ParkdeskError> {
        let vehicle = self
            .api
            .create_vehicle(&CreateVehicle {
                plate_number: entry.plate_number.clone(),
                vehicle_type: entry.vehicle_type,
            })
            .await?;
        info!(vehicle_id = vehicle.id, plate_number = %vehicle.plate_number, "vehicle registered");
        Ok(vehicle)
    }
}

/// The time-in form: a draft, its select options, and the last submission's errors.
pub struct EntryForm {
    workflow: Arc<EntryWorkflow>,
    draft: CreateVehicleParkingInput,
    entry_points: Vec<EntryPoint>,
    submitting: bool,
    error_messages: Vec<String>,
}

impl EntryForm {
    pub fn new(workflow: Arc<EntryWorkflow>) -> Self {
        Self {
            workflow,
            draft: CreateVehicleParkingInput::default(),
            entry_points: Vec::new(),
            submitting: false,
            error_messages: Vec::new(),
        }
    }

    /// Fetch the entry point options.
    pub async fn load_entry_points(&mut self) -> Result<&[EntryPoint], ParkdeskError> {
        self.entry_points = self.workflow.entry_points().await?;
        Ok(&self.entry_points)
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    /// Set one field from operator input. Once options are loaded, the entry
    /// point must be one of them.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), ParkdeskError> {
        let mut next = self.draft.clone();
        next.set_field(field, value)?;

        let unknown_entry_point = field == DraftField::EntryPointId
            && !self.entry_points.is_empty()
            && next
                .entry_point_id
                .is_some_and(|id| !self.entry_points.iter().any(|e| e.id == id));
        if unknown_entry_point {
            return Err(ParkdeskError::InvalidField {
                field: "entry point",
                value: value.trim().to_string(),
            });
        }

        self.draft = next;
        Ok(())
    }

    pub fn draft(&self) -> &CreateVehicleParkingInput {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Messages from the last failed submission.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.is_complete()
    }

    /// Submit the draft. On success the draft is cleared; on failure it is
    /// kept and the error's messages are stored for display.
    pub async fn submit(&mut self) -> Result<Parking, ParkdeskError> {
        self.error_messages.clear();
        self.submitting = true;
        let result = self.workflow.submit(&self.draft).await;
        self.submitting = false;

        match &result {
            Ok(_) => self.draft = CreateVehicleParkingInput::default(),
            Err(e) => self.error_messages = e.display_messages(),
        }
        result
    }
}
