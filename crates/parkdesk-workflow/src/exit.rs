// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exit workflow: confirm, close the open session, and report the fee.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use parkdesk_core::{
    CreateParking, EXIT_ENTRY_POINT_ID, LifecycleEvent, LifecycleListener, ParkdeskError,
    Parking, ParkingAction, ParkingApi, VehicleType,
};

use crate::guard::InFlight;

/// Prompt shown before a time-out is submitted.
pub const TIME_OUT_PROMPT: &str =
    "Are you sure you want to time out? You can't undo this action afterwards.";

/// Asks the operator to acknowledge a time-out.
pub trait ConfirmTimeOut: Send + Sync {
    fn confirm(&self, parking: &Parking) -> bool;
}

impl<F> ConfirmTimeOut for F
where
    F: Fn(&Parking) -> bool + Send + Sync,
{
    fn confirm(&self, parking: &Parking) -> bool {
        self(parking)
    }
}

/// What the operator sees after a completed time-out.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOutReceipt {
    pub parking_id: u64,
    pub plate_number: String,
    pub vehicle_type: VehicleType,
    pub parking_type: VehicleType,
    pub slot_name: String,
    pub time_in: DateTime<Utc>,
    pub time_out: DateTime<Utc>,
    pub fee: f64,
}

impl TimeOutReceipt {
    /// Build a receipt from the closed parking the backend returned.
    pub fn from_parking(parking: &Parking) -> Result<Self, ParkdeskError> {
        let time_out = parking.time_out.ok_or_else(|| {
            ParkdeskError::MalformedResponse(format!(
                "time-out of parking {} returned no timeOut",
                parking.id
            ))
        })?;
        let fee = parking.fee.ok_or_else(|| {
            ParkdeskError::MalformedResponse(format!(
                "time-out of parking {} returned no fee",
                parking.id
            ))
        })?;

        Ok(Self {
            parking_id: parking.id,
            plate_number: parking.plate_number().to_string(),
            vehicle_type: parking.vehicle.vehicle_type,
            parking_type: parking.parking_slot.parking_type,
            slot_name: parking.parking_slot.name.clone(),
            time_in: parking.time_in,
            time_out,
            fee,
        })
    }

    pub fn duration(&self) -> TimeDelta {
        self.time_out - self.time_in
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExitOutcome {
    /// The operator declined the confirmation. Nothing was submitted.
    Cancelled,
    Completed(TimeOutReceipt),
}

/// Submits time-outs against the backend.
pub struct ExitWorkflow {
    api: Arc<dyn ParkingApi>,
    listener: Arc<dyn LifecycleListener>,
    in_flight: InFlight,
}

impl ExitWorkflow {
    pub fn new(api: Arc<dyn ParkingApi>, listener: Arc<dyn LifecycleListener>) -> Self {
        Self {
            api,
            listener,
            in_flight: InFlight::new(),
        }
    }

    /// Time out `parking` once `confirm` acknowledges it.
    ///
    /// A parking that already has a time-out is rejected before the prompt.
    /// The backend locates the open session from the vehicle id and computes
    /// the fee.
    pub async fn time_out(
        &self,
        parking: &Parking,
        confirm: &dyn ConfirmTimeOut,
    ) -> Result<ExitOutcome, ParkdeskError> {
        if !parking.is_parked() {
            return Err(ParkdeskError::AlreadyTimedOut {
                parking_id: parking.id,
            });
        }
        if !confirm.confirm(parking) {
            debug!(parking_id = parking.id, "time-out cancelled by operator");
            return Ok(ExitOutcome::Cancelled);
        }

        let _guard = self
            .in_flight
            .try_acquire(parking.vehicle_id)
            .ok_or_else(|| ParkdeskError::SubmissionInFlight {
                key: format!("vehicle {}", parking.vehicle_id),
            })?;

        let closed = self
            .api
            .create_parking(&CreateParking {
                entry_point_id: EXIT_ENTRY_POINT_ID,
                vehicle_id: parking.vehicle_id,
                action: ParkingAction::TimeOut,
            })
            .await?;

        // The session is closed server-side even if the body is incomplete.
        self.listener
            .on_lifecycle_event(&LifecycleEvent::TimedOut(closed.clone()))
            .await;

        let receipt = TimeOutReceipt::from_parking(&closed)?;
        info!(
            parking_id = receipt.parking_id,
            plate_number = %receipt.plate_number,
            fee = receipt.fee,
            "vehicle timed out"
        );
        Ok(ExitOutcome::Completed(receipt))
    }
}
