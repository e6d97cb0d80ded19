// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The desk wires one API client into the entry and exit workflows and the
//! parking listing they refresh.

use std::sync::Arc;

use tracing::debug;

use parkdesk_config::model::DeskConfig;
use parkdesk_core::{
    CreateVehicleParkingInput, EntryPoint, LifecycleListener, ParkdeskError, Parking, ParkingApi,
};

use crate::entry::{EntryForm, EntryWorkflow};
use crate::exit::{ConfirmTimeOut, ExitOutcome, ExitWorkflow};
use crate::listing::{ParkingListing, RefreshCoordinator};

/// Parent coordinator for one operator session.
pub struct Desk {
    listing: Arc<ParkingListing>,
    entry: Arc<EntryWorkflow>,
    exit: ExitWorkflow,
}

impl Desk {
    pub fn new(api: Arc<dyn ParkingApi>, config: &DeskConfig) -> Self {
        let listing = Arc::new(ParkingListing::new(Arc::clone(&api)));
        let refresh: Arc<dyn LifecycleListener> =
            Arc::new(RefreshCoordinator::new(Arc::clone(&listing)));

        let entry = Arc::new(EntryWorkflow::new(
            Arc::clone(&api),
            Arc::clone(&refresh),
            config.lookup_failure,
        ));
        let exit = ExitWorkflow::new(api, refresh);

        Self {
            listing,
            entry,
            exit,
        }
    }

    pub fn listing(&self) -> &Arc<ParkingListing> {
        &self.listing
    }

    /// A fresh time-in form sharing this desk's entry workflow.
    pub fn entry_form(&self) -> EntryForm {
        EntryForm::new(Arc::clone(&self.entry))
    }

    pub async fn entry_points(&self) -> Result<Vec<EntryPoint>, ParkdeskError> {
        self.entry.entry_points().await
    }

    /// Reload the parking list from the backend.
    pub async fn refresh(&self) -> Result<Vec<Parking>, ParkdeskError> {
        self.listing.refetch().await
    }

    pub async fn time_in(
        &self,
        draft: &CreateVehicleParkingInput,
    ) -> Result<Parking, ParkdeskError> {
        self.entry.submit(draft).await
    }

    /// Time out the listed parking with id `parking_id`.
    ///
    /// The listing is reloaded once if the id is not in it. Nothing is sent
    /// unless `confirm` accepts.
    pub async fn time_out(
        &self,
        parking_id: u64,
        confirm: &dyn ConfirmTimeOut,
    ) -> Result<ExitOutcome, ParkdeskError> {
        let parking = match self.listing.find(parking_id) {
            Some(parking) => parking,
            None => {
                debug!(parking_id, "parking not in listing, reloading");
                self.listing.refetch().await?;
                self.listing
                    .find(parking_id)
                    .ok_or(ParkdeskError::UnknownParking { parking_id })?
            }
        };

        self.exit.time_out(&parking, confirm).await
    }
}
