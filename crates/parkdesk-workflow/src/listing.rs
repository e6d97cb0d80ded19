// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parking list and the coordinator that refreshes it after lifecycle changes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use parkdesk_core::{LifecycleEvent, LifecycleListener, ParkdeskError, Parking, ParkingApi};

/// In-memory copy of `GET /parkings`.
///
/// Every refetch replaces the whole list; the last response to arrive wins.
/// Observers follow changes through [`ParkingListing::subscribe`].
pub struct ParkingListing {
    api: Arc<dyn ParkingApi>,
    parkings: watch::Sender<Vec<Parking>>,
}

impl ParkingListing {
    pub fn new(api: Arc<dyn ParkingApi>) -> Self {
        let (parkings, _) = watch::channel(Vec::new());
        Self { api, parkings }
    }

    /// Fetch the list and replace the current contents.
    ///
    /// On error the current contents are left untouched.
    pub async fn refetch(&self) -> Result<Vec<Parking>, ParkdeskError> {
        let parkings = self.api.list_parkings().await?;
        debug!(count = parkings.len(), "parking list refreshed");
        self.parkings.send_replace(parkings.clone());
        Ok(parkings)
    }

    pub fn snapshot(&self) -> Vec<Parking> {
        self.parkings.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Parking>> {
        self.parkings.subscribe()
    }

    pub fn find(&self, parking_id: u64) -> Option<Parking> {
        self.parkings
            .borrow()
            .iter()
            .find(|p| p.id == parking_id)
            .cloned()
    }
}

/// Refetches the listing whenever a workflow reports a lifecycle change.
pub struct RefreshCoordinator {
    listing: Arc<ParkingListing>,
}

impl RefreshCoordinator {
    pub fn new(listing: Arc<ParkingListing>) -> Self {
        Self { listing }
    }
}

#[async_trait]
impl LifecycleListener for RefreshCoordinator {
    async fn on_lifecycle_event(&self, event: &LifecycleEvent) {
        let parking_id = event.parking().id;
        if let Err(e) = self.listing.refetch().await {
            warn!(
                parking_id,
                error = %e,
                "failed to refresh parking list, keeping previous contents"
            );
        }
    }
}
