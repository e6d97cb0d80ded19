// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the parking backend REST API.
//!
//! Provides [`HttpParkingApi`], the [`ParkingApi`] implementation used by the
//! console. Requests are never retried; a failed submission is reported and
//! left for the operator to resubmit.

use std::time::Duration;

use async_trait::async_trait;
use parkdesk_config::model::ApiConfig;
use parkdesk_core::types::ApiErrorBody;
use parkdesk_core::{
    CreateParking, CreateVehicle, EntryPoint, ParkdeskError, Parking, ParkingApi, Vehicle,
    VehicleLookup,
};
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client for the parking backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpParkingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpParkingApi {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ParkdeskError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            ParkdeskError::Config(format!("invalid backend base URL `{base_url}`: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ParkdeskError::Config(format!(
                "backend base URL `{base_url}` cannot carry a path"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ParkdeskError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ParkdeskError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ParkdeskError> {
        let url = self.endpoint(segments);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;
        read_json(url, response).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ParkdeskError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(url, response).await
    }
}

#[async_trait]
impl ParkingApi for HttpParkingApi {
    async fn list_entry_points(&self) -> Result<Vec<EntryPoint>, ParkdeskError> {
        self.get_json(&["entrypoints"]).await
    }

    async fn find_vehicle_by_plate(&self, plate_number: &str) -> VehicleLookup {
        let url = self.endpoint(&["vehicles", "plateNumber", plate_number]);
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return VehicleLookup::LookupFailed(transport_error(e).to_string()),
        };

        let status = response.status();
        debug!(%url, %status, "vehicle lookup response received");

        if status == StatusCode::NOT_FOUND {
            return VehicleLookup::NotFound;
        }
        if !status.is_success() {
            return VehicleLookup::LookupFailed(error_from_response(response).await.to_string());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return VehicleLookup::LookupFailed(transport_error(e).to_string()),
        };
        // Some backends answer a miss with 200 and an empty or null body.
        match serde_json::from_str::<Option<Vehicle>>(&body) {
            Ok(Some(vehicle)) => VehicleLookup::Found(vehicle),
            Ok(None) => VehicleLookup::NotFound,
            Err(_) if body.trim().is_empty() => VehicleLookup::NotFound,
            Err(e) => {
                warn!(%url, error = %e, "vehicle lookup returned an undecodable body");
                VehicleLookup::LookupFailed(format!("failed to decode vehicle: {e}"))
            }
        }
    }

    async fn create_vehicle(&self, vehicle: &CreateVehicle) -> Result<Vehicle, ParkdeskError> {
        self.post_json(&["vehicles"], vehicle).await
    }

    async fn list_parkings(&self) -> Result<Vec<Parking>, ParkdeskError> {
        self.get_json(&["parkings"]).await
    }

    async fn create_parking(&self, parking: &CreateParking) -> Result<Parking, ParkdeskError> {
        self.post_json(&["parkings"], parking).await
    }
}

fn transport_error(e: reqwest::Error) -> ParkdeskError {
    ParkdeskError::Transport {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Decodes a 2xx body as `T`, or turns any other status into an `Api` error.
async fn read_json<T: DeserializeOwned>(url: Url, response: Response) -> Result<T, ParkdeskError> {
    let status = response.status();
    debug!(%url, %status, "backend response received");

    if !status.is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| ParkdeskError::Decode {
        message: format!("{url}: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Builds an `Api` error with the body's `message` normalized to a list.
async fn error_from_response(response: Response) -> ParkdeskError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let messages = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.into_messages())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| vec![format!("backend returned {status}")]);

    warn!(%status, ?messages, "backend rejected request");
    ParkdeskError::Api {
        status: status.as_u16(),
        messages,
    }
}
