// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Parkdesk console.

use thiserror::Error;

/// Message shown when a plate number is already registered with another vehicle class.
pub const VEHICLE_CONFLICT_MESSAGE: &str = "Vehicle with the same plate number already exists";

/// The primary error type used by the API client and the lifecycle workflows.
#[derive(Debug, Error)]
pub enum ParkdeskError {
    /// Configuration errors (invalid base URL, unusable client settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required draft field has not been filled in yet.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Operator input could not be coerced into the field's type.
    #[error("invalid {field}: `{value}`")]
    InvalidField { field: &'static str, value: String },

    /// The plate number is registered with a different vehicle class.
    #[error("{}", VEHICLE_CONFLICT_MESSAGE)]
    VehicleConflict { plate_number: String },

    /// The vehicle lookup failed for a reason other than "not found".
    #[error("vehicle lookup for `{plate_number}` failed: {reason}")]
    LookupFailed { plate_number: String, reason: String },

    /// Another submission for the same key is still waiting on the backend.
    #[error("a submission for {key} is already in progress")]
    SubmissionInFlight { key: String },

    /// The parking session has already been closed.
    #[error("parking {parking_id} is already timed out")]
    AlreadyTimedOut { parking_id: u64 },

    /// No parking with this id is in the current listing.
    #[error("parking {parking_id} was not found")]
    UnknownParking { parking_id: u64 },

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("request failed: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A 2xx response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A decoded response is missing data the workflow depends on.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParkdeskError {
    /// Messages to show the operator, one alert per entry.
    ///
    /// Backend errors keep every message they carried; everything else
    /// collapses to its display string.
    pub fn display_messages(&self) -> Vec<String> {
        match self {
            ParkdeskError::Api { messages, .. } => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Whether the backend rejected the request (as opposed to never answering).
    pub fn is_backend_rejection(&self) -> bool {
        matches!(self, ParkdeskError::Api { .. })
    }
}
