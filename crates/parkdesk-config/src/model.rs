// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Parkdesk console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Parkdesk configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParkdeskConfig {
    /// Parking backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Operator console behavior.
    #[serde(default)]
    pub desk: DeskConfig,
}

/// Parking backend connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the parking backend, e.g. `http://localhost:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

/// What the entry workflow does when a plate-number lookup fails for a
/// reason other than "not found".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupFailurePolicy {
    /// Surface the failure and stop the submission.
    #[default]
    Abort,
    /// Proceed as if the vehicle did not exist and try to create it.
    TreatAsNotFound,
}

/// Operator console behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeskConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Handling of failed vehicle lookups during time-in.
    #[serde(default)]
    pub lookup_failure: LookupFailurePolicy,

    /// `strftime` pattern for timestamps in the parking table.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            lookup_failure: LookupFailurePolicy::default(),
            time_format: default_time_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}
